//! Chess primitives, the board snapshot and the movement rules of the puzzle.

pub mod bitboard;
pub mod core;
pub mod position;
pub mod rules;
