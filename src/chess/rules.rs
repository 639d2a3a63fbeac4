//! Move legality for a single moving piece.
//!
//! The rules are purely geometric: there is no notion of check, pins or turn
//! order. Sliding pieces (rook, bishop, queen) need every square strictly
//! between the source and the destination to be empty, regardless of who owns
//! the blocking piece. The destination itself may be occupied. Knights jump.
//!
//! A move that does not change the square is never valid.

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{PieceKind, Square};
use crate::chess::position::Position;

/// Checks whether the piece standing on `from` can reach `to` in the given
/// position.
///
/// ```
/// use capture_them_all::chess::core::Square;
/// use capture_them_all::chess::position::Position;
/// use capture_them_all::chess::rules::is_valid_move;
///
/// let position = Position::from_fen("8/8/8/8/R7/8/8/r7").unwrap();
/// assert!(is_valid_move(&position, Square::A1, Square::A4));
/// assert!(!is_valid_move(&position, Square::A1, Square::A8));
/// assert!(!is_valid_move(&position, Square::B1, Square::B8));
/// ```
///
/// Returns `false` if the source square is empty or the piece kind has no
/// movement rule (king and pawn).
#[must_use]
pub fn is_valid_move(position: &Position, from: Square, to: Square) -> bool {
    match position.piece(from) {
        Some(piece) => is_valid_shape(piece.kind, from, to, position.occupancy()),
        None => false,
    }
}

/// Dispatches to the movement rule of given piece kind.
#[must_use]
pub fn is_valid_shape(kind: PieceKind, from: Square, to: Square, occupancy: Bitboard) -> bool {
    match kind {
        PieceKind::Rook => validate_rook_move(from, to, occupancy),
        PieceKind::Bishop => validate_bishop_move(from, to, occupancy),
        PieceKind::Queen => validate_queen_move(from, to, occupancy),
        PieceKind::Knight => validate_knight_move(from, to),
        PieceKind::King | PieceKind::Pawn => false,
    }
}

/// Straight move along a rank or a file with a clear path.
#[must_use]
pub fn validate_rook_move(from: Square, to: Square, occupancy: Bitboard) -> bool {
    from != to
        && (from.file() == to.file() || from.rank() == to.rank())
        && (between(from, to) & occupancy).is_empty()
}

/// Diagonal move with a clear path.
#[must_use]
pub fn validate_bishop_move(from: Square, to: Square, occupancy: Bitboard) -> bool {
    let (file_delta, rank_delta) = delta(from, to);
    from != to
        && file_delta.abs() == rank_delta.abs()
        && (between(from, to) & occupancy).is_empty()
}

/// Union of the rook and bishop rules.
#[must_use]
pub fn validate_queen_move(from: Square, to: Square, occupancy: Bitboard) -> bool {
    validate_rook_move(from, to, occupancy) || validate_bishop_move(from, to, occupancy)
}

/// One of the eight L-shaped jumps. Occupancy does not matter.
#[must_use]
pub fn validate_knight_move(from: Square, to: Square) -> bool {
    let (file_delta, rank_delta) = delta(from, to);
    matches!((file_delta.abs(), rank_delta.abs()), (1, 2) | (2, 1))
}

/// Returns the squares strictly between `from` and `to` if they share a rank,
/// a file or a diagonal. Otherwise (including `from == to` and adjacent
/// squares) the result is empty.
///
/// ```
/// use capture_them_all::chess::core::Square;
/// use capture_them_all::chess::rules::between;
///
/// let ray: Vec<Square> = between(Square::D1, Square::A4).iter().collect();
/// assert_eq!(ray, vec![Square::C2, Square::B3]);
/// assert!(between(Square::B1, Square::D2).is_empty());
/// ```
#[must_use]
pub fn between(from: Square, to: Square) -> Bitboard {
    let (file_delta, rank_delta) = delta(from, to);
    let aligned = file_delta == 0 || rank_delta == 0 || file_delta.abs() == rank_delta.abs();
    if from == to || !aligned {
        return Bitboard::empty();
    }
    let (file_step, rank_step) = (file_delta.signum(), rank_delta.signum());
    let mut result = Bitboard::empty();
    let mut current = from.offset(file_step, rank_step);
    while let Some(square) = current {
        if square == to {
            break;
        }
        result |= Bitboard::from(square);
        current = square.offset(file_step, rank_step);
    }
    result
}

/// Signed file and rank distance from `from` to `to`.
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}
