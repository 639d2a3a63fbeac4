//! Move validation and puzzle control for the "capture them all" chess
//! puzzle: a single black piece has to capture every white piece on the board,
//! and each selection of a white piece is checked against the movement rules
//! of the hunting piece.
//!
//! - [`chess`] contains the board primitives and [`chess::rules`], the move
//!   validator.
//! - [`puzzle`] drives the puzzle on top of a host board.
//! - [`Session`] is a line-based text front-end used by the binary.

pub mod chess;
pub mod puzzle;

mod session;
pub use session::Session;
use shadow_rs::shadow;

shadow!(build);

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}
