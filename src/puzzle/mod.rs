//! The "capture them all" puzzle: a single black piece (the hunter) has to
//! capture every white piece on the board, one at a time.
//!
//! The player does not move the hunter directly. Instead, they select the
//! white piece the hunter should capture next, and the selection is accepted
//! if the hunter can legally reach that square. Note the inversion: the move
//! being validated belongs to the hunter, not to the selected piece.
//!
//! The board itself (rendering, animations, input) is owned by the host and
//! is only accessed through the [`Chessboard`] trait.

use std::fmt;

use anyhow::bail;
use tracing::{debug, info, warn};

use crate::chess::core::{PieceKind, Player, Square};
use crate::chess::position::Position;
use crate::chess::rules;

/// Boundary between the puzzle logic and the board that displays it.
pub trait Chessboard {
    /// Current snapshot of the board.
    fn position(&self) -> &Position;

    /// Performs the move (possibly a capture) and updates whatever the board
    /// displays.
    ///
    /// # Errors
    ///
    /// Returns an error if the move can not be performed.
    fn move_piece(&mut self, from: Square, to: Square) -> anyhow::Result<()>;

    /// Replaces the whole board with given position.
    fn set_position(&mut self, position: Position);
}

/// [`Position`] is the simplest board: it has nothing to display.
impl Chessboard for Position {
    fn position(&self) -> &Position {
        self
    }

    fn move_piece(&mut self, from: Square, to: Square) -> anyhow::Result<()> {
        let _captured = Position::move_piece(self, from, to)?;
        Ok(())
    }

    fn set_position(&mut self, position: Position) {
        *self = position;
    }
}

/// Outcome of a selection: whether the hunter standing on `from` may capture
/// on `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    #[allow(missing_docs)]
    pub legal: bool,
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.legal {
            write!(f, "capture {}{}", self.from, self.to)
        } else {
            write!(f, "ignored {}", self.to)
        }
    }
}

/// Decides whether selecting `selected` makes the hunter standing on `hunter`
/// capture there. The selection is legal only if it holds a white piece and the
/// hunter can reach it.
///
/// This does not modify anything and can be used by the host to e.g. show a
/// pointer cursor above capturable pieces.
#[must_use]
pub fn evaluate_selection(position: &Position, hunter: Square, selected: Square) -> Decision {
    let is_target = position
        .piece(selected)
        .is_some_and(|piece| piece.owner == Player::White);
    Decision {
        legal: is_target && rules::is_valid_move(position, hunter, selected),
        from: hunter,
        to: selected,
    }
}

/// Finds the hunter: the only black piece on the board.
fn find_hunter(position: &Position) -> anyhow::Result<Square> {
    let black_pieces = position.pieces(Player::Black);
    let &[(square, piece)] = black_pieces.as_slice() else {
        bail!("expected exactly 1 black piece, got {}", black_pieces.len());
    };
    if matches!(piece.kind, PieceKind::King | PieceKind::Pawn) {
        warn!(%square, %piece, "hunter has no movement rule and will never capture");
    }
    Ok(square)
}

/// A running puzzle on top of the host board.
pub struct Puzzle<B: Chessboard> {
    board: B,
    hunter: Square,
}

impl<B: Chessboard> Puzzle<B> {
    /// Starts the puzzle with whatever position the board currently shows.
    ///
    /// # Errors
    ///
    /// Returns an error unless there is exactly one black piece on the board.
    pub fn new(board: B) -> anyhow::Result<Self> {
        let hunter = find_hunter(board.position())?;
        info!(position = %board.position(), %hunter, "puzzle loaded");
        Ok(Self { board, hunter })
    }

    /// Replaces the board with a new puzzle. The position is passed to the
    /// board as is.
    ///
    /// # Errors
    ///
    /// Returns an error unless there is exactly one black piece in the new
    /// position. The board is not modified in that case.
    pub fn start(&mut self, position: Position) -> anyhow::Result<()> {
        let hunter = find_hunter(&position)?;
        info!(%position, %hunter, "puzzle loaded");
        self.board.set_position(position);
        self.hunter = hunter;
        Ok(())
    }

    /// Handles the selection of a square on the board: if it is a valid
    /// target, the hunter captures it.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the board to perform the move.
    pub fn select(&mut self, square: Square) -> anyhow::Result<Decision> {
        let decision = evaluate_selection(self.board.position(), self.hunter, square);
        if !decision.legal {
            debug!(hunter = %self.hunter, %square, "selection ignored");
            return Ok(decision);
        }
        self.board.move_piece(decision.from, decision.to)?;
        self.hunter = decision.to;
        info!(
            from = %decision.from,
            to = %decision.to,
            remaining = self.remaining(),
            "capture"
        );
        if self.is_solved() {
            info!("puzzle solved");
        }
        Ok(decision)
    }

    /// Checks whether the piece on `from` can move to `to` on the current
    /// board.
    #[must_use]
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        rules::is_valid_move(self.board.position(), from, to)
    }

    /// Square of the hunting piece.
    #[must_use]
    pub const fn hunter(&self) -> Square {
        self.hunter
    }

    /// Number of white pieces left to capture.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.board.position().pieces(Player::White).len()
    }

    /// True once every white piece is captured.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.remaining() == 0
    }

    /// The host board holding the current snapshot.
    #[must_use]
    pub const fn board(&self) -> &B {
        &self.board
    }
}
