//! Board snapshot of the puzzle: which piece, if any, stands on each square.
//!
//! The position has 1:1 relationship with the piece placement field of
//! [Forsyth-Edwards Notation] (FEN). Side to move, castling rights and move
//! counters have no meaning for a single hunting piece, so they are not
//! stored.
//!
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use std::fmt;

use anyhow::{bail, Context};
use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{File, Piece, Player, Rank, Square, BOARD_SIZE, BOARD_WIDTH};

/// Pieces of one player together with the squares they occupy, ordered from
/// A1 to H8.
pub type Pieces = ArrayVec<(Square, Piece), { BOARD_SIZE as usize }>;

/// Square-centric ("mailbox") representation of the board.
///
/// [`Position::try_from()`] provides a convenient interface for creating a
/// [`Position`]. It will clean up the input (trim newlines and whitespace) and
/// strip an optional `fen ` prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

impl Position {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Returns the piece standing on given square.
    #[must_use]
    pub const fn piece(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    /// Puts the piece on given square and returns whatever stood there
    /// before.
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square as usize].replace(piece)
    }

    /// Clears given square and returns the piece that stood there.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square as usize].take()
    }

    /// Moves the piece from one square to the other and returns the captured
    /// piece, if any. The move itself is not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no piece to move.
    pub fn move_piece(&mut self, from: Square, to: Square) -> anyhow::Result<Option<Piece>> {
        let Some(piece) = self.remove(from) else {
            bail!("there is no piece on {from} to move to {to}");
        };
        Ok(self.put(to, piece))
    }

    /// Collects all pieces of given player.
    #[must_use]
    pub fn pieces(&self, player: Player) -> Pieces {
        Square::iter()
            .filter_map(|square| self.piece(square).map(|piece| (square, piece)))
            .filter(|(_, piece)| piece.owner == player)
            .collect()
    }

    /// Returns the set of all occupied squares regardless of the owner.
    #[must_use]
    pub fn occupancy(&self) -> Bitboard {
        Square::iter()
            .filter(|square| self.piece(*square).is_some())
            .collect()
    }

    /// Parses the board from the piece placement field of FEN. If the input
    /// contains other FEN fields after the first space, they are ignored.
    ///
    /// ```
    /// use capture_them_all::chess::core::Square;
    /// use capture_them_all::chess::position::Position;
    ///
    /// let position = Position::from_fen("8/8/8/3q4/8/8/1R6/8").unwrap();
    /// assert_eq!(position.piece(Square::D5).unwrap().to_string(), "bq");
    /// assert_eq!(position.piece(Square::B2).unwrap().to_string(), "wr");
    /// assert!(position.piece(Square::A1).is_none());
    /// ```
    ///
    /// NOTE: This expects properly-formatted inputs: no extra symbols or
    /// additional whitespace. Use [`Position::try_from`] for cleaning up the
    /// input if it is coming from untrusted source and is likely to contain
    /// extra symbols.
    ///
    /// # Errors
    ///
    /// Returns an error if the placement does not describe exactly 8 ranks of
    /// exactly 8 squares each or contains unknown symbols.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let Some(placement) = input.split(' ').next().filter(|part| !part.is_empty()) else {
            bail!("incorrect FEN: missing pieces placement");
        };
        let mut result = Self::empty();
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in placement.split('/') {
            if rank_id == 0 {
                bail!("incorrect FEN: expected 8 ranks, got {placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file >= BOARD_WIDTH {
                    bail!("incorrect FEN: rank {rank_fen} is longer than {BOARD_WIDTH} squares");
                }
                match symbol {
                    '0' | '9' => {
                        bail!("incorrect FEN: increment should be within 1..=8, got {symbol}")
                    }
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    }
                    _ => (),
                }
                let piece = Piece::try_from(symbol)
                    .with_context(|| format!("incorrect FEN: unexpected symbol in {rank_fen}"))?;
                let square = Square::new(File::try_from(file)?, rank);
                result.squares[square as usize] = Some(piece);
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of \
                     length {file}"
                );
            }
        }
        if rank_id != 0 {
            bail!("incorrect FEN: there should be 8 ranks, got {placement}");
        }
        Ok(result)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        match input.strip_prefix("fen ") {
            Some(stripped) => Self::from_fen(stripped.trim_start()),
            None => Self::from_fen(input),
        }
    }
}

impl fmt::Display for Position {
    /// Prints board in the piece placement format of FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0;
            for file in File::iter() {
                match self.piece(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(f, "{empty_squares}")?;
                            empty_squares = 0;
                        }
                        write!(f, "{}", piece.symbol())?;
                    }
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    /// Prints the board diagram with rank 8 on top: FEN symbols for pieces and
    /// `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let line = File::iter()
                .map(|file| {
                    self.piece(Square::new(file, rank))
                        .map_or('.', Piece::symbol)
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        write!(f, "FEN: {self}")
    }
}
