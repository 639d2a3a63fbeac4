//! [`Bitboard`]: a set of squares packed into a single 64-bit integer. The
//! puzzle uses it for board occupancy and for the squares a sliding piece
//! has to cross, which turns the obstruction check into a single AND.
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use itertools::Itertools;

use crate::chess::core::{Square, BOARD_SIZE, BOARD_WIDTH};

const SQUARE_SEPARATOR: &str = " ";
const LINE_SEPARATOR: &str = "\n";

/// Represents a set of squares and provides common operations (e.g. AND, OR)
/// over these sets. Each bit corresponds to one of 64 squares of the chess
/// board.
///
/// Mirroring [`Square`] semantics, the least significant bit corresponds to
/// A1, and the most significant bit - to H8.
///
/// Bitboard is a thin wrapper around [u64].
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Constructs Bitboard from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a bitboard representing empty set of squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Returns raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Returns true if this bitboard contains given square.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square as u8)) != 0
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// An efficient way to iterate over the set squares.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    /// Prints the board with rank 8 on top, `1` for the squares in the set
    /// and `.` for the rest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format!("{:#066b}", self.bits)
                .chars()
                .rev()
                .take(BOARD_SIZE as usize)
                .chunks(BOARD_WIDTH as usize)
                .into_iter()
                .map(|chunk| chunk
                    .map(|ch| match ch {
                        '1' => '1',
                        _ => '.',
                    })
                    .join(SQUARE_SEPARATOR))
                .collect::<Vec<String>>()
                .iter()
                .rev()
                .join(LINE_SEPARATOR)
        )
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitor(rhs.bits))
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits.bitor_assign(rhs.bits);
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitand(rhs.bits))
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square as u8)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(squares: I) -> Self {
        let mut result = Self::empty();
        for square in squares {
            result |= Self::from(square);
        }
        result
    }
}

/// Iterates over set squares in a given [Bitboard] from least significant 1
/// bits (LS1B) to most significant 1 bits (MS1B) through implementing
/// [`BitScan`] forward operation.
///
/// [BitScan]: https://www.chessprogramming.org/BitScan
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        // Get the LS1B and consume it from the iterator.
        let next_index = self.bits.trailing_zeros();
        self.bits ^= 1 << next_index;
        // trailing_zeros() of a non-zero u64 is always within 0..64.
        u8::try_from(next_index)
            .ok()
            .and_then(|index| Square::try_from(index).ok())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn basics() {
        assert_eq!(std::mem::size_of::<Bitboard>(), 8);
        assert!(Bitboard::empty().is_empty());
        assert_eq!(Bitboard::empty().count(), 0);
        assert_eq!(Bitboard::from_bits(u64::MAX).count(), 64);
        assert_eq!(Bitboard::from(Square::A1).bits(), 1);
        assert_eq!(Bitboard::from(Square::H8).bits(), 1 << 63);
    }

    #[test]
    fn set_operations() {
        let left: Bitboard = [Square::A1, Square::B2, Square::C3].into_iter().collect();
        let right: Bitboard = [Square::B2, Square::H8].into_iter().collect();
        assert_eq!(left & right, Bitboard::from(Square::B2));
        assert_eq!((left | right).count(), 4);
        assert!(left.contains(Square::C3));
        assert!(!left.contains(Square::H8));
        assert!(!(left & right).is_empty());
    }

    #[test]
    fn iter() {
        let squares = [Square::H8, Square::A1, Square::E4, Square::D5];
        let bitboard: Bitboard = squares.into_iter().collect();
        assert_eq!(
            bitboard.iter().collect::<Vec<_>>(),
            vec![Square::A1, Square::E4, Square::D5, Square::H8]
        );
        assert_eq!(Bitboard::empty().iter().next(), None);
    }

    #[test]
    fn dump() {
        let bitboard: Bitboard = [Square::A1, Square::H8, Square::B2].into_iter().collect();
        assert_eq!(
            format!("{bitboard:?}"),
            ". . . . . . . 1\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . 1 . . . . . .\n\
             1 . . . . . . ."
        );
    }
}
