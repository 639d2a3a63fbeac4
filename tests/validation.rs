use capture_them_all::chess::bitboard::Bitboard;
use capture_them_all::chess::core::{PieceKind, Square};
use capture_them_all::chess::position::Position;
use capture_them_all::chess::rules::{
    between,
    is_valid_move,
    is_valid_shape,
    validate_bishop_move,
    validate_knight_move,
    validate_queen_move,
    validate_rook_move,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use strum::IntoEnumIterator;

fn setup(input: &str) -> Position {
    Position::try_from(input).expect("parsing valid position: {input}")
}

fn to_shakmaty(square: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(square as u8))
}

/// Occupancies of different density: empty board, a few sparse random boards
/// and a few dense ones.
fn occupancies() -> Vec<Bitboard> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut result = vec![Bitboard::empty()];
    for _ in 0..16 {
        result.push(Bitboard::from_bits(
            rng.next_u64() & rng.next_u64() & rng.next_u64(),
        ));
        result.push(Bitboard::from_bits(rng.next_u64()));
        result.push(Bitboard::from_bits(rng.next_u64() | rng.next_u64()));
    }
    result
}

// The destination of a capture is an occupied square and the attack sets of a
// regular chess move generator include the first blocker, so the two notions
// agree for every move that changes the square.
#[test]
fn sliders_match_reference_attacks() {
    for occupancy in occupancies() {
        let reference_occupancy = shakmaty::Bitboard(occupancy.bits());
        for from in Square::iter() {
            let rook = shakmaty::attacks::rook_attacks(to_shakmaty(from), reference_occupancy);
            let bishop =
                shakmaty::attacks::bishop_attacks(to_shakmaty(from), reference_occupancy);
            let queen = shakmaty::attacks::queen_attacks(to_shakmaty(from), reference_occupancy);
            for to in Square::iter() {
                let target = to_shakmaty(to);
                assert_eq!(
                    validate_rook_move(from, to, occupancy),
                    rook.contains(target),
                    "rook {from}{to}\n{occupancy:?}"
                );
                assert_eq!(
                    validate_bishop_move(from, to, occupancy),
                    bishop.contains(target),
                    "bishop {from}{to}\n{occupancy:?}"
                );
                assert_eq!(
                    validate_queen_move(from, to, occupancy),
                    queen.contains(target),
                    "queen {from}{to}\n{occupancy:?}"
                );
            }
        }
    }
}

#[test]
fn knight_matches_reference_attacks() {
    for occupancy in occupancies() {
        for from in Square::iter() {
            let knight = shakmaty::attacks::knight_attacks(to_shakmaty(from));
            for to in Square::iter() {
                assert_eq!(
                    is_valid_shape(PieceKind::Knight, from, to, occupancy),
                    knight.contains(to_shakmaty(to)),
                    "knight {from}{to}"
                );
            }
        }
    }
}

#[test]
fn knight_offsets() {
    const OFFSETS: [(i8, i8); 8] = [
        (1, 2),
        (2, 1),
        (2, -1),
        (1, -2),
        (-1, -2),
        (-2, -1),
        (-2, 1),
        (-1, 2),
    ];
    for from in Square::iter() {
        let expected: Bitboard = OFFSETS
            .iter()
            .filter_map(|(file, rank)| from.offset(*file, *rank))
            .collect();
        let actual: Bitboard = Square::iter()
            .filter(|to| validate_knight_move(from, *to))
            .collect();
        assert_eq!(actual, expected, "{from}");
    }
}

#[test]
fn any_blocker_in_between_makes_slide_illegal() {
    for from in Square::iter() {
        for to in Square::iter() {
            for blocker in between(from, to).iter() {
                let occupancy = Bitboard::from(blocker);
                assert!(!validate_queen_move(from, to, occupancy), "{from}{to} over {blocker}");
                assert!(!validate_rook_move(from, to, occupancy), "{from}{to} over {blocker}");
                assert!(!validate_bishop_move(from, to, occupancy), "{from}{to} over {blocker}");
            }
        }
    }
}

#[test]
fn position_queries_use_piece_on_source() {
    // The same geometry on the same board is legal for one piece and not
    // for the other.
    let position = setup("8/8/8/8/8/8/8/R1n5");
    assert!(is_valid_move(&position, Square::A1, Square::A8));
    assert!(!is_valid_move(&position, Square::A1, Square::D1));
    assert!(is_valid_move(&position, Square::A1, Square::C1));
    assert!(is_valid_move(&position, Square::C1, Square::A2));
    assert!(!is_valid_move(&position, Square::C1, Square::C8));
}

#[test]
fn rook_scenarios() {
    assert!(is_valid_move(&setup("8/8/8/8/8/8/8/r7"), Square::A1, Square::A8));
    assert!(!is_valid_move(&setup("8/8/8/P7/8/8/8/r7"), Square::A1, Square::A8));
}

#[test]
fn bishop_scenarios() {
    assert!(is_valid_move(&setup("8/8/8/8/8/8/8/2b5"), Square::C1, Square::A3));
    assert!(!is_valid_move(&setup("8/8/8/8/8/8/1P6/2b5"), Square::C1, Square::A3));
}

#[test]
fn knight_scenarios() {
    let position = setup("8/8/8/8/8/8/8/1n6");
    assert!(is_valid_move(&position, Square::B1, Square::D2));
    assert!(!is_valid_move(&position, Square::B1, Square::B3));
}

#[test]
fn queen_scenarios() {
    let position = setup("8/8/8/8/3q4/8/8/8");
    assert!(is_valid_move(&position, Square::D4, Square::D8));
    assert!(is_valid_move(&position, Square::D4, Square::A1));
    assert!(!is_valid_move(&position, Square::D4, Square::E6));
}
