#![no_main]
use capture_them_all::chess::position::Position;
use capture_them_all::puzzle::Puzzle;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(position) = Position::try_from(s) {
            // Printing the position back must produce an equivalent board.
            let fen = position.to_string();
            assert!(Position::try_from(fen.as_str()).is_ok_and(|parsed| parsed == position));
            let _ = Puzzle::new(position);
        }
    }
});
