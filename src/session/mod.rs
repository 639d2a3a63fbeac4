//! Text front-end of the puzzle. It plays the part of the board host: reads
//! one command per line from the input stream, forwards it to the [`Puzzle`]
//! and writes the response to the output stream.
//!
//! [`Session::run`] is the "main loop" which communicates with the
//! environment and executes commands until `quit` or the end of the input.

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, warn};

use crate::chess::core::Square;
use crate::chess::position::Position;
use crate::puzzle::Puzzle;
use crate::session::command::Command;

mod command;

/// Connects the puzzle to the I/O streams.
pub struct Session<'a, R: BufRead, W: Write> {
    puzzle: Option<Puzzle<Position>>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a new session without a puzzle and with provided I/O.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            puzzle: None,
            input,
            output,
        }
    }

    /// Creates a new session that starts with the given puzzle.
    #[must_use]
    pub fn with_puzzle(puzzle: Puzzle<Position>, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            puzzle: Some(puzzle),
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes the commands until
    /// `quit` is sent or the input is exhausted.
    ///
    /// Malformed commands and arguments are reported to the output stream as
    /// `error: <reason>` lines and do not stop the session.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if self
                .input
                .read_until(b'\n', &mut buffer)
                .context("reading from input")?
                == 0
            {
                break;
            }
            let Ok(line) = std::str::from_utf8(&buffer) else {
                warn!(bytes = buffer.len(), "skipping line that is not valid UTF-8");
                writeln!(self.output, "error: input is not valid UTF-8")?;
                continue;
            };
            let command = Command::parse(line);
            debug!(?command, "received");
            let result = match command {
                Command::About => self.handle_about(),
                Command::IsReady => self.handle_isready(),
                Command::SetPosition { fen } => self.handle_position(&fen),
                Command::Select { square } => self.handle_select(&square),
                Command::Check { from, to } => self.handle_check(&from, &to),
                Command::Status => self.handle_status(),
                Command::Fen => self.handle_fen(),
                Command::Show => self.handle_show(),
                Command::Quit => break,
                Command::Unknown(command) if command.is_empty() => continue,
                Command::Unknown(command) => Err(anyhow::anyhow!("unsupported command: {command}")),
            };
            if let Err(e) = result {
                if e.is::<std::io::Error>() {
                    return Err(e);
                }
                warn!("{e:#}");
                writeln!(self.output, "error: {e:#}")?;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Identifies the program.
    fn handle_about(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "id name {} {}",
            env!("CARGO_PKG_NAME"),
            crate::version()
        )?;
        Ok(())
    }

    /// Syncs with the host by responding with `readyok`.
    fn handle_isready(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "readyok")?;
        Ok(())
    }

    /// Starts the puzzle with a new position.
    fn handle_position(&mut self, fen: &str) -> anyhow::Result<()> {
        let position = Position::try_from(fen)?;
        if let Some(puzzle) = &mut self.puzzle {
            puzzle.start(position)?;
        } else {
            self.puzzle = Some(Puzzle::new(position)?);
        }
        writeln!(self.output, "ok {} targets", self.puzzle()?.remaining())?;
        Ok(())
    }

    fn handle_select(&mut self, square: &str) -> anyhow::Result<()> {
        let square = Square::try_from(square)?;
        let puzzle = self.puzzle_mut()?;
        let decision = puzzle.select(square)?;
        let solved = decision.legal && puzzle.is_solved();
        writeln!(self.output, "{decision}")?;
        if solved {
            writeln!(self.output, "solved")?;
        }
        Ok(())
    }

    fn handle_check(&mut self, from: &str, to: &str) -> anyhow::Result<()> {
        let (from, to) = (Square::try_from(from)?, Square::try_from(to)?);
        let legal = self.puzzle()?.is_valid_move(from, to);
        writeln!(self.output, "{}", if legal { "legal" } else { "illegal" })?;
        Ok(())
    }

    fn handle_status(&mut self) -> anyhow::Result<()> {
        let puzzle = self.puzzle()?;
        let (hunter, remaining) = (puzzle.hunter(), puzzle.remaining());
        writeln!(self.output, "hunter {hunter} remaining {remaining}")?;
        Ok(())
    }

    fn handle_fen(&mut self) -> anyhow::Result<()> {
        let fen = self.puzzle()?.board().to_string();
        writeln!(self.output, "{fen}")?;
        Ok(())
    }

    fn handle_show(&mut self) -> anyhow::Result<()> {
        let diagram = format!("{:?}", self.puzzle()?.board());
        writeln!(self.output, "{diagram}")?;
        Ok(())
    }

    fn puzzle(&self) -> anyhow::Result<&Puzzle<Position>> {
        self.puzzle.as_ref().context("no puzzle loaded")
    }

    fn puzzle_mut(&mut self) -> anyhow::Result<&mut Puzzle<Position>> {
        self.puzzle.as_mut().context("no puzzle loaded")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(commands: &str) -> String {
        let mut input = commands.as_bytes();
        let mut output = Vec::new();
        Session::new(&mut input, &mut output)
            .run()
            .expect("session over in-memory streams");
        String::from_utf8(output).expect("output is UTF-8")
    }

    #[test]
    fn skips_line_with_invalid_utf8() {
        let mut input: &[u8] = b"position 8/8/8/8/8/8/8/q6P\n\xff\nstatus\n";
        let mut output = Vec::new();
        Session::new(&mut input, &mut output)
            .run()
            .expect("session over in-memory streams");
        assert_eq!(
            String::from_utf8(output).expect("output is UTF-8"),
            "ok 1 targets\nerror: input is not valid UTF-8\nhunter a1 remaining 1\n"
        );
    }

    #[test]
    fn handshake() {
        let output = run("about\nisready\n");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id name capture-them-all "));
        assert_eq!(lines[1], "readyok");
    }

    #[test]
    fn full_puzzle() {
        assert_eq!(
            run("position 4P3/8/8/P3P3/8/8/8/r7\n\
                 select e5\n\
                 select a5\n\
                 status\n\
                 select e5\n\
                 select e8\n\
                 fen\n"),
            "ok 3 targets\n\
             ignored e5\n\
             capture a1a5\n\
             hunter a5 remaining 2\n\
             capture a5e5\n\
             capture e5e8\n\
             solved\n\
             4r3/8/8/8/8/8/8/8\n"
        );
    }

    #[test]
    fn raw_move_checks() {
        assert_eq!(
            run("position 8/8/8/8/3q4/8/8/7P\n\
                 check d4 d8\n\
                 check d4 a1\n\
                 check d4 e6\n\
                 check h1 h2\n"),
            "ok 1 targets\nlegal\nlegal\nillegal\nillegal\n"
        );
    }

    #[test]
    fn errors_do_not_stop_session() {
        assert_eq!(
            run("status\n\
                 position 8/8/8/8/8/8/8/R7\n\
                 position 8/8/8\n\
                 position 8/8/8/8/3q4/8/8/7P\n\
                 select z9\n\
                 dance\n\
                 \n\
                 status\n\
                 quit\n\
                 status\n"),
            "error: no puzzle loaded\n\
             error: expected exactly 1 black piece, got 0\n\
             error: incorrect FEN: there should be 8 ranks, got 8/8/8\n\
             ok 1 targets\n\
             error: file should be within 'a'..='h', got 'z'\n\
             error: unsupported command: dance\n\
             hunter d4 remaining 1\n"
        );
    }

    #[test]
    fn diagram() {
        assert_eq!(
            run("position 8/8/8/8/3q4/8/8/7P\nd\n"),
            "ok 1 targets\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . q . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . P\n\
             FEN: 8/8/8/8/3q4/8/8/7P\n"
        );
    }
}
