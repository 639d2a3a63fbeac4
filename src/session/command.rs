//! Commands understood by [`crate::Session`]. Parsing never fails: anything
//! that can not be recognized becomes [`Command::Unknown`] and arguments are
//! validated by the handlers, which report the problems back.

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    About,
    IsReady,
    /// Loads a new puzzle (the remaining part of the line is the position).
    SetPosition {
        fen: String,
    },
    /// Selects the square the hunter should capture on.
    Select {
        square: String,
    },
    /// Queries the movement rules without changing the board.
    Check {
        from: String,
        to: String,
    },
    Status,
    Fen,
    Show,
    Quit,
    Unknown(String),
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return Self::Unknown(input.trim().to_string());
        }

        match (parts[0], &parts[1..]) {
            ("about", []) => Self::About,
            ("isready", []) => Self::IsReady,
            ("position", [_, ..]) => Self::SetPosition {
                fen: parts[1..].join(" "),
            },
            ("select", [square]) => Self::Select {
                square: (*square).to_string(),
            },
            ("check", [from, to]) => Self::Check {
                from: (*from).to_string(),
                to: (*to).to_string(),
            },
            ("status", []) => Self::Status,
            ("fen", []) => Self::Fen,
            ("d", []) => Self::Show,
            ("quit", []) => Self::Quit,
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}
