use tictactoe::{IllegalMove, InvalidCoordinate};

#[derive(Debug, PartialEq, Eq)]
/// Error type for a line typed by a human player.
pub enum InvalidCellInput {
    NotANumber { input: String },
    OutOfRange { err: InvalidCoordinate },
    Occupied { err: IllegalMove },
}

impl std::error::Error for InvalidCellInput {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidCellInput::NotANumber { .. } => None,
            InvalidCellInput::OutOfRange { err } => Some(err),
            InvalidCellInput::Occupied { err } => Some(err),
        }
    }
}

impl std::fmt::Display for InvalidCellInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidCellInput::NotANumber { input } => {
                write!(f, "'{}' is not a cell number, please type 1 to 9", input)
            }
            InvalidCellInput::OutOfRange { err } => write!(f, "{}", err),
            InvalidCellInput::Occupied { err } => write!(f, "{}, pick a free cell", err),
        }
    }
}
