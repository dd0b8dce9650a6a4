use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The content of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "X")]
    X,
    #[serde(rename = "O")]
    O,
    #[serde(rename = ".")]
    Blank,
}

/// The player about to move. X always moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    #[serde(rename = "X")]
    X,
    #[serde(rename = "O")]
    O,
}

/// The state of a game as seen from the board alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won(Turn),
    Tie,
    Ongoing,
}

impl Turn {
    pub fn opponent(self) -> Turn {
        match self {
            Turn::X => Turn::O,
            Turn::O => Turn::X,
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            Turn::X => Mark::X,
            Turn::O => Mark::O,
        }
    }
}

impl Mark {
    /// The player owning this mark, or `None` for a blank cell.
    pub fn owner(self) -> Option<Turn> {
        match self {
            Mark::X => Some(Turn::X),
            Mark::O => Some(Turn::O),
            Mark::Blank => None,
        }
    }

    pub fn is_blank(self) -> bool {
        self == Mark::Blank
    }
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl From<Turn> for Mark {
    fn from(turn: Turn) -> Mark {
        turn.mark()
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Blank => '.',
        };
        write!(f, "{}", c)
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mark())
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won(turn) => write!(f, "{} wins", turn),
            Outcome::Tie => write!(f, "Tie"),
            Outcome::Ongoing => write!(f, "Ongoing"),
        }
    }
}

/// The error type for the [`FromStr`] instances of [`Mark`] and [`Turn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkFromStrErr {
    NotOneChar,
    InvalidMark,
}

impl std::error::Error for MarkFromStrErr {}

impl std::fmt::Display for MarkFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkFromStrErr::NotOneChar => write!(f, "A mark must be a single character"),
            MarkFromStrErr::InvalidMark => write!(f, "A mark must be one of 'X', 'O' or '.'"),
        }
    }
}

impl Mark {
    pub(crate) fn from_char(c: char) -> Result<Self, MarkFromStrErr> {
        match c {
            'X' | 'x' => Ok(Mark::X),
            'O' | 'o' => Ok(Mark::O),
            '.' | '_' => Ok(Mark::Blank),
            _ => Err(MarkFromStrErr::InvalidMark),
        }
    }
}

impl FromStr for Mark {
    type Err = MarkFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(MarkFromStrErr::NotOneChar)?;
        if chars.next().is_some() {
            return Err(MarkFromStrErr::NotOneChar);
        }
        Mark::from_char(c)
    }
}

impl FromStr for Turn {
    type Err = MarkFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mark::from_str(s)?
            .owner()
            .ok_or(MarkFromStrErr::InvalidMark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        for turn in [Turn::X, Turn::O] {
            assert_ne!(turn.opponent(), turn);
            assert_eq!(turn.opponent().opponent(), turn);
        }
    }

    #[test]
    fn turn_from_str() {
        assert_eq!("X".parse::<Turn>(), Ok(Turn::X));
        assert_eq!("o".parse::<Turn>(), Ok(Turn::O));
        assert_eq!(".".parse::<Turn>(), Err(MarkFromStrErr::InvalidMark));
        assert_eq!("XO".parse::<Mark>(), Err(MarkFromStrErr::NotOneChar));
    }

    #[test]
    fn outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&Outcome::Won(Turn::O)).unwrap(),
            r#"{"won":"O"}"#
        );
        assert_eq!(serde_json::to_string(&Outcome::Tie).unwrap(), r#""tie""#);
    }
}
