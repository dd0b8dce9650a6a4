use std::io::{BufRead, Cursor, Stdin, Write};

use rand::rngs::StdRng;
use tictactoe::{select_move_with, Board, Coord, Formidable, Selector, Turn, Weakened};
use tracing::trace;

use crate::error::InvalidCellInput;

/// Anything that can take part in a game.
pub trait Player {
    fn name(&self) -> &str;

    /// Returns the cell to mark for `turn`.
    ///
    /// The judge only asks while the game is ongoing, so `board` always has a
    /// blank cell. The returned cell must be blank.
    fn decide_move(&mut self, board: &Board, turn: Turn) -> anyhow::Result<Coord>;
}

/// A player driven by the rule chain.
pub struct ComputerPlayer<S: Selector> {
    pub name: String,
    selector: S,
    rng: StdRng,
}

pub type OptimalComputer = ComputerPlayer<Formidable>;
pub type WeakenedComputer = ComputerPlayer<Weakened>;

impl<S: Selector> ComputerPlayer<S> {
    pub fn new(name: &str, selector: S, rng: StdRng) -> Self {
        Self {
            name: String::from(name),
            selector,
            rng,
        }
    }
}

impl<S: Selector> Player for ComputerPlayer<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide_move(&mut self, board: &Board, turn: Turn) -> anyhow::Result<Coord> {
        let coord = select_move_with(&self.selector, board, turn, &mut self.rng)?;
        trace!(player = &self.name, %coord, "Computer decided");
        Ok(coord)
    }
}

/// Where a human player's input lines come from.
pub trait LineSource {
    /// Appends the next line to `buf`, returning 0 at end of input.
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize>;
}

// Locks stdin for this one line only, so two human players can share it.
impl LineSource for Stdin {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineSource for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// A person typing cell numbers.
///
/// Reads from `input` and writes prompts to `output`, which are usually stdin
/// and stdout. The board itself is shown by the judge's announcer.
pub struct HumanPlayer<R: LineSource, W: Write> {
    pub name: String,
    input: R,
    output: W,
    // A re-usable buffer for IO.
    // Should always be empty before and after decide_move().
    buf: String,
}

impl<R: LineSource, W: Write> HumanPlayer<R, W> {
    pub fn new(name: &str, input: R, output: W) -> Self {
        Self {
            name: String::from(name),
            input,
            output,
            buf: String::new(),
        }
    }
}

impl<R: LineSource, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide_move(&mut self, board: &Board, turn: Turn) -> anyhow::Result<Coord> {
        loop {
            write!(self.output, "{} ({}), pick a cell: ", self.name, turn)?;
            self.output.flush()?;
            self.buf.clear();
            let num_bytes_read = self.input.read_line(&mut self.buf)?;
            if num_bytes_read == 0 {
                anyhow::bail!("Input closed while waiting for a move by {}", self.name);
            }
            let parsed = parse_cell(&self.buf, board);
            self.buf.clear();
            match parsed {
                Ok(coord) => return Ok(coord),
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

/// Validates a cell number typed by a human against the current board.
pub fn parse_cell(line: &str, board: &Board) -> Result<Coord, InvalidCellInput> {
    let trimmed = line.trim();
    let number: usize = trimmed
        .parse()
        .map_err(|_| InvalidCellInput::NotANumber {
            input: String::from(trimmed),
        })?;
    let coord =
        Coord::from_cell_number(number).map_err(|err| InvalidCellInput::OutOfRange { err })?;
    // Only the check matters here, the judge plays the move itself.
    board
        .try_play(Turn::X, coord)
        .map_err(|err| InvalidCellInput::Occupied { err })?;
    Ok(coord)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::SeedableRng;
    use tictactoe::{board, IllegalMove, InvalidCoordinate, Mark};

    use super::*;

    #[test]
    fn parse_cell_validates() {
        let board = board!("X.. / ... / ...");
        assert_eq!(parse_cell(" 5\n", &board), Ok(Coord::CENTER));
        assert_eq!(
            parse_cell("five\n", &board),
            Err(InvalidCellInput::NotANumber {
                input: String::from("five")
            })
        );
        assert_eq!(
            parse_cell("10", &board),
            Err(InvalidCellInput::OutOfRange {
                err: InvalidCoordinate::CellNumber { number: 10 }
            })
        );
        let corner = Coord::new(0, 0).unwrap();
        assert_eq!(
            parse_cell("1", &board),
            Err(InvalidCellInput::Occupied {
                err: IllegalMove::OccupiedCell {
                    coord: corner,
                    existing_mark: Mark::X
                }
            })
        );
    }

    #[test]
    fn human_reprompts_until_valid() {
        let board = board!("X.. / ... / ...");
        let input = Cursor::new("hello\n1\n0\n9\n");
        let mut output = Vec::new();
        let coord = {
            let mut human = HumanPlayer::new("alice", input, &mut output);
            human.decide_move(&board, Turn::O).unwrap()
        };
        assert_eq!(coord, Coord::new(2, 2).unwrap());
        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("alice (O), pick a cell: ").count(), 4);
        assert!(transcript.contains("'hello' is not a cell number"));
        assert!(transcript.contains("already occupied"));
        assert!(transcript.contains("Cell number 0 is not between 1 and 9"));
        assert!(!transcript.contains("---+---+---"));
    }

    #[test]
    fn human_input_closed_is_an_error() {
        let mut human = HumanPlayer::new("bob", Cursor::new(""), Vec::new());
        assert!(human.decide_move(&Board::empty(), Turn::X).is_err());
    }

    #[test]
    fn computer_opens_in_the_center() {
        let mut computer =
            OptimalComputer::new("hal", Formidable, StdRng::seed_from_u64(1));
        assert_eq!(
            computer.decide_move(&Board::empty(), Turn::X).unwrap(),
            Coord::CENTER
        );
        assert_eq!(computer.name(), "hal");
    }

    #[test]
    fn computer_on_full_board_fails() {
        let mut computer =
            OptimalComputer::new("hal", Formidable, StdRng::seed_from_u64(1));
        let board = board!("XOX / XOO / OXX");
        assert!(computer.decide_move(&board, Turn::X).is_err());
    }
}
