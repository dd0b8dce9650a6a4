use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    Coord, CoordSet, IllegalMove, InvalidCoordinate, Mark, MarkFromStrErr, Outcome, Turn,
};

/// The complete state of a game: one [`Mark`] for each of the nine cells.
///
/// Boards are values. [`Self::play()`] returns a new board and leaves the
/// original untouched, and since `Board` is [`Copy`], holding on to an old
/// board is always safe.
///
/// Boards can be written down compactly with the [`board!`](crate::board) macro:
/// ```
/// use tictactoe::{board, Coord, Mark, Outcome, Turn};
/// let board = board!("XX. / .O. / ..O");
/// assert_eq!(board.get(Coord::new(0, 1).unwrap()), Mark::X);
/// assert_eq!(board.game_over(), Outcome::Ongoing);
/// assert_eq!(board.turn_to_move(), Turn::X);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Row-major, indexed by [`Coord::index()`].
    cells: [Mark; 9],
}

/// One of the eight lines that win the game when filled with a single mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triple {
    pub cells: [(Coord, Mark); 3],
}

impl Triple {
    /// The player owning all three cells, if any.
    pub fn winner(&self) -> Option<Turn> {
        let [(_, a), (_, b), (_, c)] = self.cells;
        if a == b && b == c {
            a.owner()
        } else {
            None
        }
    }

    pub fn coords(&self) -> [Coord; 3] {
        self.cells.map(|(coord, _)| coord)
    }

    /// How many cells of this line hold `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|(_, m)| *m == mark).count()
    }

    pub fn blanks(&self) -> CoordSet {
        self.cells
            .iter()
            .filter(|(_, m)| m.is_blank())
            .map(|&(c, _)| c)
            .collect()
    }
}

// All lines as cell indices: rows, columns, negative diagonal, positive diagonal.
const LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl Board {
    /// The board every game starts from.
    pub const fn empty() -> Self {
        Self {
            cells: [Mark::Blank; 9],
        }
    }

    pub fn get(&self, coord: Coord) -> Mark {
        self.cells[coord.index() as usize]
    }

    /// All nine cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Mark)> + '_ {
        Coord::all().map(move |coord| (coord, self.get(coord)))
    }

    pub fn row(&self, i: usize) -> Result<Triple, InvalidCoordinate> {
        if i > 2 {
            return Err(InvalidCoordinate::LineIndex { index: i });
        }
        Ok(self.line(LINES[i]))
    }

    pub fn col(&self, i: usize) -> Result<Triple, InvalidCoordinate> {
        if i > 2 {
            return Err(InvalidCoordinate::LineIndex { index: i });
        }
        Ok(self.line(LINES[3 + i]))
    }

    /// The diagonal from the top left to the bottom right corner.
    pub fn neg_diagonal(&self) -> Triple {
        self.line(LINES[6])
    }

    /// The diagonal from the bottom left to the top right corner.
    pub fn pos_diagonal(&self) -> Triple {
        self.line(LINES[7])
    }

    /// All eight lines: rows, then columns, then the two diagonals.
    pub fn triples(&self) -> impl Iterator<Item = Triple> + '_ {
        LINES.into_iter().map(move |line| self.line(line))
    }

    /// The four corners and their marks, in row-major order.
    pub fn corners(&self) -> [(Coord, Mark); 4] {
        Coord::CORNERS.map(|coord| (coord, self.get(coord)))
    }

    /// The blank cells, i.e. the legal moves.
    pub fn candidates(&self) -> CoordSet {
        self.occupied_by(Mark::Blank)
    }

    /// The cells holding `mark`.
    pub fn occupied_by(&self, mark: Mark) -> CoordSet {
        self.cells().filter(|&(_, m)| m == mark).map(|(c, _)| c).collect()
    }

    pub fn is_full(&self) -> bool {
        self.candidates().is_empty()
    }

    /// Decides the game.
    ///
    /// All lines are checked before declaring a tie, since the last move can
    /// fill the board and complete a line at the same time.
    pub fn game_over(&self) -> Outcome {
        if let Some(winner) = self.triples().find_map(|triple| triple.winner()) {
            Outcome::Won(winner)
        } else if self.is_full() {
            Outcome::Tie
        } else {
            Outcome::Ongoing
        }
    }

    /// Places the mark of `turn` at `coord`.
    ///
    /// If the cell is already occupied, the board is returned unchanged.
    /// Use [`Self::try_play()`] to get an error in that case instead.
    #[must_use] // Because users might expect this to be a mutating method
    pub fn play(&self, turn: Turn, coord: Coord) -> Board {
        self.try_play(turn, coord).unwrap_or(*self)
    }

    /// Like [`Self::play()`], but rejects moves onto occupied cells.
    pub fn try_play(&self, turn: Turn, coord: Coord) -> Result<Board, IllegalMove> {
        let existing_mark = self.get(coord);
        if !existing_mark.is_blank() {
            return Err(IllegalMove::OccupiedCell {
                coord,
                existing_mark,
            });
        }
        let mut cells = self.cells;
        cells[coord.index() as usize] = turn.mark();
        Ok(Board { cells })
    }

    /// Whose move it is, assuming X moved first and nobody skipped a turn.
    pub fn turn_to_move(&self) -> Turn {
        let xs = self.occupied_by(Mark::X).len();
        let os = self.occupied_by(Mark::O).len();
        if xs > os {
            Turn::O
        } else {
            Turn::X
        }
    }

    fn line(&self, line: [u8; 3]) -> Triple {
        Triple {
            cells: line.map(|idx| {
                let coord = Coord::from_index(idx);
                (coord, self.get(coord))
            }),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// The error type for the [`FromStr`] instance of [`Board`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardFromStrErr {
    WrongNumberOfCells(usize),
    InvalidMark(MarkFromStrErr),
}

impl std::error::Error for BoardFromStrErr {}

impl std::fmt::Display for BoardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardFromStrErr::WrongNumberOfCells(n) => {
                write!(f, "Expected 9 cells, found {}", n)
            }
            BoardFromStrErr::InvalidMark(err) => write!(f, "{}", err),
        }
    }
}

impl FromStr for Board {
    type Err = BoardFromStrErr;

    /// Reads nine marks (`X`, `O`, `.`) in row-major order.
    ///
    /// Whitespace, `/` and `|` are ignored, so rows can be separated freely.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let marks = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .map(Mark::from_char)
            .collect::<Result<Vec<Mark>, _>>()
            .map_err(BoardFromStrErr::InvalidMark)?;
        let num_cells = marks.len();
        let cells: [Mark; 9] = marks
            .try_into()
            .map_err(|_| BoardFromStrErr::WrongNumberOfCells(num_cells))?;
        Ok(Board { cells })
    }
}

/// Shorthand for creating boards from a string of nine marks.
///
/// This macro is just calling the [`FromStr`] instance of [`Board`].
/// ```
/// # use tictactoe::{board, Board};
/// assert_eq!(board!("... / ... / ..."), Board::empty());
/// ```
#[macro_export]
macro_rules! board {
    ($s:literal) => {
        <$crate::Board as std::str::FromStr>::from_str($s)
            .expect("Invalid board given to board! macro")
    };
}
