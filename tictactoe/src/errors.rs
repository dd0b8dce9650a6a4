use crate::{Coord, Mark};

/// A coordinate, line index or cell number outside of the 3x3 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidCoordinate {
    OutOfRange { row: usize, col: usize },
    LineIndex { index: usize },
    CellNumber { number: usize },
}

impl std::error::Error for InvalidCoordinate {}

impl std::fmt::Display for InvalidCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidCoordinate::OutOfRange { row, col } => write!(
                f,
                "Coordinate ({}, {}) is outside of the 3x3 board",
                row, col
            ),
            InvalidCoordinate::LineIndex { index } => {
                write!(f, "There is no row or column with index {}", index)
            }
            InvalidCoordinate::CellNumber { number } => {
                write!(f, "Cell number {} is not between 1 and 9", number)
            }
        }
    }
}

/// The error type for [`Board::try_play()`](crate::Board::try_play).
///
/// [`Board::play()`](crate::Board::play) never fails, it ignores moves onto
/// occupied cells instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    OccupiedCell { coord: Coord, existing_mark: Mark },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OccupiedCell {
                coord,
                existing_mark,
            } => write!(
                f,
                "Cell {} is already occupied by {}",
                coord.cell_number(),
                existing_mark
            ),
        }
    }
}

/// Returned when a move is requested on a board without blank cells.
///
/// Callers are expected to check [`Board::game_over()`](crate::Board::game_over) first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoLegalMove;

impl std::error::Error for NoLegalMove {}

impl std::fmt::Display for NoLegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Asked for a move, but every cell is occupied")
    }
}

/// A blunder probability outside of `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidBlunderProbability(pub f64);

impl std::error::Error for InvalidBlunderProbability {}

impl std::fmt::Display for InvalidBlunderProbability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Blunder probability must be between 0 and 1, got {}",
            self.0
        )
    }
}
