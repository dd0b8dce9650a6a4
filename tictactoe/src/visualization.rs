use crate::{Board, Mark};

/// Draws the board as a 3x3 grid.
///
/// Blank cells show their cell number (1 to 9, row-major), which is what a
/// human player types to pick that cell.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::new();
    for (coord, mark) in board.cells() {
        match coord.col() {
            0 if coord.row() > 0 => result += " \n---+---+---\n ",
            0 => result += " ",
            _ => result += " | ",
        }
        match mark {
            Mark::Blank => result += &coord.cell_number().to_string(),
            mark => result += &mark.to_string(),
        }
    }
    result += " \n";
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    #[test]
    fn blank_cells_show_their_number() {
        let board = board!("X.O / .X. / ...");
        assert_eq!(
            visualize_board(&board),
            " X | 2 | O \n---+---+---\n 4 | X | 6 \n---+---+---\n 7 | 8 | 9 \n"
        );
    }
}
