use quickcheck::{Arbitrary, Gen};

use crate::{Board, Coord, Turn};

/// A board reached by legal play from the empty board.
///
/// Play stops at a random point, or when the game is decided.
#[derive(Clone, Debug)]
pub struct PlayedGame {
    pub moves: Vec<Coord>,
    pub board: Board,
}

impl Arbitrary for PlayedGame {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_plies = usize::arbitrary(g) % 10;
        let mut board = Board::empty();
        let mut turn = Turn::X;
        let mut moves = Vec::with_capacity(num_plies);
        for _ in 0..num_plies {
            if board.game_over().is_over() {
                break;
            }
            let blanks: Vec<Coord> = board.candidates().into_iter().collect();
            let coord = *g.choose(&blanks).unwrap();
            board = board.play(turn, coord);
            moves.push(coord);
            turn = turn.opponent();
        }
        PlayedGame { moves, board }
    }
}

impl Arbitrary for Turn {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Turn::X, Turn::O]).unwrap()
    }
}

impl Arbitrary for Coord {
    fn arbitrary(g: &mut Gen) -> Self {
        Coord::from_index(u8::arbitrary(g) % 9)
    }
}
