use std::io::Write;

use anyhow::Context;
use serde::Serialize;
use tictactoe::{Board, Coord, Outcome, Turn};
use tracing::{debug, trace, warn};

use crate::player::Player;

/// Where a game stands between two plies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    AwaitingMove(Turn),
    Terminal(Outcome),
}

impl GameState {
    /// The state after `turn` moved and produced `board`.
    fn after_move(turn: Turn, board: &Board) -> Self {
        match board.game_over() {
            Outcome::Ongoing => GameState::AwaitingMove(turn.opponent()),
            outcome => GameState::Terminal(outcome),
        }
    }
}

/// Summarizes a finished game.
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    /// Names of the X and O players.
    pub players: [String; 2],
    pub outcome: Outcome,
    pub moves: Vec<Coord>,
    pub board: Board,
}

/// Shows the game to the people watching it.
pub struct Announcer {
    out: Box<dyn Write>,
}

impl Announcer {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn announce_start(&mut self, players: [&str; 2], board: &Board) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "\n{} (X) against {} (O)\n{}",
            players[0], players[1], board
        )?;
        Ok(())
    }

    fn announce_move(
        &mut self,
        name: &str,
        turn: Turn,
        coord: Coord,
        board: &Board,
    ) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "\n{} ({}) marks cell {}\n{}",
            name,
            turn,
            coord.cell_number(),
            board
        )?;
        Ok(())
    }

    fn announce_outcome(&mut self, players: [&str; 2], outcome: Outcome) -> anyhow::Result<()> {
        match outcome {
            Outcome::Won(turn) => {
                writeln!(self.out, "{} ({}) wins!", players[index(turn)], turn)?
            }
            Outcome::Tie => writeln!(self.out, "It's a tie.")?,
            Outcome::Ongoing => {}
        }
        self.out.flush()?;
        Ok(())
    }
}

fn index(turn: Turn) -> usize {
    match turn {
        Turn::X => 0,
        Turn::O => 1,
    }
}

/// Plays a single game from the empty board. `players[0]` plays X and moves first.
///
/// Returns an error only when a player fails to produce a move or picks an
/// occupied cell, which is a bug in that player.
pub fn play_game(
    mut players: [&mut dyn Player; 2],
    announcer: &mut Option<Announcer>,
) -> anyhow::Result<GameRecord> {
    let names = [players[0].name().to_owned(), players[1].name().to_owned()];
    let mut board = Board::empty();
    let mut moves = Vec::with_capacity(9);
    let mut state = GameState::AwaitingMove(Turn::X);
    if let Some(announcer) = announcer {
        announcer.announce_start([&names[0], &names[1]], &board)?;
    }

    loop {
        match state {
            GameState::AwaitingMove(turn) => {
                if board.turn_to_move() != turn {
                    warn!(%turn, expected = %board.turn_to_move(), "Turn order is off");
                }
                let player = &mut players[index(turn)];
                let coord = player.decide_move(&board, turn)?;
                board = board
                    .try_play(turn, coord)
                    .with_context(|| format!("{} played an illegal move", player.name()))?;
                trace!(player = player.name(), %turn, %coord, "Move");
                moves.push(coord);
                if let Some(announcer) = announcer {
                    announcer.announce_move(player.name(), turn, coord, &board)?;
                }
                state = GameState::after_move(turn, &board);
            }
            GameState::Terminal(outcome) => {
                debug!(%outcome, plies = moves.len(), "Game over");
                if let Some(announcer) = announcer {
                    announcer.announce_outcome([&names[0], &names[1]], outcome)?;
                }
                return Ok(GameRecord {
                    players: names,
                    outcome,
                    moves,
                    board,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tictactoe::Formidable;

    use super::*;
    use crate::player::OptimalComputer;

    /// Lets a test read what the announcer wrote.
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn optimal(seed: u64) -> OptimalComputer {
        OptimalComputer::new("hal", Formidable, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn board_is_announced_once_per_ply() {
        let buf = SharedBuf::default();
        let mut announcer = Some(Announcer::new(Box::new(buf.clone())));
        let mut x = optimal(1);
        let mut o = optimal(2);
        let record = play_game([&mut x, &mut o], &mut announcer).unwrap();

        let text = String::from_utf8(buf.0.borrow().clone()).unwrap();
        // Two separator lines per board, one board before the first ply and
        // one after each ply.
        let boards = text.matches("---+---+---").count() / 2;
        assert_eq!(boards, record.moves.len() + 1);
        assert!(text.contains("hal (X) against hal (O)"));
        assert!(text.ends_with("It's a tie.\n"));
    }

    #[test]
    fn turn_to_move_follows_the_record() {
        let mut x = optimal(8);
        let mut o = optimal(9);
        let record = play_game([&mut x, &mut o], &mut None).unwrap();
        let mut board = Board::empty();
        for (ply, &coord) in record.moves.iter().enumerate() {
            let turn = if ply % 2 == 0 { Turn::X } else { Turn::O };
            assert_eq!(board.turn_to_move(), turn);
            board = board.play(turn, coord);
        }
        assert_eq!(board, record.board);
    }

    #[test]
    fn records_serialize_to_json() {
        let mut x = optimal(5);
        let mut o = optimal(6);
        let record = play_game([&mut x, &mut o], &mut None).unwrap();
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["players"], serde_json::json!(["hal", "hal"]));
        assert_eq!(json["outcome"], "tie");
        assert_eq!(json["moves"][0], serde_json::json!([1, 1]));
        assert_eq!(json["moves"].as_array().unwrap().len(), 9);
        assert_eq!(json["board"]["cells"][4], "X");
    }

    #[test]
    fn state_transitions() {
        let board = tictactoe::board!("XX. / OO. / ...");
        assert_eq!(
            GameState::after_move(Turn::O, &board),
            GameState::AwaitingMove(Turn::X)
        );
        let board = tictactoe::board!("XXX / OO. / ...");
        assert_eq!(
            GameState::after_move(Turn::X, &board),
            GameState::Terminal(Outcome::Won(Turn::X))
        );
        let board = tictactoe::board!("XOX / XOO / OXX");
        assert_eq!(
            GameState::after_move(Turn::X, &board),
            GameState::Terminal(Outcome::Tie)
        );
    }
}
