//! The heuristic rule chain of Newell & Simon (1972).
//!
//! Each [`Rule`] proposes a set of moves for the player to move. The rules are
//! ordered by priority, and always playing a move from the first non-empty set
//! never loses a game.

use serde::{Deserialize, Serialize};

use crate::{Board, Coord, CoordSet, Mark, Outcome, Turn, CORNERS_SET, SIDES_SET};

/// One heuristic of the rule chain, in priority order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Complete a line.
    Win,
    /// Occupy the cell where the opponent would complete a line.
    Block,
    /// Create two threats at once.
    Fork,
    /// Create a threat whose forced answer does not give the opponent a fork.
    BlockForkByThreat,
    /// Occupy the cell where the opponent would create a fork.
    BlockForkByOccupation,
    Center,
    /// Take the corner opposite to one held by the opponent.
    OppositeCorner,
    EmptyCorner,
    EmptySide,
    /// Any blank cell.
    Fallback,
}

/// The moves proposed by a single rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Candidates {
    pub rule: Rule,
    pub coords: CoordSet,
}

impl Rule {
    /// All rules, highest priority first.
    pub const ALL: [Rule; 10] = [
        Rule::Win,
        Rule::Block,
        Rule::Fork,
        Rule::BlockForkByThreat,
        Rule::BlockForkByOccupation,
        Rule::Center,
        Rule::OppositeCorner,
        Rule::EmptyCorner,
        Rule::EmptySide,
        Rule::Fallback,
    ];

    /// The moves this rule proposes for `turn`. Every proposed cell is blank.
    pub fn candidates(self, board: &Board, turn: Turn) -> CoordSet {
        match self {
            Rule::Win => winning_moves(board, turn),
            Rule::Block => winning_moves(board, turn.opponent()),
            Rule::Fork => forking_moves(board, turn),
            Rule::BlockForkByThreat => safe_threats(board, turn),
            Rule::BlockForkByOccupation => forking_moves(board, turn.opponent()),
            Rule::Center => board.candidates() & CoordSet::new().insert(Coord::CENTER),
            Rule::OppositeCorner => {
                let opponent = turn.opponent().mark();
                board
                    .corners()
                    .into_iter()
                    .filter(|&(_, mark)| mark == opponent)
                    .filter_map(|(corner, _)| corner.opposite_corner())
                    .filter(|&coord| board.get(coord) == Mark::Blank)
                    .collect()
            }
            Rule::EmptyCorner => board.candidates() & CORNERS_SET,
            Rule::EmptySide => board.candidates() & SIDES_SET,
            Rule::Fallback => board.candidates(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rule::Win => "win",
            Rule::Block => "block",
            Rule::Fork => "fork",
            Rule::BlockForkByThreat => "block fork by threat",
            Rule::BlockForkByOccupation => "block fork by occupation",
            Rule::Center => "center",
            Rule::OppositeCorner => "opposite corner",
            Rule::EmptyCorner => "empty corner",
            Rule::EmptySide => "empty side",
            Rule::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Evaluates the whole rule chain.
///
/// Returns the non-empty results in priority order. The result is empty only
/// if the board is full, since [`Rule::Fallback`] proposes every blank cell.
pub fn rules(board: &Board, turn: Turn) -> Vec<Candidates> {
    Rule::ALL
        .into_iter()
        .map(|rule| Candidates {
            rule,
            coords: rule.candidates(board, turn),
        })
        .filter(|candidates| !candidates.coords.is_empty())
        .collect()
}

// Cells that complete a line for `turn`. Nothing can be won on a decided board.
fn winning_moves(board: &Board, turn: Turn) -> CoordSet {
    if board.game_over().is_over() {
        return CoordSet::new();
    }
    board
        .candidates()
        .into_iter()
        .filter(|&coord| board.play(turn, coord).game_over() == Outcome::Won(turn))
        .collect()
}

fn forking_moves(board: &Board, turn: Turn) -> CoordSet {
    board
        .candidates()
        .into_iter()
        .filter(|&coord| winning_moves(&board.play(turn, coord), turn).len() > 1)
        .collect()
}

fn safe_threats(board: &Board, turn: Turn) -> CoordSet {
    board
        .candidates()
        .into_iter()
        .filter(|&coord| {
            let after = board.play(turn, coord);
            let threats = winning_moves(&after, turn);
            let opponent_forks = forking_moves(&after, turn.opponent());
            !(threats & !opponent_forks).is_empty()
        })
        .collect()
}
