use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::{rules, Board, Candidates, Coord, InvalidBlunderProbability, NoLegalMove, Turn};

/// Turns the ranked output of [`rules()`] into a single move.
///
/// This is the knob for playing strength. Implementations choose differently
/// from the same ranked candidates, the rule chain itself is never changed.
pub trait Selector {
    /// Picks a move, or returns `None` if `ranked` is empty.
    fn choose<R: Rng + ?Sized>(&self, ranked: &[Candidates], rng: &mut R) -> Option<Coord>;
}

/// Perfect play: a uniformly random move among the highest-priority candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Formidable;

/// Plays like [`Formidable`], except that with probability `blunder_probability`
/// it picks a move proposed by a lower-priority rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weakened {
    blunder_probability: f64,
}

impl Selector for Formidable {
    fn choose<R: Rng + ?Sized>(&self, ranked: &[Candidates], rng: &mut R) -> Option<Coord> {
        ranked.first()?.coords.choose(rng)
    }
}

impl Weakened {
    pub fn new(blunder_probability: f64) -> Result<Self, InvalidBlunderProbability> {
        if !(0.0..=1.0).contains(&blunder_probability) {
            return Err(InvalidBlunderProbability(blunder_probability));
        }
        Ok(Self {
            blunder_probability,
        })
    }

    pub fn blunder_probability(&self) -> f64 {
        self.blunder_probability
    }
}

impl Selector for Weakened {
    fn choose<R: Rng + ?Sized>(&self, ranked: &[Candidates], rng: &mut R) -> Option<Coord> {
        if ranked.len() > 1 && rng.gen_bool(self.blunder_probability) {
            let worse = ranked[1..].choose(rng)?;
            trace!(rule = %worse.rule, "Blundering");
            worse.coords.choose(rng)
        } else {
            Formidable.choose(ranked, rng)
        }
    }
}

/// Picks an optimal move for `turn`, breaking ties randomly.
///
/// Fails only if the board has no blank cell.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    turn: Turn,
    rng: &mut R,
) -> Result<Coord, NoLegalMove> {
    select_move_with(&Formidable, board, turn, rng)
}

/// Like [`select_move()`], with a custom [`Selector`].
pub fn select_move_with<S: Selector, R: Rng + ?Sized>(
    selector: &S,
    board: &Board,
    turn: Turn,
    rng: &mut R,
) -> Result<Coord, NoLegalMove> {
    let ranked = rules(board, turn);
    if let Some(best) = ranked.first() {
        debug!(%turn, rule = %best.rule, candidates = ?best.coords, "Rule chain evaluated");
    }
    selector.choose(&ranked, rng).ok_or(NoLegalMove)
}
