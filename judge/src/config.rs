use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tictactoe::{Formidable, Weakened};

use crate::player::{ComputerPlayer, HumanPlayer, Player};

/// A player description, as stored in a JSON file.
///
/// ```json
/// { "nick": "sloppy", "kind": "weakened", "blunder_probability": 0.3 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    #[serde(flatten)]
    pub kind: PlayerKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayerKind {
    /// Always follows the highest-priority rule.
    Optimal,
    /// Sometimes follows a lower-priority rule.
    Weakened { blunder_probability: f64 },
    /// Types moves on stdin.
    Human,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open player config '{}'", path.display()))?;
        let config: PlayerConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        Ok(config)
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    /// Builds the player. Computer players draw their tie-breaks from `rng`.
    pub fn build(&self, rng: StdRng) -> anyhow::Result<Box<dyn Player>> {
        let player: Box<dyn Player> = match self.kind {
            PlayerKind::Optimal => Box::new(ComputerPlayer::new(&self.nick, Formidable, rng)),
            PlayerKind::Weakened {
                blunder_probability,
            } => Box::new(ComputerPlayer::new(
                &self.nick,
                Weakened::new(blunder_probability)?,
                rng,
            )),
            PlayerKind::Human => Box::new(HumanPlayer::new(
                &self.nick,
                std::io::stdin(),
                std::io::stdout(),
            )),
        };
        Ok(player)
    }
}
