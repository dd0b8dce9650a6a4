use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{play_game, Announcer, GameRecord, Player, PlayerConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tictactoe::{Outcome, Turn};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play per matchup
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the board after every move (always on when a human plays)
    #[arg(long, default_value_t = false)]
    show_boards: bool,

    /// Print the results, including every game record, as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default, Serialize)]
struct MatchScore {
    players: [String; 2],
    wins: [usize; 2],
    ties: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    games: Vec<GameRecord>,
}

fn play_matchup(
    player_1: &mut dyn Player,
    player_2: &mut dyn Player,
    num_games: usize,
    announcer: &mut Option<Announcer>,
    keep_records: bool,
) -> anyhow::Result<MatchScore> {
    let mut match_score = MatchScore {
        players: [player_1.name().to_owned(), player_2.name().to_owned()],
        ..Default::default()
    };

    for game_idx in 0..num_games {
        // Take turns at moving first
        let swapped = game_idx % 2 == 1;
        let players: [&mut dyn Player; 2] = if swapped {
            [&mut *player_2, &mut *player_1]
        } else {
            [&mut *player_1, &mut *player_2]
        };
        let record = play_game(players, announcer)?;
        match record.outcome {
            Outcome::Won(turn) => {
                let x_idx = usize::from(swapped);
                let player_idx = if turn == Turn::X { x_idx } else { 1 - x_idx };
                debug!(winner = match_score.players[player_idx], game_idx);
                match_score.wins[player_idx] += 1;
            }
            Outcome::Tie => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
            Outcome::Ongoing => unreachable!("play_game returns finished games only"),
        }
        if keep_records {
            match_score.games.push(record);
        }
    }

    eprintln!(
        "End result:\n- {} wins by {}\n- {} wins by {}\n- {} ties",
        match_score.wins[0],
        match_score.players[0],
        match_score.wins[1],
        match_score.players[1],
        match_score.ties
    );

    Ok(match_score)
}

// prints an upper triangular matrix of the results of the tournament
fn print_tournament_results(
    player_configs: &[PlayerConfig],
    match_results: &HashMap<(usize, usize), MatchScore>,
) {
    println!("\nTournament results (p1 win %, p2 win %, tie %):\n");
    print!(" {:19} |", "p1 ↓           p2 →");
    for j in (0..player_configs.len()).rev() {
        print!(" {:19} |", player_configs[j].nick);
    }
    println!();
    for i in 0..player_configs.len() {
        for _ in 0..player_configs.len() - i + 1 {
            print!("---------------------|");
        }
        println!();
        print!(" {:19} |", player_configs[i].nick);
        for j in (0..player_configs.len()).rev() {
            if i >= j {
                print!("    ");
            } else if let Some(score) = match_results.get(&(i, j)) {
                let num_games = (score.wins[0] + score.wins[1] + score.ties).max(1);
                let win_1_percentage = score.wins[0] as f32 / num_games as f32 * 100.0;
                let win_2_percentage = score.wins[1] as f32 / num_games as f32 * 100.0;
                let tie_percentage = score.ties as f32 / num_games as f32 * 100.0;
                print!(
                    "{:5.1}% {:5.1}% {:5.1}% |",
                    win_1_percentage, win_2_percentage, tie_percentage
                );
            } else {
                print!(" {:19} |", "N/A");
            }
        }
        println!();
    }
    println!("---------------------|");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let matchups: Vec<(usize, usize)> = (0..player_configs.len()).tuple_combinations().collect();

    let mut match_results: HashMap<(usize, usize), MatchScore> = HashMap::new();
    for (i1, i2) in matchups {
        let mut player_1 = player_configs[i1].build(StdRng::seed_from_u64(rng.gen()))?;
        let mut player_2 = player_configs[i2].build(StdRng::seed_from_u64(rng.gen()))?;

        let human_involved = player_configs[i1].is_human() || player_configs[i2].is_human();
        let mut announcer = (args.show_boards || human_involved).then(Announcer::stdout);

        info!(
            player_1 = player_1.name(),
            player_2 = player_2.name(),
            "Starting matchup"
        );
        let match_score = play_matchup(
            player_1.as_mut(),
            player_2.as_mut(),
            args.num_games,
            &mut announcer,
            args.json,
        )?;

        match_results.insert((i1, i2), match_score);
    }

    if args.json {
        let scores: Vec<&MatchScore> = match_results
            .iter()
            .sorted_by_key(|(key, _)| **key)
            .map(|(_, score)| score)
            .collect();
        println!("{}", serde_json::to_string_pretty(&scores)?);
    } else if player_configs.len() > 2 {
        print_tournament_results(&player_configs, &match_results);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
