use anyhow::Result;
use chain_reaction::config::AppConfig;
use chain_reaction::engine::{Game, Player};
use chain_reaction::hash_table::HashTable;
use chain_reaction::heuristics::choose_move_random;
use chain_reaction::solver::{GameTree, SearchConfig};
use clap::Parser;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;

const MINIMAX: &str = "minimax";
const RANDOM: &str = "random";
const DRAW: &str = "draw";

#[derive(Parser, Debug)]
#[command(author, version, about = "Pit the minimax bot against a random bot", long_about = None)]
struct Args {
    /// Number of games to play; the minimax bot alternates seats
    #[arg(short, long, default_value_t = 10)]
    games: u64,

    /// Base seed; game `i` uses `seed + i`
    #[arg(short, long, default_value_t = 514514)]
    seed: u64,

    /// Games still running after this many turns are scored as draws
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Path to a TOML config file (defaults are used if it does not exist)
    #[arg(long, default_value = "chain_reaction.toml")]
    config: PathBuf,

    /// Override the number of board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the number of board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Override the search tree depth
    #[arg(long)]
    ply: Option<usize>,
}

/// Outcome of one arena game.
struct GameResult {
    winner: Option<Player>,
    turns: u32,
}

fn play_game(
    rows: usize,
    cols: usize,
    minimax_seat: Player,
    search: &SearchConfig,
    max_turns: u32,
    rng: &mut SmallRng,
) -> Result<GameResult> {
    let mut game = Game::new(rows, cols)?;

    while game.turn() < max_turns {
        if let Some(winner) = game.winner() {
            return Ok(GameResult {
                winner: Some(winner),
                turns: game.turn(),
            });
        }

        let player = game.current_player();
        let choice = if player == minimax_seat {
            let tree = GameTree::build(game.grid(), player, search);
            let choice = tree.choose_move();
            tree.discard();
            choice
        } else {
            choose_move_random(game.grid(), player, rng)
        };

        let Some((r, c)) = choice else {
            debug!("{} has no legal move", player.name());
            return Ok(GameResult {
                winner: Some(player.other()),
                turns: game.turn(),
            });
        };
        game.play(r, c)?;
    }

    Ok(GameResult {
        winner: game.winner(),
        turns: game.turn(),
    })
}

fn record(tally: &mut HashTable<&'static str, u32>, key: &'static str) {
    let count = tally.search(&key).copied().unwrap_or(0);
    if !tally.modify(&key, count + 1) {
        tally.insert(key, 1);
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config)?;
    if let Some(rows) = args.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.board.cols = cols;
    }
    if let Some(ply) = args.ply {
        config.search.ply_limit = ply;
    }
    config.validate()?;
    info!(
        "arena: {} games on {}x{}, {:?}",
        args.games, config.board.rows, config.board.cols, config.search
    );

    let mut tally: HashTable<&'static str, u32> = HashTable::new();
    let mut total_turns: u64 = 0;

    for i in 0..args.games {
        let minimax_seat = if i % 2 == 0 { Player::One } else { Player::Two };
        let mut rng = SmallRng::seed_from_u64(args.seed.wrapping_add(i));
        let result = play_game(
            config.board.rows,
            config.board.cols,
            minimax_seat,
            &config.search,
            args.max_turns,
            &mut rng,
        )?;

        let outcome = match result.winner {
            Some(p) if p == minimax_seat => MINIMAX,
            Some(_) => RANDOM,
            None => DRAW,
        };
        record(&mut tally, outcome);
        total_turns += u64::from(result.turns);

        println!(
            "Game {:>3}: minimax as {}, {} after {} turns",
            i + 1,
            minimax_seat.name(),
            match outcome {
                MINIMAX => "minimax won",
                RANDOM => "random won",
                _ => "draw",
            },
            result.turns
        );
    }

    let recorded: u32 = tally.iter().map(|(_, count)| *count).sum();
    println!("---------------------");
    println!("Games recorded: {}", recorded);
    for key in [MINIMAX, RANDOM, DRAW] {
        println!("{:<8} {}", key, tally.search(&key).copied().unwrap_or(0));
    }
    if args.games > 0 {
        println!(
            "Average turns: {:.2}",
            total_turns as f64 / args.games as f64
        );
    }

    Ok(())
}
