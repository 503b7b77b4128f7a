use anyhow::{bail, Context, Result};
use chain_reaction::config::AppConfig;
use chain_reaction::engine::{Grid, Player};
use chain_reaction::solver::GameTree;
use chain_reaction::utils::grid_from_str_array;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    One,
    Two,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::One => Player::One,
            Side::Two => Player::Two,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the minimax move for a board", long_about = None)]
struct Args {
    /// The player to move
    #[arg(short, long, value_enum, default_value_t = Side::One)]
    player: Side,

    /// Override the search tree depth
    #[arg(long)]
    ply: Option<usize>,

    /// Override the depth at which minimax scores the board
    #[arg(long)]
    cutoff: Option<usize>,

    /// Path to a TOML config file; only the [search] table is used
    #[arg(long, default_value = "chain_reaction.toml")]
    config: PathBuf,

    /// Path to the board file (one row per line, whitespace-separated values)
    board_file: PathBuf,
}

fn read_board_file(path: &Path) -> Result<Grid> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if lines.is_empty() {
        bail!("board file {} has no rows", path.display());
    }

    grid_from_str_array(&lines).with_context(|| format!("invalid board in {}", path.display()))
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
    if let Some(ply) = args.ply {
        config.search.ply_limit = ply;
    }
    if let Some(cutoff) = args.cutoff {
        config.search.eval_cutoff = cutoff;
    }

    let grid = read_board_file(&args.board_file)?;
    let player = Player::from(args.player);
    println!("Loaded board from {}\n", args.board_file.display());
    println!("Initial board state:\n{}", grid);
    println!(
        "Searching for {} with ply limit {} and eval cutoff {}...\n",
        player.name(),
        config.search.ply_limit,
        config.search.eval_cutoff
    );

    let tree = GameTree::build(&grid, player, &config.search);
    println!(
        "Search tree for {} holds {} nodes.",
        tree.player().name(),
        tree.root().count()
    );
    match tree.choose_move() {
        Some((r, c)) => {
            println!("Best move: ({}, {})\n", r, c);
            println!("{}", grid.to_string_with_highlight(Some((r, c))));
        }
        None => println!("No legal move.\n"),
    }
    tree.discard();

    Ok(())
}
