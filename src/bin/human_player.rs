use anyhow::{Context, Result};
use chain_reaction::config::AppConfig;
use chain_reaction::engine::{Game, Player};
use chain_reaction::solver::GameTree;
use clap::{Parser, ValueEnum};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

/// Who plays a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Seat {
    Human,
    Ai,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chain reaction in the terminal", long_about = None)]
struct Args {
    /// Path to a TOML config file (defaults are used if it does not exist)
    #[arg(long, default_value = "chain_reaction.toml")]
    config: PathBuf,

    /// Override the number of board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the number of board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Who plays Player One (positive pieces)
    #[arg(long, value_enum, default_value_t = Seat::Human)]
    p1: Seat,

    /// Who plays Player Two (negative pieces)
    #[arg(long, value_enum, default_value_t = Seat::Ai)]
    p2: Seat,

    /// Override the search tree depth
    #[arg(long)]
    ply: Option<usize>,

    /// Override the depth at which minimax scores the board
    #[arg(long)]
    cutoff: Option<usize>,
}

enum Command {
    Move(usize, usize),
    Undo,
    Quit,
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

    let mut config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    if let Some(rows) = args.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.board.cols = cols;
    }
    if let Some(ply) = args.ply {
        config.search.ply_limit = ply;
    }
    if let Some(cutoff) = args.cutoff {
        config.search.eval_cutoff = cutoff;
    }
    config.validate()?;
    info!("starting game with {:?}", config);

    let seat_of = |player: Player| match player {
        Player::One => args.p1,
        Player::Two => args.p2,
    };

    let mut game = Game::new(config.board.rows, config.board.cols)?;
    println!("Welcome to Chain Reaction!");

    loop {
        println!("---------------------");
        println!("Turn: {}", game.turn() + 1);
        println!("{}", game.grid());

        if let Some(winner) = game.winner() {
            announce_winner(winner, game.turn());
            break;
        }

        let player = game.current_player();
        let (r, c) = match seat_of(player) {
            Seat::Ai => {
                println!("{} is thinking...", player.name());
                let tree = GameTree::build(game.grid(), player, &config.search);
                let choice = tree.choose_move();
                tree.discard();
                match choice {
                    Some((r, c)) if game.valid_move(r, c, player) => {
                        println!("{} plays ({}, {})", player.name(), r, c);
                        (r, c)
                    }
                    _ => {
                        println!("{} has no legal move.", player.name());
                        announce_winner(player.other(), game.turn());
                        break;
                    }
                }
            }
            Seat::Human => match read_command(player)? {
                Command::Quit => {
                    println!("Thanks for playing!");
                    break;
                }
                Command::Undo => {
                    if game.undo() {
                        // Step back past the AI's replies so the human is to move again.
                        while seat_of(game.current_player()) == Seat::Ai && game.undo() {}
                        println!("Move undone.");
                    } else {
                        println!("Cannot undo further (no moves made).");
                    }
                    continue;
                }
                Command::Move(r, c) => (r, c),
            },
        };

        match game.play(r, c) {
            Ok(mut snapshots) => {
                let mut step = 1;
                while let Ok(snapshot) = snapshots.dequeue() {
                    println!("Cascade step {}:", step);
                    println!("{}", snapshot);
                    step += 1;
                }
            }
            Err(e) => println!("Invalid move: {}", e),
        }
    }

    Ok(())
}

fn announce_winner(winner: Player, turns: u32) {
    println!();
    println!("---------------------");
    println!("🎉 {} WINS! 🎉", winner.name().to_uppercase());
    println!("Total Turns: {}", turns);
    println!("---------------------");
}

/// Prompts until the player enters a move, `u` or `q`. End of input quits.
fn read_command(player: Player) -> Result<Command> {
    loop {
        print!(
            "{}, enter your move (row col), or 'u' to undo, 'q' to quit: ",
            player.name()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(Command::Quit);
        }

        let trimmed_input = input.trim();
        match trimmed_input {
            "q" => return Ok(Command::Quit),
            "u" => return Ok(Command::Undo),
            _ => {}
        }

        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() != 2 {
            println!("Invalid input format. Use 'row col', 'u', or 'q'.");
            continue;
        }
        match (parts[0].parse::<usize>(), parts[1].parse::<usize>()) {
            (Ok(r), Ok(c)) => return Ok(Command::Move(r, c)),
            _ => println!(
                "Invalid input: Please enter numbers for row and column (e.g., '3 4'), 'u', or 'q'."
            ),
        }
    }
}
