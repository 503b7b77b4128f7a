//! # Chain Reaction Library
//!
//! This library provides the rules engine for the chain-reaction board game
//! and a minimax opponent that picks moves for either player.
//!
//! It is used by three binaries:
//! - `human_player`: Play in the terminal, with either seat handed to the AI.
//! - `ai_solver`: Takes a board file and a player, then prints the AI's move.
//! - `bot_arena`: Pits the minimax bot against a seeded random bot and tallies results.
//!
//! ## Modules
//! - `containers`: `Stack`, `Queue` and `Deque`, array-backed with doubling growth.
//! - `hash_table`: An open-addressing `HashTable` with linear probing and rehashing.
//! - `engine`: The `Grid` of signed charges, `Player`, and `Game` (turns, winner, undo).
//! - `cascade`: Overflow detection and cascade resolution with recorded snapshots.
//! - `heuristics`: Static board evaluation and a random move chooser.
//! - `solver`: The bounded-depth `GameTree` and minimax move selection.
//! - `config`: TOML configuration for board size and search limits.
//! - `error`: Error types for containers, grids, moves and configuration.
//! - `utils`: Parsing grids from text.

pub mod cascade;
pub mod config;
pub mod containers;
pub mod engine;
pub mod error;
pub mod hash_table;
pub mod heuristics;
pub mod solver;
pub mod utils;
