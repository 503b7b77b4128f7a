//! Error types shared across the crate.
//!
//! Each concern gets its own enum so callers can match on exactly the
//! failures an operation can produce.

use std::path::PathBuf;

/// Errors raised by the sequence containers in [`crate::containers`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    #[error("{op}() used on empty container")]
    EmptyContainer { op: &'static str },

    #[error("index {index} out of range for container of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

/// Errors raised when building a [`crate::engine::Grid`] from external data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells (expected {expected})")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized token '{token}' in row {row} col {col}")]
    Parse {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("charge {value} in row {row} col {col} is out of range")]
    ChargeOutOfRange { row: usize, col: usize, value: i32 },

    #[error("a {rows}x{cols} board cannot host a game")]
    Unplayable { rows: usize, cols: usize },
}

/// Errors raised when a move cannot be applied to a [`crate::engine::Game`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) belongs to the opponent")]
    OpponentCell { row: usize, col: usize },

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
