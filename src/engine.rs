//! Core game model for the chain-reaction board game.
//!
//! This module defines the game's fundamental components:
//! - `Player`: The two sides, each mapped to a sign (+1 / -1).
//! - `Grid`: A rectangular board of signed charges. The sign of a non-zero
//!   cell names its owner and the magnitude is the charge stacked on it.
//! - `Game`: Turn order, move validation, winner detection and undo history.
//!   Cascades are resolved through [`crate::cascade::resolve`].
use crate::cascade;
use crate::containers::Queue;
use crate::error::{GridError, MoveError};
use log::{debug, info};
use std::fmt;

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Owns positive cells; moves first.
    One,
    /// Owns negative cells.
    Two,
}

impl Player {
    /// The sign this player's cells carry on the grid.
    pub fn sign(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// The owner of a cell holding `value`, or `None` for an empty cell.
    pub fn from_sign(value: i32) -> Option<Player> {
        match value.signum() {
            1 => Some(Player::One),
            -1 => Some(Player::Two),
            _ => None,
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Player name for display.
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

/// Largest charge magnitude accepted from external grid data.
pub const MAX_CHARGE: u32 = 1 << 16;

/// A rectangular grid of signed charges stored in row-major order.
///
/// A grid always has at least one row and one column; every constructor
/// enforces this so the cascade code never sees a degenerate board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Creates a `rows` x `cols` grid with every cell empty.
    ///
    /// # Errors
    /// Returns `GridError::Empty` if either dimension is zero.
    ///
    /// # Examples
    /// ```
    /// use chain_reaction::engine::Grid;
    /// let grid = Grid::new(5, 6).unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (5, 6));
    /// assert_eq!(grid.get(4, 5), 0);
    /// ```
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Grid {
            rows,
            cols,
            cells: vec![0; rows * cols],
        })
    }

    /// Builds a grid from nested rows, checking that it is non-empty and
    /// rectangular and that no charge exceeds [`MAX_CHARGE`] in magnitude.
    ///
    /// # Examples
    /// ```
    /// use chain_reaction::engine::Grid;
    /// let grid = Grid::from_rows(vec![vec![2, 0], vec![0, -1]]).unwrap();
    /// assert_eq!(grid.get(1, 1), -1);
    /// assert!(Grid::from_rows(vec![vec![1, 2], vec![3]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            if let Some(c) = row.iter().position(|v| v.unsigned_abs() > MAX_CHARGE) {
                return Err(GridError::ChargeOutOfRange {
                    row: r,
                    col: c,
                    value: row[c],
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Grid {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the charge at (`r`, `c`).
    ///
    /// # Panics
    /// Panics if the coordinates are outside the grid.
    pub fn get(&self, r: usize, c: usize) -> i32 {
        self.cells[self.index(r, c)]
    }

    /// Overwrites the charge at (`r`, `c`).
    ///
    /// # Panics
    /// Panics if the coordinates are outside the grid.
    pub fn set(&mut self, r: usize, c: usize, value: i32) {
        let idx = self.index(r, c);
        self.cells[idx] = value;
    }

    /// True if the signed coordinates name a cell of this grid.
    pub fn contains(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.cols
    }

    /// Iterates over `(row, col, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|&(_, _, v)| v == 0)
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    /// Copies the grid out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells.chunks(self.cols).map(<[i32]>::to_vec).collect()
    }

    /// A move is valid if the cell is in bounds and empty or already owned by `player`.
    pub fn valid_move(&self, r: usize, c: usize, player: Player) -> bool {
        if r >= self.rows || c >= self.cols {
            return false;
        }
        let value = self.get(r, c);
        value == 0 || value.signum() == player.sign()
    }

    /// Every valid move for `player` in row-major order.
    pub fn valid_moves(&self, player: Player) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|&(_, _, v)| v == 0 || v.signum() == player.sign())
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    /// Renders the grid with row/column labels, marking `pos` with brackets.
    ///
    /// Player One's cells print as `+n`, Player Two's as `-n`, empty cells as `.`.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::from("   ");
        for c in 0..self.cols {
            output.push_str(&format!("{:^5}", c));
        }
        output.push('\n');

        for r in 0..self.rows {
            output.push_str(&format!("{:<3}", r));
            for c in 0..self.cols {
                let value = self.get(r, c);
                let label = if value == 0 {
                    ".".to_string()
                } else {
                    format!("{:+}", value)
                };
                let cell = if pos == Some((r, c)) {
                    format!("[{}]", label)
                } else {
                    label
                };
                output.push_str(&format!("{:^5}", cell));
            }
            if r + 1 < self.rows {
                output.push('\n');
            }
        }
        output
    }

    fn index(&self, r: usize, c: usize) -> usize {
        assert!(
            r < self.rows && c < self.cols,
            "cell ({}, {}) outside {}x{} grid",
            r,
            c,
            self.rows,
            self.cols
        );
        r * self.cols + c
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// Manages a game session: the live grid, whose turn it is, and undo history.
///
/// # Examples
/// ```
/// use chain_reaction::engine::{Game, Player};
/// let mut game = Game::new(5, 6).unwrap();
/// assert_eq!(game.current_player(), Player::One);
///
/// // Player One adds a charge to its starting corner.
/// let snapshots = game.play(0, 0).unwrap();
/// assert_eq!(snapshots.size(), 1, "the corner overflowed once");
/// assert_eq!(game.current_player(), Player::Two);
/// assert!(game.undo());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    current: Player,
    turn: u32,
    history: Vec<(Grid, Player, u32)>, // (grid, player to move, turn) before each move
}

impl Game {
    /// Starts a game on an empty `rows` x `cols` grid with one piece per player
    /// in opposite corners: Player One at the top-left, Player Two at the
    /// bottom-right. Player One moves first.
    ///
    /// # Errors
    /// Returns `GridError::Empty` for a zero dimension and
    /// `GridError::Unplayable` for boards rejected by [`Game::check_dimensions`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::check_dimensions(rows, cols)?;
        let mut grid = Grid::new(rows, cols)?;
        grid.set(0, 0, Player::One.sign());
        grid.set(rows - 1, cols - 1, Player::Two.sign());
        Ok(Self::from_grid(grid, Player::One))
    }

    /// Checks that a fresh `rows` x `cols` board can host a game.
    ///
    /// The two starting pieces need distinct corners, which rules out a single
    /// cell. On a 1x2 board both cells have a critical mass of 1, so every
    /// move overflows both pieces into each other forever.
    pub fn check_dimensions(rows: usize, cols: usize) -> Result<(), GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if matches!((rows, cols), (1, 1) | (1, 2) | (2, 1)) {
            return Err(GridError::Unplayable { rows, cols });
        }
        Ok(())
    }

    /// Resumes a game from an arbitrary position with `to_move` to play.
    pub fn from_grid(grid: Grid, to_move: Player) -> Self {
        Game {
            grid,
            current: to_move,
            turn: 0,
            history: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Number of moves played since the game was created.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn valid_move(&self, r: usize, c: usize, player: Player) -> bool {
        self.grid.valid_move(r, c, player)
    }

    /// Plays a move for the current player at (`r`, `c`).
    ///
    /// Adds one charge to the cell, resolves any cascade on the live grid and
    /// passes the turn. The returned queue holds every intermediate grid of the
    /// cascade in order; it is empty when nothing overflowed.
    ///
    /// # Errors
    /// * `MoveError::GameOver` if a winner already exists.
    /// * `MoveError::OutOfBounds` if the cell is outside the grid.
    /// * `MoveError::OpponentCell` if the cell belongs to the other player.
    pub fn play(&mut self, r: usize, c: usize) -> Result<Queue<Grid>, MoveError> {
        if self.winner().is_some() {
            return Err(MoveError::GameOver);
        }
        if r >= self.grid.rows() || c >= self.grid.cols() {
            return Err(MoveError::OutOfBounds { row: r, col: c });
        }
        if !self.valid_move(r, c, self.current) {
            return Err(MoveError::OpponentCell { row: r, col: c });
        }

        self.history
            .push((self.grid.clone(), self.current, self.turn));

        let value = self.grid.get(r, c);
        self.grid.set(r, c, value + self.current.sign());
        self.turn += 1;

        let mut snapshots = Queue::new();
        let steps = cascade::resolve(&mut self.grid, &mut snapshots);
        debug!(
            "{} played ({}, {}); cascade recorded {} steps",
            self.current.name(),
            r,
            c,
            steps
        );

        if let Some(winner) = self.winner() {
            info!("{} wins after {} turns", winner.name(), self.turn);
        }
        self.current = self.current.other();
        Ok(snapshots)
    }

    /// Returns the winner, if any.
    ///
    /// There is no winner before the first move. After that, a player wins once
    /// every non-zero cell carries their sign.
    pub fn winner(&self) -> Option<Player> {
        if self.turn == 0 {
            return None;
        }
        let mut owners = self.grid.cells().filter_map(|(_, _, v)| Player::from_sign(v));
        let first = owners.next()?;
        if owners.all(|p| p == first) {
            Some(first)
        } else {
            None
        }
    }

    /// Reverts the last move. Returns `false` if no move has been played.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some((grid, player, turn)) => {
                self.grid = grid;
                self.current = player;
                self.turn = turn;
                true
            }
            None => false,
        }
    }
}
