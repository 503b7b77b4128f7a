//! Overflow detection and cascade resolution on a [`Grid`].
//!
//! A cell reaches critical mass when its charge magnitude is at least the
//! number of its in-bounds orthogonal neighbours: 2 in a corner, 3 on an edge,
//! 4 in the interior. Resolving a cascade empties every such cell and hands
//! one charge to each neighbour, which is captured by the overflowing cell's
//! owner. Each pass is recorded as a snapshot so a front end can replay it.
use crate::containers::Queue;
use crate::engine::Grid;
use crate::hash_table::HashTable;
use log::{debug, warn};

/// The four orthogonal neighbours of (`row`, `col`): up, down, left, right.
///
/// No bounds filtering is done here; pair with [`in_bounds`].
pub fn neighbors(row: usize, col: usize) -> [(isize, isize); 4] {
    let (r, c) = (row as isize, col as isize);
    [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)]
}

pub fn in_bounds(grid: &Grid, row: isize, col: isize) -> bool {
    grid.contains(row, col)
}

/// Number of in-bounds neighbours of (`row`, `col`); a cell holding this much
/// charge or more overflows.
pub fn critical_mass(grid: &Grid, row: usize, col: usize) -> i32 {
    neighbors(row, col)
        .iter()
        .filter(|&&(r, c)| in_bounds(grid, r, c))
        .count() as i32
}

/// Coordinates of every cell at or above critical mass, in row-major order.
/// Returns `None` when the grid is stable.
pub fn find_overflowing(grid: &Grid) -> Option<Vec<(usize, usize)>> {
    let coords: Vec<(usize, usize)> = grid
        .cells()
        .filter(|&(r, c, v)| v.unsigned_abs() >= critical_mass(grid, r, c) as u32)
        .map(|(r, c, _)| (r, c))
        .collect();
    if coords.is_empty() {
        None
    } else {
        Some(coords)
    }
}

/// True if every non-zero cell carries the same sign. An all-zero grid counts.
pub fn all_same_sign(grid: &Grid) -> bool {
    let mut signs = grid
        .cells()
        .map(|(_, _, v)| v.signum())
        .filter(|&s| s != 0);
    match signs.next() {
        Some(first) => signs.all(|s| s == first),
        None => true,
    }
}

/// Resolves overflow on `grid` in place, one simultaneous pass at a time.
///
/// Each pass zeroes every overflowing cell and records its sign before any
/// neighbour is touched, then adds one charge to each in-bounds neighbour:
/// the neighbour's magnitude grows by one and it takes the overflowing cell's
/// sign. A copy of the grid after every pass is enqueued on `snapshots`.
///
/// Resolution stops when nothing overflows, when every non-zero cell already
/// belongs to one player, or when a pass reproduces a grid seen earlier in the
/// same cascade. Returns the number of snapshots recorded.
///
/// # Examples
/// ```
/// use chain_reaction::cascade::resolve;
/// use chain_reaction::containers::Queue;
/// use chain_reaction::engine::Grid;
///
/// let mut grid = Grid::from_rows(vec![vec![2, 0], vec![0, -1]]).unwrap();
/// let mut snapshots = Queue::new();
/// assert_eq!(resolve(&mut grid, &mut snapshots), 1);
/// assert_eq!(grid.to_rows(), vec![vec![0, 1], vec![1, -1]]);
/// ```
pub fn resolve(grid: &mut Grid, snapshots: &mut Queue<Grid>) -> usize {
    let mut seen = HashTable::new();
    resolve_from(grid, snapshots, &mut seen)
}

fn resolve_from(
    grid: &mut Grid,
    snapshots: &mut Queue<Grid>,
    seen: &mut HashTable<Grid, ()>,
) -> usize {
    let overflowing = match find_overflowing(grid) {
        Some(coords) if !all_same_sign(grid) => coords,
        _ => return 0,
    };
    if !seen.insert(grid.clone(), ()) {
        warn!(
            "cascade cycle detected after {} passes; stopping",
            seen.occupied_count()
        );
        return 0;
    }
    debug!("cascade pass: {} overflowing cells", overflowing.len());

    let signs: Vec<i32> = overflowing
        .iter()
        .map(|&(r, c)| {
            let sign = grid.get(r, c).signum();
            grid.set(r, c, 0);
            sign
        })
        .collect();

    for (&(row, col), &sign) in overflowing.iter().zip(&signs) {
        for (r, c) in neighbors(row, col) {
            if in_bounds(grid, r, c) {
                let (r, c) = (r as usize, c as usize);
                let charge = grid.get(r, c).saturating_abs().saturating_add(1);
                grid.set(r, c, charge * sign);
            }
        }
    }

    snapshots.enqueue(grid.clone());
    1 + resolve_from(grid, snapshots, seen)
}
