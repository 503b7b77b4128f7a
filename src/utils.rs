use crate::engine::Grid;
use crate::error::GridError;

/// Parses an array of string slices into a `Grid`.
///
/// Each string slice is one row, starting from row 0, holding
/// whitespace-separated signed integers. A `.` is accepted as shorthand for
/// an empty cell (`0`). Every row must have the same number of cells.
///
/// # Returns
/// * `Ok(Grid)` if parsing is successful.
/// * `Err(GridError)` if there are no rows or cells, rows differ in length,
///   a token is neither an integer nor `.`, or a charge exceeds
///   [`crate::engine::MAX_CHARGE`] in magnitude.
///
/// # Examples
/// ```
/// use chain_reaction::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&["1 0 .", "0 -2 3"]).unwrap();
/// assert_eq!(grid.get(0, 0), 1);
/// assert_eq!(grid.get(0, 2), 0);
/// assert_eq!(grid.get(1, 1), -2);
///
/// assert!(grid_from_str_array(&["1 x"]).is_err());
/// assert!(grid_from_str_array(&["1 2", "3"]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> Result<Grid, GridError> {
    let mut rows = Vec::with_capacity(s.len());
    for (r, row_str) in s.iter().enumerate() {
        let row = row_str
            .split_whitespace()
            .enumerate()
            .map(|(c, token)| match token {
                "." => Ok(0),
                _ => token.parse::<i32>().map_err(|_| GridError::Parse {
                    row: r,
                    col: c,
                    token: token.to_string(),
                }),
            })
            .collect::<Result<Vec<i32>, GridError>>()?;
        rows.push(row);
    }
    Grid::from_rows(rows)
}
