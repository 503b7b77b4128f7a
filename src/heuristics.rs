use crate::engine::{Grid, Player};
use rand::seq::SliceRandom;
use rand::Rng;

/// Bonus per cell holding exactly four of the scoring player's charges.
pub const FULL_STACK_BONUS: i32 = 100;

/// Scores `grid` from `player`'s point of view.
///
/// For every cell:
/// - a value of exactly `4 * sign` adds `100 * sign`,
/// - otherwise a cell owned by `player` adds 1,
/// - otherwise a cell owned by the opponent subtracts 1.
///
/// The full-stack test uses `player`'s own sign, so only stacks of four
/// belonging to `player` can trigger it. For Player Two (`sign == -1`) such a
/// stack contributes -100.
///
/// # Examples
/// ```
/// use chain_reaction::engine::{Grid, Player};
/// use chain_reaction::heuristics::evaluate_board;
/// let grid = Grid::from_rows(vec![vec![4, 2], vec![-1, 0]]).unwrap();
/// assert_eq!(evaluate_board(&grid, Player::One), 100 + 1 - 1);
/// ```
pub fn evaluate_board(grid: &Grid, player: Player) -> i32 {
    let sign = player.sign();
    grid.cells().fold(0, |score, (_, _, v)| {
        if v == 4 * sign {
            score + FULL_STACK_BONUS * sign
        } else if v.signum() == sign {
            score + 1
        } else if v.signum() == -sign {
            score - 1
        } else {
            score
        }
    })
}

/// Picks a uniformly random valid move (an empty cell or one `player` owns).
///
/// # Returns
/// `None` if `player` has no valid move.
pub fn choose_move_random(grid: &Grid, player: Player, rng: &mut impl Rng) -> Option<(usize, usize)> {
    grid.valid_moves(player).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_evaluate_counts_owned_cells() {
        let grid = Grid::from_rows(vec![vec![1, 2, -1], vec![0, -3, 0]]).unwrap();
        assert_eq!(evaluate_board(&grid, Player::One), 2 - 2);
        assert_eq!(evaluate_board(&grid, Player::Two), 2 - 2);

        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![0, -3, 0]]).unwrap();
        assert_eq!(evaluate_board(&grid, Player::One), 3 - 1);
        assert_eq!(evaluate_board(&grid, Player::Two), 1 - 3);
    }

    #[test]
    fn test_evaluate_full_stack_uses_scoring_sign() {
        let grid = Grid::from_rows(vec![vec![4, -4]]).unwrap();
        // Player One: +100 for its own stack, -1 for the opponent's.
        assert_eq!(evaluate_board(&grid, Player::One), 99);
        // Player Two: the -4 matches 4 * sign and scores 100 * sign.
        assert_eq!(evaluate_board(&grid, Player::Two), -100 - 1);
    }

    #[test]
    fn test_evaluate_empty_grid() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(evaluate_board(&grid, Player::One), 0);
    }

    #[test]
    fn test_choose_move_random_is_valid_and_deterministic() {
        let grid = Grid::from_rows(vec![vec![1, -1, 0], vec![-2, 0, 3]]).unwrap();
        let mut rng = SmallRng::seed_from_u64(514514);
        for _ in 0..20 {
            let (r, c) = choose_move_random(&grid, Player::One, &mut rng).unwrap();
            assert!(grid.valid_move(r, c, Player::One));
        }

        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        assert_eq!(
            choose_move_random(&grid, Player::Two, &mut a),
            choose_move_random(&grid, Player::Two, &mut b)
        );
    }

    #[test]
    fn test_choose_move_random_without_moves() {
        let grid = Grid::from_rows(vec![vec![-1, -2]]).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(choose_move_random(&grid, Player::One, &mut rng), None);
    }
}
