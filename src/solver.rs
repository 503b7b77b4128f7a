use crate::engine::{Grid, Player};
use crate::heuristics::evaluate_board;
use log::debug;
use serde::{Deserialize, Serialize};

/// Depth limits for the adversarial search.
///
/// The two limits are independent. `ply_limit` bounds how deep the tree is
/// generated; `eval_cutoff` is the depth at which minimax stops recursing and
/// scores the board. With the defaults (4 and 3) the fourth ply is generated
/// but never scored, so `ply_limit` only changes the result when it is below
/// `eval_cutoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub ply_limit: usize,
    pub eval_cutoff: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            ply_limit: 4,
            eval_cutoff: 3,
        }
    }
}

impl SearchConfig {
    pub fn with_ply_limit(ply_limit: usize) -> Self {
        SearchConfig {
            ply_limit,
            ..Self::default()
        }
    }
}

/// A position in the search tree.
///
/// Each child claims one empty cell of its parent's board for the parent's
/// player to move. Children are generated eagerly and owned by their parent,
/// so dropping a node releases its whole subtree.
#[derive(Clone, Debug)]
pub struct Node {
    board: Grid,
    depth: usize,
    player: Player,
    placement: Option<(usize, usize)>,
    children: Vec<Node>,
}

impl Node {
    fn build(
        board: Grid,
        depth: usize,
        player: Player,
        placement: Option<(usize, usize)>,
        ply_limit: usize,
    ) -> Node {
        let mut node = Node {
            board,
            depth,
            player,
            placement,
            children: Vec::new(),
        };
        if depth < ply_limit {
            node.generate_children(ply_limit);
        }
        node
    }

    fn generate_children(&mut self, ply_limit: usize) {
        for (r, c) in self.board.empty_cells() {
            let mut board = self.board.clone();
            board.set(r, c, self.player.sign());
            self.children.push(Node::build(
                board,
                self.depth + 1,
                self.player.other(),
                Some((r, c)),
                ply_limit,
            ));
        }
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    /// Plies between this node and the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The player to move at this node.
    pub fn player(&self) -> Player {
        self.player
    }

    /// The cell claimed to reach this node; `None` at the root.
    pub fn placement(&self) -> Option<(usize, usize)> {
        self.placement
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

/// A bounded-depth game tree rooted at the current position.
///
/// # Examples
/// ```
/// use chain_reaction::engine::{Grid, Player};
/// use chain_reaction::solver::{GameTree, SearchConfig};
///
/// let grid = Grid::from_rows(vec![vec![0, 0], vec![0, -1]]).unwrap();
/// let tree = GameTree::build(&grid, Player::One, &SearchConfig::with_ply_limit(1));
/// assert_eq!(tree.root().children().len(), 3);
/// assert_eq!(tree.choose_move(), Some((0, 0)));
/// tree.discard();
/// ```
#[derive(Clone, Debug)]
pub struct GameTree {
    root: Node,
    player: Player,
    eval_cutoff: usize,
}

impl GameTree {
    /// Builds the tree for `player` to move on a private copy of `grid`.
    ///
    /// Children model placements only: claiming an empty cell with one charge.
    /// No cascade is simulated while the tree is generated.
    pub fn build(grid: &Grid, player: Player, config: &SearchConfig) -> Self {
        let root = Node::build(grid.clone(), 0, player, None, config.ply_limit);
        debug!(
            "built game tree: {} nodes, ply limit {}, eval cutoff {}",
            root.count(),
            config.ply_limit,
            config.eval_cutoff
        );
        GameTree {
            root,
            player,
            eval_cutoff: config.eval_cutoff,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The player the tree scores for.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Backs up a score for `node` by alternating max and min at each ply.
    ///
    /// Leaves, and nodes at the evaluation cutoff, are scored with
    /// [`evaluate_board`] from the root player's point of view.
    pub fn minimax(&self, node: &Node, maximizing: bool) -> i32 {
        if node.children.is_empty() || node.depth >= self.eval_cutoff {
            return evaluate_board(&node.board, self.player);
        }

        let scores = node
            .children
            .iter()
            .map(|child| self.minimax(child, !maximizing));
        let best = if maximizing { scores.max() } else { scores.min() };
        best.unwrap_or_else(|| evaluate_board(&node.board, self.player))
    }

    /// Picks the root's best child and reports where to play.
    ///
    /// Every child is scored with `minimax(child, false)`; the first child with
    /// the strictly greatest score wins ties. The move is then read off that
    /// child's board as the cell with the largest value times the root
    /// player's sign (first in row-major order).
    ///
    /// # Returns
    /// `None` if the root has no children, i.e. no legal move.
    pub fn choose_move(&self) -> Option<(usize, usize)> {
        let mut best: Option<(i32, &Node)> = None;
        for child in &self.root.children {
            let score = self.minimax(child, false);
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, child));
            }
        }

        let (score, child) = best?;
        let chosen = strongest_cell(&child.board, self.player)?;
        debug!(
            "chose {:?} with score {} (placement {:?})",
            chosen, score, child.placement
        );
        Some(chosen)
    }

    /// Releases the tree. Children are owned, so this drops every node.
    pub fn discard(self) {
        drop(self);
    }
}

/// The first cell, row-major, maximising `value * player.sign()`.
fn strongest_cell(grid: &Grid, player: Player) -> Option<(usize, usize)> {
    let sign = player.sign();
    let mut best: Option<(i32, (usize, usize))> = None;
    for (r, c, v) in grid.cells() {
        let weight = v.saturating_mul(sign);
        if best.map_or(true, |(w, _)| weight > w) {
            best = Some((weight, (r, c)));
        }
    }
    best.map(|(_, pos)| pos)
}
