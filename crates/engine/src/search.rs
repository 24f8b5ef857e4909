//! Fixed-depth minimax search
//!
//! The tree is rebuilt from scratch on every call. Each node owns a copy of
//! the game state, so nothing in the search can touch the live game.
//!
//! Scores accumulate along a path: a child above the depth limit contributes
//! its own static evaluation on top of the value propagated from below it.
//! Black maximizes; the root is always a maximizing node.

use tracing::debug;

use crate::core::GameState;
use crate::evaluate::{Evaluator, PawnStructure};
use crate::types::{Move, Player, SEARCH_DEPTH};

/// Search parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies below the root
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: SEARCH_DEPTH,
        }
    }
}

/// One position in the search tree
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: GameState,
    /// The move that produced this node; None at the root
    pub mv: Option<Move>,
    pub maximizing: bool,
    pub score: f64,
    pub children: Vec<SearchNode>,
}

impl SearchNode {
    fn new(state: GameState, mv: Option<Move>, maximizing: bool) -> Self {
        Self {
            state,
            mv,
            maximizing,
            score: 0.0,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(SearchNode::size).sum::<usize>()
    }
}

/// Moves of the side to move, in search order
///
/// Destinations ascend by (column, row) for White and descend for Black;
/// sources sharing a destination follow the same direction.
pub fn ordered_moves(state: &GameState) -> Vec<Move> {
    let player = state.current_player();
    let mut moves = state.legal_moves(player);
    moves.sort_by_key(|mv| (mv.to, mv.from));
    if player == Player::Black {
        moves.reverse();
    }
    moves
}

/// Minimax over a pluggable static evaluator
#[derive(Debug, Clone, Default)]
pub struct MinimaxSearch<E = PawnStructure> {
    config: SearchConfig,
    evaluator: E,
}

impl<E: Evaluator> MinimaxSearch<E> {
    pub fn new(config: SearchConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    fn depth(&self) -> u32 {
        self.config.depth.max(1)
    }

    /// Build the tree rooted at `state` and propagate scores
    pub fn search(&self, state: &GameState) -> SearchNode {
        let mut root = SearchNode::new(*state, None, true);
        self.expand(&mut root, 0);
        self.propagate(&mut root, 0);
        root
    }

    /// Best move for the side to move, or None if it has to pass
    pub fn best_move(&self, state: &GameState) -> Option<Move> {
        if !state.is_running() {
            return None;
        }
        let root = self.search(state);
        let best = root
            .children
            .iter()
            .find(|child| child.score == root.score)
            .and_then(|child| child.mv);
        debug!(
            player = %state.current_player(),
            nodes = root.size(),
            score = root.score,
            best = ?best,
            "Search finished"
        );
        best
    }

    fn expand(&self, node: &mut SearchNode, depth: u32) {
        if depth >= self.depth() || !node.state.is_running() {
            return;
        }
        for mv in ordered_moves(&node.state) {
            let mut state = node.state;
            if !state.attempt_move(mv.from, mv.to) {
                continue;
            }
            let mut child = SearchNode::new(state, Some(mv), !node.maximizing);
            self.expand(&mut child, depth + 1);
            node.children.push(child);
        }
    }

    fn propagate(&self, node: &mut SearchNode, depth: u32) -> f64 {
        let limit = self.depth();
        if depth == limit || node.children.is_empty() {
            node.score = self.evaluator.evaluate(&node.state, depth);
            return node.score;
        }
        let child_depth = depth + 1;
        let mut best = if node.maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for child in &mut node.children {
            let mut score = self.propagate(child, child_depth);
            if child_depth < limit {
                score += self.evaluator.evaluate(&child.state, child_depth);
            }
            child.score = score;
            best = if node.maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        node.score = best;
        best
    }
}

/// Best move for the side to move with the default search
///
/// Returns None when the game is not running or the side to move has no
/// legal move; callers treat that as a pass.
pub fn compute_best_move(state: &GameState) -> Option<Move> {
    MinimaxSearch::<PawnStructure>::default().best_move(state)
}
