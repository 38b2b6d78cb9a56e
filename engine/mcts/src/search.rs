//! UCT search driver.
//!
//! Each iteration clones the caller's board as scratch space, descends
//! the tree by UCB1, expands one untried move, plays the position out
//! with the rollout policy, and credits the result to every node on the
//! path. The move with the most root visits wins.

use std::time::{Duration, Instant};

use game_connect4::{tactics, Board, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MctsConfig;
use crate::node::{Node, NodeId};
use crate::rollout;
use crate::table::SearchTable;

/// Errors from the MCTS entry point.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("time budget must be positive")]
    ZeroBudget,

    #[error("exploration constant must be finite and non-negative, got {0}")]
    InvalidExploration(f64),

    #[error("center bias must be within [0, 1], got {0}")]
    InvalidCenterBias(f64),

    #[error("no legal move available")]
    NoLegalMove,
}

/// Counters from the most recent decision.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Completed select/expand/rollout/backprop iterations.
    pub iterations: u64,
    /// Nodes stored in the table after the decision.
    pub tree_nodes: usize,
    /// Visits accumulated at the root, including reuse from earlier
    /// decisions in the same game.
    pub root_visits: u32,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// A move-choosing agent that keeps its tree between decisions.
///
/// Positions are stored by canonical key, so work done for one decision
/// carries over when the game advances into the explored subtree.
pub struct MctsAgent {
    config: MctsConfig,
    table: SearchTable,
    rng: ChaCha20Rng,
    last_stats: SearchStats,
}

impl MctsAgent {
    pub fn new(config: MctsConfig) -> Self {
        Self::with_rng(config, ChaCha20Rng::from_entropy())
    }

    /// Deterministic construction for tests and reproducible self-play.
    pub fn with_rng(config: MctsConfig, rng: ChaCha20Rng) -> Self {
        Self {
            config,
            table: SearchTable::new(),
            rng,
            last_stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Counters from the most recent [`choose_move`](Self::choose_move).
    pub fn last_stats(&self) -> &SearchStats {
        &self.last_stats
    }

    /// Nodes currently held in the tree.
    pub fn tree_size(&self) -> usize {
        self.table.len()
    }

    /// Drop the retained tree, e.g. between games.
    pub fn reset(&mut self) {
        self.table.clear();
        self.last_stats = SearchStats::default();
    }

    /// Pick a column for the side to move.
    pub fn choose_move(&mut self, board: &Board) -> Result<usize, SearchError> {
        self.config.validate()?;
        if board.status().is_terminal() {
            return Err(SearchError::NoLegalMove);
        }
        let legal = board.legal_moves();
        let Some(&first) = legal.first() else {
            return Err(SearchError::NoLegalMove);
        };

        if self.config.tactical {
            if let Some(col) = tactics::forced_move(board) {
                debug!(col, "tactical shortcut");
                self.last_stats = SearchStats::default();
                return Ok(col);
            }
        }

        let start = Instant::now();
        let root_key = board.key();
        let root_mover = board.side_to_move().opponent();
        let untried: Vec<u8> = legal.iter().map(|&c| c as u8).collect();
        let root = self
            .table
            .get_or_insert_with(root_key, || Node::new(root_key, root_mover, untried));

        let mut iterations = 0u64;
        while start.elapsed() < self.config.time_budget {
            self.run_iteration(board, root);
            iterations += 1;
        }

        let col = match self.most_visited_child(root) {
            Some(col) => col,
            None => {
                // Budget too small for a single iteration.
                warn!("no iterations completed, falling back to first legal column");
                first
            }
        };

        self.last_stats = SearchStats {
            iterations,
            tree_nodes: self.table.len(),
            root_visits: self.table.get(root).visits,
            elapsed: start.elapsed(),
        };
        debug!(
            col,
            iterations,
            nodes = self.last_stats.tree_nodes,
            "mcts move chosen"
        );
        Ok(col)
    }

    /// One select/expand/rollout/backprop pass.
    fn run_iteration(&mut self, board: &Board, root: NodeId) {
        let mut scratch = board.clone();
        let mut path = vec![root];
        let mut current = root;

        // Selection: descend while every reply has a child.
        loop {
            let node = self.table.get(current);
            if !node.is_fully_expanded() || node.children.is_empty() {
                break;
            }
            let Some((col, child)) = self.select_child(current) else {
                break;
            };
            if scratch.apply(col as usize).is_err() {
                break;
            }
            path.push(child);
            current = child;
        }

        // Expansion: attach one random untried reply.
        if !scratch.status().is_terminal() {
            let node = self.table.get_mut(current);
            if !node.untried.is_empty() {
                let pick = self.rng.gen_range(0..node.untried.len());
                let col = node.untried.swap_remove(pick);
                if scratch.apply(col as usize).is_ok() {
                    let key = scratch.key();
                    let mover = scratch.side_to_move().opponent();
                    // Terminal children never expand further.
                    let replies: Vec<u8> = if scratch.status().is_terminal() {
                        Vec::new()
                    } else {
                        scratch.legal_moves().iter().map(|&c| c as u8).collect()
                    };
                    let child = self
                        .table
                        .get_or_insert_with(key, || Node::new(key, mover, replies));
                    self.table.get_mut(current).children.push((col, child));
                    path.push(child);
                }
            }
        }

        // Rollout and backpropagation.
        let winner = rollout::simulate(
            &mut scratch,
            self.config.tactical,
            self.config.center_bias,
            &mut self.rng,
        );
        for &id in &path {
            let node = self.table.get_mut(id);
            node.visits += 1;
            node.wins += credit(winner, node.mover);
        }
    }

    /// Child with the best UCB1 score; earlier children win ties.
    fn select_child(&self, id: NodeId) -> Option<(u8, NodeId)> {
        let node = self.table.get(id);
        let mut best: Option<(u8, NodeId)> = None;
        let mut best_score = f64::NEG_INFINITY;
        for &(col, child) in &node.children {
            let score = self
                .table
                .get(child)
                .ucb1(node.visits, self.config.exploration);
            if best.is_none() || score > best_score {
                best = Some((col, child));
                best_score = score;
            }
        }
        best
    }

    /// Most visited root child; earlier children win ties.
    fn most_visited_child(&self, root: NodeId) -> Option<usize> {
        let node = self.table.get(root);
        let mut best: Option<usize> = None;
        let mut best_visits = 0u32;
        for &(col, child) in &node.children {
            let visits = self.table.get(child).visits;
            if best.is_none() || visits > best_visits {
                best = Some(col as usize);
                best_visits = visits;
            }
        }
        best
    }
}

/// Reward for `mover` given the rollout outcome.
fn credit(winner: Option<Side>, mover: Side) -> f64 {
    match winner {
        Some(side) if side == mover => 1.0,
        Some(_) => 0.0,
        None => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn board_from(moves: &[usize]) -> Board {
        let mut board = Board::new();
        for &col in moves {
            board.apply(col).unwrap();
        }
        board
    }

    fn agent(config: MctsConfig, seed: u64) -> MctsAgent {
        MctsAgent::with_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }

    #[test]
    fn rejects_invalid_config() {
        let config = MctsConfig::default().with_time_budget(Duration::ZERO);
        let mut agent = agent(config, 1);
        assert_eq!(
            agent.choose_move(&Board::new()),
            Err(SearchError::ZeroBudget)
        );
    }

    #[test]
    fn rejects_terminal_board() {
        let board = board_from(&[0, 1, 0, 1, 0, 1, 0]);
        let mut agent = agent(MctsConfig::for_testing(), 1);
        assert_eq!(agent.choose_move(&board), Err(SearchError::NoLegalMove));
    }

    #[test]
    fn tactical_gate_takes_immediate_win() {
        // X has three stacked in column 2; the gate answers without
        // building a tree.
        let board = board_from(&[2, 0, 2, 0, 2, 1]);
        let mut agent = agent(MctsConfig::for_testing(), 3);
        assert_eq!(agent.choose_move(&board), Ok(2));
        assert_eq!(agent.tree_size(), 0);
    }

    #[test]
    fn tactical_gate_blocks_forced_loss() {
        let board = board_from(&[0, 5, 1, 5, 0, 5]);
        let mut agent = agent(MctsConfig::for_testing(), 4);
        assert_eq!(agent.choose_move(&board), Ok(5));
    }

    #[test]
    fn search_converges_to_one_move_win_without_tactics() {
        // With the gate and rollout tactics off, only visit statistics
        // can find the win in column 2. Every playout through it scores
        // 1.0, so it dominates the root visits quickly.
        let board = board_from(&[2, 0, 2, 0, 2, 1]);
        let config = MctsConfig::for_testing()
            .with_tactical(false)
            .with_time_budget(Duration::from_millis(200));
        let mut agent = agent(config, 5);
        assert_eq!(agent.choose_move(&board), Ok(2));
    }

    #[test]
    fn search_converges_to_forced_block_without_tactics() {
        // O threatens to win in column 5 next ply. With the gate and
        // rollout tactics off, every root child except the block leaves
        // the threat standing, so its win rate collapses and the visit
        // counts settle on column 5 across seeds.
        let board = board_from(&[0, 5, 1, 5, 0, 5]);
        let config = MctsConfig::default()
            .with_tactical(false)
            .with_time_budget(Duration::from_millis(500));
        for seed in 0..5 {
            let mut agent = agent(config.clone(), seed);
            assert_eq!(agent.choose_move(&board), Ok(5), "seed {seed}");
        }
    }

    #[test]
    fn returns_legal_move_from_opening() {
        let board = Board::new();
        let mut agent = agent(MctsConfig::for_testing(), 6);
        let col = agent.choose_move(&board).unwrap();
        assert!(board.is_legal(col));
    }

    #[test]
    fn stats_reflect_the_search() {
        let board = Board::new();
        let mut agent = agent(MctsConfig::for_testing(), 7);
        agent.choose_move(&board).unwrap();
        let stats = agent.last_stats();
        assert!(stats.iterations > 0);
        assert!(stats.tree_nodes > 0);
        assert!(stats.root_visits as u64 <= stats.iterations);
        assert!(stats.elapsed >= agent.config().time_budget);
    }

    #[test]
    fn same_seed_same_move() {
        let board = board_from(&[3, 3, 2]);
        let config = MctsConfig::for_testing().with_tactical(false);
        let a = agent(config.clone(), 9).choose_move(&board).unwrap();
        let b = agent(config, 9).choose_move(&board).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tree_persists_between_decisions_and_reset_clears_it() {
        let mut agent = agent(MctsConfig::for_testing(), 10);
        let mut board = Board::new();
        let col = agent.choose_move(&board).unwrap();
        let after_first = agent.tree_size();
        assert!(after_first > 0);

        board.apply(col).unwrap();
        agent.choose_move(&board).unwrap();
        assert!(agent.tree_size() >= after_first);

        agent.reset();
        assert_eq!(agent.tree_size(), 0);
    }

    #[test]
    fn transposed_histories_share_root_statistics() {
        let config = MctsConfig::for_testing().with_tactical(false);
        let mut agent = agent(config, 11);
        let a = board_from(&[0, 1, 2, 3]);
        agent.choose_move(&a).unwrap();
        let visits_first = agent.last_stats().root_visits;

        // Same discs via a different move order hits the same root node.
        let b = board_from(&[2, 3, 0, 1]);
        agent.choose_move(&b).unwrap();
        assert!(agent.last_stats().root_visits > visits_first);
    }
}
