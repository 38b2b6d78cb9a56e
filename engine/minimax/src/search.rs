//! Alpha-beta minimax with iterative deepening.
//!
//! The search runs depth 1, 2, ... up to the configured maximum while
//! wall-clock time remains, keeping the best move from the deepest
//! depth that ran to completion. A depth interrupted by the deadline
//! never overwrites an earlier result.

use std::time::{Duration, Instant};

use game_connect4::{Board, Side, Status};
use thiserror::Error;
use tracing::{debug, trace};

use crate::eval::evaluate;

/// Score of a proven win; negated for a proven loss.
pub const WIN_SCORE: i32 = 1_000_000;

/// Errors from the minimax entry point.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("max_depth must be at least 1")]
    ZeroDepth,

    #[error("time budget must be positive")]
    ZeroBudget,

    #[error("no legal move available")]
    NoLegalMove,
}

/// Search limits.
#[derive(Debug, Clone)]
pub struct MinimaxConfig {
    /// Deepest ply the iterative deepening loop will attempt.
    pub max_depth: u32,
    /// Wall-clock budget for the whole decision.
    pub time_budget: Duration,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            max_depth: 7,
            time_budget: Duration::from_secs(2),
        }
    }
}

impl MinimaxConfig {
    /// Fail fast on unusable limits rather than silently defaulting.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        if self.time_budget.is_zero() {
            return Err(SearchError::ZeroBudget);
        }
        Ok(())
    }
}

/// Deadline interruption; the partial depth's result is discarded.
struct Deadline;

/// Pick a column for the side to move.
///
/// The caller's board is never mutated; the search explores on an
/// owned copy with balanced apply/undo pairs.
pub fn choose_move(board: &Board, config: &MinimaxConfig) -> Result<usize, SearchError> {
    config.validate()?;
    if board.status().is_terminal() {
        return Err(SearchError::NoLegalMove);
    }
    let legal = board.legal_moves();
    let Some(&first) = legal.first() else {
        return Err(SearchError::NoLegalMove);
    };

    let me = board.side_to_move();
    let deadline = Instant::now() + config.time_budget;
    let mut working = board.clone();
    let mut best = first;

    for depth in 1..=config.max_depth {
        match search_root(&mut working, &legal, depth, me, deadline) {
            Ok((col, score)) => {
                best = col;
                trace!(depth, col, score, "completed search depth");
                if score >= WIN_SCORE {
                    // A proven win cannot improve at greater depth.
                    break;
                }
            }
            Err(Deadline) => {
                debug!(depth, "deadline hit, keeping previous depth's move");
                break;
            }
        }
    }

    debug!(col = best, "minimax move chosen");
    Ok(best)
}

/// One full root iteration at a fixed depth. The root always maximizes
/// for the searching side; ties go to the leftmost column.
fn search_root(
    board: &mut Board,
    legal: &[usize],
    depth: u32,
    me: Side,
    deadline: Instant,
) -> Result<(usize, i32), Deadline> {
    let mut alpha = i32::MIN;
    let beta = i32::MAX;
    let mut best = (legal[0], i32::MIN);

    for &col in legal {
        if board.apply(col).is_err() {
            continue;
        }
        let result = alphabeta(board, depth - 1, alpha, beta, false, me, deadline);
        let undone = board.undo();
        debug_assert!(undone.is_ok());
        let score = result?;
        if score > best.1 {
            best = (col, score);
        }
        alpha = alpha.max(best.1);
    }
    Ok(best)
}

/// Recursive alpha-beta. `maximizing` is true when the searching side
/// is to move. Applied moves are undone on every path, including the
/// deadline abort, so the working board is always left balanced.
fn alphabeta(
    board: &mut Board,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    me: Side,
    deadline: Instant,
) -> Result<i32, Deadline> {
    if Instant::now() >= deadline {
        return Err(Deadline);
    }

    match board.status() {
        Status::Won(winner) => {
            return Ok(if winner == me { WIN_SCORE } else { -WIN_SCORE });
        }
        Status::Draw => return Ok(0),
        Status::InProgress => {}
    }

    if depth == 0 {
        return Ok(evaluate(board, me));
    }

    let mut value = if maximizing { i32::MIN } else { i32::MAX };
    for col in board.legal_moves() {
        if board.apply(col).is_err() {
            continue;
        }
        let result = alphabeta(board, depth - 1, alpha, beta, !maximizing, me, deadline);
        let undone = board.undo();
        debug_assert!(undone.is_ok());
        let score = result?;

        if maximizing {
            value = value.max(score);
            alpha = alpha.max(value);
        } else {
            value = value.min(score);
            beta = beta.min(value);
        }
        if alpha >= beta {
            break;
        }
    }
    Ok(value)
}
