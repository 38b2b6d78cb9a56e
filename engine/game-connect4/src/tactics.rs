//! One- and two-ply tactical lookahead.
//!
//! Resolves forced wins and blocks without a full search: an immediate
//! winning drop, an immediate must-block, or a uniquely safe move (the
//! only move that does not hand the opponent a win on the reply ply).
//! Search agents consult this before spending their time budget, and
//! rollout policies use it to sharpen playouts.
//!
//! All probing happens on private clones of the caller's board, so the
//! caller's state is never disturbed.

use crate::{Board, Side};

/// The column that wins on the spot for the side to move, if any.
pub fn immediate_win(board: &Board) -> Option<usize> {
    let mover = board.side_to_move();
    board
        .legal_moves()
        .into_iter()
        .find(|&c| board.is_winning_move(mover, c))
}

/// The column the opponent would win in if left open, if any.
pub fn immediate_block(board: &Board) -> Option<usize> {
    let opponent = board.side_to_move().opponent();
    board
        .legal_moves()
        .into_iter()
        .find(|&c| board.is_winning_move(opponent, c))
}

/// Legal moves that do not give the opponent an immediate win on the
/// following ply.
pub fn safe_moves(board: &Board) -> Vec<usize> {
    board
        .legal_moves()
        .into_iter()
        .filter(|&c| !hands_over_win(board, c))
        .collect()
}

/// Whether playing `col` lets the opponent win on their reply.
fn hands_over_win(board: &Board, col: usize) -> bool {
    let mut probe = board.clone();
    if probe.apply(col).is_err() {
        // legal_moves() callers never reach this
        return false;
    }
    let replier: Side = probe.side_to_move();
    probe
        .legal_moves()
        .into_iter()
        .any(|d| probe.is_winning_move(replier, d))
}

/// Forced move for the side to move, in strict precedence: win first,
/// then block, then the uniquely safe move. Returns `None` when the
/// position calls for a real search.
pub fn forced_move(board: &Board) -> Option<usize> {
    if let Some(col) = immediate_win(board) {
        return Some(col);
    }
    if let Some(col) = immediate_block(board) {
        return Some(col);
    }
    let safe = safe_moves(board);
    if safe.len() == 1 {
        return Some(safe[0]);
    }
    None
}
