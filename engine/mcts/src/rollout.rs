//! Playout policy.
//!
//! Rollouts are tactical-first: forced moves (an immediate win, a
//! forced block, or the single move that does not hand the opponent a
//! win) are played outright, everything else is a center-biased random
//! column. The bias mirrors how real games gravitate to the middle and
//! sharpens the playout signal over a uniform policy.

use game_connect4::{tactics, Board, Side, Status, COLS};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Columns ordered center-out.
const CENTER_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Pick a rollout column. `bias` is the probability of steering to the
/// most central open column rather than drawing uniformly.
pub fn biased_move(board: &Board, bias: f64, rng: &mut ChaCha20Rng) -> Option<usize> {
    let legal = board.legal_moves();
    if legal.is_empty() {
        return None;
    }
    if rng.gen::<f64>() < bias {
        for &col in &CENTER_ORDER {
            if board.is_legal(col) {
                return Some(col);
            }
        }
    }
    Some(legal[rng.gen_range(0..legal.len())])
}

/// Play `board` to the end and report the winner, or `None` on a draw.
/// The board is consumed as scratch space.
pub fn simulate(
    board: &mut Board,
    tactical: bool,
    bias: f64,
    rng: &mut ChaCha20Rng,
) -> Option<Side> {
    loop {
        match board.status() {
            Status::Won(side) => return Some(side),
            Status::Draw => return None,
            Status::InProgress => {}
        }

        let col = if tactical {
            tactics::forced_move(board).or_else(|| biased_move(board, bias, rng))
        } else {
            biased_move(board, bias, rng)
        };

        match col {
            Some(col) => {
                if board.apply(col).is_err() {
                    return None;
                }
            }
            None => return None,
        }
    }
}
