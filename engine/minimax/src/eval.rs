//! Static position evaluation.
//!
//! Scores every four-cell window (horizontal, vertical, both diagonals)
//! from one side's perspective, plus a bonus for discs in the center
//! column. Completed lines are terminal and scored by the search, not
//! here, so a window only counts when the other side has no disc in it.

use game_connect4::{Board, Side, COLS, ROWS};
use once_cell::sync::Lazy;

/// Bonus per own disc in the center column (and penalty per opponent
/// disc there).
const CENTER_WEIGHT: i32 = 2;

/// Window scores indexed by own-disc count, for windows free of
/// opponent discs.
const WINDOW_WEIGHTS: [i32; 4] = [0, 1, 2, 8];

const BITS_PER_COL: u32 = ROWS as u32 + 1;

/// Bit masks for all 69 four-cell windows on the board.
static WINDOWS: Lazy<Vec<u64>> = Lazy::new(build_windows);

/// Bit mask of the center column's cells.
static CENTER_MASK: Lazy<u64> = Lazy::new(|| {
    let base = (COLS / 2) as u32 * BITS_PER_COL;
    (0..ROWS as u32).fold(0u64, |m, r| m | (1u64 << (base + r)))
});

fn build_windows() -> Vec<u64> {
    let mut windows = Vec::with_capacity(69);
    // (column step, row step) per direction
    let directions: [(usize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
    for (dc, dr) in directions {
        for col in 0..COLS {
            for row in 0..ROWS {
                let end_col = col + 3 * dc;
                let end_row = row as isize + 3 * dr;
                if end_col >= COLS || end_row < 0 || end_row >= ROWS as isize {
                    continue;
                }
                let mut mask = 0u64;
                for i in 0..4 {
                    let c = (col + i * dc) as u32;
                    let r = (row as isize + i as isize * dr) as u32;
                    mask |= 1u64 << (c * BITS_PER_COL + r);
                }
                windows.push(mask);
            }
        }
    }
    windows
}

/// Score the position for `perspective`. Positive favors that side.
///
/// Each window free of opponent discs contributes by own-disc count
/// (three with one empty outweighing two with two empties, and so on);
/// windows the opponent alone occupies contribute the mirrored
/// penalty, which pulls the search toward blocking live threats before
/// deeper search confirms them.
pub fn evaluate(board: &Board, perspective: Side) -> i32 {
    let mine = board.bitboard(perspective);
    let theirs = board.bitboard(perspective.opponent());

    let mut score = 0;
    for &window in WINDOWS.iter() {
        let own = (mine & window).count_ones() as usize;
        let opp = (theirs & window).count_ones() as usize;
        if opp == 0 && own > 0 && own < 4 {
            score += WINDOW_WEIGHTS[own];
        } else if own == 0 && opp > 0 && opp < 4 {
            score -= WINDOW_WEIGHTS[opp];
        }
    }

    let center_own = (mine & *CENTER_MASK).count_ones() as i32;
    let center_opp = (theirs & *CENTER_MASK).count_ones() as i32;
    score + CENTER_WEIGHT * (center_own - center_opp)
}
