//! Depth-limited minimax with alpha-beta pruning for Connect 4.
//!
//! Two pieces fit together here:
//!
//! 1. **Static evaluation** ([`eval`]): a windowed heuristic that scores
//!    every four-cell line on the board plus a center-column bonus.
//! 2. **Search** ([`search`]): alpha-beta minimax driven by iterative
//!    deepening under a wall-clock budget, returning the best move from
//!    the deepest fully completed depth.
//!
//! # Usage
//!
//! ```rust
//! use game_connect4::Board;
//! use minimax::{choose_move, MinimaxConfig};
//! use std::time::Duration;
//!
//! let board = Board::new();
//! let config = MinimaxConfig {
//!     max_depth: 4,
//!     time_budget: Duration::from_millis(200),
//! };
//! let col = choose_move(&board, &config).unwrap();
//! assert!(col < 7);
//! ```

pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::{choose_move, MinimaxConfig, SearchError, WIN_SCORE};
