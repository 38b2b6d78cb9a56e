//! Monte Carlo tree search for Connect 4.
//!
//! The agent combines three layers:
//!
//! 1. **Tactical shortcut**: forced positions (immediate wins, forced
//!    blocks, a single non-losing move) are answered directly.
//! 2. **UCT tree**: nodes stored in a transposition-aware arena keyed
//!    by canonical position, selected by UCB1 and grown one node per
//!    iteration.
//! 3. **Biased rollouts**: playouts that grab hanging wins and lean
//!    toward the center columns.
//!
//! # Usage
//!
//! ```rust
//! use game_connect4::Board;
//! use mcts::{MctsAgent, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = Board::new();
//! let config = MctsConfig::for_testing();
//! let mut agent = MctsAgent::with_rng(config, ChaCha20Rng::seed_from_u64(42));
//! let col = agent.choose_move(&board).unwrap();
//! assert!(col < 7);
//! ```

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod table;

pub use config::MctsConfig;
pub use node::{Node, NodeId};
pub use search::{MctsAgent, SearchError, SearchStats};
pub use table::SearchTable;
