//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_algorithm() -> String {
    defaults::algorithm().into()
}
fn d_max_depth() -> u32 {
    defaults::max_depth()
}
fn d_minimax_budget() -> f64 {
    defaults::minimax_time_budget_secs()
}
fn d_mcts_budget() -> f64 {
    defaults::mcts_time_budget_secs()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_tactical() -> bool {
    defaults::tactical()
}
fn d_center_bias() -> f64 {
    defaults::center_bias()
}
fn d_selfplay_games() -> u32 {
    defaults::selfplay_games()
}
fn d_selfplay_seed() -> u64 {
    defaults::selfplay_seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub minimax: MinimaxConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub selfplay: SelfplayConfig,
}

/// Settings shared by every binary
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Default move-selection algorithm: "mcts" or "minimax".
    #[serde(default = "d_algorithm")]
    pub algorithm: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            algorithm: defaults::algorithm().into(),
        }
    }
}

/// Alpha-beta search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MinimaxConfig {
    #[serde(default = "d_max_depth")]
    pub max_depth: u32,
    #[serde(default = "d_minimax_budget")]
    pub time_budget_secs: f64,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::max_depth(),
            time_budget_secs: defaults::minimax_time_budget_secs(),
        }
    }
}

/// Monte Carlo tree search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_mcts_budget")]
    pub time_budget_secs: f64,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_tactical")]
    pub tactical: bool,
    #[serde(default = "d_center_bias")]
    pub center_bias: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: defaults::mcts_time_budget_secs(),
            exploration: defaults::exploration(),
            tactical: defaults::tactical(),
            center_bias: defaults::center_bias(),
        }
    }
}

/// Self-play configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SelfplayConfig {
    #[serde(default = "d_selfplay_games")]
    pub games: u32,
    #[serde(default = "d_selfplay_seed")]
    pub seed: u64,
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        Self {
            games: defaults::selfplay_games(),
            seed: defaults::selfplay_seed(),
        }
    }
}
