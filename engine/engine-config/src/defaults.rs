//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so every binary
//! ships with the same defaults.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    minimax: MinimaxDefaults,
    mcts: MctsDefaults,
    selfplay: SelfplayDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    algorithm: String,
}

#[derive(Debug, Deserialize)]
struct MinimaxDefaults {
    max_depth: u32,
    time_budget_secs: f64,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    time_budget_secs: f64,
    exploration: f64,
    tactical: bool,
    center_bias: f64,
}

#[derive(Debug, Deserialize)]
struct SelfplayDefaults {
    games: u32,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn algorithm() -> &'static str {
    &DEFAULTS.common.algorithm
}

// Minimax
pub fn max_depth() -> u32 {
    DEFAULTS.minimax.max_depth
}
pub fn minimax_time_budget_secs() -> f64 {
    DEFAULTS.minimax.time_budget_secs
}

// MCTS
pub fn mcts_time_budget_secs() -> f64 {
    DEFAULTS.mcts.time_budget_secs
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn tactical() -> bool {
    DEFAULTS.mcts.tactical
}
pub fn center_bias() -> f64 {
    DEFAULTS.mcts.center_bias
}

// Selfplay
pub fn selfplay_games() -> u32 {
    DEFAULTS.selfplay.games
}
pub fn selfplay_seed() -> u64 {
    DEFAULTS.selfplay.seed
}
