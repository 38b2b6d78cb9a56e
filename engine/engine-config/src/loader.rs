//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by CONNECT4_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("CONNECT4_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from CONNECT4_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "CONNECT4_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &PathBuf) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CONNECT4_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "CONNECT4_COMMON_LOG_LEVEL");
    env_override!(config, common.algorithm, "CONNECT4_COMMON_ALGORITHM");

    // Minimax
    env_override!(config, minimax.max_depth, "CONNECT4_MINIMAX_MAX_DEPTH", parse);
    env_override!(
        config,
        minimax.time_budget_secs,
        "CONNECT4_MINIMAX_TIME_BUDGET_SECS",
        parse
    );

    // MCTS
    env_override!(
        config,
        mcts.time_budget_secs,
        "CONNECT4_MCTS_TIME_BUDGET_SECS",
        parse
    );
    env_override!(config, mcts.exploration, "CONNECT4_MCTS_EXPLORATION", parse);
    env_override!(config, mcts.tactical, "CONNECT4_MCTS_TACTICAL", parse);
    env_override!(config, mcts.center_bias, "CONNECT4_MCTS_CENTER_BIAS", parse);

    // Selfplay
    env_override!(config, selfplay.games, "CONNECT4_SELFPLAY_GAMES", parse);
    env_override!(config, selfplay.seed, "CONNECT4_SELFPLAY_SEED", parse);

    config
}
