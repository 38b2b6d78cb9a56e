//! Configuration for the Connect 4 CLI
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use engine_config::{load_config, CentralConfig};

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_algorithm() -> Algorithm {
    match CENTRAL_CONFIG.common.algorithm.as_str() {
        "minimax" => Algorithm::Minimax,
        _ => Algorithm::Mcts,
    }
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_max_depth() -> u32 {
    CENTRAL_CONFIG.minimax.max_depth
}

fn default_minimax_budget() -> f64 {
    CENTRAL_CONFIG.minimax.time_budget_secs
}

fn default_mcts_budget() -> f64 {
    CENTRAL_CONFIG.mcts.time_budget_secs
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_tactical() -> bool {
    CENTRAL_CONFIG.mcts.tactical
}

fn default_center_bias() -> f64 {
    CENTRAL_CONFIG.mcts.center_bias
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.selfplay.games
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.selfplay.seed
}

/// Move-selection algorithm.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Mcts,
    Minimax,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Mcts => write!(f, "mcts"),
            Algorithm::Minimax => write!(f, "minimax"),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "connect4")]
#[command(about = "Connect 4 engine - play interactively or run self-play")]
#[command(
    long_about = "Connect 4 move-selection engine with two backends: Monte Carlo
tree search and depth-limited alpha-beta minimax.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    #[command(subcommand)]
    pub mode: Option<Mode>,

    /// Engine backend
    #[arg(long, value_enum, default_value_t = default_algorithm())]
    pub algorithm: Algorithm,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Maximum alpha-beta search depth
    #[arg(long, default_value_t = default_max_depth())]
    pub max_depth: u32,

    /// Minimax time budget per move in seconds
    #[arg(long, default_value_t = default_minimax_budget())]
    pub minimax_budget_secs: f64,

    /// MCTS time budget per move in seconds
    #[arg(long, default_value_t = default_mcts_budget())]
    pub mcts_budget_secs: f64,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Enable tactical shortcuts (immediate wins/blocks)
    #[arg(long, default_value_t = default_tactical())]
    pub tactical: bool,

    /// Rollout center bias in [0, 1]
    #[arg(long, default_value_t = default_center_bias())]
    pub center_bias: f64,

    /// Seed for the MCTS rng; omit for entropy
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Mode {
    /// Play against the engine in the terminal (default)
    Play {
        /// Let the engine move first
        #[arg(long)]
        second: bool,
    },
    /// Run MCTS vs minimax games and report the score
    Selfplay {
        /// Number of games to play
        #[arg(long, default_value_t = default_games())]
        games: u32,

        /// Base rng seed, incremented per game
        #[arg(long, default_value_t = default_seed())]
        seed: u64,
    },
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if self.max_depth == 0 {
            return Err(anyhow!("max_depth must be at least 1"));
        }

        if !self.minimax_budget_secs.is_finite() || self.minimax_budget_secs <= 0.0 {
            return Err(anyhow!("minimax_budget_secs must be positive"));
        }

        if !self.mcts_budget_secs.is_finite() || self.mcts_budget_secs <= 0.0 {
            return Err(anyhow!("mcts_budget_secs must be positive"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!("exploration must be finite and non-negative"));
        }

        if !(0.0..=1.0).contains(&self.center_bias) {
            return Err(anyhow!("center_bias must be within [0, 1]"));
        }

        if let Some(Mode::Selfplay { games, .. }) = &self.mode {
            if *games == 0 {
                return Err(anyhow!("games must be at least 1"));
            }
        }

        Ok(())
    }

    pub fn minimax_config(&self) -> minimax::MinimaxConfig {
        minimax::MinimaxConfig {
            max_depth: self.max_depth,
            time_budget: Duration::from_secs_f64(self.minimax_budget_secs),
        }
    }

    pub fn mcts_config(&self) -> mcts::MctsConfig {
        mcts::MctsConfig::default()
            .with_time_budget(Duration::from_secs_f64(self.mcts_budget_secs))
            .with_exploration(self.exploration)
            .with_tactical(self.tactical)
            .with_center_bias(self.center_bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            mode: None,
            algorithm: Algorithm::Mcts,
            log_level: "info".into(),
            max_depth: 7,
            minimax_budget_secs: 2.0,
            mcts_budget_secs: 2.0,
            exploration: std::f64::consts::SQRT_2,
            tactical: true,
            center_bias: 0.75,
            seed: None,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_rejects_zero_depth() {
        let mut cfg = base_config();
        cfg.max_depth = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_depth"));
    }

    #[test]
    fn validate_rejects_non_positive_budget() {
        let mut cfg = base_config();
        cfg.mcts_budget_secs = 0.0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("mcts_budget_secs"));
    }

    #[test]
    fn validate_rejects_out_of_range_center_bias() {
        let mut cfg = base_config();
        cfg.center_bias = 1.5;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("center_bias"));
    }

    #[test]
    fn validate_rejects_zero_selfplay_games() {
        let mut cfg = base_config();
        cfg.mode = Some(Mode::Selfplay { games: 0, seed: 42 });
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("games"));
    }

    #[test]
    fn search_configs_carry_cli_values() {
        let mut cfg = base_config();
        cfg.max_depth = 9;
        cfg.mcts_budget_secs = 0.5;
        assert_eq!(cfg.minimax_config().max_depth, 9);
        assert_eq!(
            cfg.mcts_config().time_budget,
            Duration::from_secs_f64(0.5)
        );
    }
}
