//! Tests for the configuration module.

use super::*;

#[test]
fn default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.algorithm, "mcts");
    assert_eq!(config.minimax.max_depth, 7);
    assert!((config.minimax.time_budget_secs - 2.0).abs() < f64::EPSILON);
    assert!((config.mcts.exploration - std::f64::consts::SQRT_2).abs() < 1e-12);
    assert!(config.mcts.tactical);
    assert!((config.mcts.center_bias - 0.75).abs() < f64::EPSILON);
    assert_eq!(config.selfplay.games, 5);
    assert_eq!(config.selfplay.seed, 42);
}

#[test]
fn connect4_env_overrides() {
    std::env::set_var("CONNECT4_COMMON_ALGORITHM", "minimax");
    std::env::set_var("CONNECT4_MINIMAX_MAX_DEPTH", "9");
    std::env::set_var("CONNECT4_MCTS_CENTER_BIAS", "0.5");
    std::env::set_var("CONNECT4_MCTS_TACTICAL", "false");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.common.algorithm, "minimax");
    assert_eq!(config.minimax.max_depth, 9);
    assert!((config.mcts.center_bias - 0.5).abs() < f64::EPSILON);
    assert!(!config.mcts.tactical);

    std::env::remove_var("CONNECT4_COMMON_ALGORITHM");
    std::env::remove_var("CONNECT4_MINIMAX_MAX_DEPTH");
    std::env::remove_var("CONNECT4_MCTS_CENTER_BIAS");
    std::env::remove_var("CONNECT4_MCTS_TACTICAL");
}

#[test]
fn unparseable_env_value_is_ignored() {
    std::env::set_var("CONNECT4_SELFPLAY_GAMES", "lots");
    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.selfplay.games, 5);
    std::env::remove_var("CONNECT4_SELFPLAY_GAMES");
}

#[test]
fn parse_config_toml() {
    let toml_content = r#"
[common]
algorithm = "minimax"

[minimax]
max_depth = 10
time_budget_secs = 5.0

[mcts]
exploration = 2.0
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.algorithm, "minimax");
    assert_eq!(config.minimax.max_depth, 10);
    assert!((config.minimax.time_budget_secs - 5.0).abs() < f64::EPSILON);
    assert!((config.mcts.exploration - 2.0).abs() < f64::EPSILON);
}

#[test]
fn partial_config_keeps_defaults() {
    let toml_content = r#"
[mcts]
center_bias = 0.9
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert!((config.mcts.center_bias - 0.9).abs() < f64::EPSILON);
    assert_eq!(config.common.log_level, "info"); // Default
    assert_eq!(config.minimax.max_depth, 7); // Default
    assert_eq!(config.selfplay.games, 5); // Default
}

#[test]
fn selfplay_config_from_toml() {
    let toml_content = r#"
[selfplay]
games = 100
seed = 7
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.selfplay.games, 100);
    assert_eq!(config.selfplay.seed, 7);
}

#[test]
fn config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.algorithm, cloned.common.algorithm);
    assert_eq!(config.selfplay.seed, cloned.selfplay.seed);
}
