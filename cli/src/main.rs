//! Connect 4 CLI - interactive play and self-play.

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod config;
mod game;

use crate::config::{Config, Mode};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_tracing(&config.log_level)?;
    info!(algorithm = %config.algorithm, "engine configured");

    match config.mode.clone() {
        Some(Mode::Selfplay { games, seed }) => {
            game::run_selfplay(&config, games, seed)?;
        }
        Some(Mode::Play { second }) => {
            game::play(&config, second)?;
        }
        None => {
            game::play(&config, false)?;
        }
    }

    Ok(())
}
