//! Game loops: interactive play and self-play.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use game_connect4::{Board, Side, Status, COLS};
use mcts::MctsAgent;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::config::{Algorithm, Config};

/// A move-choosing backend. MCTS keeps its tree across the game;
/// minimax is stateless per decision.
pub enum Engine {
    Mcts(MctsAgent),
    Minimax(minimax::MinimaxConfig),
}

impl Engine {
    pub fn from_config(config: &Config) -> Self {
        match config.algorithm {
            Algorithm::Mcts => Engine::Mcts(make_mcts(config, config.seed)),
            Algorithm::Minimax => Engine::Minimax(config.minimax_config()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Engine::Mcts(_) => "mcts",
            Engine::Minimax(_) => "minimax",
        }
    }

    pub fn choose(&mut self, board: &Board) -> Result<usize> {
        match self {
            Engine::Mcts(agent) => {
                let col = agent.choose_move(board).context("mcts search failed")?;
                let stats = agent.last_stats();
                debug!(
                    col,
                    iterations = stats.iterations,
                    nodes = stats.tree_nodes,
                    "engine move"
                );
                Ok(col)
            }
            Engine::Minimax(config) => {
                minimax::choose_move(board, config).context("minimax search failed")
            }
        }
    }
}

fn make_mcts(config: &Config, seed: Option<u64>) -> MctsAgent {
    let mcts_config = config.mcts_config();
    match seed {
        Some(seed) => MctsAgent::with_rng(mcts_config, ChaCha20Rng::seed_from_u64(seed)),
        None => MctsAgent::new(mcts_config),
    }
}

/// Text rendering of the grid, top row first, with a column footer.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in (0..game_connect4::ROWS).rev() {
        for col in 0..COLS {
            let cell = match board.cell(col, row) {
                Some(Side::X) => 'X',
                Some(Side::O) => 'O',
                None => '.',
            };
            out.push(cell);
            if col + 1 < COLS {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    for col in 0..COLS {
        out.push_str(&col.to_string());
        if col + 1 < COLS {
            out.push(' ');
        }
    }
    out.push('\n');
    out
}

/// Interactive game against the engine on stdin/stdout.
pub fn play(config: &Config, engine_first: bool) -> Result<()> {
    let mut engine = Engine::from_config(config);
    let human = if engine_first { Side::O } else { Side::X };
    let mut board = Board::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("You are {human:?}. Columns are numbered 0-6.");
    loop {
        println!("{}", render(&board));
        match board.status() {
            Status::Won(side) => {
                if side == human {
                    println!("You win!");
                } else {
                    println!("The engine wins.");
                }
                return Ok(());
            }
            Status::Draw => {
                println!("Draw.");
                return Ok(());
            }
            Status::InProgress => {}
        }

        if board.side_to_move() == human {
            let col = match prompt_move(&board, &mut lines)? {
                Some(col) => col,
                None => {
                    println!("Input closed, leaving the game.");
                    return Ok(());
                }
            };
            board.apply(col)?;
        } else {
            let start = Instant::now();
            let col = engine.choose(&board)?;
            println!(
                "Engine ({}) plays column {} ({:.2}s)",
                engine.name(),
                col,
                start.elapsed().as_secs_f64()
            );
            board.apply(col)?;
        }
    }
}

/// Read a legal column from stdin, re-prompting on bad input.
/// Returns `None` when stdin is exhausted.
fn prompt_move(
    board: &Board,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<usize>> {
    loop {
        print!("Your move (0-6): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        match line.trim().parse::<usize>() {
            Ok(col) if board.is_legal(col) => return Ok(Some(col)),
            Ok(col) => println!("Column {col} is not playable."),
            Err(_) => println!("Enter a column number between 0 and 6."),
        }
    }
}

/// Tally from a self-play run.
#[derive(Debug, Default)]
pub struct SelfplayReport {
    pub mcts_wins: u32,
    pub minimax_wins: u32,
    pub draws: u32,
}

/// Play MCTS against minimax for `games` games, alternating who moves
/// first, and report the tally.
pub fn run_selfplay(config: &Config, games: u32, seed: u64) -> Result<SelfplayReport> {
    let minimax_config = config.minimax_config();
    let mut report = SelfplayReport::default();

    for game in 0..games {
        let mut agent = make_mcts(config, Some(seed.wrapping_add(game as u64)));
        // Alternate colors so neither engine always opens.
        let mcts_side = if game % 2 == 0 { Side::X } else { Side::O };
        let mut board = Board::new();

        let winner = loop {
            match board.status() {
                Status::Won(side) => break Some(side),
                Status::Draw => break None,
                Status::InProgress => {}
            }
            let col = if board.side_to_move() == mcts_side {
                agent.choose_move(&board).context("mcts search failed")?
            } else {
                minimax::choose_move(&board, &minimax_config)
                    .context("minimax search failed")?
            };
            board.apply(col)?;
        };

        match winner {
            Some(side) if side == mcts_side => report.mcts_wins += 1,
            Some(_) => report.minimax_wins += 1,
            None => report.draws += 1,
        }
        info!(
            game = game + 1,
            moves = board.moves_played(),
            winner = ?winner,
            mcts_side = ?mcts_side,
            "self-play game finished"
        );
    }

    println!(
        "Self-play over {games} games: mcts {} / minimax {} / draws {}",
        report.mcts_wins, report.minimax_wins, report.draws
    );
    Ok(report)
}
