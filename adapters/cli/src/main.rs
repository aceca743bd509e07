#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays cops and robber in the terminal.

mod config;
mod input;
mod render;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cops_and_robber_core::{CellIndex, CopId, GameConfig, Phase};
use cops_and_robber_session::Session;
use cops_and_robber_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigFile, Overrides};
use crate::input::{BoardExtent, PlayerInput, HELP};

/// Turn-based pursuit game: two cops chase one robber across a grid.
#[derive(Debug, Parser)]
#[command(name = "cops-and-robber", version)]
struct Cli {
    /// TOML file holding a `[game]` table; missing keys use defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Let the robber maximise its distance from the nearest cop.
    #[arg(long)]
    smart: bool,
    /// Seed for the random robber.
    #[arg(long)]
    seed: Option<u64>,
    /// Rounds the robber has to survive.
    #[arg(long, value_name = "ROUNDS")]
    max_rounds: Option<u32>,
    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Play interactively on standard input (default).
    Play,
    /// Watch greedy cops chase the robber until the game ends.
    Demo,
    /// Print the effective configuration as TOML.
    Config,
}

/// Entry point for the cops and robber command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        smart: cli.smart,
        seed: cli.seed,
        max_rounds: cli.max_rounds,
    };
    let config = config::resolve(cli.config.as_deref(), overrides)?;
    info!(
        rows = config.rows,
        columns = config.columns,
        mode = ?config.ai_mode,
        "configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command.unwrap_or(Mode::Play) {
        Mode::Play => {
            let stdin = io::stdin();
            play(config, stdin.lock(), &mut out)
        }
        Mode::Demo => demo(config, &mut out),
        Mode::Config => {
            let text = toml::to_string_pretty(&ConfigFile { game: config })
                .context("failed to serialise configuration")?;
            write!(out, "{text}").context("failed to write configuration")
        }
    }
}

fn new_session(config: GameConfig) -> Result<Session> {
    Session::new(config).context("configuration describes an unplayable game")
}

/// Runs the interactive loop until the player quits or input ends.
fn play<R: BufRead, W: Write>(config: GameConfig, input: R, out: &mut W) -> Result<()> {
    let extent = BoardExtent {
        rows: config.rows,
        columns: config.columns,
    };
    let mut session = new_session(config)?;
    write!(out, "{}", render::board(session.world()))?;

    for line in input.lines() {
        let line = line.context("failed to read player input")?;
        let intent = match PlayerInput::parse(&line, extent) {
            Ok(intent) => intent,
            Err(error) => {
                writeln!(out, "{error}")?;
                continue;
            }
        };

        match intent {
            PlayerInput::SelectCop(cop) => session.on_select_cop(cop),
            PlayerInput::SelectCell(cell) => session.on_select_cell(cell),
            PlayerInput::FinishTurn => session.on_finish_turn(),
            PlayerInput::PlayAgain => {
                session.on_play_again();
                session.on_init_game();
            }
            PlayerInput::SetAiMode(mode) => {
                session.set_ai_mode(mode);
                if query::ai_mode(session.world()) != mode {
                    writeln!(out, "the robber policy can only change before play starts")?;
                    continue;
                }
            }
            PlayerInput::Show => {}
            PlayerInput::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            PlayerInput::Quit => break,
        }

        if session.take_events().is_empty() && intent != PlayerInput::Show {
            writeln!(out, "nothing happens; {}", render::prompt(session.world()))?;
            continue;
        }
        write!(out, "{}", render::board(session.world()))?;
    }

    out.flush().context("failed to flush output")
}

/// Plays a scripted game where the cops take turns stepping towards the robber.
fn demo<W: Write>(config: GameConfig, out: &mut W) -> Result<()> {
    let mut session = new_session(config)?;
    write!(out, "{}", render::board(session.world()))?;

    for turn in 0usize.. {
        if matches!(session.phase(), Phase::GameOver { .. }) {
            break;
        }

        let cop = CopId::ALL[turn % 2];
        session.on_select_cop(cop);
        if let Some(destination) = closest_to_robber(&session) {
            session.on_select_cell(destination);
            write!(out, "{}", render::board(session.world()))?;
        }
        if matches!(session.phase(), Phase::GameOver { .. }) {
            break;
        }

        session.on_finish_turn();
        write!(out, "{}", render::board(session.world()))?;
        session.on_finish_turn();
    }

    write!(out, "{}", render::board(session.world()))?;
    out.flush().context("failed to flush output")
}

fn closest_to_robber(session: &Session) -> Option<CellIndex> {
    let distances = query::board(session.world()).distances_from(session.robber_cell());
    session
        .selectable_cells()
        .into_iter()
        .min_by_key(|cell| (distances[cell.index()], cell.get()))
}
