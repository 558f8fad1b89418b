//! Gomoku desktop game and analysis tool

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gomoku::config::DepthPolicy;
use gomoku::ui::{GameMode, GomokuApp};
use gomoku::{AIEngine, Board, EngineConfig, Stone};

#[derive(Parser)]
#[command(name = "gomoku", version, about = "Five in a row against a minimax opponent")]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "gomoku=trace" (defaults to RUST_LOG, then "info")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the game window (default)
    Play {
        #[arg(short, long, value_enum, default_value_t = ModeArg::Pve)]
        mode: ModeArg,
    },
    /// Ask the engine for a move on a board diagram ('.', 'X', 'O'); reads stdin without FILE
    Analyze {
        file: Option<PathBuf>,

        /// Side the engine plays (overrides the config)
        #[arg(long, value_enum)]
        color: Option<ColorArg>,

        /// Fixed search depth (overrides the adaptive policy)
        #[arg(short, long)]
        depth: Option<i32>,

        /// Wall-clock budget in milliseconds (overrides the config)
        #[arg(short, long, value_name = "MS")]
        time_limit: Option<u64>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Pvp,
    Pve,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Black,
    White,
}

impl From<ColorArg> for Stone {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Black => Stone::Black,
            ColorArg::White => Stone::White,
        }
    }
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).with_context(|| format!("bad log filter {level:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn play(config: EngineConfig, mode: GameMode) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, config, mode)))),
    )
    .map_err(|e| anyhow!("window closed with an error: {e}"))
}

fn analyze(
    mut config: EngineConfig,
    file: Option<PathBuf>,
    color: Option<ColorArg>,
    depth: Option<i32>,
    time_limit: Option<u64>,
) -> Result<()> {
    let text = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read board from stdin")?;
            text
        }
    };
    let board: Board = text.parse()?;

    if let Some(color) = color {
        config.engine_color = color.into();
    }
    if let Some(depth) = depth {
        config.depth = DepthPolicy::fixed(depth);
    }
    config.board_size = board.size();

    let mut engine = AIEngine::from_config(config)?;
    if let Some(ms) = time_limit {
        engine.set_time_limit(Some(Duration::from_millis(ms)));
    }
    let result = engine.compute_best_move(&board);

    print!("{board}");
    match result.best_move {
        Some(pos) => println!("{} plays {pos}", engine.color().name()),
        None => println!("{} has no move", engine.color().name()),
    }
    println!(
        "score {} | depth {} | nodes {} | {} ms{}",
        result.score,
        result.depth,
        result.nodes,
        result.time_ms,
        if result.completed { "" } else { " (interrupted)" }
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(?config, "effective configuration");

    match cli.command.unwrap_or(Command::Play { mode: ModeArg::Pve }) {
        Command::Play { mode } => {
            let mode = match mode {
                ModeArg::Pvp => GameMode::PvP,
                ModeArg::Pve => GameMode::PvE,
            };
            tracing::info!(?mode, "starting game window");
            play(config, mode)
        }
        Command::Analyze {
            file,
            color,
            depth,
            time_limit,
        } => analyze(config, file, color, depth, time_limit),
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
