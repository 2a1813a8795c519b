//! Sumblocks — pick numbered blocks that add up to the target before the stack reaches the top.

mod app;
mod clock;
mod dice;
mod game;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::PathBuf;
use thiserror::Error;

/// Fixed board dimensions and timing for one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub cols: usize,
    pub rows: usize,
    /// Rows dealt at the bottom on a new game.
    pub initial_rows: usize,
    /// Timed-mode countdown in seconds.
    pub time_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 6,
            rows: 10,
            initial_rows: 4,
            time_limit: 10,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the grid needs at least one column")]
    NoColumns,
    #[error("the grid needs at least one row")]
    NoRows,
    #[error("initial rows ({initial}) exceed grid rows ({rows})")]
    TooManyInitialRows { initial: usize, rows: usize },
    #[error("time limit must be at least one second")]
    NoTime,
    #[error("a {cols}x{rows} grid does not fit on a terminal (max {max_cols}x{max_rows})")]
    TooLarge {
        cols: usize,
        rows: usize,
        max_cols: usize,
        max_rows: usize,
    },
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.cols == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.cols > ui::MAX_COLS || self.rows > ui::MAX_ROWS {
            return Err(ConfigError::TooLarge {
                cols: self.cols,
                rows: self.rows,
                max_cols: ui::MAX_COLS,
                max_rows: ui::MAX_ROWS,
            });
        }
        if self.initial_rows > self.rows {
            return Err(ConfigError::TooManyInitialRows {
                initial: self.initial_rows,
                rows: self.rows,
            });
        }
        if self.time_limit == 0 {
            return Err(ConfigError::NoTime);
        }
        Ok(self)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let theme = match theme::Theme::load(args.theme.as_deref(), args.palette) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("theme not loaded ({e}), using defaults");
            theme::Theme::default()
        }
    };
    let config = GameConfig {
        cols: args.cols,
        rows: args.rows,
        initial_rows: args.initial_rows,
        time_limit: args.time_limit,
    }
    .validate()
    .context("invalid board settings")?;
    let mut app = App::new(args, config, theme)?;
    app.run()?;
    Ok(())
}

/// Log to a file only; the terminal belongs to the game.
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}

/// Number-matching block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "sumblocks",
    version,
    about = "Number-matching block puzzle in the terminal. Pick blocks that add up to the target; don't let the stack reach the top.",
    long_about = "Sumblocks is a terminal puzzle game.\n\n\
        Select numbered blocks (they need not touch) until their values add up to the target. \
        A hit clears them and scores target x blocks cleared; going over the target drops the \
        selection. In classic mode every clear pushes a new row in from the bottom; in time mode \
        a row is pushed whenever the countdown runs out. The game ends when the stack would \
        pass the top line.\n\n\
        CONTROLS (normal):\n  Arrows      Move cursor   Enter/Space  Select block   P  Pause   Q / Esc  Quit\n\n\
        CONTROLS (vim):\n  h/j/k/l     Move cursor   x            Select block\n\n\
        Mouse clicks select blocks directly. Use --theme to load a btop-style theme (e.g. onedark.theme)."
)]
pub struct Args {
    /// Game mode used with --no-menu: classic (row per clear) or time (row per countdown).
    #[arg(short, long, default_value = "classic")]
    pub mode: GameMode,

    /// Grid width in blocks.
    #[arg(long, default_value = "6", value_name = "COLS")]
    pub cols: usize,

    /// Grid height in blocks.
    #[arg(long, default_value = "10", value_name = "ROWS")]
    pub rows: usize,

    /// Rows dealt at the bottom when a game starts.
    #[arg(long, default_value = "4", value_name = "N")]
    pub initial_rows: usize,

    /// In mode 'time': seconds before a row is pushed.
    #[arg(long, default_value = "10", value_name = "SECS")]
    pub time_limit: u32,

    /// Seed for block values and targets (reproducible games).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Skip main menu and start game immediately.
    #[arg(long)]
    pub no_menu: bool,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Disable the clear fade (blocks vanish instantly).
    #[arg(long)]
    pub no_animation: bool,

    /// Target render frames per second.
    #[arg(long, default_value = "30.0", value_name = "RATE")]
    pub frame_rate: f64,

    /// Write logs to FILE (filter with RUST_LOG).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GameMode {
    /// A row is pushed after every clear.
    #[default]
    Classic,
    /// A row is pushed whenever the countdown runs out.
    #[value(alias = "timed")]
    Time,
}
