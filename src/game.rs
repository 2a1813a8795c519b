//! Game state: grid of numbered blocks, selection, sum evaluation, row injection, countdown.

use crate::dice::{Dice, IdGen, SeededDice, SequentialIds};
use crate::{GameConfig, GameMode};
use log::{debug, info};
use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;

/// Values a block can carry.
pub const BLOCK_VALUES: RangeInclusive<u8> = 1..=9;

/// Targets the player is asked to hit (10 + 0..=14).
pub const TARGET_SUMS: RangeInclusive<u32> = 10..=24;

/// Opaque block identifier, unique for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{:06x}", self.0)
    }
}

/// One numbered block. Row 0 is the danger edge, `rows - 1` the spawn edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub value: u8,
    pub row: usize,
    pub col: usize,
    /// Rendering hint: set only on the row that was just created.
    pub is_new: bool,
}

/// Everything the front end needs to draw a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub grid: Vec<Block>,
    pub score: u32,
    pub target_sum: u32,
    /// Ordered, no duplicates; every entry is in `grid`.
    pub selected_ids: Vec<BlockId>,
    pub is_game_over: bool,
    pub time_left: u32,
    pub mode: GameMode,
}

impl GameState {
    fn empty(mode: GameMode, time_limit: u32) -> Self {
        Self {
            grid: Vec::new(),
            score: 0,
            target_sum: *TARGET_SUMS.start(),
            selected_ids: Vec::new(),
            is_game_over: false,
            time_left: time_limit,
            mode,
        }
    }

    /// Sum of the values of the selected blocks.
    pub fn current_sum(&self) -> u32 {
        self.grid
            .iter()
            .filter(|b| self.selected_ids.contains(&b.id))
            .map(|b| u32::from(b.value))
            .sum()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.grid.iter().find(|b| b.id == id)
    }

    pub fn block_at(&self, row: usize, col: usize) -> Option<&Block> {
        self.grid.iter().find(|b| b.row == row && b.col == col)
    }

    pub fn is_selected(&self, id: BlockId) -> bool {
        self.selected_ids.contains(&id)
    }
}

/// Result of pushing a new row in from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// Stack shifted up, fresh row at the bottom.
    Added,
    /// A block sat on row 0; game over, grid untouched.
    Overflow,
}

/// What a successful clear did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearReport {
    /// Blocks removed, as they were just before removal.
    pub blocks: Vec<Block>,
    pub points: u32,
    /// Classic mode pushes a row after every clear.
    pub injection: Option<Injection>,
}

/// Result of toggling a block and re-evaluating the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Game over, paused, or unknown id.
    Ignored,
    /// Below target; selection kept.
    Pending { sum: u32 },
    /// Above target; selection dropped.
    Overshoot { sum: u32 },
    Cleared(ClearReport),
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not timed, paused, or over.
    Ignored,
    Counted { time_left: u32 },
    /// Countdown ran out and a row was pushed; `time_left` is back at the limit.
    Expired(Injection),
}

/// Owns the game state and applies every transition to it.
#[derive(Debug, Clone)]
pub struct GameEngine<D = SeededDice, I = SequentialIds> {
    config: GameConfig,
    state: GameState,
    paused: bool,
    dice: D,
    ids: I,
}

impl<D: Dice, I: IdGen> GameEngine<D, I> {
    /// Engine with an empty grid; call [`Self::init_game`] or [`Self::start`] to deal blocks.
    pub fn new(config: GameConfig, mode: GameMode, dice: D, ids: I) -> Self {
        let state = GameState::empty(mode, config.time_limit);
        Self {
            config,
            state,
            paused: false,
            dice,
            ids,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Suspends (or resumes) both selection and countdown.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Switch mode and deal a fresh game.
    pub fn start(&mut self, mode: GameMode) -> &GameState {
        self.state.mode = mode;
        self.init_game()
    }

    /// Throw away the current game and deal a new one in the same mode.
    pub fn init_game(&mut self) -> &GameState {
        let rows = self.config.rows;
        let seeded = self.config.initial_rows.min(rows);
        let mut grid = Vec::with_capacity(seeded * self.config.cols);
        for r in 0..seeded {
            grid.extend(self.create_row(rows - 1 - r));
        }
        let target_sum = self.dice.target_sum();
        self.state = GameState {
            grid,
            score: 0,
            target_sum,
            selected_ids: Vec::new(),
            is_game_over: false,
            time_left: self.config.time_limit,
            mode: self.state.mode,
        };
        self.paused = false;
        info!(
            "new {:?} game: {} blocks, target {}",
            self.state.mode,
            self.state.grid.len(),
            target_sum
        );
        &self.state
    }

    /// Toggle `id` in the selection, then settle the new sum against the target.
    pub fn select_block(&mut self, id: BlockId) -> Evaluation {
        if self.state.is_game_over || self.paused || self.state.block(id).is_none() {
            return Evaluation::Ignored;
        }
        match self.state.selected_ids.iter().position(|s| *s == id) {
            Some(pos) => {
                self.state.selected_ids.remove(pos);
            }
            None => self.state.selected_ids.push(id),
        }
        self.evaluate()
    }

    fn evaluate(&mut self) -> Evaluation {
        let sum = self.state.current_sum();
        match sum.cmp(&self.state.target_sum) {
            Ordering::Less => Evaluation::Pending { sum },
            Ordering::Greater => {
                debug!("overshoot: {} > {}", sum, self.state.target_sum);
                self.state.selected_ids.clear();
                Evaluation::Overshoot { sum }
            }
            Ordering::Equal => Evaluation::Cleared(self.clear_selected()),
        }
    }

    /// Remove the selection from the grid and score it. Row injection (classic
    /// mode) runs only after the removal.
    fn clear_selected(&mut self) -> ClearReport {
        let selected = std::mem::take(&mut self.state.selected_ids);
        let points = self.state.target_sum * selected.len() as u32;
        self.state.score = self.state.score.saturating_add(points);
        let (blocks, kept): (Vec<Block>, Vec<Block>) = self
            .state
            .grid
            .drain(..)
            .partition(|b| selected.contains(&b.id));
        self.state.grid = kept;
        debug!(
            "cleared {} blocks for {} points (target {})",
            blocks.len(),
            points,
            self.state.target_sum
        );
        self.state.target_sum = self.dice.target_sum();
        let injection = (self.state.mode == GameMode::Classic).then(|| self.add_row());
        ClearReport {
            blocks,
            points,
            injection,
        }
    }

    /// Push a fresh row in at the bottom, shifting the stack up one row.
    /// If anything already sits on row 0 the game ends instead and the grid is
    /// left exactly as it was. In timed mode the countdown restarts either way.
    pub fn add_row(&mut self) -> Injection {
        let injection = if self.state.grid.iter().any(|b| b.row == 0) {
            if !self.state.is_game_over {
                info!("stack reached the top, final score {}", self.state.score);
            }
            self.state.is_game_over = true;
            Injection::Overflow
        } else {
            for b in &mut self.state.grid {
                b.row -= 1;
                b.is_new = false;
            }
            let row = self.create_row(self.config.rows - 1);
            self.state.grid.extend(row);
            debug!("row added, {} blocks on grid", self.state.grid.len());
            Injection::Added
        };
        if self.state.mode == GameMode::Time {
            self.state.time_left = self.config.time_limit;
        }
        injection
    }

    /// One elapsed second of timed mode.
    pub fn tick(&mut self) -> Tick {
        if self.state.mode != GameMode::Time || self.state.is_game_over || self.paused {
            return Tick::Ignored;
        }
        if self.state.time_left <= 1 {
            Tick::Expired(self.add_row())
        } else {
            self.state.time_left -= 1;
            Tick::Counted {
                time_left: self.state.time_left,
            }
        }
    }

    fn create_row(&mut self, row: usize) -> Vec<Block> {
        (0..self.config.cols)
            .map(|col| Block {
                id: self.ids.next_id(),
                value: self.dice.block_value(),
                row,
                col,
                is_new: true,
            })
            .collect()
    }
}
