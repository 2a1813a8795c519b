//! App: terminal init, main loop, countdown and key/mouse handling.

use crate::clock::Countdown;
use crate::dice::{SeededDice, SequentialIds};
use crate::game::{Block, Evaluation, GameEngine, Injection, Tick};
use crate::input::{Action, key_to_action, mouse_click};
use crate::theme::Theme;
use crate::{Args, GameConfig, GameMode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::{debug, info};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// How long the sum gauge stays red after an overshoot.
const OVERSHOOT_FLASH_MS: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Rules,
    Playing,
    QuitMenu,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitOption {
    Resume,
    MainMenu,
    Exit,
}

impl QuitOption {
    fn next(self) -> Self {
        match self {
            Self::Resume => Self::MainMenu,
            Self::MainMenu => Self::Exit,
            Self::Exit => Self::Resume,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Resume => Self::Exit,
            Self::MainMenu => Self::Resume,
            Self::Exit => Self::MainMenu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Classic,
    Time,
    Rules,
}

impl MenuItem {
    pub const ALL: [Self; 3] = [Self::Classic, Self::Time, Self::Rules];

    fn next(self) -> Self {
        match self {
            Self::Classic => Self::Time,
            Self::Time => Self::Rules,
            Self::Rules => Self::Classic,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Classic => Self::Rules,
            Self::Time => Self::Classic,
            Self::Rules => Self::Time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub selected: MenuItem,
    pub animation_start: Instant,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            selected: MenuItem::Classic,
            animation_start: Instant::now(),
        }
    }
}

/// Ghosts of just-cleared blocks, faded out by TachyonFX.
pub struct ClearFlash {
    /// Cleared blocks at the position their hole occupies now.
    pub blocks: Vec<Block>,
    pub effect: Option<Effect>,
    pub last_processed: Option<Instant>,
}

impl ClearFlash {
    /// `shifted` is true when a row was pushed after the clear, which moved
    /// the holes up by one.
    pub fn new(blocks: Vec<Block>, shifted: bool) -> Self {
        let blocks = blocks
            .into_iter()
            .filter_map(|mut b| {
                if shifted {
                    b.row = b.row.checked_sub(1)?;
                }
                Some(b)
            })
            .collect();
        Self {
            blocks,
            effect: None,
            last_processed: None,
        }
    }

    pub fn done(&self) -> bool {
        self.blocks.is_empty() || self.effect.as_ref().is_some_and(|e| e.done())
    }
}

pub struct App {
    args: Args,
    theme: Theme,
    engine: GameEngine<SeededDice, SequentialIds>,
    /// The only timer in the app; armed while a timed game is running.
    countdown: Countdown,
    screen: Screen,
    paused: bool,
    /// Board cursor (row, col).
    cursor: (usize, usize),
    menu_state: MenuState,
    quit_selected: QuitOption,
    clear_flash: Option<ClearFlash>,
    overshoot_at: Option<Instant>,
    /// Terminal area of the last frame, for mapping mouse clicks.
    last_area: Rect,
}

impl App {
    pub fn new(args: Args, config: GameConfig, theme: Theme) -> Result<Self> {
        let dice = args.seed.map_or_else(SeededDice::from_entropy, SeededDice::new);
        let engine = GameEngine::new(config, args.mode, dice, SequentialIds::default());
        let mut app = Self {
            cursor: (engine.config().rows - 1, 0),
            args,
            theme,
            engine,
            countdown: Countdown::default(),
            screen: Screen::Menu,
            paused: false,
            menu_state: MenuState::default(),
            quit_selected: QuitOption::Resume,
            clear_flash: None,
            overshoot_at: None,
            last_area: Rect::default(),
        };
        if app.args.no_menu {
            app.start_game(app.args.mode);
        }
        Ok(app)
    }

    fn start_game(&mut self, mode: GameMode) {
        self.args.mode = mode;
        self.engine.start(mode);
        self.countdown.release();
        self.screen = Screen::Playing;
        self.paused = false;
        self.cursor = (self.engine.config().rows - 1, 0);
        self.clear_flash = None;
        self.overshoot_at = None;
        self.quit_selected = QuitOption::Resume;
    }

    fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.paused = false;
        self.countdown.release();
        self.clear_flash = None;
        self.menu_state.animation_start = Instant::now();
    }

    /// Engine suspension and timer ownership follow the screen: the timer is
    /// armed only while a timed game is visible, unpaused and not over.
    fn sync_engine(&mut self, now: Instant) {
        let suspended = self.paused || self.screen != Screen::Playing;
        if self.engine.is_paused() != suspended {
            debug!("engine {}", if suspended { "suspended" } else { "resumed" });
            self.engine.set_paused(suspended);
        }
        let state = self.engine.state();
        let timed = state.mode == GameMode::Time && !state.is_game_over && !suspended;
        let was_armed = self.countdown.is_armed();
        self.countdown.sync(timed, now);
        if was_armed != self.countdown.is_armed() {
            debug!("countdown {}", if timed { "armed" } else { "released" });
        }
    }

    fn check_game_over(&mut self) {
        if self.engine.state().is_game_over && self.screen == Screen::Playing {
            info!("game over, score {}", self.engine.state().score);
            self.screen = Screen::GameOver;
            self.countdown.release();
        }
    }

    fn on_evaluation(&mut self, evaluation: Evaluation, now: Instant) {
        match evaluation {
            Evaluation::Cleared(report) => {
                debug!("clear worth {} points", report.points);
                if !self.args.no_animation {
                    let shifted = report.injection == Some(Injection::Added);
                    self.clear_flash = Some(ClearFlash::new(report.blocks, shifted));
                }
                self.overshoot_at = None;
            }
            Evaluation::Overshoot { sum } => {
                debug!("overshot with {sum}");
                self.overshoot_at = Some(now);
            }
            Evaluation::Pending { .. } | Evaluation::Ignored => {}
        }
    }

    fn select_at_cursor(&mut self, now: Instant) {
        let (row, col) = self.cursor;
        if let Some(id) = self.engine.state().block_at(row, col).map(|b| b.id) {
            let evaluation = self.engine.select_block(id);
            debug!("select {id} at ({row}, {col}): {evaluation:?}");
            self.on_evaluation(evaluation, now);
        }
    }

    fn move_cursor(&mut self, action: Action) {
        let config = self.engine.config();
        let (row, col) = self.cursor;
        self.cursor = match action {
            Action::Up => (row.saturating_sub(1), col),
            Action::Down => ((row + 1).min(config.rows - 1), col),
            Action::Left => (row, col.saturating_sub(1)),
            Action::Right => (row, (col + 1).min(config.cols - 1)),
            _ => (row, col),
        };
    }

    /// The rules page closes on any key, bound or not.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if self.screen == Screen::Rules {
            self.screen = Screen::Menu;
            return true;
        }
        self.handle_action(key_to_action(key), now)
    }

    /// Returns false when the app should exit.
    fn handle_action(&mut self, action: Action, now: Instant) -> bool {
        match self.screen {
            Screen::Menu => match action {
                Action::Quit => return false,
                Action::Up | Action::Left => {
                    self.menu_state.selected = self.menu_state.selected.prev();
                }
                Action::Down | Action::Right => {
                    self.menu_state.selected = self.menu_state.selected.next();
                }
                Action::Select => match self.menu_state.selected {
                    MenuItem::Classic => self.start_game(GameMode::Classic),
                    MenuItem::Time => self.start_game(GameMode::Time),
                    MenuItem::Rules => self.screen = Screen::Rules,
                },
                _ => {}
            },
            Screen::Rules => {
                if action != Action::None {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Playing => {
                if self.paused {
                    match action {
                        Action::Pause => self.paused = false,
                        Action::Quit => {
                            self.screen = Screen::QuitMenu;
                            self.quit_selected = QuitOption::Resume;
                        }
                        _ => {}
                    }
                } else {
                    match action {
                        Action::Pause => self.paused = true,
                        Action::Quit => {
                            self.screen = Screen::QuitMenu;
                            self.quit_selected = QuitOption::Resume;
                        }
                        Action::Up | Action::Down | Action::Left | Action::Right => {
                            self.move_cursor(action);
                        }
                        Action::Select => self.select_at_cursor(now),
                        _ => {}
                    }
                }
            }
            Screen::QuitMenu => match action {
                Action::Down | Action::Right => self.quit_selected = self.quit_selected.next(),
                Action::Up | Action::Left => self.quit_selected = self.quit_selected.prev(),
                Action::Select => match self.quit_selected {
                    QuitOption::Resume => self.screen = Screen::Playing,
                    QuitOption::MainMenu => self.back_to_menu(),
                    QuitOption::Exit => return false,
                },
                Action::Pause | Action::Quit => self.screen = Screen::Playing,
                _ => {}
            },
            Screen::GameOver => match action {
                Action::Quit => return false,
                Action::Restart | Action::Select => self.start_game(self.args.mode),
                Action::Menu => self.back_to_menu(),
                _ => {}
            },
        }
        true
    }

    fn handle_click(&mut self, x: u16, y: u16, now: Instant) {
        if self.screen != Screen::Playing || self.paused {
            return;
        }
        let Some((row, col)) = crate::ui::cell_at(self.last_area, self.engine.config(), x, y)
        else {
            return;
        };
        self.cursor = (row, col);
        self.select_at_cursor(now);
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{DisableMouseCapture, EnableMouseCapture},
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let result = ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))
            .map_err(anyhow::Error::from)
            .and_then(|mut terminal| self.run_loop(&mut terminal));

        // Restore
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / self.args.frame_rate.max(1.0));
        loop {
            let now = Instant::now();
            self.sync_engine(now);
            if self.countdown.poll(now) {
                match self.engine.tick() {
                    Tick::Expired(injection) => debug!("countdown expired: {injection:?}"),
                    Tick::Counted { time_left } => debug!("tick, {time_left}s left"),
                    Tick::Ignored => {}
                }
                if self.engine.state().is_game_over {
                    self.clear_flash = None;
                }
            }
            self.check_game_over();

            let overshoot = self
                .overshoot_at
                .is_some_and(|t| now.saturating_duration_since(t) < Duration::from_millis(OVERSHOOT_FLASH_MS));
            let mut area = self.last_area;
            terminal.draw(|f| {
                area = f.area();
                crate::ui::draw(
                    f,
                    self.screen,
                    self.engine.state(),
                    self.engine.config(),
                    &self.theme,
                    self.paused,
                    self.cursor,
                    &self.menu_state,
                    self.quit_selected,
                    &mut self.clear_flash,
                    overshoot,
                    now,
                )
            })?;
            self.last_area = area;

            if self.clear_flash.as_ref().is_some_and(ClearFlash::done) {
                self.clear_flash = None;
            }

            let timeout = self
                .countdown
                .remaining(now)
                .map_or(frame_duration, |r| r.min(frame_duration))
                .saturating_sub(now.elapsed());

            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let keep_going = match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key, Instant::now())
                        }
                        Event::Mouse(mouse) => {
                            if let Some((x, y)) = mouse_click(mouse) {
                                self.handle_click(x, y, Instant::now());
                            }
                            true
                        }
                        _ => true,
                    };
                    if !keep_going {
                        return Ok(());
                    }
                    self.check_game_over();
                    self.sync_engine(Instant::now());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn app(extra: &[&str]) -> App {
        let mut argv = vec!["sumblocks", "--seed", "1"];
        argv.extend_from_slice(extra);
        let args = Args::parse_from(argv);
        App::new(args, GameConfig::default(), Theme::default()).unwrap()
    }

    #[test]
    fn menu_starts_timed_game_and_arms_timer() {
        let mut a = app(&[]);
        let now = Instant::now();
        assert_eq!(a.screen, Screen::Menu);
        assert!(a.handle_action(Action::Down, now));
        assert!(a.handle_action(Action::Select, now));
        assert_eq!(a.screen, Screen::Playing);
        assert_eq!(a.engine.state().mode, GameMode::Time);
        assert_eq!(a.engine.state().grid.len(), 24);

        a.sync_engine(now);
        assert!(a.countdown.is_armed());
    }

    #[test]
    fn pause_and_quit_menu_release_timer() {
        let mut a = app(&["--no-menu", "-m", "time"]);
        let now = Instant::now();
        a.sync_engine(now);
        assert!(a.countdown.is_armed());

        a.handle_action(Action::Pause, now);
        a.sync_engine(now);
        assert!(!a.countdown.is_armed());
        assert!(a.engine.is_paused());

        a.handle_action(Action::Pause, now);
        a.handle_action(Action::Quit, now);
        assert_eq!(a.screen, Screen::QuitMenu);
        a.sync_engine(now);
        assert!(!a.countdown.is_armed());

        a.handle_action(Action::Select, now);
        assert_eq!(a.screen, Screen::Playing);
        a.sync_engine(now);
        assert!(a.countdown.is_armed());
        assert!(!a.engine.is_paused());
    }

    #[test]
    fn classic_game_never_arms_timer() {
        let mut a = app(&["--no-menu"]);
        a.sync_engine(Instant::now());
        assert!(!a.countdown.is_armed());
    }

    #[test]
    fn rules_close_on_unbound_key() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let mut a = app(&[]);
        let now = Instant::now();
        a.menu_state.selected = MenuItem::Rules;
        a.handle_action(Action::Select, now);
        assert_eq!(a.screen, Screen::Rules);

        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(key_to_action(tab), Action::None);
        assert!(a.handle_key(tab, now));
        assert_eq!(a.screen, Screen::Menu);

        // Back on the menu, unbound keys do nothing.
        assert!(a.handle_key(KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE), now));
        assert_eq!(a.screen, Screen::Menu);
    }

    #[test]
    fn cursor_stays_on_board() {
        let mut a = app(&["--no-menu"]);
        let now = Instant::now();
        assert_eq!(a.cursor, (9, 0));
        a.handle_action(Action::Down, now);
        a.handle_action(Action::Left, now);
        assert_eq!(a.cursor, (9, 0));
        for _ in 0..20 {
            a.handle_action(Action::Up, now);
            a.handle_action(Action::Right, now);
        }
        assert_eq!(a.cursor, (0, 5));
    }

    #[test]
    fn select_key_toggles_block_under_cursor() {
        let mut a = app(&["--no-menu"]);
        let now = Instant::now();
        a.sync_engine(now);
        let id = a.engine.state().block_at(9, 0).unwrap().id;
        a.handle_action(Action::Select, now);
        assert_eq!(a.engine.state().selected_ids, vec![id]);
        a.handle_action(Action::Select, now);
        assert!(a.engine.state().selected_ids.is_empty());
    }

    #[test]
    fn quit_menu_main_menu_leaves_game() {
        let mut a = app(&["--no-menu"]);
        let now = Instant::now();
        a.handle_action(Action::Quit, now);
        a.handle_action(Action::Down, now);
        a.handle_action(Action::Select, now);
        assert_eq!(a.screen, Screen::Menu);
        assert!(!a.handle_action(Action::Quit, now));
    }

    #[test]
    fn clear_flash_follows_shifted_holes() {
        let block = |row| Block {
            id: crate::game::BlockId(row as u64 + 1),
            value: 5,
            row,
            col: 0,
            is_new: false,
        };
        let flash = ClearFlash::new(vec![block(0), block(4)], true);
        assert_eq!(flash.blocks.len(), 1);
        assert_eq!(flash.blocks[0].row, 3);
        let flash = ClearFlash::new(vec![block(0)], false);
        assert_eq!(flash.blocks[0].row, 0);
        assert!(!flash.done());
    }
}
