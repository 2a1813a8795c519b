//! Layout and drawing: menu, rules, board, sidebar, pause, quit prompt, game over.

use crate::app::{ClearFlash, MenuItem, MenuState, QuitOption, Screen};
use crate::game::{self, GameState};
use crate::theme::Theme;
use crate::{GameConfig, GameMode};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap};
use std::collections::HashSet;
use std::time::Instant;
use tachyonfx::{CellFilter, Duration as TfxDuration, EffectRenderer, Interpolation, fx, ref_count};

/// Terminal cells per block (the last column is a gap).
const CELL_WIDTH: u16 = 5;
const CELL_HEIGHT: u16 = 2;

const SIDEBAR_WIDTH: u16 = 26;

/// Duration of the clear fade (TachyonFX) in ms.
const CLEAR_FADE_MS: u32 = 350;

/// Seconds left at which the timer turns red.
const LOW_TIME_SECS: u32 = 3;

/// Widest grid whose board and sidebar still fit in a `u16` extent.
pub const MAX_COLS: usize = ((u16::MAX - SIDEBAR_WIDTH - 2) / CELL_WIDTH) as usize;
/// Tallest grid whose board still fits in a `u16` extent.
pub const MAX_ROWS: usize = ((u16::MAX - 2) / CELL_HEIGHT) as usize;

fn cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Board size in terminal cells, border included.
fn board_size(config: &GameConfig) -> (u16, u16) {
    (
        cells(config.cols).saturating_mul(CELL_WIDTH).saturating_add(2),
        cells(config.rows).saturating_mul(CELL_HEIGHT).saturating_add(2),
    )
}

/// Board (outer, with border) and sidebar rects, centred in `area`.
pub fn game_layout(area: Rect, config: &GameConfig) -> (Rect, Rect) {
    let (bw, bh) = board_size(config);
    let total_w = bw.saturating_add(SIDEBAR_WIDTH);

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(bh),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);
    (inner[0], inner[1])
}

fn board_inner(board: Rect) -> Rect {
    board.inner(Margin {
        horizontal: 1,
        vertical: 1,
    })
}

/// Grid cell (row, col) under terminal position (x, y), if any.
pub fn cell_at(area: Rect, config: &GameConfig, x: u16, y: u16) -> Option<(usize, usize)> {
    let (board, _) = game_layout(area, config);
    let inner = board_inner(board);
    if !inner.contains(Position { x, y }) {
        return None;
    }
    let col = ((x - inner.x) / CELL_WIDTH) as usize;
    let row = ((y - inner.y) / CELL_HEIGHT) as usize;
    (row < config.rows && col < config.cols).then_some((row, col))
}

/// Terminal rect of grid cell (row, col), clipped to the board.
fn cell_rect(inner: Rect, row: usize, col: usize) -> Rect {
    Rect {
        x: inner.x.saturating_add(cells(col).saturating_mul(CELL_WIDTH)),
        y: inner.y.saturating_add(cells(row).saturating_mul(CELL_HEIGHT)),
        width: CELL_WIDTH - 1,
        height: CELL_HEIGHT,
    }
    .intersection(inner)
}

fn popup_rect(area: Rect, w: u16, h: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

fn popup_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .style(Style::default().bg(theme.bg))
}

/// Draw current screen, with overlays for pause, quit prompt and game over.
/// While `clear_flash` is set, cleared blocks are drawn as ghosts and faded out.
pub fn draw(
    frame: &mut Frame,
    screen: Screen,
    state: &GameState,
    config: &GameConfig,
    theme: &Theme,
    paused: bool,
    cursor: (usize, usize),
    menu_state: &MenuState,
    quit_selected: QuitOption,
    clear_flash: &mut Option<ClearFlash>,
    overshoot: bool,
    now: Instant,
) {
    let area = frame.area();
    match screen {
        Screen::Menu => draw_menu(frame, theme, menu_state, area, now),
        Screen::Rules => draw_rules(frame, theme, config, area),
        Screen::Playing | Screen::QuitMenu | Screen::GameOver => {
            let show_cursor = screen == Screen::Playing && !paused;
            draw_game(frame, state, config, theme, area, cursor, show_cursor, overshoot);
            if let Some(flash) = clear_flash {
                let (board, _) = game_layout(area, config);
                apply_clear_effect(frame, state, theme, board_inner(board), flash, now);
            }
            match screen {
                Screen::Playing if paused => draw_pause_overlay(frame, theme, area),
                Screen::QuitMenu => draw_quit_menu(frame, theme, area, quit_selected),
                Screen::GameOver => draw_game_over(frame, state, theme, area),
                _ => {}
            }
        }
    }
}

fn draw_menu(frame: &mut Frame, theme: &Theme, menu_state: &MenuState, area: Rect, now: Instant) {
    let popup = popup_rect(area, 44, 19);

    let title = Line::from(vec![
        Span::styled(
            " Sum ",
            Style::default()
                .fg(theme.blocks[0])
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " blocks ",
            Style::default()
                .fg(theme.main_fg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let highlight_style = Style::default()
        .fg(Color::Black)
        .bg(theme.title)
        .add_modifier(Modifier::BOLD);
    let normal_style = Style::default().fg(theme.main_fg);
    let hint_style = Style::default().fg(theme.inactive_fg);

    let mut lines = vec![
        Line::from(""),
        title,
        Line::from(Span::styled(" Add up the numbers, clear the stack ", hint_style)),
        Line::from(""),
    ];
    for item in MenuItem::ALL {
        let (label, hint) = match item {
            MenuItem::Classic => (" CLASSIC ", "a new row after every clear"),
            MenuItem::Time => (" TIME ", "a new row when the clock runs out"),
            MenuItem::Rules => (" RULES ", "how to play and score"),
        };
        let style = if item == menu_state.selected {
            highlight_style
        } else {
            normal_style
        };
        lines.push(Line::from(Span::styled(label, style)));
        lines.push(Line::from(Span::styled(hint, hint_style)));
        lines.push(Line::from(""));
    }
    lines.extend([
        Line::from(""),
        Line::from(vec![
            Span::styled(" ↕ ", Style::default().fg(theme.blocks[3])),
            Span::from("NAVIGATE   "),
            Span::styled(" ENTER ", Style::default().fg(theme.blocks[3])),
            Span::from("START"),
        ]),
        Line::from(""),
        Line::from(Span::styled(" [Q] QUIT ", Style::default().fg(theme.danger))),
    ]);

    // Startup animation: slide in from below, ease-out cubic.
    let elapsed = now
        .saturating_duration_since(menu_state.animation_start)
        .as_millis() as f32;
    let t = (elapsed / 500.0).min(1.0);
    let offset_t = 1.0 - (1.0 - t).powi(3);
    let mut anim_popup = popup;
    anim_popup.y += ((1.0 - offset_t) * 8.0) as u16;
    let anim_popup = anim_popup.intersection(area);

    Clear.render(anim_popup, frame.buffer_mut());
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(popup_block(theme))
        .render(anim_popup, frame.buffer_mut());
}

fn draw_rules(frame: &mut Frame, theme: &Theme, config: &GameConfig, area: Rect) {
    let popup = popup_rect(area, 60, 24);
    let heading = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);
    let body = Style::default().fg(theme.main_fg);
    let accent = Style::default().fg(theme.blocks[0]);

    let lines = vec![
        Line::from(Span::styled("How to play", heading)),
        Line::from(Span::styled(
            "Pick blocks until their values add up to the target shown in the sidebar. \
             Blocks do not need to touch; any row, any column.",
            body,
        )),
        Line::from(""),
        Line::from(Span::styled("Scoring", heading)),
        Line::from(vec![
            Span::styled("A hit clears the picked blocks and scores ", body),
            Span::styled("target × blocks cleared", accent),
            Span::styled(". More blocks per clear, more points. Going over the target drops the selection.", body),
        ]),
        Line::from(""),
        Line::from(Span::styled("Losing", heading)),
        Line::from(Span::styled(
            "The top row is the danger line. If a new row would push a block past it, the game is over.",
            body,
        )),
        Line::from(""),
        Line::from(Span::styled("Modes", heading)),
        Line::from(vec![
            Span::styled("Classic", Style::default().fg(theme.blocks[3])),
            Span::styled(": a new row rises after every clear.", body),
        ]),
        Line::from(vec![
            Span::styled("Time", Style::default().fg(theme.blocks[4])),
            Span::styled(
                format!(": a new row rises every {} seconds unless you clear first.", config.time_limit),
                body,
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Arrows/hjkl move, Enter/Space/x select, mouse clicks select, P pauses.",
            Style::default().fg(theme.inactive_fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Press any key to return ",
            Style::default().fg(Color::Black).bg(theme.title),
        )),
    ];

    Clear.render(popup, frame.buffer_mut());
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(popup_block(theme).title(Span::styled(" Rules ", Style::default().fg(theme.title))))
        .render(popup, frame.buffer_mut());
}

/// Draw game: board + sidebar, centred.
fn draw_game(
    frame: &mut Frame,
    state: &GameState,
    config: &GameConfig,
    theme: &Theme,
    area: Rect,
    cursor: (usize, usize),
    show_cursor: bool,
    overshoot: bool,
) {
    let (board, sidebar) = game_layout(area, config);
    draw_board(frame, state, theme, board, cursor, show_cursor);
    draw_sidebar(frame, state, config, theme, sidebar, overshoot);
}

fn draw_board(
    frame: &mut Frame,
    state: &GameState,
    theme: &Theme,
    area: Rect,
    cursor: (usize, usize),
    show_cursor: bool,
) {
    let title = match state.mode {
        GameMode::Classic => " Sumblocks  Classic ".to_string(),
        GameMode::Time => format!(" Sumblocks  Time: {}s ", state.time_left),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .style(Style::default().bg(theme.bg))
        .title(Span::styled(title, Style::default().fg(theme.title)));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();

    // Danger line along the bottom edge of row 0.
    let danger_y = inner.y + CELL_HEIGHT - 1;
    if danger_y < inner.y + inner.height {
        for x in inner.x..inner.x + inner.width {
            buf[(x, danger_y)]
                .set_symbol("╌")
                .set_style(Style::default().fg(theme.danger).bg(theme.bg));
        }
    }

    for b in &state.grid {
        let rect = cell_rect(inner, b.row, b.col);
        let selected = state.is_selected(b.id);
        let under_cursor = show_cursor && (b.row, b.col) == cursor;
        let label = if under_cursor {
            format!("›{}‹", b.value)
        } else {
            b.value.to_string()
        };
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(block_style(b, selected, theme))
            .render(rect, buf);
    }

    if show_cursor && state.block_at(cursor.0, cursor.1).is_none() {
        let rect = cell_rect(inner, cursor.0, cursor.1);
        Paragraph::new("[  ]")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.main_fg).bg(theme.bg))
            .render(rect, buf);
    }
}

fn block_style(b: &game::Block, selected: bool, theme: &Theme) -> Style {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Black).bg(theme.block_color(b.value))
    };
    if b.is_new {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Draw the ghosts of cleared blocks and fade them to the background.
fn apply_clear_effect(
    frame: &mut Frame,
    state: &GameState,
    theme: &Theme,
    inner: Rect,
    flash: &mut ClearFlash,
    now: Instant,
) {
    // A row pushed in by the countdown may have moved a block into a hole.
    let ghosts: Vec<&game::Block> = flash
        .blocks
        .iter()
        .filter(|b| state.block_at(b.row, b.col).is_none())
        .collect();

    let buf = frame.buffer_mut();
    for b in &ghosts {
        Paragraph::new(b.value.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Black).bg(Color::White))
            .render(cell_rect(inner, b.row, b.col), buf);
    }

    let delta = flash
        .last_processed
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    let tfx_delta = TfxDuration::from_millis(delta_ms);
    flash.last_processed = Some(now);

    if flash.effect.is_none() {
        let mut positions = HashSet::new();
        for b in &ghosts {
            let r = cell_rect(inner, b.row, b.col);
            for x in r.x..r.x + r.width {
                for y in r.y..r.y + r.height {
                    positions.insert((x, y));
                }
            }
        }
        let filter = CellFilter::PositionFn(ref_count(move |pos: Position| {
            positions.contains(&(pos.x, pos.y))
        }));
        let effect = fx::fade_to(theme.bg, theme.bg, (CLEAR_FADE_MS, Interpolation::Linear))
            .with_filter(filter)
            .with_area(inner);
        flash.effect = Some(effect);
    }

    if let Some(effect) = &mut flash.effect {
        frame.render_effect(effect, inner, tfx_delta);
    }
}

fn draw_sidebar(
    frame: &mut Frame,
    state: &GameState,
    config: &GameConfig,
    theme: &Theme,
    area: Rect,
    overshoot: bool,
) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);
    let section = || Block::default().borders(Borders::ALL).border_style(border_style);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Target + sum gauge
            Constraint::Length(1),
            Constraint::Length(4), // Score, selected
            Constraint::Length(1),
            Constraint::Length(4), // Countdown (time mode)
            Constraint::Fill(1),
        ])
        .split(area);

    // --- Target and running sum ---
    let target_block = section();
    let target_inner = target_block.inner(chunks[0]);
    target_block.render(chunks[0], frame.buffer_mut());
    let target_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(target_inner);
    Paragraph::new(Line::from(vec![
        Span::styled("Target ", title_style),
        Span::styled(
            state.target_sum.to_string(),
            Style::default()
                .fg(theme.blocks[0])
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .render(target_layout[0], frame.buffer_mut());

    let sum = state.current_sum();
    let ratio = if state.target_sum > 0 {
        (f64::from(sum) / f64::from(state.target_sum)).min(1.0)
    } else {
        0.0
    };
    let (gauge_color, label) = if overshoot {
        (theme.danger, "over!".to_string())
    } else {
        (theme.blocks[0], format!("{} / {}", sum, state.target_sum))
    };
    Paragraph::new(Line::from(Span::styled("Sum", title_style)))
        .render(target_layout[1], frame.buffer_mut());
    Gauge::default()
        .ratio(if overshoot { 1.0 } else { ratio })
        .label(label)
        .gauge_style(Style::default().fg(gauge_color).bg(theme.div_line))
        .render(target_layout[2], frame.buffer_mut());

    // --- Stats ---
    let stats_block = section();
    let stats_inner = stats_block.inner(chunks[2]);
    stats_block.render(chunks[2], frame.buffer_mut());
    let stats_lines = vec![
        Line::from(vec![
            Span::styled("Score: ", title_style),
            Span::styled(state.score.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Picked: ", title_style),
            Span::styled(state.selected_ids.len().to_string(), fg_style),
        ]),
    ];
    Paragraph::new(Text::from(stats_lines)).render(stats_inner, frame.buffer_mut());

    // --- Countdown ---
    if state.mode == GameMode::Time {
        let time_block = section();
        let time_inner = time_block.inner(chunks[4]);
        time_block.render(chunks[4], frame.buffer_mut());
        let time_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(time_inner);
        let low = state.time_left < LOW_TIME_SECS;
        let color = if low { theme.danger } else { theme.blocks[3] };
        let mut time_style = Style::default().fg(color);
        if low {
            time_style = time_style.add_modifier(Modifier::BOLD);
        }
        Paragraph::new(Line::from(vec![
            Span::styled("Next row in ", title_style),
            Span::styled(format!("{}s", state.time_left), time_style),
        ]))
        .render(time_layout[0], frame.buffer_mut());
        let ratio = f64::from(state.time_left) / f64::from(config.time_limit.max(1));
        Gauge::default()
            .ratio(ratio.min(1.0))
            .label("")
            .gauge_style(Style::default().fg(color).bg(theme.div_line))
            .render(time_layout[1], frame.buffer_mut());
    }

    // --- Key hints ---
    let hints = vec![
        Line::from(Span::styled("↔↕ move  ⏎ pick", Style::default().fg(theme.inactive_fg))),
        Line::from(Span::styled("P pause  Q quit", Style::default().fg(theme.inactive_fg))),
    ];
    Paragraph::new(Text::from(hints)).render(
        chunks[5].inner(Margin {
            horizontal: 1,
            vertical: 0,
        }),
        frame.buffer_mut(),
    );
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup = popup_rect(area, 28, 5);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " P — Resume    Q — Quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    Clear.render(popup, frame.buffer_mut());
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(popup_block(theme))
        .render(popup, frame.buffer_mut());
}

fn draw_game_over(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) {
    let popup = popup_rect(area, 36, 10);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Game Over ",
            Style::default().fg(Color::White).bg(Color::Red),
        )),
        Line::from(Span::styled(
            " The stack reached the top! ",
            Style::default().fg(theme.inactive_fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Final score: {} ", state.score),
            Style::default()
                .fg(theme.main_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " R — Restart  M — Menu  Q — Quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    Clear.render(popup, frame.buffer_mut());
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(popup_block(theme).title(Span::styled(" Sumblocks ", Style::default().fg(theme.title))))
        .render(popup, frame.buffer_mut());
}

fn draw_quit_menu(frame: &mut Frame, theme: &Theme, area: Rect, selected: QuitOption) {
    let quit_rect = popup_rect(area, 26, 9);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.title))
        .style(Style::default().bg(theme.bg))
        .title(" Quit game? ");

    Clear.render(quit_rect, frame.buffer_mut());
    let inner = block.inner(quit_rect);
    block.render(quit_rect, frame.buffer_mut());

    frame.buffer_mut().set_string(
        inner.x + 1,
        inner.y,
        "Progress will be lost.",
        Style::default().fg(theme.inactive_fg),
    );

    let options = [
        (QuitOption::Resume, " Resume "),
        (QuitOption::MainMenu, " Main Menu "),
        (QuitOption::Exit, " Exit "),
    ];
    for (i, (opt, label)) in options.iter().enumerate() {
        let style = if *opt == selected {
            Style::default()
                .fg(theme.bg)
                .bg(theme.title)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.title)
        };
        let rx = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        let ry = inner.y + 2 + i as u16 * 2;
        if ry < inner.y + inner.height {
            frame.buffer_mut().set_string(rx, ry, label, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 100, 40)
    }

    #[test]
    fn layout_centres_board_and_sidebar() {
        let config = GameConfig::default();
        let (board, sidebar) = game_layout(area(), &config);
        assert_eq!((board.width, board.height), (32, 22));
        assert_eq!(sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(sidebar.x, board.x + board.width);
        assert_eq!(board.x, (100 - 32 - SIDEBAR_WIDTH) / 2);
        assert_eq!(board.y, (40 - 22) / 2);
    }

    #[test]
    fn clicks_map_to_cells() {
        let config = GameConfig::default();
        let (board, _) = game_layout(area(), &config);
        let inner = board_inner(board);
        assert_eq!(cell_at(area(), &config, inner.x, inner.y), Some((0, 0)));
        assert_eq!(
            cell_at(area(), &config, inner.x + CELL_WIDTH * 5 + 2, inner.y + CELL_HEIGHT * 9 + 1),
            Some((9, 5))
        );
        assert_eq!(cell_at(area(), &config, board.x, board.y), None);
        assert_eq!(cell_at(area(), &config, 0, 0), None);
    }

    #[test]
    fn cell_rect_leaves_a_gap_column() {
        let inner = Rect::new(10, 5, 30, 20);
        let r = cell_rect(inner, 2, 3);
        assert_eq!(r, Rect::new(10 + 3 * CELL_WIDTH, 5 + 2 * CELL_HEIGHT, CELL_WIDTH - 1, CELL_HEIGHT));
    }

    #[test]
    fn largest_board_fits_and_larger_saturates() {
        let config = GameConfig {
            cols: MAX_COLS,
            rows: MAX_ROWS,
            ..GameConfig::default()
        };
        let (bw, bh) = board_size(&config);
        assert_eq!(bw, MAX_COLS as u16 * CELL_WIDTH + 2);
        assert_eq!(bh, MAX_ROWS as u16 * CELL_HEIGHT + 2);
        assert!(bw.checked_add(SIDEBAR_WIDTH).is_some());
        game_layout(area(), &config);

        let huge = GameConfig {
            cols: 20_000,
            rows: 40_000,
            ..GameConfig::default()
        };
        assert_eq!(board_size(&huge), (u16::MAX, u16::MAX));
        game_layout(area(), &huge);
        assert!(cell_rect(Rect::new(10, 5, 30, 20), 40_000, 20_000).is_empty());
    }
}
