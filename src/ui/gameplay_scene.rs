//! Play Game tab.
//!
//! The sea floor, the fish, both hazards and the jelly are drawn into a
//! cell buffer in world pixels scaled to the play field, then stamped
//! row-by-row as Paragraph widgets.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_prompt_modal, render_status_bar,
};
use jellyrun::cosmetics::{CosmeticSelections, CosmeticSlot};
use jellyrun::runner::Hazard;
use jellyrun::{
    JellyRunGame, MatchPhase, Prompt, GROUND_HEIGHT, GROUND_LEVEL, JUMP_HEIGHT, MAX_LIVES,
    MILESTONE_STARS, SPRITE_SIZE,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// World height shown on screen: the top of a full jump plus headroom.
const WORLD_HEIGHT: f64 = GROUND_LEVEL + JUMP_HEIGHT + SPRITE_SIZE + 20.0;

const GROUND_CHAR: char = '▓';
const GROUND_SUB: char = '░';

/// How one sprite looks on screen.
struct SpriteStyle {
    slot: CosmeticSlot,
    fallback: char,
    fg: Color,
}

const PLAYER_STYLE: SpriteStyle = SpriteStyle {
    slot: CosmeticSlot::Red,
    fallback: '█',
    fg: Color::LightRed,
};
const SHARK_STYLE: SpriteStyle = SpriteStyle {
    slot: CosmeticSlot::Black,
    fallback: '▓',
    fg: Color::DarkGray,
};
const URCHIN_STYLE: SpriteStyle = SpriteStyle {
    slot: CosmeticSlot::Pink,
    fallback: '*',
    fg: Color::LightMagenta,
};
const JELLY_STYLE: SpriteStyle = SpriteStyle {
    slot: CosmeticSlot::Yellow,
    fallback: '@',
    fg: Color::Yellow,
};

fn hazard_style(hazard: Hazard) -> &'static SpriteStyle {
    match hazard {
        Hazard::Shark => &SHARK_STYLE,
        Hazard::Urchin => &URCHIN_STYLE,
    }
}

pub fn render_gameplay_scene(
    frame: &mut Frame,
    area: Rect,
    game: &JellyRunGame,
    selections: &CosmeticSelections,
) {
    let layout = create_game_layout(frame, area, " Jelly Run ", Color::Cyan, 10, 22);

    render_play_field(frame, layout.content, game, selections);

    match game.prompt {
        Some(Prompt::Milestone) => render_prompt_modal(
            frame,
            layout.content,
            "Congratulations!",
            Color::Yellow,
            &[
                format!("You collected {} jellies!", MILESTONE_STARS),
                "Keep going for a high score.".to_string(),
            ],
            &[("[Enter]", "Continue")],
        ),
        Some(Prompt::GameOver { final_stars }) => render_prompt_modal(
            frame,
            layout.content,
            "Game Over",
            Color::Red,
            &[
                "No more lives left!".to_string(),
                format!("Jellies collected: {}", final_stars),
            ],
            &[("[R]", "Retry"), ("[S]", "Stop")],
        ),
        None => match game.phase() {
            MatchPhase::Idle => render_center_banner(frame, layout.content, "[ Press Space to Start ]"),
            MatchPhase::Paused => render_center_banner(frame, layout.content, "[ Paused ]"),
            MatchPhase::Running | MatchPhase::GameOver => {}
        },
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, selections);
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Maps world pixels (origin bottom-left) to buffer cells.
struct Projection {
    cols: usize,
    rows: usize,
    x_scale: f64,
    y_scale: f64,
}

impl Projection {
    fn new(cols: usize, rows: usize, world_width: f64) -> Self {
        Self {
            cols,
            rows,
            x_scale: cols as f64 / world_width,
            y_scale: rows as f64 / WORLD_HEIGHT,
        }
    }

    /// Half-open column range covering `[x, x + w)`, clipped.
    fn columns(&self, x: f64, w: f64) -> (usize, usize) {
        let start = (x * self.x_scale).floor() as i64;
        let end = ((x + w) * self.x_scale).ceil() as i64;
        let end = end.max(start + 1);
        (clip(start, self.cols), clip(end, self.cols))
    }

    /// Half-open row range covering `[bottom, bottom + h)`, clipped.
    fn rows(&self, bottom: f64, h: f64) -> (usize, usize) {
        let rows = self.rows as i64;
        let top = rows - ((bottom + h) * self.y_scale).ceil() as i64;
        let end = rows - (bottom * self.y_scale).floor() as i64;
        let end = end.max(top + 1);
        (clip(top, self.rows), clip(end, self.rows))
    }
}

fn clip(v: i64, max: usize) -> usize {
    v.clamp(0, max as i64) as usize
}

fn fill_sprite(buffer: &mut [Vec<Cell>], proj: &Projection, x: f64, bottom: f64, cell: Cell) {
    let (c0, c1) = proj.columns(x, SPRITE_SIZE);
    let (r0, r1) = proj.rows(bottom, SPRITE_SIZE);
    for row in &mut buffer[r0..r1] {
        for slot in &mut row[c0..c1] {
            *slot = cell;
        }
    }
}

fn sprite_cell(style: &SpriteStyle, selections: &CosmeticSelections) -> Cell {
    Cell {
        ch: selections.glyph(style.slot, style.fallback),
        fg: style.fg,
        bg: Color::Reset,
    }
}

fn render_play_field(
    frame: &mut Frame,
    area: Rect,
    game: &JellyRunGame,
    selections: &CosmeticSelections,
) {
    if area.height < 4 || area.width < 10 {
        return;
    }

    let cols = area.width as usize;
    let rows = area.height as usize;
    let world_width = game.world_width();
    let proj = Projection::new(cols, rows, world_width);
    let mut buffer = vec![vec![Cell::default(); cols]; rows];

    // ── Sea floor: two segments drifting left ──────────────────────────
    let (ground_top, _) = proj.rows(0.0, GROUND_HEIGHT);
    let segment = world_width / 2.0;
    for row in &mut buffer[ground_top..] {
        for (col, cell) in row.iter_mut().enumerate() {
            let world_x = col as f64 / proj.x_scale + game.ground_scroll;
            let ch = if world_x.rem_euclid(segment) < segment / 8.0 {
                GROUND_SUB
            } else {
                GROUND_CHAR
            };
            *cell = Cell {
                ch,
                fg: Color::Rgb(150, 130, 90),
                bg: Color::Rgb(70, 60, 40),
            };
        }
    }

    // ── Sprites ────────────────────────────────────────────────────────
    let jelly = sprite_cell(&JELLY_STYLE, selections);
    fill_sprite(&mut buffer, &proj, game.motion.reward_x(), GROUND_LEVEL, jelly);

    for hazard in Hazard::ALL {
        let cell = sprite_cell(hazard_style(hazard), selections);
        fill_sprite(&mut buffer, &proj, game.motion.hazard_x(hazard), GROUND_LEVEL, cell);
    }

    let player = sprite_cell(&PLAYER_STYLE, selections);
    fill_sprite(
        &mut buffer,
        &proj,
        game.player.horizontal,
        GROUND_LEVEL + game.player.jump_offset(),
        player,
    );

    // ── HUD ────────────────────────────────────────────────────────────
    let jelly_text = format!("Jelly: {}", game.stars);
    stamp_text(&mut buffer[0], 1, &jelly_text, Color::Yellow);
    let lives_text = format!("Lives: {}", game.lives);
    let start = cols.saturating_sub(lives_text.chars().count() + 1);
    stamp_text(&mut buffer[0], start, &lives_text, Color::LightRed);

    for (row_idx, row_data) in buffer.iter().enumerate() {
        let line = Paragraph::new(Line::from(row_spans(row_data)));
        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(line, row_area);
    }
}

fn stamp_text(row: &mut [Cell], start: usize, text: &str, fg: Color) {
    for (cell, ch) in row.iter_mut().skip(start).zip(text.chars()) {
        *cell = Cell {
            ch,
            fg,
            bg: Color::Reset,
        };
    }
}

/// Merge runs of equally styled cells into spans.
fn row_spans(row: &[Cell]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current_fg = Color::Reset;
    let mut current_bg = Color::Reset;
    let mut current_text = String::new();

    for &cell in row {
        if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
            spans.push(Span::styled(
                std::mem::take(&mut current_text),
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }
        current_fg = cell.fg;
        current_bg = cell.bg;
        current_text.push(cell.ch);
    }
    if !current_text.is_empty() {
        spans.push(Span::styled(
            current_text,
            Style::default().fg(current_fg).bg(current_bg),
        ));
    }
    spans
}

fn render_center_banner(frame: &mut Frame, area: Rect, text: &str) {
    if area.height < 3 || area.width < 20 {
        return;
    }
    let width = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let banner = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(banner, Rect::new(x, area.y + area.height / 3, width.min(area.width), 1));
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &JellyRunGame) {
    let (status, color) = match game.phase() {
        MatchPhase::Idle => ("Ready", Color::Cyan),
        MatchPhase::Running => ("Swim!", Color::LightCyan),
        MatchPhase::Paused => ("Paused", Color::Yellow),
        MatchPhase::GameOver => ("Game over", Color::Red),
    };
    let controls: &[(&str, &str)] = match game.prompt {
        Some(Prompt::Milestone) => &[("[Enter]", "Continue")],
        Some(Prompt::GameOver { .. }) => &[("[R]", "Retry"), ("[S]", "Stop")],
        None => &[
            ("[Space]", game.toggle_label()),
            ("[←/→]", "Swim"),
            ("[↑]", "Jump"),
            ("[Tab]", "Next tab"),
        ],
    };
    render_status_bar(frame, area, status, color, controls);
}

fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    game: &JellyRunGame,
    selections: &CosmeticSelections,
) {
    let inner = render_info_panel_frame(frame, area);

    let hearts: String = (0..MAX_LIVES)
        .map(|i| if i < game.lives { '♥' } else { '·' })
        .collect();

    let legend = |style: &SpriteStyle, label: &'static str| {
        Line::from(vec![
            Span::styled(
                format!(" {} ", selections.glyph(style.slot, style.fallback)),
                Style::default().fg(style.fg),
            ),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ])
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Jelly: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.stars.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(hearts, Style::default().fg(Color::LightRed)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        legend(&PLAYER_STYLE, "You"),
        legend(&JELLY_STYLE, "Jelly +1"),
        legend(&SHARK_STYLE, "Shark"),
        legend(&URCHIN_STYLE, "Urchin"),
        Line::from(""),
        Line::from(Span::styled(
            "Jump on a hazard",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "for a bonus jelly.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_covers_sprite() {
        let proj = Projection::new(80, 20, 400.0);
        let (c0, c1) = proj.columns(175.0, SPRITE_SIZE);
        assert_eq!((c0, c1), (35, 45));

        let (r0, r1) = proj.rows(GROUND_LEVEL, SPRITE_SIZE);
        assert!(r0 < r1);
        assert!(r1 <= 20);
    }

    #[test]
    fn test_projection_clips_offscreen() {
        let proj = Projection::new(80, 20, 400.0);
        let (c0, c1) = proj.columns(-200.0, SPRITE_SIZE);
        assert_eq!((c0, c1), (0, 0));
        let (c0, c1) = proj.columns(500.0, SPRITE_SIZE);
        assert_eq!((c0, c1), (80, 80));
    }

    #[test]
    fn test_row_spans_merges_runs() {
        let red = Cell {
            ch: 'x',
            fg: Color::Red,
            bg: Color::Reset,
        };
        let row = vec![red, red, Cell::default(), red];
        let spans = row_spans(&row);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, "xx");
    }
}
