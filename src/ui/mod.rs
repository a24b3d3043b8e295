pub mod game_common;
pub mod gameplay_scene;
pub mod leaderboard_scene;
pub mod profile_scene;
pub mod settings_scene;

use crate::app::{App, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Draw the tab bar and the focused tab.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.size();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(size);

    draw_tab_bar(frame, v_chunks[0], app.tab);

    let body = v_chunks[1];
    match app.tab {
        Tab::Settings => app
            .settings
            .draw(frame, body, &app.selections, app.music_muted()),
        Tab::PlayGame => {
            gameplay_scene::render_gameplay_scene(frame, body, &app.game, &app.selections)
        }
        Tab::Leaderboard => {
            leaderboard_scene::render_leaderboard_scene(frame, body, &app.leaderboard, &app.profile)
        }
        Tab::UserInfo => app.profile_editor.draw(frame, body),
    }
}

fn draw_tab_bar(frame: &mut Frame, area: Rect, current: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(Span::raw(tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(current.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Jelly Run ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}
