//! Leaderboard tab: the player's card above the ranked list.

use jellyrun::leaderboard::{Leaderboard, ANONYMOUS_NAME};
use jellyrun::profile::UserProfile;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

const NOT_AVAILABLE: &str = "Not available";

pub fn render_leaderboard_scene(
    frame: &mut Frame,
    area: Rect,
    leaderboard: &Leaderboard,
    profile: &UserProfile,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    render_user_card(frame, chunks[0], leaderboard, profile);
    render_ranking(frame, chunks[1], leaderboard, profile);
}

fn or_not_available(value: &str) -> String {
    match value.trim() {
        "" => NOT_AVAILABLE.to_string(),
        v => v.to_string(),
    }
}

fn render_user_card(frame: &mut Frame, area: Rect, leaderboard: &Leaderboard, profile: &UserProfile) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let score = leaderboard
        .last_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled("Nickname: ", label),
            Span::styled(or_not_available(&profile.nickname), value),
        ]),
        Line::from(vec![
            Span::styled("Location: ", label),
            Span::styled(or_not_available(&profile.location), value),
        ]),
        Line::from(vec![
            Span::styled("Latest score: ", label),
            Span::styled(score, Style::default().fg(Color::Yellow)),
        ]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(" You ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(card, area);
}

fn render_ranking(frame: &mut Frame, area: Rect, leaderboard: &Leaderboard, profile: &UserProfile) {
    let own_name = match profile.nickname.trim() {
        "" => ANONYMOUS_NAME,
        name => name,
    };
    let own_listed = leaderboard.last_score.is_some();

    let rows: Vec<Row> = leaderboard
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if own_listed && entry.name == own_name {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Row::new(vec![
                Cell::from(format!("{:>2}.", i + 1)),
                Cell::from(entry.name.clone()),
                Cell::from(entry.score.to_string()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["#", "Name", "Jelly"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(
        Block::default()
            .title(" Leaderboard ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_show_not_available() {
        assert_eq!(or_not_available("  "), NOT_AVAILABLE);
        assert_eq!(or_not_available(" Oslo "), "Oslo");
    }
}
