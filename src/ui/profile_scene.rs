use jellyrun::profile::{
    validate_location, validate_nickname, UserProfile, MAX_LOCATION_LEN, MAX_NICKNAME_LEN,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Nickname,
    Location,
}

pub struct ProfileScreen {
    pub nickname_input: String,
    pub location_input: String,
    pub focused: ProfileField,
    pub validation_error: Option<String>,
    /// Set after a successful save, cleared by the next edit.
    pub saved: bool,
}

impl ProfileScreen {
    /// Editor pre-filled with `profile`.
    pub fn new(profile: &UserProfile) -> Self {
        Self {
            nickname_input: profile.nickname.clone(),
            location_input: profile.location.clone(),
            focused: ProfileField::Nickname,
            validation_error: None,
            saved: false,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" User Info ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(4), // Nickname
                Constraint::Length(4), // Location
                Constraint::Length(2), // Validation
                Constraint::Min(0),
                Constraint::Length(1), // Controls
            ])
            .split(inner);

        let title = Paragraph::new("Your Profile")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        self.draw_field(f, chunks[1], "Nickname:", &self.nickname_input, ProfileField::Nickname);
        self.draw_field(f, chunks[2], "Location:", &self.location_input, ProfileField::Location);

        let feedback = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if self.saved {
            Line::from(Span::styled(
                "✓ Profile saved",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(feedback), chunks[3]);

        let controls = Paragraph::new("[↑/↓] Field    [Enter] Save    [Tab] Next tab    [Esc] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[5]);
    }

    fn draw_field(&self, f: &mut Frame, area: Rect, label: &str, value: &str, field: ProfileField) {
        f.render_widget(Paragraph::new(label), Rect { height: 1, ..area });

        let focused = self.focused == field;
        let text = if focused {
            format!("{}_", value)
        } else {
            value.to_string()
        };
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let input = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .style(Style::default().fg(Color::White));
        f.render_widget(
            input,
            Rect {
                y: area.y + 1,
                height: area.height.saturating_sub(1).min(3),
                ..area
            },
        );
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focused {
            ProfileField::Nickname => &mut self.nickname_input,
            ProfileField::Location => &mut self.location_input,
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused = match self.focused {
            ProfileField::Nickname => ProfileField::Location,
            ProfileField::Location => ProfileField::Nickname,
        };
    }

    pub fn handle_char_input(&mut self, c: char) {
        let limit = match self.focused {
            ProfileField::Nickname => MAX_NICKNAME_LEN,
            ProfileField::Location => MAX_LOCATION_LEN,
        };
        let input = self.focused_input();
        if input.chars().count() < limit {
            input.push(c);
        }
        self.saved = false;
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.focused_input().pop().is_some() {
            self.saved = false;
            self.validate();
        }
    }

    pub fn validate(&mut self) {
        self.validation_error = validate_nickname(&self.nickname_input)
            .and_then(|()| validate_location(&self.location_input))
            .err();
    }

    /// The edited profile, or `None` with the error recorded.
    pub fn submit(&mut self) -> Option<UserProfile> {
        self.validate();
        if self.validation_error.is_some() {
            return None;
        }
        self.saved = true;
        Some(UserProfile::new(&self.nickname_input, &self.location_input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut screen = ProfileScreen::new(&UserProfile::default());
        screen.handle_char_input('A');
        screen.handle_char_input('l');
        screen.toggle_field();
        screen.handle_char_input('N');
        assert_eq!(screen.nickname_input, "Al");
        assert_eq!(screen.location_input, "N");

        screen.handle_backspace();
        assert_eq!(screen.location_input, "");
    }

    #[test]
    fn test_nickname_is_capped() {
        let mut screen = ProfileScreen::new(&UserProfile::default());
        for _ in 0..MAX_NICKNAME_LEN + 5 {
            screen.handle_char_input('x');
        }
        assert_eq!(screen.nickname_input.chars().count(), MAX_NICKNAME_LEN);
        assert!(screen.validation_error.is_none());
    }

    #[test]
    fn test_submit_trims_and_marks_saved() {
        let mut screen = ProfileScreen::new(&UserProfile::new("Crystal", "Paris"));
        screen.handle_char_input(' ');
        let profile = screen.submit().unwrap();
        assert_eq!(profile, UserProfile::new("Crystal", "Paris"));
        assert!(screen.saved);

        screen.handle_backspace();
        assert!(!screen.saved);
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let mut screen = ProfileScreen::new(&UserProfile::default());
        screen.handle_char_input('\u{7}');
        assert!(screen.validation_error.is_some());
        assert!(screen.submit().is_none());
        assert!(!screen.saved);
    }
}
