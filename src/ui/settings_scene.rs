//! Settings tab: music toggle, sprite images and the game description.

use super::game_common::{centered_rect, render_status_bar};
use jellyrun::cosmetics::{list_library_images, CosmeticSelections, CosmeticSlot, PickOutcome};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::path::{Path, PathBuf};

const GAME_DESCRIPTION: &str = "In the deep blue ocean lives a kingdom of colorful fish, ruled by \
the Rainbow Fish. Its Jelly Gems are the source of energy and life for the ocean. One day the \
Dark Shark steals the gems, hides them in secret places and sets dangerous creatures to guard \
them. Swim along the sea floor, dodge the Dark Shark and its urchins, jump on them for a bonus, \
and collect every Jelly Gem you can. The leaderboard shows who has gathered the most.";

const SHEET_OPTIONS: [&str; 3] = ["Cancel", "Select from Library", "Take Photo"];

/// Row 0 is the music toggle, rows 1..=4 are the sprite slots.
const ROW_COUNT: usize = 1 + CosmeticSlot::ALL.len();

/// What the app must do after a key press on this tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    ToggleMusic,
    OpenLibrary(CosmeticSlot),
    TakePhoto(CosmeticSlot),
    Picked(CosmeticSlot, PickOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Picker {
    Closed,
    ActionSheet {
        slot: CosmeticSlot,
        selected: usize,
    },
    Library {
        slot: CosmeticSlot,
        images: Vec<PathBuf>,
        selected: usize,
    },
}

pub struct SettingsScreen {
    pub selected: usize,
    picker: Picker,
    /// Feedback from the last pick.
    pub message: Option<String>,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self {
            selected: 0,
            picker: Picker::Closed,
            message: None,
        }
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker != Picker::Closed
    }

    pub fn close_picker(&mut self) {
        self.picker = Picker::Closed;
    }

    fn selected_slot(&self) -> Option<CosmeticSlot> {
        (self.selected > 0).then(|| CosmeticSlot::from_index(self.selected - 1))
    }

    pub fn move_up(&mut self) {
        match &mut self.picker {
            Picker::Closed => self.selected = (self.selected + ROW_COUNT - 1) % ROW_COUNT,
            Picker::ActionSheet { selected, .. } => {
                *selected = (*selected + SHEET_OPTIONS.len() - 1) % SHEET_OPTIONS.len()
            }
            Picker::Library {
                images, selected, ..
            } => *selected = (*selected + images.len() - 1) % images.len(),
        }
    }

    pub fn move_down(&mut self) {
        match &mut self.picker {
            Picker::Closed => self.selected = (self.selected + 1) % ROW_COUNT,
            Picker::ActionSheet { selected, .. } => {
                *selected = (*selected + 1) % SHEET_OPTIONS.len()
            }
            Picker::Library {
                images, selected, ..
            } => *selected = (*selected + 1) % images.len(),
        }
    }

    /// Enter on the current row or picker entry.
    pub fn confirm(&mut self) -> SettingsAction {
        match std::mem::replace(&mut self.picker, Picker::Closed) {
            Picker::Closed => match self.selected_slot() {
                None => SettingsAction::ToggleMusic,
                Some(slot) => {
                    self.picker = Picker::ActionSheet { slot, selected: 0 };
                    SettingsAction::None
                }
            },
            Picker::ActionSheet { slot, selected } => match selected {
                1 => SettingsAction::OpenLibrary(slot),
                2 => SettingsAction::TakePhoto(slot),
                _ => SettingsAction::Picked(slot, PickOutcome::Cancelled),
            },
            Picker::Library {
                slot,
                images,
                selected,
            } => match images.into_iter().nth(selected) {
                Some(path) => SettingsAction::Picked(slot, PickOutcome::Selected(path)),
                None => SettingsAction::Picked(slot, PickOutcome::Cancelled),
            },
        }
    }

    /// Esc while a picker is open. `None` when there was nothing to close.
    pub fn cancel(&mut self) -> Option<SettingsAction> {
        let slot = match &self.picker {
            Picker::Closed => return None,
            Picker::ActionSheet { slot, .. } | Picker::Library { slot, .. } => *slot,
        };
        self.picker = Picker::Closed;
        Some(SettingsAction::Picked(slot, PickOutcome::Cancelled))
    }

    /// Show the images in `dir` for `slot`.
    pub fn open_library(&mut self, slot: CosmeticSlot, dir: &Path) {
        let images = list_library_images(dir);
        if images.is_empty() {
            self.message = Some(format!("No images found in {}", dir.display()));
            self.picker = Picker::Closed;
            return;
        }
        self.picker = Picker::Library {
            slot,
            images,
            selected: 0,
        };
    }

    pub fn report(&mut self, slot: CosmeticSlot, outcome: &PickOutcome) {
        self.message = Some(match outcome {
            PickOutcome::Selected(path) => format!(
                "{} now uses {}",
                slot.key(),
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            ),
            PickOutcome::Cancelled => "Image selection cancelled".to_string(),
            PickOutcome::Failed(reason) => format!("Could not pick an image: {}", reason),
        });
    }

    pub fn draw(
        &self,
        frame: &mut Frame,
        area: Rect,
        selections: &CosmeticSelections,
        music_muted: bool,
    ) {
        let block = Block::default()
            .title(" Edit Game Settings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(ROW_COUNT as u16 * 2 + 1),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(inner);

        self.draw_rows(frame, chunks[0], selections, music_muted);

        let description = Paragraph::new(vec![
            Line::from(Span::styled(
                "Game Description",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(GAME_DESCRIPTION),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(description, chunks[1]);

        let status = self.message.as_deref().unwrap_or("");
        render_status_bar(
            frame,
            chunks[2],
            status,
            Color::LightCyan,
            &[("[↑/↓]", "Select"), ("[Enter]", "Change"), ("[Tab]", "Next tab")],
        );

        self.draw_picker(frame, area);
    }

    fn draw_rows(
        &self,
        frame: &mut Frame,
        area: Rect,
        selections: &CosmeticSelections,
        music_muted: bool,
    ) {
        let marker = |row: usize| if row == self.selected { "> " } else { "  " };
        let highlight = |row: usize| {
            if row == self.selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            }
        };

        let music_label = if music_muted {
            "Unmute BG Music"
        } else {
            "Mute BG Music"
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{}[ {} ]", marker(0), music_label),
                highlight(0),
            )),
            Line::from(""),
        ];

        for (i, slot) in CosmeticSlot::ALL.iter().enumerate() {
            let row = i + 1;
            let image = selections
                .get(*slot)
                .and_then(|p| Path::new(p).file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "default".to_string());
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}{:<7}", marker(row), slot.key()),
                    highlight(row),
                ),
                Span::styled(format!("[{}]", image), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", slot.description()),
                Style::default().fg(Color::DarkGray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_picker(&self, frame: &mut Frame, area: Rect) {
        let (title, items, selected): (String, Vec<String>, usize) = match &self.picker {
            Picker::Closed => return,
            Picker::ActionSheet { slot, selected } => (
                format!(" Select Image ({}) ", slot.key()),
                SHEET_OPTIONS.iter().map(|s| s.to_string()).collect(),
                *selected,
            ),
            Picker::Library {
                slot,
                images,
                selected,
            } => (
                format!(" Library ({}) ", slot.key()),
                images
                    .iter()
                    .map(|p| {
                        p.file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| p.display().to_string())
                    })
                    .collect(),
                *selected,
            ),
        };

        let height = (items.len() as u16 + 2).min(area.height.saturating_sub(2));
        let modal = centered_rect(area, 40, height);
        frame.render_widget(Clear, modal);

        let list = List::new(items.into_iter().map(ListItem::new).collect::<Vec<_>>())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        let mut state = ListState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(list, modal, &mut state);
    }
}
