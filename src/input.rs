//! Key dispatch: global tab keys first, then the focused tab.

use crate::app::{App, Tab};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jellyrun::runner::Gesture;
use jellyrun::{GameplayInput, Prompt};

/// Horizontal drag per arrow press, in world pixels. Above the gesture
/// threshold so a single press always moves.
const DRAG_STEP: f64 = 25.0;
/// Vertical swipe per jump press.
const SWIPE_STEP: f64 = 40.0;

pub enum InputResult {
    Continue,
    Quit,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputResult {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    match key.code {
        KeyCode::Tab => {
            app.switch_tab(app.tab.next());
            return InputResult::Continue;
        }
        KeyCode::BackTab => {
            app.switch_tab(app.tab.prev());
            return InputResult::Continue;
        }
        _ => {}
    }

    match app.tab {
        Tab::Settings => handle_settings_key(app, key.code),
        Tab::PlayGame => {
            if let Some(input) = map_gameplay_key(key.code, app.game.prompt) {
                app.gameplay_input(input);
                return InputResult::Continue;
            }
            quit_key(key.code)
        }
        Tab::Leaderboard => {
            if key.code == KeyCode::Char('r') {
                app.leaderboard.refresh(&app.store, &app.profile.nickname);
                return InputResult::Continue;
            }
            quit_key(key.code)
        }
        Tab::UserInfo => handle_profile_key(app, key.code),
    }
}

fn quit_key(code: KeyCode) -> InputResult {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => InputResult::Quit,
        _ => InputResult::Continue,
    }
}

/// Gameplay keys. While a prompt is up only its answers map to input.
pub fn map_gameplay_key(code: KeyCode, prompt: Option<Prompt>) -> Option<GameplayInput> {
    match prompt {
        Some(Prompt::Milestone) => match code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c') => {
                Some(GameplayInput::Continue)
            }
            _ => None,
        },
        Some(Prompt::GameOver { .. }) => match code {
            KeyCode::Char('r') | KeyCode::Enter => Some(GameplayInput::Retry),
            KeyCode::Char('s') => Some(GameplayInput::Stop),
            _ => None,
        },
        None => match code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('p') => {
                Some(GameplayInput::Toggle)
            }
            KeyCode::Left | KeyCode::Char('a') => {
                Some(GameplayInput::Drag(Gesture::horizontal(-DRAG_STEP)))
            }
            KeyCode::Right | KeyCode::Char('d') => {
                Some(GameplayInput::Drag(Gesture::horizontal(DRAG_STEP)))
            }
            KeyCode::Up | KeyCode::Char('w') => {
                Some(GameplayInput::Drag(Gesture::swipe_up(SWIPE_STEP)))
            }
            _ => None,
        },
    }
}

fn handle_settings_key(app: &mut App, code: KeyCode) -> InputResult {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.settings.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.settings.move_down(),
        KeyCode::Enter => {
            let action = app.settings.confirm();
            app.apply_settings_action(action);
        }
        KeyCode::Char('m') if !app.settings.is_picker_open() => {
            app.apply_settings_action(crate::ui::settings_scene::SettingsAction::ToggleMusic)
        }
        KeyCode::Esc => match app.settings.cancel() {
            Some(action) => app.apply_settings_action(action),
            None => return InputResult::Quit,
        },
        KeyCode::Char('q') if !app.settings.is_picker_open() => return InputResult::Quit,
        _ => {}
    }
    InputResult::Continue
}

fn handle_profile_key(app: &mut App, code: KeyCode) -> InputResult {
    match code {
        KeyCode::Esc => return InputResult::Quit,
        KeyCode::Up | KeyCode::Down => app.profile_editor.toggle_field(),
        KeyCode::Enter => app.save_profile(),
        KeyCode::Backspace => app.profile_editor.handle_backspace(),
        KeyCode::Char(c) => app.profile_editor.handle_char_input(c),
        _ => {}
    }
    InputResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_toggles_when_no_prompt() {
        assert_eq!(
            map_gameplay_key(KeyCode::Char(' '), None),
            Some(GameplayInput::Toggle)
        );
    }

    #[test]
    fn test_arrows_become_drags() {
        match map_gameplay_key(KeyCode::Left, None) {
            Some(GameplayInput::Drag(g)) => assert!(g.dx < -20.0),
            other => panic!("unexpected {:?}", other),
        }
        match map_gameplay_key(KeyCode::Up, None) {
            Some(GameplayInput::Drag(g)) => assert!(g.dy < -20.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_prompts_only_take_their_answers() {
        let over = Some(Prompt::GameOver { final_stars: 3 });
        assert_eq!(map_gameplay_key(KeyCode::Left, over), None);
        assert_eq!(
            map_gameplay_key(KeyCode::Char('s'), over),
            Some(GameplayInput::Stop)
        );
        assert_eq!(
            map_gameplay_key(KeyCode::Char('r'), over),
            Some(GameplayInput::Retry)
        );

        let milestone = Some(Prompt::Milestone);
        assert_eq!(map_gameplay_key(KeyCode::Char('r'), milestone), None);
        assert_eq!(
            map_gameplay_key(KeyCode::Enter, milestone),
            Some(GameplayInput::Continue)
        );
    }
}
