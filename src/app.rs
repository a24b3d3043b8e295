//! Application state shared by the four tabs.

use crate::ui::profile_scene::ProfileScreen;
use crate::ui::settings_scene::{SettingsAction, SettingsScreen};
use jellyrun::audio::{AudioManager, Cue, TerminalBell};
use jellyrun::cosmetics::{apply_pick, CosmeticSelections, NoCamera};
use jellyrun::leaderboard::{save_last_score, Leaderboard};
use jellyrun::profile::UserProfile;
use jellyrun::runner::{pause_if_running, process_input, tick_gameplay};
use jellyrun::{GameConfig, GameEvent, GameplayInput, JellyRunGame, KeyValueStore};
use rand::Rng;

/// Tabs in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Settings,
    PlayGame,
    Leaderboard,
    UserInfo,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Settings, Tab::PlayGame, Tab::Leaderboard, Tab::UserInfo];

    pub fn title(self) -> &'static str {
        match self {
            Self::Settings => "Settings",
            Self::PlayGame => "Play Game",
            Self::Leaderboard => "Leaderboard",
            Self::UserInfo => "User Info",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct App {
    pub tab: Tab,
    pub config: GameConfig,
    pub store: KeyValueStore,
    pub profile: UserProfile,
    pub game: JellyRunGame,
    pub leaderboard: Leaderboard,
    pub selections: CosmeticSelections,
    pub settings: SettingsScreen,
    pub profile_editor: ProfileScreen,
    /// Gameplay sound effects. Acquired when the Play Game tab gains
    /// focus and dropped (released) when it loses focus.
    sfx: Option<AudioManager<TerminalBell>>,
    /// Background track, held for the whole session.
    music: AudioManager<TerminalBell>,
    camera: NoCamera,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, store: KeyValueStore) -> Self {
        let profile = UserProfile::load(&store);
        let selections = CosmeticSelections::load(&store);

        let mut music = AudioManager::acquire(TerminalBell, &[Cue::Background]);
        music.set_music_muted(config.music_muted);
        music.start_music();

        let mut leaderboard = Leaderboard::new();
        leaderboard.refresh(&store, &profile.nickname);

        Self {
            tab: Tab::Settings,
            game: JellyRunGame::new(config.world_width),
            profile_editor: ProfileScreen::new(&profile),
            settings: SettingsScreen::new(),
            config,
            store,
            profile,
            leaderboard,
            selections,
            sfx: None,
            music,
            camera: NoCamera,
            should_quit: false,
        }
    }

    fn acquire_sfx(&self) -> AudioManager<TerminalBell> {
        let mut sfx = AudioManager::acquire(TerminalBell, &[Cue::Success, Cue::Failure]);
        sfx.set_effects_enabled(self.config.sound_effects);
        sfx
    }

    pub fn music_muted(&self) -> bool {
        self.music.is_music_muted()
    }

    /// Switch tabs. Leaving the game pauses it and releases its sounds;
    /// the leaderboard and the profile editor reload whenever they gain
    /// focus.
    pub fn switch_tab(&mut self, to: Tab) {
        if to == self.tab {
            return;
        }
        if self.tab == Tab::PlayGame {
            if pause_if_running(&mut self.game) {
                log::info!("paused on leaving the game tab");
            }
            self.sfx = None;
        }
        match to {
            Tab::Leaderboard => self
                .leaderboard
                .refresh(&self.store, &self.profile.nickname),
            Tab::UserInfo => self.profile_editor = ProfileScreen::new(&self.profile),
            Tab::Settings => self.settings.close_picker(),
            Tab::PlayGame => self.sfx = Some(self.acquire_sfx()),
        }
        self.tab = to;
    }

    pub fn gameplay_input(&mut self, input: GameplayInput) {
        if let Some(event) = process_input(&mut self.game, input) {
            self.handle_game_event(event);
        }
    }

    /// Advance the game by one frame of wall-clock time.
    pub fn tick<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) {
        for event in tick_gameplay(&mut self.game, dt_ms, rng) {
            self.handle_game_event(event);
        }
    }

    fn handle_game_event(&mut self, event: GameEvent) {
        if let Some(sfx) = &mut self.sfx {
            sfx.on_game_event(&event);
        }
        match event {
            GameEvent::Started | GameEvent::Retried => log::info!("run started"),
            GameEvent::Paused => log::info!("paused at {} jellies", self.game.stars),
            GameEvent::Resumed => log::info!("resumed"),
            GameEvent::Stopped => log::info!("stopped after game over"),
            GameEvent::MilestoneReached { stars } => {
                log::info!("milestone reached: {} jellies", stars)
            }
            GameEvent::GameOver { final_stars } => {
                log::info!("game over with {} jellies", final_stars);
                if let Err(e) = save_last_score(&self.store, final_stars) {
                    log::warn!("failed to save the score: {}", e);
                }
            }
            GameEvent::Jumped
            | GameEvent::HazardHit { .. }
            | GameEvent::RewardCollected { .. }
            | GameEvent::HazardStomped { .. } => {}
        }
    }

    pub fn apply_settings_action(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::None => {}
            SettingsAction::ToggleMusic => {
                let muted = !self.music.is_music_muted();
                self.music.set_music_muted(muted);
                self.config.music_muted = muted;
                if let Err(e) = self.config.save() {
                    log::warn!("failed to save config: {}", e);
                }
            }
            SettingsAction::OpenLibrary(slot) => {
                let dir = self.config.image_library.clone().unwrap_or_default();
                self.settings.open_library(slot, &dir);
            }
            SettingsAction::TakePhoto(slot) => {
                let outcome = jellyrun::cosmetics::capture_photo(&mut self.camera);
                self.settings.report(slot, &outcome);
                apply_pick(&mut self.selections, &self.store, slot, outcome);
            }
            SettingsAction::Picked(slot, outcome) => {
                self.settings.report(slot, &outcome);
                apply_pick(&mut self.selections, &self.store, slot, outcome);
            }
        }
    }

    /// Save the profile editor's fields if they validate.
    pub fn save_profile(&mut self) {
        let Some(profile) = self.profile_editor.submit() else {
            return;
        };
        if let Err(e) = profile.save(&self.store) {
            log::warn!("failed to save profile: {}", e);
            self.profile_editor.validation_error = Some(format!("Save failed: {}", e));
            return;
        }
        log::info!("profile saved for '{}'", profile.nickname);
        self.profile = profile;
    }
}
