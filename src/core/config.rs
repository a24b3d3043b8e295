//! User-tunable settings stored in ~/.jellyrun/config.json.

use super::constants::{DEFAULT_WORLD_WIDTH, SPRITE_SIZE};
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

/// Smallest world that still leaves the player room to move.
const MIN_WORLD_WIDTH: f64 = SPRITE_SIZE * 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the play field in world pixels.
    pub world_width: f64,
    pub sound_effects: bool,
    pub music_muted: bool,
    /// Directory the cosmetic picker lists images from.
    pub image_library: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            sound_effects: true,
            music_muted: false,
            image_library: dirs::picture_dir(),
        }
    }
}

impl GameConfig {
    /// Load from ~/.jellyrun/config.json, falling back to defaults.
    pub fn load() -> Self {
        match data_path(CONFIG_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("no data directory, using default config: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let mut config: Self = load_json_or_default(path);
        config.sanitize();
        config
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&data_path(CONFIG_FILE)?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json(path, self)
    }

    /// Replace out-of-range values with something playable.
    fn sanitize(&mut self) {
        if !self.world_width.is_finite() || self.world_width < MIN_WORLD_WIDTH {
            log::warn!(
                "world_width {} is too small, using {}",
                self.world_width,
                MIN_WORLD_WIDTH
            );
            self.world_width = MIN_WORLD_WIDTH;
        }
    }
}
