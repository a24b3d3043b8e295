//! Jelly Run - terminal endless runner library.
//!
//! Exposes the game logic, persistence and audio plumbing for the binary
//! and for tests.

pub mod audio;
pub mod build_info;
pub mod core;
pub mod cosmetics;
pub mod leaderboard;
pub mod profile;
pub mod runner;
pub mod utils;

pub use crate::core::config::GameConfig;
pub use crate::core::constants::*;
pub use crate::runner::{GameEvent, GameplayInput, JellyRunGame, MatchPhase, Prompt};
pub use crate::utils::persistence::KeyValueStore;
