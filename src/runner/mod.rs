//! Jelly Run: the endless-runner gameplay core.

pub mod logic;
pub mod motion;
pub mod player;
pub mod timeline;
pub mod types;

pub use logic::{
    classify_contact, pause_if_running, poll_collisions, process_input, tick_gameplay,
    ContactKind, GameEvent, GameplayInput,
};
pub use motion::{Hazard, MotionController};
pub use player::{Gesture, PlayerController};
pub use timeline::{MotionPath, RestartPolicy, Timeline};
pub use types::{CollisionGuards, JellyRunGame, MatchPhase, Prompt};
