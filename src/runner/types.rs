//! Jelly Run match state.
//!
//! An endless runner: the player's fish dodges two hazards scrolling
//! across the sea floor, stomps them from the air for bonus jellies, and
//! collects the jelly reward.

use super::motion::{Hazard, MotionController};
use super::player::PlayerController;
use crate::core::constants::*;

/// A modal the player must answer before the match continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// First time the run reaches the star milestone.
    Milestone,
    /// Out of lives. Stars stay frozen at `final_stars` until answered.
    GameOver { final_stars: u32 },
}

/// Coarse match state derived from the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Per-hazard latches so one overlap episode is only scored once.
///
/// The hit latch is set on the rising edge of ground contact and cleared
/// when that contact ends. The stomp latch is set by a stomp and cleared
/// only once the player and the hazard no longer overlap horizontally, so
/// a hazard recycled next to the player cannot be stomped again mid-jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionGuards {
    latched: [bool; 2],
    stomped: [bool; 2],
}

impl CollisionGuards {
    pub fn is_latched(&self, hazard: Hazard) -> bool {
        self.latched[hazard.index()]
    }

    /// Latch the guard. Returns true on the rising edge.
    pub fn latch(&mut self, hazard: Hazard) -> bool {
        let was = self.latched[hazard.index()];
        self.latched[hazard.index()] = true;
        !was
    }

    pub fn clear(&mut self, hazard: Hazard) {
        self.latched[hazard.index()] = false;
    }

    pub fn is_stomp_latched(&self, hazard: Hazard) -> bool {
        self.stomped[hazard.index()]
    }

    /// Latch the stomp guard. Returns true on the rising edge.
    pub fn latch_stomp(&mut self, hazard: Hazard) -> bool {
        let was = self.stomped[hazard.index()];
        self.stomped[hazard.index()] = true;
        !was
    }

    pub fn clear_stomp(&mut self, hazard: Hazard) {
        self.stomped[hazard.index()] = false;
    }

    pub fn clear_all(&mut self) {
        self.latched = [false; 2];
        self.stomped = [false; 2];
    }
}

/// Authoritative state of one gameplay session. The collision poll reads
/// every position from here at poll time.
#[derive(Debug, Clone)]
pub struct JellyRunGame {
    pub started: bool,
    pub paused: bool,
    /// Jellies collected this run.
    pub stars: u32,
    pub lives: u32,

    pub player: PlayerController,
    pub motion: MotionController,
    pub guards: CollisionGuards,

    pub prompt: Option<Prompt>,
    /// Set once the milestone prompt has been shown this run.
    pub milestone_reached: bool,

    // -- Timing --
    /// Time since the last collision poll (milliseconds).
    pub accumulated_time_ms: u64,
    /// Collision polls run since the game was created.
    pub tick_count: u64,
    /// Cosmetic ground drift in world pixels.
    pub ground_scroll: f64,

    world_width: f64,
}

impl JellyRunGame {
    pub fn new(world_width: f64) -> Self {
        Self {
            started: false,
            paused: false,
            stars: 0,
            lives: MAX_LIVES,

            player: PlayerController::new(world_width),
            motion: MotionController::new(world_width),
            guards: CollisionGuards::default(),

            prompt: None,
            milestone_reached: false,

            accumulated_time_ms: 0,
            tick_count: 0,
            ground_scroll: 0.0,

            world_width,
        }
    }

    pub fn world_width(&self) -> f64 {
        self.world_width
    }

    pub fn phase(&self) -> MatchPhase {
        match (self.prompt, self.started, self.paused) {
            (Some(Prompt::GameOver { .. }), _, _) => MatchPhase::GameOver,
            (_, false, _) => MatchPhase::Idle,
            (_, true, true) => MatchPhase::Paused,
            (_, true, false) => MatchPhase::Running,
        }
    }

    /// Timelines and collision polling only run in this state.
    pub fn is_running(&self) -> bool {
        self.started && !self.paused && self.prompt.is_none()
    }

    /// Label for the start/pause button.
    pub fn toggle_label(&self) -> &'static str {
        match (self.started, self.paused) {
            (false, _) => "Start Game",
            (true, true) => "Resume",
            (true, false) => "Pause",
        }
    }

    /// Every entity back to its starting position, guards cleared.
    pub fn reset_positions(&mut self) {
        self.player.reset();
        self.motion.reset();
        self.guards.clear_all();
        self.accumulated_time_ms = 0;
    }
}
