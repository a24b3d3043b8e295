// Collision polling
pub const TICK_INTERVAL_MS: u64 = 50;
/// Largest frame delta fed to the simulation; longer stalls are clamped.
pub const MAX_FRAME_DELTA_MS: u64 = 100;

// Sprite geometry (world pixels)
pub const SPRITE_SIZE: f64 = 50.0;
/// Bottom offset of the player and of every hazard/reward while on the ground.
pub const GROUND_LEVEL: f64 = 130.0;
/// Height of the ground strip drawn under the sprites.
pub const GROUND_HEIGHT: f64 = 120.0;
pub const DEFAULT_WORLD_WIDTH: f64 = 400.0;

// Player jump
pub const JUMP_HEIGHT: f64 = 150.0;
pub const JUMP_RISE_MS: u64 = 1500;
pub const JUMP_FALL_MS: u64 = 300;

// Drag gestures
pub const GESTURE_THRESHOLD: f64 = 20.0;

// Hazard "shark" (black): left to right
pub const SHARK_DURATION_MS: u64 = 7000;

// Hazard "urchin" (pink): right to left after a delay
pub const URCHIN_DELAY_MS: u64 = 3000;
pub const URCHIN_DURATION_MS: u64 = 6000;

// Reward "jelly" (yellow): right to left after a delay
pub const JELLY_DELAY_MS: u64 = 5000;
pub const JELLY_DURATION_MS: u64 = 6000;

// Match rules
pub const MAX_LIVES: u32 = 5;
pub const MILESTONE_STARS: u32 = 10;

// Cosmetic ground scroll
pub const GROUND_SCROLL_PX_PER_MS: f64 = 0.05;
