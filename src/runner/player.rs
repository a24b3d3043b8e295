//! The player's fish: dragged horizontally, jumps on an upward swipe.

use crate::core::constants::*;

/// A drag gesture delta in world pixels. Negative `dy` is upward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gesture {
    pub dx: f64,
    pub dy: f64,
}

impl Gesture {
    pub fn horizontal(dx: f64) -> Self {
        Self { dx, dy: 0.0 }
    }

    pub fn swipe_up(dy: f64) -> Self {
        Self { dx: 0.0, dy: -dy.abs() }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Left edge of the sprite in world pixels.
    pub horizontal: f64,
    /// Elapsed time of the running jump, `None` when grounded.
    jump_elapsed_ms: Option<u64>,
    world_width: f64,
}

impl PlayerController {
    pub fn new(world_width: f64) -> Self {
        Self {
            horizontal: Self::start_x(world_width),
            jump_elapsed_ms: None,
            world_width,
        }
    }

    /// Centered start position.
    pub fn start_x(world_width: f64) -> f64 {
        ((world_width - SPRITE_SIZE) / 2.0).max(0.0)
    }

    pub fn max_horizontal(&self) -> f64 {
        (self.world_width - SPRITE_SIZE).max(0.0)
    }

    /// Move by `dx`, clamped to the play field. Returns the new position.
    pub fn drag(&mut self, dx: f64) -> f64 {
        self.horizontal = (self.horizontal + dx).clamp(0.0, self.max_horizontal());
        self.horizontal
    }

    /// Apply a gesture: an upward swipe past the threshold jumps, a
    /// sideways one past the threshold drags. Both can happen at once.
    /// Returns true if a new jump started.
    pub fn apply_gesture(&mut self, gesture: Gesture) -> bool {
        let jumped = gesture.dy < -GESTURE_THRESHOLD && self.try_jump();
        if gesture.dx.abs() > GESTURE_THRESHOLD {
            self.drag(gesture.dx);
        }
        jumped
    }

    /// Start a jump unless one is already running.
    pub fn try_jump(&mut self) -> bool {
        if self.is_jumping() {
            return false;
        }
        self.jump_elapsed_ms = Some(0);
        true
    }

    pub fn is_jumping(&self) -> bool {
        self.jump_elapsed_ms.is_some()
    }

    /// Height above ground level.
    pub fn jump_offset(&self) -> f64 {
        match self.jump_elapsed_ms {
            None => 0.0,
            Some(t) if t < JUMP_RISE_MS => JUMP_HEIGHT * t as f64 / JUMP_RISE_MS as f64,
            Some(t) => {
                let fall = (t - JUMP_RISE_MS) as f64 / JUMP_FALL_MS as f64;
                (JUMP_HEIGHT * (1.0 - fall)).max(0.0)
            }
        }
    }

    /// Bottom offset of the sprite.
    pub fn vertical(&self) -> f64 {
        GROUND_LEVEL + self.jump_offset()
    }

    /// Advance the jump timeline; lands when it runs out.
    pub fn advance(&mut self, dt_ms: u64) {
        if let Some(elapsed) = self.jump_elapsed_ms {
            let elapsed = elapsed + dt_ms;
            self.jump_elapsed_ms = if elapsed >= JUMP_RISE_MS + JUMP_FALL_MS {
                None
            } else {
                Some(elapsed)
            };
        }
    }

    /// Back to the centered, grounded start.
    pub fn reset(&mut self) {
        self.horizontal = Self::start_x(self.world_width);
        self.jump_elapsed_ms = None;
    }
}
