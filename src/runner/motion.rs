//! The three scrolling entities: two hazards and the jelly reward.

use super::timeline::{MotionPath, RestartPolicy, Timeline};
use crate::core::constants::*;
use rand::Rng;

/// The two hazards. Both cost a life on ground contact and can be
/// stomped from the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hazard {
    /// Dark Shark: crosses left to right.
    Shark,
    /// Urchin: crosses right to left after a delay.
    Urchin,
}

impl Hazard {
    pub const ALL: [Hazard; 2] = [Hazard::Shark, Hazard::Urchin];

    pub fn index(self) -> usize {
        match self {
            Self::Shark => 0,
            Self::Urchin => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Shark => "Dark Shark",
            Self::Urchin => "Urchin",
        }
    }
}

pub fn shark_path(world_width: f64) -> MotionPath {
    MotionPath {
        start: -SPRITE_SIZE,
        end: world_width + SPRITE_SIZE,
        delay_ms: 0,
        duration_ms: SHARK_DURATION_MS,
        restart: RestartPolicy::Fixed,
    }
}

pub fn urchin_path(world_width: f64) -> MotionPath {
    MotionPath {
        start: world_width,
        end: -SPRITE_SIZE,
        delay_ms: URCHIN_DELAY_MS,
        duration_ms: URCHIN_DURATION_MS,
        restart: RestartPolicy::Fixed,
    }
}

/// The jelly's first pass starts two sprites off the right edge; later
/// passes start anywhere in one to two screen widths.
pub fn jelly_path(world_width: f64) -> MotionPath {
    MotionPath {
        start: world_width + SPRITE_SIZE * 2.0,
        end: -SPRITE_SIZE,
        delay_ms: JELLY_DELAY_MS,
        duration_ms: JELLY_DURATION_MS,
        restart: RestartPolicy::Randomized {
            min: world_width,
            max: world_width * 2.0,
        },
    }
}

/// Owns the hazard and reward timelines.
#[derive(Debug, Clone)]
pub struct MotionController {
    world_width: f64,
    hazards: [Timeline; 2],
    jelly: Timeline,
}

impl MotionController {
    pub fn new(world_width: f64) -> Self {
        Self {
            world_width,
            hazards: [
                Timeline::new(shark_path(world_width)),
                Timeline::new(urchin_path(world_width)),
            ],
            jelly: Timeline::new(jelly_path(world_width)),
        }
    }

    pub fn world_width(&self) -> f64 {
        self.world_width
    }

    pub fn hazard(&self, hazard: Hazard) -> &Timeline {
        &self.hazards[hazard.index()]
    }

    pub fn reward(&self) -> &Timeline {
        &self.jelly
    }

    pub fn hazard_x(&self, hazard: Hazard) -> f64 {
        self.hazard(hazard).position()
    }

    pub fn reward_x(&self) -> f64 {
        self.jelly.position()
    }

    /// Advance all three timelines by the same amount of time.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) {
        for timeline in &mut self.hazards {
            timeline.advance(dt_ms, rng);
        }
        self.jelly.advance(dt_ms, rng);
    }

    pub fn recycle_hazard<R: Rng>(&mut self, hazard: Hazard, rng: &mut R) {
        self.hazards[hazard.index()].recycle(rng);
    }

    pub fn recycle_reward<R: Rng>(&mut self, rng: &mut R) {
        self.jelly.recycle(rng);
    }

    /// Put every entity back at its first-pass origin.
    pub fn reset(&mut self) {
        for timeline in &mut self.hazards {
            timeline.reset();
        }
        self.jelly.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const W: f64 = 400.0;

    #[test]
    fn test_initial_positions() {
        let motion = MotionController::new(W);
        assert_eq!(motion.hazard_x(Hazard::Shark), -SPRITE_SIZE);
        assert_eq!(motion.hazard_x(Hazard::Urchin), W);
        assert_eq!(motion.reward_x(), W + SPRITE_SIZE * 2.0);
    }

    #[test]
    fn test_shark_crosses_left_to_right() {
        let mut motion = MotionController::new(W);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        motion.advance(SHARK_DURATION_MS / 2, &mut rng);
        let mid = motion.hazard_x(Hazard::Shark);
        assert!((mid - W / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_urchin_waits_then_moves_left() {
        let mut motion = MotionController::new(W);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        motion.advance(URCHIN_DELAY_MS, &mut rng);
        assert_eq!(motion.hazard_x(Hazard::Urchin), W);

        motion.advance(1000, &mut rng);
        assert!(motion.hazard_x(Hazard::Urchin) < W);
    }

    #[test]
    fn test_shark_loops_to_fixed_offset() {
        let mut motion = MotionController::new(W);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        motion.advance(SHARK_DURATION_MS, &mut rng);
        assert_eq!(motion.hazard_x(Hazard::Shark), -SPRITE_SIZE);
        assert_eq!(motion.hazard(Hazard::Shark).passes, 1);
    }

    #[test]
    fn test_recycled_reward_is_off_screen() {
        let mut motion = MotionController::new(W);
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..20 {
            motion.advance(JELLY_DELAY_MS + 1000, &mut rng);
            motion.recycle_reward(&mut rng);
            let x = motion.reward_x();
            assert!((W..=2.0 * W).contains(&x), "jelly restarted at {}", x);
        }
    }

    #[test]
    fn test_recycle_hazard_only_touches_that_hazard() {
        let mut motion = MotionController::new(W);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        motion.advance(URCHIN_DELAY_MS + 2000, &mut rng);
        let urchin_before = motion.hazard_x(Hazard::Urchin);

        motion.recycle_hazard(Hazard::Shark, &mut rng);

        assert_eq!(motion.hazard_x(Hazard::Shark), -SPRITE_SIZE);
        assert_eq!(motion.hazard_x(Hazard::Urchin), urchin_before);
    }

    #[test]
    fn test_reset_restores_initial_positions() {
        let mut motion = MotionController::new(W);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        motion.advance(12_345, &mut rng);
        motion.reset();

        let fresh = MotionController::new(W);
        for hazard in Hazard::ALL {
            assert_eq!(motion.hazard_x(hazard), fresh.hazard_x(hazard));
        }
        assert_eq!(motion.reward_x(), fresh.reward_x());
    }
}
