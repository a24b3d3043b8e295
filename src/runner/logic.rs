//! Jelly Run game logic: input, timeline stepping, collision polling.

use super::motion::Hazard;
use super::player::Gesture;
use super::types::*;
use crate::core::constants::*;
use rand::Rng;

/// UI-agnostic input actions for the gameplay screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameplayInput {
    /// Start / Pause / Resume button.
    Toggle,
    Drag(Gesture),
    /// Dismiss the milestone prompt.
    Continue,
    /// Game-over prompt: play again.
    Retry,
    /// Game-over prompt: back to idle.
    Stop,
}

/// Things that happened, for sound, logging and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Jumped,
    HazardHit { hazard: Hazard, lives_left: u32 },
    RewardCollected { stars: u32 },
    HazardStomped { hazard: Hazard, stars: u32 },
    MilestoneReached { stars: u32 },
    GameOver { final_stars: u32 },
    Retried,
    Stopped,
}

/// How the player touches an entity on a given poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    None,
    /// Overlapping at ground level.
    Ground,
    /// Overlapping while airborne near the jump apex.
    Stomp,
}

/// Classify the player against an entity at `entity_x`.
///
/// The two bands are disjoint: ground is `offset < S`, stomp is
/// `S < offset < 2S`. The stomp band is checked first.
pub fn classify_contact(player_x: f64, jump_offset: f64, entity_x: f64) -> ContactKind {
    if (player_x - entity_x).abs() >= SPRITE_SIZE {
        return ContactKind::None;
    }
    if jump_offset > SPRITE_SIZE && jump_offset < 2.0 * SPRITE_SIZE {
        ContactKind::Stomp
    } else if jump_offset.abs() < SPRITE_SIZE {
        ContactKind::Ground
    } else {
        ContactKind::None
    }
}

/// Process player input. Returns the resulting event, if any.
pub fn process_input(game: &mut JellyRunGame, input: GameplayInput) -> Option<GameEvent> {
    // A pending prompt only accepts its own answers
    if let Some(prompt) = game.prompt {
        return match (prompt, input) {
            (Prompt::Milestone, GameplayInput::Continue) => {
                game.prompt = None;
                game.paused = false;
                Some(GameEvent::Resumed)
            }
            (Prompt::GameOver { .. }, GameplayInput::Retry) => {
                acknowledge_game_over(game);
                start_game(game);
                Some(GameEvent::Retried)
            }
            (Prompt::GameOver { .. }, GameplayInput::Stop) => {
                acknowledge_game_over(game);
                Some(GameEvent::Stopped)
            }
            _ => None,
        };
    }

    match input {
        GameplayInput::Toggle => {
            if !game.started {
                start_game(game);
                Some(GameEvent::Started)
            } else if game.paused {
                game.paused = false;
                Some(GameEvent::Resumed)
            } else {
                game.paused = true;
                Some(GameEvent::Paused)
            }
        }
        GameplayInput::Drag(gesture) => {
            if !game.is_running() {
                return None;
            }
            if game.player.apply_gesture(gesture) {
                Some(GameEvent::Jumped)
            } else {
                None
            }
        }
        GameplayInput::Continue | GameplayInput::Retry | GameplayInput::Stop => None,
    }
}

/// Begin a run from the starting positions.
pub fn start_game(game: &mut JellyRunGame) {
    game.started = true;
    game.paused = false;
    game.reset_positions();
}

/// Clear the game-over prompt and the frozen score.
fn acknowledge_game_over(game: &mut JellyRunGame) {
    game.prompt = None;
    game.stars = 0;
    game.milestone_reached = false;
}

/// Pause a running match, e.g. when its screen loses focus.
/// Returns true if the match was running.
pub fn pause_if_running(game: &mut JellyRunGame) -> bool {
    if game.is_running() {
        game.paused = true;
        true
    } else {
        false
    }
}

/// Advance the match by `dt_ms` of wall-clock time. Called from the main
/// loop every frame.
///
/// Timelines advance continuously; a collision poll runs each time
/// another `TICK_INTERVAL_MS` has elapsed. Does nothing unless running.
pub fn tick_gameplay<R: Rng>(game: &mut JellyRunGame, dt_ms: u64, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !game.is_running() {
        return events;
    }

    // Clamp to avoid teleporting entities after a stall
    let mut remaining = dt_ms.min(MAX_FRAME_DELTA_MS);

    while remaining > 0 {
        let until_poll = TICK_INTERVAL_MS.saturating_sub(game.accumulated_time_ms).max(1);
        let step = remaining.min(until_poll);
        advance_animations(game, step, rng);
        game.accumulated_time_ms += step;
        remaining -= step;

        if game.accumulated_time_ms >= TICK_INTERVAL_MS {
            game.accumulated_time_ms = 0;
            events.extend(poll_collisions(game, rng));
            if !game.is_running() {
                break;
            }
        }
    }

    events
}

fn advance_animations<R: Rng>(game: &mut JellyRunGame, dt_ms: u64, rng: &mut R) {
    game.motion.advance(dt_ms, rng);
    game.player.advance(dt_ms);
    game.ground_scroll += dt_ms as f64 * GROUND_SCROLL_PX_PER_MS;
}

/// One collision poll. Reads every position fresh from `game`.
pub fn poll_collisions<R: Rng>(game: &mut JellyRunGame, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !game.is_running() {
        return events;
    }
    game.tick_count += 1;

    let player_x = game.player.horizontal;
    let jump_offset = game.player.jump_offset();

    // Hazards: ground contact costs a life once per episode, a stomp
    // destroys the hazard for a star once per horizontal overlap.
    for hazard in Hazard::ALL {
        let hazard_x = game.motion.hazard_x(hazard);
        if (player_x - hazard_x).abs() >= SPRITE_SIZE {
            game.guards.clear_stomp(hazard);
        }
        match classify_contact(player_x, jump_offset, hazard_x) {
            ContactKind::Ground => {
                if game.guards.latch(hazard) {
                    game.lives = game.lives.saturating_sub(1);
                    log::debug!("{} hit, {} lives left", hazard.name(), game.lives);
                    events.push(GameEvent::HazardHit {
                        hazard,
                        lives_left: game.lives,
                    });
                    if game.lives == 0 {
                        events.push(enter_game_over(game));
                        return events;
                    }
                }
            }
            ContactKind::Stomp => {
                game.guards.clear(hazard);
                if !game.guards.latch_stomp(hazard) {
                    continue;
                }
                game.stars += 1;
                game.motion.recycle_hazard(hazard, rng);
                log::debug!("{} stomped, {} stars", hazard.name(), game.stars);
                events.push(GameEvent::HazardStomped {
                    hazard,
                    stars: game.stars,
                });
            }
            ContactKind::None => game.guards.clear(hazard),
        }
    }

    // Reward: no guard, recycling moves it away immediately
    if classify_contact(player_x, jump_offset, game.motion.reward_x()) == ContactKind::Ground {
        game.stars += 1;
        game.motion.recycle_reward(rng);
        log::debug!("jelly collected, {} stars", game.stars);
        events.push(GameEvent::RewardCollected { stars: game.stars });
    }

    if !game.milestone_reached && game.stars >= MILESTONE_STARS {
        game.milestone_reached = true;
        game.paused = true;
        game.prompt = Some(Prompt::Milestone);
        events.push(GameEvent::MilestoneReached { stars: game.stars });
    }

    events
}

/// Freeze the run, reset positions and lives, and ask Retry / Stop.
fn enter_game_over(game: &mut JellyRunGame) -> GameEvent {
    let final_stars = game.stars;
    game.started = false;
    game.paused = false;
    game.lives = MAX_LIVES;
    game.reset_positions();
    game.prompt = Some(Prompt::GameOver { final_stars });
    GameEvent::GameOver { final_stars }
}
