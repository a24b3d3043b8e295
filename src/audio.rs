//! Sound cues and the audio manager that owns their handles.
//!
//! A manager acquires its cues when created and releases them when
//! dropped, so each screen's sounds live exactly as long as the screen.

use crate::runner::GameEvent;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound asset '{0}' could not be loaded")]
    MissingAsset(&'static str),
    #[error("audio output unavailable: {0}")]
    Output(#[from] io::Error),
}

/// The game's sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Jelly collected.
    Success,
    /// Hazard contact.
    Failure,
    /// Looping background track.
    Background,
}

impl Cue {
    pub fn asset(self) -> &'static str {
        match self {
            Self::Success => "good_sound.m4a",
            Self::Failure => "bad_sound.wav",
            Self::Background => "bg.m4a",
        }
    }

    pub fn is_looping(self) -> bool {
        matches!(self, Self::Background)
    }
}

/// Output device for cues.
pub trait AudioBackend {
    fn load(&mut self, cue: Cue) -> Result<(), AudioError>;
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
    fn pause(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);
    fn release(&mut self, cue: Cue);
}

/// Terminal output: one-shot cues ring the bell, the looping track is
/// tracked but silent.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioBackend for TerminalBell {
    fn load(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        if !cue.is_looping() {
            let mut out = io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }

    fn pause(&mut self, _cue: Cue) {}

    fn stop(&mut self, _cue: Cue) {}

    fn release(&mut self, _cue: Cue) {}
}

/// Owns a set of loaded cues on one backend.
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    loaded: Vec<Cue>,
    effects_enabled: bool,
    music_muted: bool,
    music_playing: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    /// Load `cues`. Cues that fail to load are logged and stay silent.
    pub fn acquire(mut backend: B, cues: &[Cue]) -> Self {
        let mut loaded = Vec::new();
        for &cue in cues {
            match backend.load(cue) {
                Ok(()) => loaded.push(cue),
                Err(e) => log::warn!("failed to load {}: {}", cue.asset(), e),
            }
        }
        Self {
            backend,
            loaded,
            effects_enabled: true,
            music_muted: false,
            music_playing: false,
        }
    }

    pub fn is_loaded(&self, cue: Cue) -> bool {
        self.loaded.contains(&cue)
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn is_music_muted(&self) -> bool {
        self.music_muted
    }

    pub fn set_effects_enabled(&mut self, enabled: bool) {
        self.effects_enabled = enabled;
    }

    /// Fire-and-forget a one-shot cue. No-op when not loaded.
    pub fn play(&mut self, cue: Cue) {
        if cue.is_looping() || !self.effects_enabled || !self.is_loaded(cue) {
            return;
        }
        if let Err(e) = self.backend.play(cue) {
            log::warn!("failed to play {}: {}", cue.asset(), e);
        }
    }

    /// Start the background loop unless muted.
    pub fn start_music(&mut self) {
        if self.music_muted || self.music_playing || !self.is_loaded(Cue::Background) {
            return;
        }
        match self.backend.play(Cue::Background) {
            Ok(()) => self.music_playing = true,
            Err(e) => log::warn!("failed to start {}: {}", Cue::Background.asset(), e),
        }
    }

    /// Mute pauses the loop, unmute resumes it.
    pub fn set_music_muted(&mut self, muted: bool) {
        self.music_muted = muted;
        if muted {
            if self.music_playing {
                self.backend.pause(Cue::Background);
                self.music_playing = false;
            }
        } else {
            self.start_music();
        }
    }

    /// Sounds for gameplay events.
    pub fn on_game_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::HazardHit { .. } => self.play(Cue::Failure),
            GameEvent::RewardCollected { .. } => self.play(Cue::Success),
            _ => {}
        }
    }

    /// Stop and release every handle. Later calls are no-ops.
    pub fn release(&mut self) {
        if self.music_playing {
            self.backend.stop(Cue::Background);
            self.music_playing = false;
        }
        for cue in self.loaded.drain(..) {
            self.backend.release(cue);
        }
    }
}

impl<B: AudioBackend> Drop for AudioManager<B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Hazard;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every backend call; can be told to fail loading a cue.
    #[derive(Default, Clone)]
    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
        broken: Option<Cue>,
    }

    impl Recorder {
        fn log(&self, what: &str, cue: Cue) {
            self.calls
                .borrow_mut()
                .push(format!("{} {}", what, cue.asset()));
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl AudioBackend for Recorder {
        fn load(&mut self, cue: Cue) -> Result<(), AudioError> {
            if self.broken == Some(cue) {
                return Err(AudioError::MissingAsset(cue.asset()));
            }
            self.log("load", cue);
            Ok(())
        }

        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            self.log("play", cue);
            Ok(())
        }

        fn pause(&mut self, cue: Cue) {
            self.log("pause", cue);
        }

        fn stop(&mut self, cue: Cue) {
            self.log("stop", cue);
        }

        fn release(&mut self, cue: Cue) {
            self.log("release", cue);
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::acquire(recorder.clone(), &[Cue::Success, Cue::Failure]);

        audio.on_game_event(&GameEvent::HazardHit {
            hazard: Hazard::Shark,
            lives_left: 4,
        });
        audio.on_game_event(&GameEvent::RewardCollected { stars: 1 });
        audio.on_game_event(&GameEvent::HazardStomped {
            hazard: Hazard::Urchin,
            stars: 2,
        });

        let calls = recorder.calls();
        assert!(calls.contains(&"play bad_sound.wav".to_string()));
        assert!(calls.contains(&"play good_sound.m4a".to_string()));
        assert_eq!(calls.iter().filter(|c| c.starts_with("play")).count(), 2);
    }

    #[test]
    fn test_failed_load_is_silent() {
        let recorder = Recorder {
            broken: Some(Cue::Failure),
            ..Recorder::default()
        };
        let mut audio = AudioManager::acquire(recorder.clone(), &[Cue::Success, Cue::Failure]);
        assert!(!audio.is_loaded(Cue::Failure));

        audio.play(Cue::Failure);
        assert!(!recorder.calls().iter().any(|c| c == "play bad_sound.wav"));
    }

    #[test]
    fn test_disabled_effects_do_not_play() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::acquire(recorder.clone(), &[Cue::Success]);
        audio.set_effects_enabled(false);
        audio.play(Cue::Success);
        assert!(!recorder.calls().iter().any(|c| c.starts_with("play")));
    }

    #[test]
    fn test_music_mute_toggle() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::acquire(recorder.clone(), &[Cue::Background]);

        audio.start_music();
        assert!(audio.is_music_playing());

        audio.set_music_muted(true);
        assert!(!audio.is_music_playing());
        assert!(recorder.calls().contains(&"pause bg.m4a".to_string()));

        audio.set_music_muted(false);
        assert!(audio.is_music_playing());
    }

    #[test]
    fn test_muted_music_does_not_start() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::acquire(recorder.clone(), &[Cue::Background]);
        audio.set_music_muted(true);
        audio.start_music();
        assert!(!audio.is_music_playing());
    }

    #[test]
    fn test_drop_releases_handles_once() {
        let recorder = Recorder::default();
        {
            let mut audio =
                AudioManager::acquire(recorder.clone(), &[Cue::Success, Cue::Background]);
            audio.start_music();
            audio.release();
            audio.play(Cue::Success);
        }
        let calls = recorder.calls();
        assert_eq!(calls.iter().filter(|c| c.starts_with("release")).count(), 2);
        assert_eq!(calls.iter().filter(|c| c.starts_with("stop")).count(), 1);
        assert!(!calls.contains(&"play good_sound.m4a".to_string()));
    }
}
