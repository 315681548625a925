//! Audio cue routing
//!
//! The simulation never plays sound. The shell drains `GameEvent`s after each
//! tick and hands them to an `AudioManager`, which maps them to cues and
//! forwards them to whatever `AudioSink` the host provides. Playback is
//! fire-and-forget: sink failures are logged and dropped.

use crate::settings::Settings;
use crate::sim::{GameEvent, GameOverReason};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A number touched the player
    Catch,
    /// Caught the answer
    Correct,
    /// Caught a wrong number
    Wrong,
    LevelUp,
    /// Moved up a difficulty tier
    TierUp,
    /// Ten seconds left
    TimerWarning,
    /// Run ended on time or lives
    GameOver,
    /// Hard tier cleared
    Victory,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Catch => "catch",
            SoundEffect::Correct => "correct",
            SoundEffect::Wrong => "wrong",
            SoundEffect::LevelUp => "level_up",
            SoundEffect::TierUp => "tier_up",
            SoundEffect::TimerWarning => "timer_warning",
            SoundEffect::GameOver => "game_over",
            SoundEffect::Victory => "victory",
        }
    }
}

/// Cue for a simulation event, if it has one
pub fn sound_for_event(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Caught { .. } => Some(SoundEffect::Catch),
        GameEvent::CorrectAnswer { .. } => Some(SoundEffect::Correct),
        GameEvent::WrongAnswer { .. } => Some(SoundEffect::Wrong),
        GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
        GameEvent::TierAdvanced { .. } => Some(SoundEffect::TierUp),
        GameEvent::TimerWarning => Some(SoundEffect::TimerWarning),
        GameEvent::GameOver {
            reason: GameOverReason::Completed,
        } => Some(SoundEffect::Victory),
        GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        GameEvent::Missed { .. } => None,
    }
}

/// Playback failure reported by a sink
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("audio playback failed: {0}")]
pub struct AudioError(pub String);

/// Host audio backend
pub trait AudioSink {
    /// Start playing a cue at the given volume (0.0 - 1.0) without blocking
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Logs cues instead of playing them (headless builds)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("♪ {} (volume {:.2})", effect.as_str(), volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Pick up volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play(effect, vol) {
            log::warn!("Dropped {} cue: {}", effect.as_str(), e);
        }
    }

    /// Play the cues for a batch of simulation events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(sound_for_event) {
            self.play(effect);
        }
    }
}
