//! Math Catcher - catch the falling answer to the equation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (equations, kinematics, session state)
//! - `audio`: Sound cue routing for simulation events
//! - `highscores`: Per-difficulty leaderboard
//! - `settings`: Playfield resolution and volume preferences
//! - `persistence`: JSON save/load for settings and scores
//! - `platform`: Storage paths and wall-clock time

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Resolution, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, timers are counted in ticks)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second of countdown timer
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield dimensions
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Distance from the bottom of the playfield to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
    pub const PLAYER_ACCELERATION: f32 = 1.5;
    pub const PLAYER_MAX_SPEED: f32 = 8.0;
    /// Velocity multiplier applied when no direction is held
    pub const PLAYER_FRICTION: f32 = 0.85;

    /// Side length of a falling number's bounding square
    pub const NUMBER_SIZE: f32 = 45.0;
    /// Extra fall speed per level
    pub const SPEED_PER_LEVEL: f32 = 0.5;
    /// Spawn interval reduction per level (ticks)
    pub const SPAWN_RATE_PER_LEVEL: u32 = 2;
    /// Fastest allowed spawn interval (ticks)
    pub const MIN_SPAWN_RATE: u32 = 10;
    /// Chance a spawned number carries the correct answer
    pub const ANSWER_SPAWN_CHANCE: f64 = 0.4;
    /// Largest decoy value
    pub const MAX_DECOY_VALUE: i32 = 50;

    /// Wrong catches allowed before the run ends
    pub const MAX_WRONG_ANSWERS: u32 = 3;
    /// Points per correct catch, multiplied by level
    pub const POINTS_PER_CATCH: u32 = 10;
    /// Score needed per level
    pub const POINTS_PER_LEVEL: u32 = 50;
    /// Remaining seconds at which the warning cue fires
    pub const TIMER_WARNING_SECONDS: u32 = 10;
}
