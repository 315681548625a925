//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod equation;
pub mod state;
pub mod tick;
pub mod tier;

pub use collision::Aabb;
pub use equation::{Equation, Operation, generate};
pub use state::{
    FallingNumber, GameEvent, GameOverReason, GamePhase, GameSession, Playfield, Player,
};
pub use tick::{TickInput, tick};
pub use tier::DifficultyTier;
