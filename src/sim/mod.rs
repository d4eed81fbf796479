//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as host timestamps; nothing here reads a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod engine;
pub mod input;
pub mod state;

pub use engine::{Engine, FrameStatus};
pub use state::{GameState, Particle, ParticleColor, WordEntity, WordId};
