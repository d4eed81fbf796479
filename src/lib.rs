//! Word Storm - a neon typing-defense arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, typing, scoring)
//! - `words`: Static word catalog grouped by difficulty
//! - `tuning`: Data-driven difficulty tiers
//! - `sound`: Sound-event capability injected into the simulation
//! - `leaderboard`: Top-score store with browser persistence
//! - `audio`: Web Audio implementation of the sound capability (wasm)
//! - `render`: Canvas-2D scene painting (wasm)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod leaderboard;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod sim;
pub mod sound;
pub mod tuning;
pub mod words;

pub use leaderboard::Leaderboard;
pub use sim::{Engine, FrameStatus};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical canvas dimensions; everything else scales from these
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Word drift speed before tier multipliers (logical units/s)
    pub const BASE_WORD_SPEED: f32 = 50.0;
    /// A word inside this distance of the player has arrived
    pub const HIT_RADIUS: f32 = 30.0;
    /// Spawn offset past the canvas edge so words enter from off-screen
    pub const SPAWN_PADDING: f32 = 100.0;

    /// Player health at session start
    pub const INITIAL_HEALTH: u32 = 100;
    /// Health lost per word that reaches the player
    pub const DAMAGE_PER_HIT: u32 = 10;

    /// Flat score for finishing a word
    pub const SCORE_PER_WORD: u32 = 100;
    /// Per-character bonus on top of the flat score
    pub const SCORE_PER_CHAR: u32 = 10;

    /// Time between difficulty tier advances
    pub const LEVEL_UP_INTERVAL_MS: f32 = 30_000.0;

    /// Explosion burst size
    pub const PARTICLES_PER_BURST: usize = 20;
    pub const PARTICLE_LIFETIME_MS: f32 = 500.0;
    /// Per-tick velocity damping on particles
    pub const PARTICLE_FRICTION: f32 = 0.95;

    /// Cosmetic timer durations (ms)
    pub const WRONG_KEY_FLASH_MS: f32 = 200.0;
    pub const LEVEL_UP_FLASH_MS: f32 = 2000.0;
    pub const SHAKE_DURATION_MS: f32 = 300.0;
    /// Screen shake starts at this intensity and damps each tick
    pub const SHAKE_MAX_INTENSITY: f32 = 10.0;
    pub const SHAKE_DECAY: f32 = 0.95;
}

/// Largest width x height with the logical aspect ratio that fits the
/// container, for letterboxed canvas sizing
#[inline]
pub fn aspect_fit(container_w: f32, container_h: f32) -> Vec2 {
    let target = consts::CANVAS_WIDTH / consts::CANVAS_HEIGHT;
    if container_h <= 0.0 || container_w / container_h > target {
        Vec2::new(container_h * target, container_h)
    } else {
        Vec2::new(container_w, container_w / target)
    }
}
