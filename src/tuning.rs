//! Data-driven difficulty balance.
//!
//! The session walks `TIERS` front to back, advancing one entry every
//! [`crate::consts::LEVEL_UP_INTERVAL_MS`] and holding at the last one.
//! Words already in flight keep the speed they spawned with.

use crate::words::WordDifficulty;

/// One difficulty step: how fast words appear, how fast they move,
/// and which catalog pool they come from
#[derive(Debug, Clone, Copy)]
pub struct DifficultyTier {
    /// Time between spawns (ms)
    pub spawn_interval_ms: f32,
    /// Multiplier on [`crate::consts::BASE_WORD_SPEED`]
    pub speed_multiplier: f32,
    /// Catalog pool spawns draw from
    pub pool: WordDifficulty,
}

/// Tier ladder, one entry per difficulty level starting at level 1.
/// Spawn intervals are not monotone: tiers 4 and 5 trade raw cadence
/// for longer words at higher speed.
pub const TIERS: &[DifficultyTier] = &[
    DifficultyTier {
        spawn_interval_ms: 1500.0,
        speed_multiplier: 1.0,
        pool: WordDifficulty::Easy,
    },
    DifficultyTier {
        spawn_interval_ms: 1300.0,
        speed_multiplier: 1.2,
        pool: WordDifficulty::Medium,
    },
    DifficultyTier {
        spawn_interval_ms: 1100.0,
        speed_multiplier: 1.4,
        pool: WordDifficulty::Medium,
    },
    DifficultyTier {
        spawn_interval_ms: 1400.0,
        speed_multiplier: 1.6,
        pool: WordDifficulty::Hard,
    },
    DifficultyTier {
        spawn_interval_ms: 1200.0,
        speed_multiplier: 1.8,
        pool: WordDifficulty::Hard,
    },
    DifficultyTier {
        spawn_interval_ms: 1000.0,
        speed_multiplier: 2.0,
        pool: WordDifficulty::Expert,
    },
];
