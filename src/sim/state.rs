//! Core simulation entity types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stable entity identifier; references between systems go through ids,
/// never through indices or borrows
pub type WordId = u32;

/// A word drifting from a canvas edge toward the player
#[derive(Debug, Clone)]
pub struct WordEntity {
    pub id: WordId,
    /// Catalog text; the only attribute key matching looks at
    pub text: &'static str,
    /// Position in logical canvas units
    pub pos: Vec2,
    /// Inward speed before canvas scaling, fixed at spawn time
    pub speed: f32,
    /// How many leading characters have been typed; never decreases
    pub typed_chars: usize,
    /// One-way flag; destroyed words are purged at the end of the
    /// update pass, never revived
    pub is_destroyed: bool,
}

impl WordEntity {
    pub fn new(id: WordId, text: &'static str, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            text,
            pos,
            speed,
            typed_chars: 0,
            is_destroyed: false,
        }
    }

    /// Next character the player must type, if any remain
    pub fn next_char(&self) -> Option<char> {
        self.text.as_bytes().get(self.typed_chars).map(|b| *b as char)
    }

    /// Every character has been typed
    pub fn is_complete(&self) -> bool {
        self.typed_chars >= self.text.len()
    }
}

/// Tint applied to an explosion burst; the renderer maps these to the
/// actual palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Word completed by typing
    NeonGreen,
    /// Word reached the player
    NeonPink,
}

/// A particle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime (ms); purged at zero
    pub life: f32,
    /// Starting lifetime, kept for alpha fade
    pub max_life: f32,
    pub color: ParticleColor,
    pub size: f32,
}

/// Session scoreboard; the engine hands out read-only snapshots of this
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Hit points remaining; floors at zero
    pub health: u32,
    pub score: u32,
    pub words_destroyed: u32,
    /// Seconds of unpaused play
    pub time_survived: f32,
    /// 1-based level shown to the player, locked to the tier index
    pub difficulty_level: u32,
    /// One-way; once set the session is finished for good
    pub is_game_over: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            health: INITIAL_HEALTH,
            score: 0,
            words_destroyed: 0,
            time_survived: 0.0,
            difficulty_level: 1,
            is_game_over: false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
