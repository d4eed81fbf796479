//! Sound events emitted by the simulation.
//!
//! The engine is handed a [`SoundSink`] at construction and fires events
//! into it as gameplay happens. Playback is entirely the sink's problem;
//! the simulation never observes a sink failure.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Keystroke matched a word character
    KeyTyped,
    /// Word fully typed and destroyed
    WordExploded,
    /// Word reached the player
    Damage,
    /// Difficulty tier advanced
    LevelUp,
    /// Session ended
    GameOver,
}

/// Fire-and-forget playback capability
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that discards every event, for headless runs and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _effect: SoundEffect) {}
}
