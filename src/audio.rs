//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sound::{SoundEffect, SoundSink};

/// Web Audio playback for the simulation's sound events
pub struct WebAudioSink {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for WebAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioSink {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Key matched - short high tick
    fn play_key_typed(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.05).ok();
    }

    /// Word destroyed - falling zap plus bass thump
    fn play_word_exploded(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Word got through - harsh low buzz
    fn play_damage(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }

    /// Tier advanced - rising fanfare
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.5).ok();
            }
        }
    }

    /// Session over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

impl SoundSink for WebAudioSink {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture;
        // the first keystroke revives it
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = self.volume;
        match effect {
            SoundEffect::KeyTyped => self.play_key_typed(ctx, vol),
            SoundEffect::WordExploded => self.play_word_exploded(ctx, vol),
            SoundEffect::Damage => self.play_damage(ctx, vol),
            SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }
}
