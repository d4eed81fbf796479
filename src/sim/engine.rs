//! Session engine: clock, spawner, motion, difficulty, particles.
//!
//! The host drives [`Engine::frame`] with wall-clock timestamps (one call
//! per animation frame) and feeds keystrokes through
//! [`Engine::handle_key`]. Everything else happens in here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GameState, Particle, ParticleColor, WordEntity, WordId};
use crate::consts::*;
use crate::sound::{SoundEffect, SoundSink};
use crate::tuning::TIERS;
use crate::words;

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Keep scheduling frames
    Running,
    /// The session just ended; reported exactly once
    GameOver,
    /// Engine is not running, stop scheduling
    Stopped,
}

/// One game session. A finished session stays finished; build a new
/// engine for a new run.
pub struct Engine {
    pub(crate) words: Vec<WordEntity>,
    pub(crate) particles: Vec<Particle>,
    pub(crate) state: GameState,
    /// Index into [`TIERS`]; only ever increases, saturating at the end
    pub(crate) tier_index: usize,
    /// Lock on the word keystrokes currently go to
    pub(crate) active_word: Option<WordId>,
    pub(crate) running: bool,
    pub(crate) paused: bool,
    spawn_timer: f32,
    difficulty_timer: f32,
    /// Timestamp of the previous frame (ms)
    last_time: f64,
    game_over_reported: bool,
    /// Fitted canvas size and the scale relative to the logical size
    width: f32,
    height: f32,
    scale_factor: f32,
    /// Cosmetic countdowns (ms remaining)
    pub(crate) wrong_key_flash: f32,
    level_up_flash: f32,
    shake_timer: f32,
    shake_intensity: f32,
    pub(crate) rng: Pcg32,
    pub(crate) sounds: Box<dyn SoundSink>,
    next_id: WordId,
}

impl Engine {
    pub fn new(seed: u64, sounds: Box<dyn SoundSink>) -> Self {
        Self {
            words: Vec::new(),
            particles: Vec::new(),
            state: GameState::new(),
            tier_index: 0,
            active_word: None,
            running: false,
            paused: false,
            spawn_timer: 0.0,
            difficulty_timer: 0.0,
            last_time: 0.0,
            game_over_reported: false,
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            scale_factor: 1.0,
            wrong_key_flash: 0.0,
            level_up_flash: 0.0,
            shake_timer: 0.0,
            shake_intensity: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            sounds,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> WordId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fit the playfield into a container, keeping the logical aspect.
    /// Words already in flight keep their absolute positions.
    pub fn resize(&mut self, container_w: f32, container_h: f32) {
        let size = crate::aspect_fit(container_w, container_h);
        self.width = size.x;
        self.height = size.y;
        self.scale_factor = size.x / CANVAS_WIDTH;
    }

    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_time = now_ms;
        log::info!("session started");
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Freeze the simulation; rendering and frame scheduling continue
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Unfreeze. Takes the current timestamp so the paused span does not
    /// land in the next delta.
    pub fn resume(&mut self, now_ms: f64) {
        self.paused = false;
        self.last_time = now_ms;
    }

    /// Advance the session to `now_ms`. Call once per animation frame.
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if !self.running {
            return FrameStatus::Stopped;
        }
        let dt = (now_ms - self.last_time).max(0.0) as f32;
        self.last_time = now_ms;

        if !self.paused {
            self.update(dt);
        }

        if self.state.is_game_over && !self.game_over_reported {
            self.game_over_reported = true;
            self.running = false;
            self.sounds.play(SoundEffect::GameOver);
            log::info!(
                "game over: score {} after {:.1}s",
                self.state.score,
                self.state.time_survived
            );
            return FrameStatus::GameOver;
        }
        FrameStatus::Running
    }

    /// One simulation step of `dt` milliseconds
    fn update(&mut self, dt: f32) {
        if self.state.is_game_over {
            return;
        }
        self.state.time_survived += dt / 1000.0;
        self.update_difficulty(dt);
        self.update_spawner(dt);
        self.update_words(dt);
        self.update_particles(dt);

        // Cosmetic countdowns
        if self.wrong_key_flash > 0.0 {
            self.wrong_key_flash -= dt;
        }
        if self.level_up_flash > 0.0 {
            self.level_up_flash -= dt;
        }
        if self.shake_timer > 0.0 {
            self.shake_timer -= dt;
            self.shake_intensity *= SHAKE_DECAY;
        }
    }

    fn update_difficulty(&mut self, dt: f32) {
        self.difficulty_timer += dt;
        if self.difficulty_timer >= LEVEL_UP_INTERVAL_MS {
            self.difficulty_timer = 0.0;
            if self.tier_index + 1 < TIERS.len() {
                self.tier_index += 1;
                self.state.difficulty_level += 1;
                self.level_up_flash = LEVEL_UP_FLASH_MS;
                self.sounds.play(SoundEffect::LevelUp);
                log::debug!("difficulty level {}", self.state.difficulty_level);
            }
        }
    }

    fn update_spawner(&mut self, dt: f32) {
        self.spawn_timer += dt;
        let Some(tier) = TIERS.get(self.tier_index) else {
            return;
        };
        if self.spawn_timer >= tier.spawn_interval_ms {
            self.spawn_word();
            // Overshoot past the interval is dropped, not carried over
            self.spawn_timer = 0.0;
        }
    }

    fn spawn_word(&mut self) {
        let Some(tier) = TIERS.get(self.tier_index) else {
            return;
        };
        let pool = words::pool(tier.pool);
        if pool.is_empty() {
            return;
        }
        let text = pool[self.rng.random_range(0..pool.len())];
        let pos = self.edge_spawn_position();
        let speed = BASE_WORD_SPEED * tier.speed_multiplier;
        let id = self.next_entity_id();
        log::debug!("spawn {text:?} at ({:.0}, {:.0})", pos.x, pos.y);
        self.words.push(WordEntity::new(id, text, pos, speed));
    }

    /// Random point just outside one of the four canvas edges
    fn edge_spawn_position(&mut self) -> Vec2 {
        let padding = SPAWN_PADDING * self.scale_factor;
        match self.rng.random_range(0..4u8) {
            0 => Vec2::new(self.rng.random::<f32>() * self.width, -padding),
            1 => Vec2::new(self.width + padding, self.rng.random::<f32>() * self.height),
            2 => Vec2::new(self.rng.random::<f32>() * self.width, self.height + padding),
            _ => Vec2::new(-padding, self.rng.random::<f32>() * self.height),
        }
    }

    /// Inject a specific word at a specific spot (debug/testing)
    pub fn spawn_word_at(&mut self, text: &'static str, pos: Vec2) -> WordId {
        let speed = TIERS[self.tier_index].speed_multiplier * BASE_WORD_SPEED;
        let id = self.next_entity_id();
        self.words.push(WordEntity::new(id, text, pos, speed));
        id
    }

    /// Move words toward the center, resolve arrivals, purge destroyed
    fn update_words(&mut self, dt: f32) {
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        let hit_radius = HIT_RADIUS * self.scale_factor;
        let step = self.scale_factor * dt / 1000.0;

        for word in &mut self.words {
            if word.is_destroyed {
                continue;
            }
            let to_center = center - word.pos;
            let dist = to_center.length();
            if dist > 0.0 {
                word.pos += to_center / dist * (word.speed * step);
            }
            // Arrival uses the distance measured before the move
            if dist < hit_radius {
                word.is_destroyed = true;
                burst(&mut self.particles, &mut self.rng, word.pos, ParticleColor::NeonPink);
                self.sounds.play(SoundEffect::Damage);
                self.shake_timer = SHAKE_DURATION_MS;
                self.shake_intensity = SHAKE_MAX_INTENSITY;
                if self.active_word == Some(word.id) {
                    self.active_word = None;
                }
                if !self.state.is_game_over {
                    self.state.health = self.state.health.saturating_sub(DAMAGE_PER_HIT);
                    if self.state.health == 0 {
                        self.state.is_game_over = true;
                    }
                }
            }
        }

        self.words.retain(|w| !w.is_destroyed);
    }

    fn update_particles(&mut self, dt: f32) {
        let dt_s = dt / 1000.0;
        for p in &mut self.particles {
            p.pos += p.vel * dt_s;
            p.life -= dt;
            p.vel *= PARTICLE_FRICTION;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    // === Snapshot accessors for rendering and the host ===

    pub fn words(&self) -> &[WordEntity] {
        &self.words
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn active_word(&self) -> Option<WordId> {
        self.active_word
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Remaining wrong-key flash (ms); zero or less when idle
    pub fn wrong_key_flash(&self) -> f32 {
        self.wrong_key_flash
    }

    /// Remaining level-up banner time (ms)
    pub fn level_up_flash(&self) -> f32 {
        self.level_up_flash
    }

    /// Current shake amplitude in logical units, zero once expired
    pub fn shake_intensity(&self) -> f32 {
        if self.shake_timer > 0.0 {
            self.shake_intensity
        } else {
            0.0
        }
    }
}

/// Ring of particles flying out from `pos`: even angles, random speeds
pub(crate) fn burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, pos: Vec2, color: ParticleColor) {
    for i in 0..PARTICLES_PER_BURST {
        let angle = std::f32::consts::TAU / PARTICLES_PER_BURST as f32 * i as f32;
        let speed = (rng.random::<f32>() * 200.0 + 100.0) * (rng.random::<f32>() * 2.0 + 0.5);
        particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: PARTICLE_LIFETIME_MS,
            max_life: PARTICLE_LIFETIME_MS,
            color,
            size: rng.random::<f32>() * 4.0 + 1.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::NullSink;
    use proptest::prelude::*;

    fn engine() -> Engine {
        Engine::new(7, Box::new(NullSink))
    }

    fn center() -> Vec2 {
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0)
    }

    #[test]
    fn test_frame_before_start_is_stopped() {
        let mut e = engine();
        assert_eq!(e.frame(16.0), FrameStatus::Stopped);
        assert_eq!(e.game_state().time_survived, 0.0);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut e = engine();
        e.start(100.0);
        assert_eq!(e.frame(100.0), FrameStatus::Running);
        assert_eq!(e.frame(100.0), FrameStatus::Running);
        assert_eq!(e.game_state().time_survived, 0.0);
        assert!(e.words().is_empty());
    }

    #[test]
    fn test_backwards_timestamp_clamps_to_zero() {
        let mut e = engine();
        e.start(1000.0);
        e.frame(500.0);
        assert_eq!(e.game_state().time_survived, 0.0);
    }

    #[test]
    fn test_spawn_cadence_drops_remainder() {
        let mut e = engine();
        e.start(0.0);
        e.frame(1000.0);
        assert!(e.words().is_empty());
        // Timer hits 1600 >= 1500: spawn, then reset to zero (not 100)
        e.frame(1600.0);
        assert_eq!(e.words().len(), 1);
        // With carry-over this delta (1400, total 1500) would spawn again
        e.frame(3000.0);
        assert_eq!(e.words().len(), 1);
        e.frame(3200.0);
        assert_eq!(e.words().len(), 2);
    }

    #[test]
    fn test_word_moves_toward_center() {
        let mut e = engine();
        e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
        e.start(0.0);
        e.frame(1000.0);
        let w = &e.words()[0];
        assert!((w.pos.x - 150.0).abs() < 1e-3, "moved 50 units in 1s: {}", w.pos.x);
        assert!((w.pos.y - 300.0).abs() < 1e-3);
        assert_eq!(e.game_state().health, INITIAL_HEALTH);
    }

    #[test]
    fn test_arrival_damages_and_destroys() {
        let mut e = engine();
        e.spawn_word_at("cat", center() + Vec2::new(10.0, 0.0));
        e.start(0.0);
        e.frame(16.0);
        assert_eq!(e.game_state().health, INITIAL_HEALTH - DAMAGE_PER_HIT);
        assert!(e.words().is_empty(), "arrived word is purged at end of pass");
        assert_eq!(e.particles().len(), PARTICLES_PER_BURST);
        assert!(e.shake_intensity() > 0.0);
        assert!(!e.game_state().is_game_over);
    }

    #[test]
    fn test_active_word_cleared_by_arrival() {
        let mut e = engine();
        e.spawn_word_at("cat", center() + Vec2::new(5.0, 0.0));
        e.start(0.0);
        e.handle_key('c');
        assert!(e.active_word().is_some());
        e.frame(16.0);
        assert_eq!(e.active_word(), None);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut e = engine();
        for _ in 0..10 {
            e.spawn_word_at("cat", center());
        }
        e.start(0.0);
        assert_eq!(e.frame(16.0), FrameStatus::GameOver);
        assert_eq!(e.game_state().health, 0);
        assert!(e.game_state().is_game_over);
        assert_eq!(e.frame(32.0), FrameStatus::Stopped);
    }

    #[test]
    fn test_health_clamps_at_zero() {
        let mut e = engine();
        for _ in 0..13 {
            e.spawn_word_at("cat", center());
        }
        e.start(0.0);
        e.frame(16.0);
        assert_eq!(e.game_state().health, 0);
        assert!(e.game_state().is_game_over);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut e = engine();
        e.start(0.0);
        e.pause();
        assert_eq!(e.frame(5000.0), FrameStatus::Running);
        assert_eq!(e.game_state().time_survived, 0.0);
        assert!(e.words().is_empty());

        e.resume(5000.0);
        e.frame(6500.0);
        assert!((e.game_state().time_survived - 1.5).abs() < 1e-3);
        assert_eq!(e.words().len(), 1);
    }

    #[test]
    fn test_difficulty_saturates_at_last_tier() {
        let mut e = engine();
        e.start(0.0);
        let mut now = 0.0;
        for _ in 0..8 {
            now += LEVEL_UP_INTERVAL_MS as f64 + 1.0;
            e.frame(now);
        }
        assert_eq!(e.game_state().difficulty_level, TIERS.len() as u32);
        assert_eq!(e.tier_index, TIERS.len() - 1);
        assert!(!e.game_state().is_game_over);
    }

    #[test]
    fn test_spawned_speed_follows_tier() {
        let mut e = engine();
        e.start(0.0);
        // Ride the clock to tier 2 (multiplier 1.2), then spawn
        e.frame(LEVEL_UP_INTERVAL_MS as f64 + 1.0);
        let spawned = e.words().last().map(|w| w.speed);
        assert_eq!(spawned, Some(BASE_WORD_SPEED * TIERS[1].speed_multiplier));
    }

    #[test]
    fn test_particles_decay_and_purge() {
        let mut e = engine();
        e.spawn_word_at("cat", center());
        e.start(0.0);
        e.frame(16.0);
        assert_eq!(e.particles().len(), PARTICLES_PER_BURST);
        e.frame(16.0 + PARTICLE_LIFETIME_MS as f64 + 50.0);
        assert!(e.particles().is_empty());
    }

    #[test]
    fn test_resize_letterboxes() {
        let mut e = engine();
        e.resize(400.0, 300.0);
        assert_eq!(e.width(), 400.0);
        assert_eq!(e.height(), 300.0);
        assert_eq!(e.scale_factor(), 0.5);

        e.resize(1600.0, 600.0);
        assert_eq!(e.width(), 800.0);
        assert_eq!(e.height(), 600.0);
        assert_eq!(e.scale_factor(), 1.0);
    }

    #[test]
    fn test_stop_halts_frames() {
        let mut e = engine();
        e.start(0.0);
        e.frame(16.0);
        e.stop();
        assert_eq!(e.frame(32.0), FrameStatus::Stopped);
    }

    proptest! {
        /// Arbitrary frame deltas never break the core invariants
        #[test]
        fn prop_frames_keep_invariants(deltas in prop::collection::vec(0u32..5000, 1..40)) {
            let mut e = engine();
            e.start(0.0);
            let mut now = 0.0;
            let mut prev_health = INITIAL_HEALTH;
            for d in deltas {
                now += d as f64;
                e.frame(now);
                let s = e.game_state();
                prop_assert!(s.health <= INITIAL_HEALTH);
                prop_assert!(
                    s.health <= prev_health,
                    "health rose from {} to {} at t={}ms",
                    prev_health,
                    s.health,
                    now
                );
                prev_health = s.health;
                prop_assert!(s.difficulty_level >= 1);
                prop_assert!(s.difficulty_level <= TIERS.len() as u32);
                prop_assert!(e.tier_index < TIERS.len());
                // Purge runs at end of every pass
                prop_assert!(e.words().iter().all(|w| !w.is_destroyed));
                prop_assert!(e.words().iter().all(|w| w.typed_chars <= w.text.len()));
                prop_assert_eq!(s.is_game_over, s.health == 0);
            }
        }
    }
}
