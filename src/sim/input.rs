//! Keystroke resolution: the active-word lock.
//!
//! At most one word receives keystrokes at a time. The lock is taken by
//! the first keystroke that matches a fresh word's first character and
//! released only by completing the word or losing it to an arrival.
//! Wrong keys never release it.

use glam::Vec2;

use super::engine::{Engine, burst};
use super::state::ParticleColor;
use crate::consts::*;
use crate::sound::SoundEffect;

impl Engine {
    /// Feed one keystroke into the session
    pub fn handle_key(&mut self, key: char) {
        if self.state.is_game_over || self.paused {
            return;
        }

        if let Some(id) = self.active_word {
            if let Some(idx) = self.words.iter().position(|w| w.id == id && !w.is_destroyed) {
                if self.words[idx].next_char().is_some_and(|c| c.eq_ignore_ascii_case(&key)) {
                    self.words[idx].typed_chars += 1;
                    self.complete_if_done(idx);
                    self.sounds.play(SoundEffect::KeyTyped);
                } else {
                    // Miss; the lock stays
                    self.wrong_key_flash = WRONG_KEY_FLASH_MS;
                }
                return;
            }
            // Lock points at a word that no longer exists; recover
            self.active_word = None;
        }

        let center = Vec2::new(self.width() / 2.0, self.height() / 2.0);
        let target = self
            .words
            .iter()
            .enumerate()
            .filter(|(_, w)| !w.is_destroyed && w.typed_chars == 0)
            .filter(|(_, w)| {
                w.text
                    .bytes()
                    .next()
                    .is_some_and(|b| (b as char).eq_ignore_ascii_case(&key))
            })
            .min_by(|(_, a), (_, b)| {
                a.pos
                    .distance_squared(center)
                    .total_cmp(&b.pos.distance_squared(center))
            })
            .map(|(idx, _)| idx);

        match target {
            Some(idx) => {
                self.active_word = Some(self.words[idx].id);
                self.words[idx].typed_chars += 1;
                self.complete_if_done(idx);
                self.sounds.play(SoundEffect::KeyTyped);
            }
            None => self.wrong_key_flash = WRONG_KEY_FLASH_MS,
        }
    }

    /// Destroy, score and celebrate a fully typed word
    fn complete_if_done(&mut self, idx: usize) {
        if !self.words[idx].is_complete() {
            return;
        }
        let (id, pos, len) = {
            let w = &self.words[idx];
            (w.id, w.pos, w.text.len() as u32)
        };
        self.words[idx].is_destroyed = true;
        burst(&mut self.particles, &mut self.rng, pos, ParticleColor::NeonGreen);
        self.sounds.play(SoundEffect::WordExploded);
        self.state.score += SCORE_PER_WORD + SCORE_PER_CHAR * len;
        self.state.words_destroyed += 1;
        if self.active_word == Some(id) {
            self.active_word = None;
        }
        log::debug!("destroyed {:?}, score {}", self.words[idx].text, self.state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FrameStatus;
    use crate::sound::{NullSink, SoundSink};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> Engine {
        Engine::new(7, Box::new(NullSink))
    }

    fn center() -> Vec2 {
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0)
    }

    /// Sink that logs every event for order assertions
    struct RecordingSink(Rc<RefCell<Vec<SoundEffect>>>);

    impl SoundSink for RecordingSink {
        fn play(&mut self, effect: SoundEffect) {
            self.0.borrow_mut().push(effect);
        }
    }

    #[test]
    fn test_typing_a_word_scores_and_destroys() {
        let mut e = engine();
        let id = e.spawn_word_at("cat", Vec2::new(100.0, 300.0));

        e.handle_key('c');
        assert_eq!(e.active_word(), Some(id));
        assert_eq!(e.words()[0].typed_chars, 1);

        e.handle_key('a');
        assert_eq!(e.words()[0].typed_chars, 2);

        e.handle_key('t');
        assert!(e.words()[0].is_destroyed);
        assert_eq!(e.game_state().score, 130);
        assert_eq!(e.game_state().words_destroyed, 1);
        assert_eq!(e.active_word(), None);
    }

    #[test]
    fn test_first_key_locks_nearest_candidate() {
        let mut e = engine();
        let far = e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
        let near = e.spawn_word_at("car", Vec2::new(300.0, 300.0));

        e.handle_key('c');
        assert_eq!(e.active_word(), Some(near));
        let near_word = e.words().iter().find(|w| w.id == near).unwrap();
        let far_word = e.words().iter().find(|w| w.id == far).unwrap();
        assert_eq!(near_word.typed_chars, 1);
        assert_eq!(far_word.typed_chars, 0);
    }

    #[test]
    fn test_distance_tie_keeps_first_spawned() {
        let mut e = engine();
        let first = e.spawn_word_at("dog", center() + Vec2::new(120.0, 0.0));
        e.spawn_word_at("day", center() - Vec2::new(120.0, 0.0));
        e.handle_key('d');
        assert_eq!(e.active_word(), Some(first));
    }

    #[test]
    fn test_wrong_key_with_no_candidate_only_flashes() {
        let mut e = engine();
        e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
        e.handle_key('x');
        assert_eq!(e.active_word(), None);
        assert_eq!(e.words()[0].typed_chars, 0);
        assert_eq!(e.game_state().score, 0);
        assert!(e.wrong_key_flash() > 0.0);
    }

    #[test]
    fn test_wrong_key_keeps_lock() {
        let mut e = engine();
        let id = e.spawn_word_at("dog", Vec2::new(100.0, 300.0));
        e.handle_key('d');
        e.handle_key('x');
        assert_eq!(e.active_word(), Some(id));
        assert_eq!(e.words()[0].typed_chars, 1);
        assert!(e.wrong_key_flash() > 0.0);
    }

    #[test]
    fn test_lock_blocks_other_words() {
        let mut e = engine();
        let near = e.spawn_word_at("dog", Vec2::new(300.0, 300.0));
        let far = e.spawn_word_at("dice", Vec2::new(100.0, 300.0));

        e.handle_key('d');
        assert_eq!(e.active_word(), Some(near));
        // 'd' matches the other word's first char but the lock holds;
        // it is a miss against the active word's next char 'o'
        e.handle_key('d');
        assert_eq!(e.active_word(), Some(near));
        assert_eq!(e.words().iter().find(|w| w.id == far).unwrap().typed_chars, 0);
        assert_eq!(e.words().iter().find(|w| w.id == near).unwrap().typed_chars, 1);
    }

    #[test]
    fn test_matching_ignores_case() {
        let mut e = engine();
        e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
        e.handle_key('C');
        e.handle_key('A');
        e.handle_key('T');
        assert_eq!(e.game_state().words_destroyed, 1);
    }

    #[test]
    fn test_keystrokes_ignored_while_paused() {
        let mut e = engine();
        e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
        e.start(0.0);
        e.pause();
        e.handle_key('c');
        assert_eq!(e.active_word(), None);
        assert_eq!(e.words()[0].typed_chars, 0);
    }

    #[test]
    fn test_keystrokes_ignored_after_game_over() {
        let mut e = engine();
        for _ in 0..10 {
            e.spawn_word_at("cat", center());
        }
        e.start(0.0);
        assert_eq!(e.frame(16.0), FrameStatus::GameOver);
        e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
        e.handle_key('c');
        assert_eq!(e.active_word(), None);
        assert_eq!(e.game_state().score, 0);
    }

    #[test]
    fn test_completed_word_gone_after_next_frame() {
        let mut e = engine();
        e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
        e.start(0.0);
        for k in ['c', 'a', 't'] {
            e.handle_key(k);
        }
        assert_eq!(e.words().len(), 1, "flagged but not yet purged");
        e.frame(16.0);
        assert!(e.words().is_empty());
    }

    #[test]
    fn test_sound_order_on_completion() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut e = Engine::new(7, Box::new(RecordingSink(log.clone())));
        e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
        for k in ['c', 'a', 't'] {
            e.handle_key(k);
        }
        assert_eq!(
            *log.borrow(),
            vec![
                SoundEffect::KeyTyped,
                SoundEffect::KeyTyped,
                SoundEffect::WordExploded,
                SoundEffect::KeyTyped,
            ]
        );
    }

    #[test]
    fn test_damage_and_game_over_sounds() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut e = Engine::new(7, Box::new(RecordingSink(log.clone())));
        for _ in 0..10 {
            e.spawn_word_at("cat", center());
        }
        e.start(0.0);
        e.frame(16.0);
        let events = log.borrow();
        assert_eq!(events.iter().filter(|s| **s == SoundEffect::Damage).count(), 10);
        assert_eq!(events.last(), Some(&SoundEffect::GameOver));
    }

    proptest! {
        /// Random keystrokes never violate the lock invariants
        #[test]
        fn prop_lock_invariants(keys in "[a-z]{0,64}") {
            let mut e = engine();
            e.spawn_word_at("cat", Vec2::new(100.0, 300.0));
            e.spawn_word_at("dog", Vec2::new(700.0, 300.0));
            e.spawn_word_at("dice", Vec2::new(400.0, 100.0));

            for key in keys.chars() {
                e.handle_key(key);
                for w in e.words() {
                    prop_assert!(w.typed_chars <= w.text.len());
                }
                let touched = e
                    .words()
                    .iter()
                    .filter(|w| !w.is_destroyed && w.typed_chars > 0)
                    .count();
                prop_assert!(touched <= 1);
                match e.active_word() {
                    Some(id) => {
                        let w = e.words().iter().find(|w| w.id == id);
                        prop_assert!(w.is_some_and(|w| w.typed_chars > 0 && !w.is_destroyed));
                    }
                    None => prop_assert_eq!(touched, 0),
                }
            }
        }
    }
}
