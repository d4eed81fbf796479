//! Word Storm entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement};

    use word_storm::audio::WebAudioSink;
    use word_storm::leaderboard::{Leaderboard, ScoreSubmission};
    use word_storm::render::Renderer;
    use word_storm::sim::{Engine, FrameStatus};

    /// Game instance holding all state
    struct Game {
        engine: Engine,
        renderer: Renderer,
        leaderboard: Leaderboard,
        // CSS size of the canvas, kept for restarts
        container: (f32, f32),
        score_submitted: bool,
    }

    impl Game {
        fn new(seed: u64, renderer: Renderer) -> Self {
            Self {
                engine: Engine::new(seed, Box::new(WebAudioSink::new())),
                renderer,
                leaderboard: Leaderboard::load(),
                container: (0.0, 0.0),
                score_submitted: false,
            }
        }

        fn fit_to(&mut self, w: f32, h: f32) {
            self.container = (w, h);
            self.engine.resize(w, h);
            self.renderer.sync_size(&self.engine);
        }

        fn restart(&mut self, seed: u64) {
            self.engine = Engine::new(seed, Box::new(WebAudioSink::new()));
            self.engine.resize(self.container.0, self.container.1);
            self.renderer.sync_size(&self.engine);
            self.engine.start(now_ms());
            self.score_submitted = false;
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let state = self.engine.game_state();

            // Update score
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }

            // Update health
            if let Some(el) = document.query_selector("#hud-health .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.health.to_string()));
            }

            // Update level
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.difficulty_level.to_string()));
            }

            // Update survival time
            if let Some(el) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{:.0}s", state.time_survived)));
            }
        }

        /// Show the game-over overlay with final stats and the leaderboard
        fn show_game_over(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let state = self.engine.game_state();

            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "");
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("final-words") {
                el.set_text_content(Some(&state.words_destroyed.to_string()));
            }
            if let Some(el) = document.get_element_by_id("final-time") {
                el.set_text_content(Some(&format!("{:.0}s", state.time_survived)));
            }
            if let Some(el) = document.get_element_by_id("final-level") {
                el.set_text_content(Some(&state.difficulty_level.to_string()));
            }
            if let Some(el) = document.get_element_by_id("submit-form") {
                let _ = el.set_attribute("class", "");
            }

            render_leaderboard(&self.leaderboard);
        }
    }

    /// Rebuild the top-scores list in the game-over overlay
    fn render_leaderboard(leaderboard: &Leaderboard) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let Some(list) = document.get_element_by_id("leaderboard-list") else {
            return;
        };
        list.set_inner_html("");

        if leaderboard.is_empty() {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some("No scores yet"));
                let _ = list.append_child(&li);
            }
            return;
        }

        for (rank, record) in leaderboard.top().iter().enumerate() {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some(&format!(
                    "{}. {}  {}",
                    rank + 1,
                    record.player_name,
                    record.score
                )));
                let _ = list.append_child(&li);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Word Storm starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let renderer = Renderer::new(canvas.clone()).expect("no 2d context");

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)));
        game.borrow_mut()
            .fit_to(canvas.client_width() as f32, canvas.client_height() as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Set up input handlers
        setup_input_handlers(game.clone());

        // Set up resize handler
        setup_resize_handler(&canvas, game.clone());

        // Set up score submit button
        setup_submit_button(game.clone());

        // Set up restart button
        setup_restart_button(game.clone());

        // Set up auto-pause on visibility change
        setup_auto_pause(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        game.borrow_mut().engine.start(now_ms());

        // Start game loop
        request_animation_frame(game);

        log::info!("Word Storm running!");
    }

    /// Same timebase the animation-frame timestamps use
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            // Keys typed into form fields (the name box) never reach the game
            if let Some(target) = event.target() {
                if target.dyn_ref::<HtmlInputElement>().is_some() {
                    return;
                }
            }
            if event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }

            let key = event.key();
            if key == "Escape" {
                let mut g = game.borrow_mut();
                if g.engine.is_paused() {
                    g.engine.resume(now_ms());
                    log::info!("Resumed");
                } else if g.engine.is_running() {
                    g.engine.pause();
                    log::info!("Paused");
                }
                return;
            }

            // Only single printable characters reach the game
            let mut chars = key.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                event.prevent_default();
                game.borrow_mut().engine.handle_key(ch);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let w = canvas_clone.client_width() as f32;
            let h = canvas_clone.client_height() as f32;
            game.borrow_mut().fit_to(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_submit_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("submit-score-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.score_submitted {
                    return;
                }

                let document = web_sys::window().unwrap().document().unwrap();
                let name = document
                    .get_element_by_id("player-name")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();

                let state = g.engine.game_state();
                let mut submission =
                    ScoreSubmission::new(name.trim(), f64::from(state.score));
                submission.words_destroyed = Some(state.words_destroyed);
                submission.time_survived = Some(f64::from(state.time_survived));
                submission.difficulty_level = Some(state.difficulty_level);

                match g.leaderboard.submit(submission, js_sys::Date::now()) {
                    Ok(record) => {
                        g.leaderboard.save();
                        g.score_submitted = true;
                        log::info!("Score saved for {}", record.player_name);
                        if let Some(el) = document.get_element_by_id("submit-form") {
                            let _ = el.set_attribute("class", "hidden");
                        }
                        render_leaderboard(&g.leaderboard);
                    }
                    Err(err) => {
                        log::warn!("Score rejected: {err}");
                        if let Some(el) = document.get_element_by_id("submit-status") {
                            el.set_text_content(Some(&err.to_string()));
                        }
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);

                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("game-over") {
                    let _ = el.set_attribute("class", "hidden");
                }
                if let Some(el) = document.get_element_by_id("submit-status") {
                    el.set_text_content(None);
                }

                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.engine.is_running() && !g.engine.is_paused() {
                        g.engine.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.engine.is_running() && !g.engine.is_paused() {
                    g.engine.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let status = g.engine.frame(time);
            g.renderer.draw(&g.engine, time);
            g.update_hud();

            if status == FrameStatus::GameOver {
                g.show_game_over();
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use word_storm::sim::{Engine, FrameStatus};
    use word_storm::sound::NullSink;

    env_logger::init();
    log::info!("Word Storm (native) starting...");
    log::info!("No browser here; running a headless autoplay demo instead");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut engine = Engine::new(seed, Box::new(NullSink));
    engine.resize(word_storm::consts::CANVAS_WIDTH, word_storm::consts::CANVAS_HEIGHT);
    engine.start(0.0);

    // Drive 60 simulated seconds at 16ms a frame, typing the next
    // character of the locked word (or the nearest one) every frame.
    let mut now = 0.0_f64;
    while now < 60_000.0 {
        now += 16.0;
        if engine.frame(now) != FrameStatus::Running {
            break;
        }

        let key = {
            let center = Vec2::new(engine.width() / 2.0, engine.height() / 2.0);
            let words = engine.words();
            let target = engine
                .active_word()
                .and_then(|id| words.iter().find(|w| w.id == id))
                .or_else(|| {
                    words.iter().filter(|w| !w.is_destroyed).min_by(|a, b| {
                        a.pos
                            .distance_squared(center)
                            .total_cmp(&b.pos.distance_squared(center))
                    })
                });
            target.and_then(|w| w.next_char())
        };
        if let Some(ch) = key {
            engine.handle_key(ch);
        }
    }

    let state = engine.game_state();
    log::info!(
        "Demo finished: score {}, {} words, {:.1}s survived",
        state.score,
        state.words_destroyed,
        state.time_survived
    );
    match serde_json::to_string_pretty(state) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize final state: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
