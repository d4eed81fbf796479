//! Canvas-2D scene painting.
//!
//! Pure consumer of engine snapshots; never mutates simulation state.
//! Deliberately plain: flat fills and monospace text, no styling beyond
//! what gameplay needs to be readable.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::{Engine, ParticleColor};

const BACKGROUND: &str = "#0D0221";
const NEON_PINK: &str = "#FF00FF";
const NEON_BLUE: &str = "#00FFFF";
const NEON_GREEN: &str = "#00FF00";
const WHITE: &str = "#FFFFFF";

fn css(color: ParticleColor) -> &'static str {
    match color {
        ParticleColor::NeonGreen => NEON_GREEN,
        ParticleColor::NeonPink => NEON_PINK,
    }
}

pub struct Renderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the engine's fitted playfield
    pub fn sync_size(&self, engine: &Engine) {
        self.canvas.set_width(engine.width() as u32);
        self.canvas.set_height(engine.height() as u32);
    }

    /// Paint one frame from the engine snapshot
    pub fn draw(&self, engine: &Engine, now_ms: f64) {
        let w = engine.width() as f64;
        let h = engine.height() as f64;
        let scale = engine.scale_factor() as f64;

        // Screen shake: deterministic jitter hashed from the frame time
        let shake = engine.shake_intensity() as f64;
        let (ox, oy) = if shake > 0.1 {
            let hash = (now_ms as u32).wrapping_mul(2654435761);
            let jx = ((hash % 1000) as f64 / 1000.0 - 0.5) * shake * 2.0;
            let jy = ((hash / 1000 % 1000) as f64 / 1000.0 - 0.5) * shake * 2.0;
            (jx, jy)
        } else {
            (0.0, 0.0)
        };
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, ox, oy).ok();

        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(-ox, -oy, w, h);

        self.draw_player(engine, w, h, scale);

        self.ctx.set_font(&format!("bold {}px monospace", 24.0 * scale));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        for word in engine.words() {
            self.draw_word(word);
        }

        for p in engine.particles() {
            self.ctx.set_global_alpha((p.life / p.max_life) as f64);
            self.ctx.set_fill_style_str(css(p.color));
            self.ctx.begin_path();
            self.ctx
                .arc(p.pos.x as f64, p.pos.y as f64, (p.size as f64) * scale, 0.0, std::f64::consts::TAU)
                .ok();
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);

        if engine.level_up_flash() > 0.0 {
            let alpha = (engine.level_up_flash() / LEVEL_UP_FLASH_MS).clamp(0.0, 1.0);
            self.ctx.set_font(&format!("bold {}px monospace", 80.0 * scale));
            self.ctx
                .set_fill_style_str(&format!("rgba(255, 255, 0, {alpha})"));
            self.ctx
                .fill_text(
                    &format!("LEVEL {}", engine.game_state().difficulty_level),
                    w / 2.0,
                    h / 4.0,
                )
                .ok();
        }

        if engine.is_paused() {
            self.draw_pause_overlay(w, h, scale);
        }

        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    }

    fn draw_player(&self, engine: &Engine, w: f64, h: f64, scale: f64) {
        let pulse = (engine.game_state().time_survived * 3.0).sin() as f64 * 2.0;
        let radius = (15.0 + pulse) * scale;
        let flashing = engine.wrong_key_flash() > 0.0;

        self.ctx
            .set_fill_style_str(if flashing { NEON_PINK } else { NEON_BLUE });
        self.ctx.begin_path();
        self.ctx
            .arc(w / 2.0, h / 2.0, radius, 0.0, std::f64::consts::TAU)
            .ok();
        self.ctx.fill();

        if flashing {
            let intensity = (engine.wrong_key_flash() / WRONG_KEY_FLASH_MS).clamp(0.0, 1.0) as f64;
            self.ctx.begin_path();
            self.ctx
                .arc(w / 2.0, h / 2.0, radius * (1.0 + intensity * 0.5), 0.0, std::f64::consts::TAU)
                .ok();
            self.ctx
                .set_stroke_style_str(&format!("rgba(255, 0, 0, {intensity})"));
            self.ctx.set_line_width(3.0 * scale);
            self.ctx.stroke();
        }
    }

    /// Typed prefix in green, remainder in white, centered on the word
    fn draw_word(&self, word: &crate::sim::WordEntity) {
        let typed = &word.text[..word.typed_chars];
        let rest = &word.text[word.typed_chars..];
        let x = word.pos.x as f64;
        let y = word.pos.y as f64;

        let typed_width = self.text_width(typed);
        let total_width = self.text_width(word.text);
        let start = x - total_width / 2.0;

        if !typed.is_empty() {
            self.ctx.set_fill_style_str(NEON_GREEN);
            self.ctx.fill_text(typed, start + typed_width / 2.0, y).ok();
        }
        if !rest.is_empty() {
            self.ctx.set_fill_style_str(WHITE);
            self.ctx
                .fill_text(rest, start + typed_width + self.text_width(rest) / 2.0, y)
                .ok();
        }
    }

    fn draw_pause_overlay(&self, w: f64, h: f64, scale: f64) {
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.set_font(&format!("bold {}px monospace", 48.0 * scale));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(NEON_PINK);
        self.ctx.fill_text("PAUSED", w / 2.0, h / 2.0).ok();

        self.ctx.set_font(&format!("{}px monospace", 20.0 * scale));
        self.ctx.set_fill_style_str(NEON_BLUE);
        self.ctx
            .fill_text("Press ESC to continue", w / 2.0, h / 2.0 + 50.0 * scale)
            .ok();
    }

    fn text_width(&self, text: &str) -> f64 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }
}
