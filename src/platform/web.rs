//! Browser facade
//!
//! Thin `wasm-bindgen` wrapper around [`Game`] for a JavaScript host that
//! drives `requestAnimationFrame`, renders the JSON snapshot and plays cues.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::settings::Settings;
use crate::sim::PlantKind;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Lane Defense core loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `tuning_json` and `settings_json` may be omitted
    #[wasm_bindgen(constructor)]
    pub fn new(
        tuning_json: Option<String>,
        settings_json: Option<String>,
    ) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let settings = settings_json
            .map(|json| Settings::from_json(&json))
            .unwrap_or_default();
        let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        Ok(WebGame {
            game: Game::new(seed, tuning, settings),
        })
    }

    /// Advance one frame; `now_ms` is the `requestAnimationFrame` timestamp
    pub fn frame(&mut self, now_ms: f64) {
        self.game.frame(now_ms / 1000.0);
    }

    /// `kind` is one of "generator", "single_shooter", "double_shooter"
    pub fn place_plant(&mut self, row: usize, col: usize, kind: &str) -> bool {
        match PlantKind::from_name(kind) {
            Some(kind) => self.game.place_plant(row, col, kind).is_applied(),
            None => false,
        }
    }

    pub fn collect_resource(&mut self, id: u32) -> bool {
        self.game.collect_resource(id).is_applied()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.game.set_paused(paused);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.game.set_muted(muted);
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.game.set_hidden(hidden);
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn resize_board(&mut self, width: f32, height: f32) {
        self.game.resize_board(width, height);
    }

    pub fn music_volume(&self) -> f32 {
        self.game.music_volume()
    }

    /// Current state as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.game
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Sound cues since the last call as JSON
    pub fn drain_cues_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.drain_cues()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
