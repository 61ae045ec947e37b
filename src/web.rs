//! Browser host facade
//!
//! JavaScript owns the canvas, key handling and frame scheduling; it feeds
//! normalized input here, calls `tick` once per animation frame and draws
//! from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::persistence::LocalStorageStore;
use crate::session::{Session, SessionCommand};
use crate::settings::GameConfig;
use crate::sim::InputState;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Star Invaders (web) starting...");
}

/// One browser game instance
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore>,
    input: InputState,
    audio: AudioManager,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `config_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> WebGame {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json).unwrap_or_else(|e| {
                log::warn!("Using default config: {}", e);
                GameConfig::default()
            })
        };
        let seed = js_sys::Date::now() as u64;
        WebGame {
            session: Session::new(config, LocalStorageStore::new(), seed),
            input: InputState::default(),
            audio: AudioManager::new(),
        }
    }

    pub fn start(&mut self) -> bool {
        // First user gesture: let audio out
        self.audio.resume();
        self.command(SessionCommand::Start)
    }

    pub fn pause(&mut self) -> bool {
        self.command(SessionCommand::Pause)
    }

    pub fn resume(&mut self) -> bool {
        self.command(SessionCommand::Resume)
    }

    pub fn end_game(&mut self) -> bool {
        self.command(SessionCommand::End)
    }

    pub fn return_to_menu(&mut self) -> bool {
        self.command(SessionCommand::ReturnToMenu)
    }

    pub fn set_input(&mut self, left: bool, right: bool, shoot: bool) {
        self.input = InputState { left, right, shoot };
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    /// Master and effects volume, each 0.0 - 1.0
    pub fn set_volume(&mut self, master: f32, sfx: f32) {
        self.audio.set_master_volume(master);
        self.audio.set_sfx_volume(sfx);
    }

    /// Advance one frame and play its cues. Returns the number of cues.
    pub fn tick(&mut self, dt: f32) -> usize {
        let cues = self.session.tick(&self.input, dt);
        self.audio.play_all(&cues);
        cues.len()
    }

    pub fn snapshot_json(&self) -> String {
        self.session.snapshot().to_json().unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }

    pub fn high_score(&self) -> f64 {
        self.session.high_score() as f64
    }
}

impl WebGame {
    fn command(&mut self, command: SessionCommand) -> bool {
        self.session.apply(command).is_ok()
    }
}
