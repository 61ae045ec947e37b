//! Game balance and layout configuration
//!
//! Every gameplay number lives here so a host can tune a run from JSON
//! without touching the simulation. Defaults reproduce `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::DifficultySettings;

/// Tunable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Ship ===
    pub ship_start_x: f32,
    pub ship_start_y: f32,
    pub ship_width: f32,
    pub ship_height: f32,
    /// px/tick
    pub ship_speed: f32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub alien_bullet_speed: f32,
    pub max_player_bullets: usize,

    // === Formation ===
    pub formation_origin_x: f32,
    pub formation_origin_y: f32,
    pub formation_spacing_x: f32,
    pub formation_spacing_y: f32,
    pub alien_size: f32,

    // === Effects ===
    pub explosion_particles: usize,
    pub particle_life: u32,
    pub particle_jitter: f32,

    // === Scoring & difficulty ===
    pub points_per_kill: u64,
    /// Difficulty at the start of every session
    pub difficulty: DifficultySettings,
    /// Added to alien descent speed (and removed from bullet speed) per level
    pub level_speed_step: f32,
    pub min_bullet_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            ship_start_x: SHIP_START_X,
            ship_start_y: SHIP_START_Y,
            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_speed: SHIP_SPEED,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            alien_bullet_speed: ALIEN_BULLET_SPEED,
            max_player_bullets: MAX_PLAYER_BULLETS,

            formation_origin_x: FORMATION_ORIGIN_X,
            formation_origin_y: FORMATION_ORIGIN_Y,
            formation_spacing_x: FORMATION_SPACING_X,
            formation_spacing_y: FORMATION_SPACING_Y,
            alien_size: ALIEN_SIZE,

            explosion_particles: EXPLOSION_PARTICLES,
            particle_life: PARTICLE_LIFE,
            particle_jitter: PARTICLE_JITTER,

            points_per_kill: POINTS_PER_KILL,
            difficulty: DifficultySettings::default(),
            level_speed_step: LEVEL_SPEED_STEP,
            min_bullet_speed: MIN_BULLET_SPEED,
        }
    }
}

/// Errors from loading a config file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a config file, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would make the simulation meaningless
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.playfield_width > 0.0) {
            self.playfield_width = defaults.playfield_width;
        }
        if !(self.playfield_height > 0.0) {
            self.playfield_height = defaults.playfield_height;
        }
        if !(self.ship_width > 0.0) || self.ship_width > self.playfield_width {
            self.ship_width = self.playfield_width.min(defaults.ship_width);
        }
        self.ship_start_x = self
            .ship_start_x
            .clamp(0.0, self.playfield_width - self.ship_width);
        self.ship_speed = self.ship_speed.max(0.0);
        self.max_player_bullets = self.max_player_bullets.max(1);
        self.alien_bullet_speed = self.alien_bullet_speed.max(0.0);
        self.particle_life = self.particle_life.max(1);
        self.particle_jitter = if self.particle_jitter.is_finite() {
            self.particle_jitter.abs().min(MAX_PARTICLE_JITTER)
        } else {
            defaults.particle_jitter
        };
        self.min_bullet_speed = self.min_bullet_speed.max(0.0);
        self.level_speed_step = self.level_speed_step.max(0.0);

        let d = &mut self.difficulty;
        d.alien_shoot_probability = if d.alien_shoot_probability.is_finite() {
            d.alien_shoot_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        d.bullet_speed = d.bullet_speed.max(self.min_bullet_speed);
        d.alien_speed_y = d.alien_speed_y.max(0.0);
        d.alien_rows = d.alien_rows.clamp(1, MAX_ALIEN_ROWS);
        d.alien_cols = d.alien_cols.clamp(1, MAX_ALIEN_COLS);

        self
    }

    /// Horizontal range the ship's left edge may occupy
    pub fn ship_max_x(&self) -> f32 {
        (self.playfield_width - self.ship_width).max(0.0)
    }
}
