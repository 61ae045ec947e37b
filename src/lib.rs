//! Star Invaders - A fixed-formation arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, progression)
//! - `session`: Menu/Playing/Paused/GameOver state machine
//! - `persistence`: Key-value stores for the high score
//! - `settings`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScore;
pub use persistence::{MemoryStore, ScoreStore, StoreError};
pub use session::{Session, SessionCommand, SessionError};
pub use settings::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Nominal host frame rate; one tick per frame
    pub const TICK_RATE: f32 = 60.0;
    pub const TICK_DT: f32 = 1.0 / TICK_RATE;

    /// Logical playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 480.0;
    pub const PLAYFIELD_HEIGHT: f32 = 640.0;

    /// Ship defaults (starts horizontally centered, 60px above the bottom)
    pub const SHIP_START_X: f32 = 225.0;
    pub const SHIP_START_Y: f32 = 580.0;
    pub const SHIP_WIDTH: f32 = 30.0;
    pub const SHIP_HEIGHT: f32 = 30.0;
    /// Horizontal speed in px/tick
    pub const SHIP_SPEED: f32 = 5.0;

    /// Bullet geometry (both owners)
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Alien bullets fall at a fixed px/tick
    pub const ALIEN_BULLET_SPEED: f32 = 3.0;
    /// Player bullets alive at once
    pub const MAX_PLAYER_BULLETS: usize = 5;

    /// Formation grid layout
    pub const FORMATION_ORIGIN_X: f32 = 60.0;
    pub const FORMATION_ORIGIN_Y: f32 = 30.0;
    pub const FORMATION_SPACING_X: f32 = 60.0;
    pub const FORMATION_SPACING_Y: f32 = 50.0;
    pub const ALIEN_SIZE: f32 = 30.0;

    /// Explosion burst
    pub const EXPLOSION_PARTICLES: usize = 8;
    pub const PARTICLE_LIFE: u32 = 30;
    /// Max per-axis particle speed (velocity drawn from [-jitter, jitter])
    pub const PARTICLE_JITTER: f32 = 2.0;
    pub const MAX_PARTICLE_JITTER: f32 = 64.0;

    pub const POINTS_PER_KILL: u64 = 10;

    /// Starting difficulty
    pub const START_BULLET_SPEED: f32 = 4.0;
    pub const START_ALIEN_SPEED_Y: f32 = 0.2;
    pub const START_ALIEN_SHOOT_PROBABILITY: f32 = 0.002;
    pub const ALIEN_ROWS: u32 = 3;
    pub const ALIEN_COLS: u32 = 6;
    /// Largest formation a config may ask for
    pub const MAX_ALIEN_ROWS: u32 = 16;
    pub const MAX_ALIEN_COLS: u32 = 16;

    /// Applied on every level clear
    pub const LEVEL_SPEED_STEP: f32 = 0.2;
    pub const MIN_BULLET_SPEED: f32 = 2.0;
}
