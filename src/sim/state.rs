//! Game state and core simulation types
//!
//! Plain data only; behavior lives in the sibling system modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::settings::GameConfig;

/// Position/velocity vector in playfield pixels
pub type Vector2 = Vec2;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-level, resumable as-is
    Paused,
    /// Ship destroyed or run ended
    GameOver,
}

/// Named sound event emitted by the simulation for an audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Shoot,
    AlienShoot,
    Explosion,
    LevelComplete,
    GameOver,
}

/// Normalized per-tick input (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Top-left corner
    pub pos: Vector2,
    pub width: f32,
    pub height: f32,
    /// Horizontal px/tick
    pub speed: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SHIP_START_X, SHIP_START_Y),
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            speed: SHIP_SPEED,
        }
    }
}

impl Ship {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.ship_start_x, config.ship_start_y),
            width: config.ship_width,
            height: config.ship_height,
            speed: config.ship_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// Who fired a bullet; decides direction, target and cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletOwner {
    /// Travels up, hits aliens
    Player,
    /// Travels down, hits the ship
    Alien,
}

impl BulletOwner {
    /// Cue emitted when a bullet of this owner is fired
    pub fn fire_cue(&self) -> SoundCue {
        match self {
            BulletOwner::Player => SoundCue::Shoot,
            BulletOwner::Alien => SoundCue::AlienShoot,
        }
    }
}

/// A projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Top-left corner
    pub pos: Vector2,
    pub width: f32,
    pub height: f32,
    /// Vertical px/tick, always positive; direction comes from `owner`
    pub speed: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }

    pub fn is_player(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    /// Signed per-tick vertical displacement
    pub fn velocity_y(&self) -> f32 {
        match self.owner {
            BulletOwner::Player => -self.speed,
            BulletOwner::Alien => self.speed,
        }
    }
}

/// Stable alien identity: its slot in the formation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlienId {
    pub row: u32,
    pub col: u32,
}

impl std::fmt::Display for AlienId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// A formation member. Only ever goes alive -> dead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub id: AlienId,
    /// Top-left corner
    pub pos: Vector2,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Alien {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }

    pub fn center(&self) -> Vector2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn bottom_center(&self) -> Vector2 {
        self.pos + Vec2::new(self.width / 2.0, self.height)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vector2,
    pub vel: Vector2,
    /// Ticks remaining
    pub life: u32,
    /// Life at spawn, for fade ratio
    pub max_life: u32,
}

/// Per-session difficulty knobs, scaled on each level clear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultySettings {
    /// Player bullet speed (px/tick)
    pub bullet_speed: f32,
    /// Alien descent (px/tick)
    pub alien_speed_y: f32,
    /// Per-tick, per-alive-alien fire chance
    pub alien_shoot_probability: f32,
    pub alien_rows: u32,
    pub alien_cols: u32,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            bullet_speed: START_BULLET_SPEED,
            alien_speed_y: START_ALIEN_SPEED_Y,
            alien_shoot_probability: START_ALIEN_SHOOT_PROBABILITY,
            alien_rows: ALIEN_ROWS,
            alien_cols: ALIEN_COLS,
        }
    }
}

/// Monotonic id source for bullets and particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Never decreases within a session
    pub score: u64,
    /// 1-based
    pub level: u32,
    /// Ticks simulated while Playing
    pub time_ticks: u64,
    /// Sum of `dt` over simulated ticks (seconds)
    pub elapsed: f32,
    pub ship: Ship,
    /// Both owners, in spawn order
    pub bullets: Vec<Bullet>,
    /// Current formation in row-major scan order
    pub aliens: Vec<Alien>,
    pub particles: Vec<Particle>,
    pub difficulty: DifficultySettings,
    pub config: GameConfig,
    pub ids: EntityIds,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameState {
    /// Empty state sitting in the menu
    pub fn new(config: GameConfig) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            level: 1,
            time_ticks: 0,
            elapsed: 0.0,
            ship: Ship::from_config(&config),
            bullets: Vec::new(),
            aliens: Vec::new(),
            particles: Vec::new(),
            difficulty: config.difficulty.clone(),
            config,
            ids: EntityIds::default(),
        }
    }

    pub fn player_bullet_count(&self) -> usize {
        self.bullets.iter().filter(|b| b.is_player()).count()
    }

    pub fn alive_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.alive)
    }

    pub fn alive_alien_count(&self) -> usize {
        self.alive_aliens().count()
    }

    pub fn is_level_cleared(&self) -> bool {
        self.aliens.iter().all(|a| !a.alive)
    }
}
