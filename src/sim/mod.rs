//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no clock
//! - Injected RNG only
//! - Stable iteration order (formation scan order, bullet spawn order)
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod movement;
pub mod particles;
pub mod progression;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Kill, Rect, intersects, resolve_player_hits, resolve_ship_hit};
pub use movement::{advance_alien_bullets, advance_aliens, advance_player_bullets, move_ship};
pub use particles::{advance_particles, fade_ratio};
pub use progression::{award_kill, check_level_clear};
pub use snapshot::{AlienView, BulletView, ParticleView, Snapshot};
pub use spawn::{maybe_spawn_alien_bullets, spawn_explosion, spawn_formation, try_spawn_player_bullet};
pub use state::{
    Alien, AlienId, Bullet, BulletOwner, DifficultySettings, EntityIds, GamePhase, GameState,
    InputState, Particle, Ship, SoundCue, Vector2,
};
pub use tick::{TickOutcome, tick};
