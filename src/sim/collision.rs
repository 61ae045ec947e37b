//! Axis-aligned collision detection and resolution
//!
//! Both resolvers run on post-movement positions. A player bullet is
//! consumed by at most one alien per tick: the first alive alien in
//! formation scan order that it overlaps.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::progression::award_kill;
use super::spawn::spawn_explosion;
use super::state::{AlienId, BulletOwner, GamePhase, GameState, SoundCue};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(pos: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w,
            h,
        }
    }

    /// Strict overlap on both axes; touching edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Free-function form of [`Rect::intersects`]
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// A player bullet that destroyed an alien this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub bullet_id: u32,
    pub alien: AlienId,
    pub center: Vec2,
}

/// Resolve player bullets against alive aliens.
///
/// Each hit kills the alien, removes the bullet, scores, emits an
/// `Explosion` cue and spawns a particle burst at the alien's center.
pub fn resolve_player_hits<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    cues: &mut Vec<SoundCue>,
) -> Vec<Kill> {
    let mut kills = Vec::new();

    for bullet in state.bullets.iter().filter(|b| b.is_player()) {
        let rect = bullet.rect();
        // First match wins; later aliens never see this bullet
        if let Some(alien) = state
            .aliens
            .iter_mut()
            .find(|a| a.alive && rect.intersects(&a.rect()))
        {
            alien.alive = false;
            kills.push(Kill {
                bullet_id: bullet.id,
                alien: alien.id,
                center: alien.center(),
            });
        }
    }

    if kills.is_empty() {
        return kills;
    }

    state
        .bullets
        .retain(|b| !kills.iter().any(|k| k.bullet_id == b.id));

    for kill in &kills {
        log::debug!("Alien {} destroyed by bullet {}", kill.alien, kill.bullet_id);
        award_kill(state);
        cues.push(SoundCue::Explosion);
        let burst = spawn_explosion(
            kill.center,
            state.config.explosion_particles,
            &state.config,
            &mut state.ids,
            rng,
        );
        state.particles.extend(burst);
    }

    kills
}

/// Resolve alien bullets against the ship.
///
/// The first overlapping bullet is removed, a `GameOver` cue fires and the
/// phase becomes `GameOver`. Returns true if the ship was hit.
pub fn resolve_ship_hit(state: &mut GameState, cues: &mut Vec<SoundCue>) -> bool {
    let ship = state.ship.rect();
    let hit = state
        .bullets
        .iter()
        .position(|b| b.owner == BulletOwner::Alien && b.rect().intersects(&ship));

    let Some(index) = hit else {
        return false;
    };

    let bullet = state.bullets.remove(index);
    log::info!(
        "Ship hit by bullet {} at tick {} (score {})",
        bullet.id,
        state.time_ticks,
        state.score
    );
    cues.push(SoundCue::GameOver);
    state.phase = GamePhase::GameOver;
    true
}
