//! Entity creation: formations, bullets and explosion bursts

use glam::Vec2;
use rand::Rng;

use super::state::{
    Alien, AlienId, Bullet, BulletOwner, DifficultySettings, EntityIds, Particle, Ship, SoundCue,
};
use crate::consts::{MAX_ALIEN_COLS, MAX_ALIEN_ROWS, MAX_PARTICLE_JITTER};
use crate::settings::GameConfig;

/// Lay out a fresh `rows` x `cols` formation, all alive, in row-major order.
///
/// The alien at (r, c) sits at `origin + (c * spacing_x, r * spacing_y)`.
/// Dimensions are capped at `MAX_ALIEN_ROWS` x `MAX_ALIEN_COLS`.
pub fn spawn_formation(rows: u32, cols: u32, config: &GameConfig) -> Vec<Alien> {
    let rows = rows.min(MAX_ALIEN_ROWS);
    let cols = cols.min(MAX_ALIEN_COLS);
    let mut aliens = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            aliens.push(Alien {
                id: AlienId { row, col },
                pos: Vec2::new(
                    config.formation_origin_x + col as f32 * config.formation_spacing_x,
                    config.formation_origin_y + row as f32 * config.formation_spacing_y,
                ),
                width: config.alien_size,
                height: config.alien_size,
                alive: true,
            });
        }
    }
    aliens
}

/// Fire from the ship's midpoint unless the player-bullet cap is reached.
///
/// Denial is silent: returns `None` and emits nothing.
pub fn try_spawn_player_bullet(
    ship: &Ship,
    settings: &DifficultySettings,
    current: &[Bullet],
    config: &GameConfig,
    ids: &mut EntityIds,
    cues: &mut Vec<SoundCue>,
) -> Option<Bullet> {
    let in_flight = current.iter().filter(|b| b.is_player()).count();
    if in_flight >= config.max_player_bullets {
        return None;
    }

    let owner = BulletOwner::Player;
    cues.push(owner.fire_cue());
    Some(Bullet {
        id: ids.next_id(),
        pos: Vec2::new(ship.center_x() - config.bullet_width / 2.0, ship.pos.y),
        width: config.bullet_width,
        height: config.bullet_height,
        speed: settings.bullet_speed,
        owner,
    })
}

/// Independent Bernoulli trial per alive alien; each success fires one
/// bullet from that alien's bottom-center.
pub fn maybe_spawn_alien_bullets<R: Rng + ?Sized>(
    aliens: &[Alien],
    settings: &DifficultySettings,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut R,
    cues: &mut Vec<SoundCue>,
) -> Vec<Bullet> {
    let p = f64::from(settings.alien_shoot_probability);
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let owner = BulletOwner::Alien;
    let mut fired = Vec::new();

    for alien in aliens.iter().filter(|a| a.alive) {
        if !rng.random_bool(p) {
            continue;
        }
        let muzzle = alien.bottom_center();
        cues.push(owner.fire_cue());
        fired.push(Bullet {
            id: ids.next_id(),
            pos: Vec2::new(muzzle.x - config.bullet_width / 2.0, muzzle.y),
            width: config.bullet_width,
            height: config.bullet_height,
            speed: config.alien_bullet_speed,
            owner,
        });
    }

    fired
}

/// Burst of `count` particles at `center` with uniform random velocity
/// in [-jitter, jitter] on both axes.
pub fn spawn_explosion<R: Rng + ?Sized>(
    center: Vec2,
    count: usize,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut R,
) -> Vec<Particle> {
    let jitter = if config.particle_jitter.is_finite() {
        config.particle_jitter.min(MAX_PARTICLE_JITTER)
    } else {
        0.0
    };
    (0..count)
        .map(|_| {
            let vel = if jitter > 0.0 {
                Vec2::new(
                    rng.random_range(-jitter..=jitter),
                    rng.random_range(-jitter..=jitter),
                )
            } else {
                Vec2::ZERO
            };
            Particle {
                id: ids.next_id(),
                pos: center,
                vel,
                life: config.particle_life,
                max_life: config.particle_life,
            }
        })
        .collect()
}
