//! Position updates from input and per-tick velocities

use super::state::{Alien, Bullet, BulletOwner, InputState, Ship};

/// Move the ship horizontally and clamp it to `[0, playfield_width - width]`.
///
/// Left is applied before right, so holding both nets to zero.
pub fn move_ship(ship: &mut Ship, input: &InputState, playfield_width: f32) {
    let mut x = ship.pos.x;
    if input.left {
        x -= ship.speed;
    }
    if input.right {
        x += ship.speed;
    }
    let max_x = (playfield_width - ship.width).max(0.0);
    ship.pos.x = x.clamp(0.0, max_x);
}

/// Advance player bullets upward; drop those that have left the top (y < 0)
pub fn advance_player_bullets(bullets: &mut Vec<Bullet>) {
    for bullet in bullets.iter_mut().filter(|b| b.owner == BulletOwner::Player) {
        bullet.pos.y += bullet.velocity_y();
    }
    bullets.retain(|b| b.owner != BulletOwner::Player || b.pos.y >= 0.0);
}

/// Advance alien bullets downward; drop those at or past the bottom edge
pub fn advance_alien_bullets(bullets: &mut Vec<Bullet>, playfield_height: f32) {
    for bullet in bullets.iter_mut().filter(|b| b.owner == BulletOwner::Alien) {
        bullet.pos.y += bullet.velocity_y();
    }
    bullets.retain(|b| b.owner != BulletOwner::Alien || b.pos.y < playfield_height);
}

/// Vertical creep of the formation; dead aliens stay put
pub fn advance_aliens(aliens: &mut [Alien], speed_y: f32) {
    for alien in aliens.iter_mut().filter(|a| a.alive) {
        alien.pos.y += speed_y;
    }
}
