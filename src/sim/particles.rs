//! Explosion particle lifecycle (visual only, never affects gameplay)

use super::state::Particle;

/// Move each particle by its velocity, age it one tick, and drop the
/// expired ones. A particle never survives a tick with `life == 0`.
pub fn advance_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

/// Remaining-life ratio in [0, 1] used for fading
pub fn fade_ratio(particle: &Particle) -> f32 {
    if particle.max_life == 0 {
        return 0.0;
    }
    (particle.life as f32 / particle.max_life as f32).clamp(0.0, 1.0)
}
