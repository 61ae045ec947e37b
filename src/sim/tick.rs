//! Fixed-order simulation tick
//!
//! Produces the next state from the previous one plus input. Only the
//! `Playing` phase is simulated; every other phase passes through unchanged.

use rand::Rng;

use super::collision::{resolve_player_hits, resolve_ship_hit};
use super::movement::{advance_alien_bullets, advance_aliens, advance_player_bullets, move_ship};
use super::particles::advance_particles;
use super::progression::check_level_clear;
use super::spawn::{maybe_spawn_alien_bullets, try_spawn_player_bullet};
use super::state::{GamePhase, GameState, InputState, SoundCue};

/// Result of one tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    /// Sound cues in emission order
    pub cues: Vec<SoundCue>,
}

/// Advance the game by one tick.
///
/// Order is load-bearing: collisions see this tick's movement, and the
/// level-clear check sees this tick's kills.
pub fn tick<R: Rng + ?Sized>(
    prev: &GameState,
    input: &InputState,
    dt: f32,
    rng: &mut R,
) -> TickOutcome {
    let mut state = prev.clone();
    let mut cues = Vec::new();

    if state.phase != GamePhase::Playing {
        return TickOutcome { state, cues };
    }

    state.time_ticks += 1;
    state.elapsed += dt.max(0.0);

    // 1. Ship
    move_ship(&mut state.ship, input, state.config.playfield_width);

    // 2. Player fire
    if input.shoot {
        if let Some(bullet) = try_spawn_player_bullet(
            &state.ship,
            &state.difficulty,
            &state.bullets,
            &state.config,
            &mut state.ids,
            &mut cues,
        ) {
            state.bullets.push(bullet);
        }
    }

    // 3-4. Projectiles
    advance_player_bullets(&mut state.bullets);
    advance_alien_bullets(&mut state.bullets, state.config.playfield_height);

    // 5. Alien fire
    let fired = maybe_spawn_alien_bullets(
        &state.aliens,
        &state.difficulty,
        &state.config,
        &mut state.ids,
        rng,
        &mut cues,
    );
    state.bullets.extend(fired);

    // 6. Formation descent
    advance_aliens(&mut state.aliens, state.difficulty.alien_speed_y);

    // 7-8. Collisions
    resolve_player_hits(&mut state, rng, &mut cues);
    let ship_destroyed = resolve_ship_hit(&mut state, &mut cues);

    // 9. Level progression (the run is over if the ship just died)
    if !ship_destroyed {
        check_level_clear(&mut state, &mut cues);
    }

    // 10. Effects
    advance_particles(&mut state.particles);

    TickOutcome { state, cues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_DT;
    use crate::sim::spawn::spawn_formation;
    use crate::sim::state::{Bullet, BulletOwner};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Playing state with a quiet formation (no alien fire)
    fn quiet_state() -> GameState {
        let mut state = GameState::default();
        state.phase = GamePhase::Playing;
        state.difficulty.alien_shoot_probability = 0.0;
        state.aliens = spawn_formation(3, 6, &state.config);
        state
    }

    fn shoot() -> InputState {
        InputState {
            shoot: true,
            ..Default::default()
        }
    }

    fn step(state: &GameState, input: &InputState, rng: &mut Pcg32) -> TickOutcome {
        tick(state, input, TICK_DT, rng)
    }

    #[test]
    fn test_tick_leaves_previous_state_untouched() {
        let state = quiet_state();
        let before = state.clone();
        let mut rng = Pcg32::seed_from_u64(1);

        let out = step(&state, &shoot(), &mut rng);

        assert_eq!(state, before);
        assert_eq!(out.state.time_ticks, 1);
        assert_eq!(out.state.player_bullet_count(), 1);
    }

    #[test]
    fn test_non_playing_phases_do_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        for phase in [GamePhase::Menu, GamePhase::Paused, GamePhase::GameOver] {
            let mut state = quiet_state();
            state.phase = phase;
            let out = step(&state, &shoot(), &mut rng);
            assert_eq!(out.state, state);
            assert!(out.cues.is_empty());
        }
    }

    #[test]
    fn test_fired_bullet_moves_same_tick() {
        let state = quiet_state();
        let mut rng = Pcg32::seed_from_u64(1);

        let out = step(&state, &shoot(), &mut rng);

        assert_eq!(out.cues, vec![SoundCue::Shoot]);
        let bullet = &out.state.bullets[0];
        assert_eq!(bullet.pos, Vec2::new(238.0, 576.0));
    }

    #[test]
    fn test_bullet_flies_off_screen_without_scoring() {
        let mut state = quiet_state();
        // Push the formation out of the firing lane
        for alien in &mut state.aliens {
            alien.pos.x += 1000.0;
        }
        let mut rng = Pcg32::seed_from_u64(1);

        state = step(&state, &shoot(), &mut rng).state;
        assert_eq!(state.bullets.len(), 1);
        let mut last_y = state.bullets[0].pos.y;

        let idle = InputState::default();
        loop {
            state = step(&state, &idle, &mut rng).state;
            match state.bullets.first() {
                Some(b) => {
                    assert_eq!(b.pos.y, last_y - 4.0);
                    assert!(b.pos.y >= 0.0);
                    last_y = b.pos.y;
                }
                None => break,
            }
        }

        assert!(last_y - 4.0 < 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_kill_scores_and_spawns_particles() {
        let mut state = quiet_state();
        // Bullet just below alien 0-0, moving into it this tick
        let id = state.ids.next_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(70.0, 62.0),
            width: 4.0,
            height: 10.0,
            speed: 4.0,
            owner: BulletOwner::Player,
        });
        let mut rng = Pcg32::seed_from_u64(9);

        let out = step(&state, &InputState::default(), &mut rng);

        assert!(!out.state.aliens[0].alive);
        assert!(out.state.bullets.is_empty());
        assert_eq!(out.state.score, 10);
        assert_eq!(out.cues, vec![SoundCue::Explosion]);
        assert_eq!(out.state.particles.len(), 8);
        // Particles have already aged one tick
        assert!(out.state.particles.iter().all(|p| p.life == 29));
    }

    #[test]
    fn test_last_kill_advances_level_next_state() {
        let mut state = quiet_state();
        for alien in state.aliens.iter_mut().skip(1) {
            alien.alive = false;
        }
        let id = state.ids.next_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(70.0, 62.0),
            width: 4.0,
            height: 10.0,
            speed: 4.0,
            owner: BulletOwner::Player,
        });
        let mut rng = Pcg32::seed_from_u64(9);

        let out = step(&state, &InputState::default(), &mut rng);

        assert_eq!(out.state.level, 2);
        assert_eq!(out.state.score, 10);
        assert_eq!(out.state.aliens.len(), 18);
        assert!(out.state.aliens.iter().all(|a| a.alive));
        assert!((out.state.difficulty.alien_speed_y - 0.4).abs() < 1e-6);
        assert!((out.state.difficulty.bullet_speed - 3.8).abs() < 1e-6);
        assert_eq!(out.cues, vec![SoundCue::Explosion, SoundCue::LevelComplete]);
    }

    #[test]
    fn test_alien_bullet_reaches_ship() {
        let mut state = quiet_state();
        state.score = 40;
        let id = state.ids.next_id();
        // Ship spans y 580..610; bullet bottom at 560 falls 3/tick
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(238.0, 550.0),
            width: 4.0,
            height: 10.0,
            speed: 3.0,
            owner: BulletOwner::Alien,
        });
        let mut rng = Pcg32::seed_from_u64(2);
        let idle = InputState::default();

        let mut ticks = 0;
        while state.phase == GamePhase::Playing {
            let before = state.bullets.iter().find(|b| b.id == id).map(|b| b.pos.y);
            let out = step(&state, &idle, &mut rng);
            ticks += 1;
            if out.state.phase == GamePhase::Playing {
                let after = out.state.bullets.iter().find(|b| b.id == id).unwrap().pos.y;
                assert_eq!(after, before.unwrap() + 3.0);
            } else {
                assert!(out.cues.contains(&SoundCue::GameOver));
                assert!(out.state.bullets.iter().all(|b| b.id != id));
            }
            state = out.state;
            assert!(ticks < 100);
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        // First overlap at y = 571 (bottom edge 581 > 580)
        assert_eq!(ticks, 7);
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_ship_death_skips_level_clear() {
        let mut state = quiet_state();
        for alien in &mut state.aliens {
            alien.alive = false;
        }
        let id = state.ids.next_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(238.0, 580.0),
            width: 4.0,
            height: 10.0,
            speed: 3.0,
            owner: BulletOwner::Alien,
        });
        let mut rng = Pcg32::seed_from_u64(2);

        let out = step(&state, &InputState::default(), &mut rng);

        assert_eq!(out.state.phase, GamePhase::GameOver);
        assert_eq!(out.state.level, 1);
        assert_eq!(out.cues, vec![SoundCue::GameOver]);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = quiet_state();
        state1.difficulty.alien_shoot_probability = 0.05;
        let mut state2 = state1.clone();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        let inputs = [
            InputState { left: true, ..Default::default() },
            shoot(),
            InputState { right: true, shoot: true, ..Default::default() },
            InputState::default(),
        ];

        for i in 0..400 {
            let input = &inputs[i % inputs.len()];
            let a = step(&state1, input, &mut rng1);
            let b = step(&state2, input, &mut rng2);
            assert_eq!(a.cues, b.cues);
            state1 = a.state;
            state2 = b.state;
        }

        assert_eq!(state1, state2);
    }

    #[test]
    fn test_alien_ids_stable_while_killing() {
        let mut state = quiet_state();
        let mut rng = Pcg32::seed_from_u64(21);
        let ids_before: Vec<_> = state.aliens.iter().map(|a| a.id).collect();

        // Ship starts under column 3
        for _ in 0..200 {
            state = step(&state, &shoot(), &mut rng).state;
        }

        let ids_after: Vec<_> = state.aliens.iter().map(|a| a.id).collect();
        assert_eq!(ids_before, ids_after);
        assert!(state.score > 0);
        assert_eq!(state.level, 1);
        assert!(state.alive_alien_count() < 18);
    }

    #[test]
    fn test_degenerate_config_does_not_panic() {
        let mut state = quiet_state();
        state.difficulty.alien_shoot_probability = f32::NAN;
        state.config.particle_jitter = f32::MAX;
        let mut rng = Pcg32::seed_from_u64(2);

        for _ in 0..400 {
            state = step(&state, &shoot(), &mut rng).state;
        }

        assert!(state.score > 0);
        assert!(state.bullets.iter().all(|b| b.is_player()));
        assert!(state.particles.iter().all(|p| p.vel.is_finite()));
    }

    fn arb_input() -> impl Strategy<Value = InputState> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, shoot)| {
            InputState { left, right, shoot }
        })
    }

    proptest! {
        #[test]
        fn prop_ship_stays_in_bounds(inputs in prop::collection::vec(arb_input(), 1..300)) {
            let mut state = quiet_state();
            let mut rng = Pcg32::seed_from_u64(5);
            for input in &inputs {
                state = step(&state, input, &mut rng).state;
                prop_assert!(state.ship.pos.x >= 0.0);
                prop_assert!(state.ship.pos.x <= 450.0);
            }
        }

        #[test]
        fn prop_player_bullet_cap(hold in 1usize..400, seed in any::<u64>()) {
            let mut state = quiet_state();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..hold {
                state = step(&state, &shoot(), &mut rng).state;
                prop_assert!(state.player_bullet_count() <= 5);
            }
        }

        #[test]
        fn prop_score_and_particle_life_monotonic(
            inputs in prop::collection::vec(arb_input(), 1..300),
            seed in any::<u64>(),
        ) {
            let mut state = quiet_state();
            state.difficulty.alien_shoot_probability = 0.01;
            let mut rng = Pcg32::seed_from_u64(seed);
            for input in &inputs {
                let next = step(&state, input, &mut rng).state;
                prop_assert!(next.score >= state.score);
                for p in &next.particles {
                    prop_assert!(p.life > 0);
                    if let Some(old) = state.particles.iter().find(|o| o.id == p.id) {
                        prop_assert!(p.life < old.life);
                    }
                }
                state = next;
            }
        }
    }
}
