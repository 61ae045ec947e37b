//! Scoring, level completion and difficulty scaling
//!
//! There is no win state: every clear bumps the level, speeds up the
//! descent, slows player bullets toward a floor, and respawns the formation.

use super::spawn::spawn_formation;
use super::state::{DifficultySettings, GameState, SoundCue};
use crate::settings::GameConfig;

impl DifficultySettings {
    /// Difficulty for the level after this one. Grid shape is unchanged.
    pub fn next_level(&self, config: &GameConfig) -> Self {
        Self {
            bullet_speed: (self.bullet_speed - config.level_speed_step)
                .max(config.min_bullet_speed),
            alien_speed_y: self.alien_speed_y + config.level_speed_step,
            ..self.clone()
        }
    }
}

/// Credit one kill
pub fn award_kill(state: &mut GameState) {
    state.score = state.score.saturating_add(state.config.points_per_kill);
}

/// If every alien in the formation is dead, advance to the next level.
///
/// Returns true when a level was completed this call.
pub fn check_level_clear(state: &mut GameState, cues: &mut Vec<SoundCue>) -> bool {
    if !state.is_level_cleared() {
        return false;
    }

    state.level += 1;
    state.difficulty = state.difficulty.next_level(&state.config);
    state.aliens = spawn_formation(
        state.difficulty.alien_rows,
        state.difficulty.alien_cols,
        &state.config,
    );
    cues.push(SoundCue::LevelComplete);

    log::info!(
        "Level {} reached (score {}, descent {:.1}, bullet speed {:.1})",
        state.level,
        state.score,
        state.difficulty.alien_speed_y,
        state.difficulty.bullet_speed
    );
    true
}
