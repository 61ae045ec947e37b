//! Read-only projection of the game for renderers

use serde::Serialize;

use super::collision::Rect;
use super::particles::fade_ratio;
use super::state::{AlienId, BulletOwner, GamePhase, GameState, Vector2};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlienView {
    pub id: AlienId,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletView {
    pub id: u32,
    pub owner: BulletOwner,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub id: u32,
    pub pos: Vector2,
    pub life: u32,
    pub max_life: u32,
    /// `life / max_life`, for opacity and scale
    pub fade: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub high_score: u64,
    pub time_ticks: u64,
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub ship: Rect,
    /// Alive aliens only
    pub aliens: Vec<AlienView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
}

impl Snapshot {
    pub fn capture(state: &GameState, high_score: u64) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            level: state.level,
            high_score,
            time_ticks: state.time_ticks,
            playfield_width: state.config.playfield_width,
            playfield_height: state.config.playfield_height,
            ship: state.ship.rect(),
            aliens: state
                .alive_aliens()
                .map(|a| AlienView {
                    id: a.id,
                    rect: a.rect(),
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    id: b.id,
                    owner: b.owner,
                    rect: b.rect(),
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    id: p.id,
                    pos: p.pos,
                    life: p.life,
                    max_life: p.max_life,
                    fade: fade_ratio(p),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
