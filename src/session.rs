//! Session state machine
//!
//! Owns the authoritative `GameState`, the seeded RNG and the high-score
//! store, and exposes the Menu/Playing/Paused/GameOver transitions:
//!
//! | From     | Command      | To       |
//! |----------|--------------|----------|
//! | Menu     | Start        | Playing  |
//! | Playing  | Pause        | Paused   |
//! | Paused   | Resume       | Playing  |
//! | Playing  | End          | GameOver |
//! | Paused   | End          | GameOver |
//! | Paused   | ReturnToMenu | Menu     |
//! | GameOver | ReturnToMenu | Menu     |
//!
//! `Playing -> GameOver` also happens from inside a tick when the ship is hit.
//! Every entry into GameOver commits the high score exactly once.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::settings::GameConfig;
use crate::sim::{GamePhase, GameState, InputState, Snapshot, SoundCue, spawn_formation, tick};

/// Player/host intent that changes the session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Resume,
    End,
    ReturnToMenu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Command has no meaning in the current phase; nothing changed
    InvalidTransition {
        from: GamePhase,
        command: SessionCommand,
    },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidTransition { from, command } => {
                write!(f, "Cannot {:?} while {:?}", command, from)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// One player's run-to-run session
pub struct Session<S: ScoreStore> {
    state: GameState,
    config: GameConfig,
    rng: Pcg32,
    seed: u64,
    high_score: HighScore,
    store: S,
}

impl<S: ScoreStore> Session<S> {
    /// New session in the menu. Reads the stored high score once.
    pub fn new(config: GameConfig, store: S, seed: u64) -> Self {
        let config = config.sanitized();
        let high_score = HighScore::load(&store);
        Self {
            state: GameState::new(config.clone()),
            config,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            high_score,
            store,
        }
    }

    pub fn with_defaults(store: S, seed: u64) -> Self {
        Self::new(GameConfig::default(), store, seed)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.high_score.best)
    }

    /// Dispatch a phase command
    pub fn apply(&mut self, command: SessionCommand) -> Result<(), SessionError> {
        use GamePhase::*;
        use SessionCommand::*;

        match (self.state.phase, command) {
            (Menu, Start) => self.reset_for_play(),
            (Playing, Pause) => {
                self.state.phase = Paused;
                log::info!("Paused at tick {}", self.state.time_ticks);
            }
            (Paused, Resume) => {
                self.state.phase = Playing;
                log::info!("Resumed at tick {}", self.state.time_ticks);
            }
            (Playing | Paused, End) => {
                self.state.phase = GameOver;
                log::info!("Run ended by player (score {})", self.state.score);
                self.commit_high_score();
            }
            (Paused | GameOver, ReturnToMenu) => {
                log::info!("Back to menu (discarding score {})", self.state.score);
                self.state = GameState::new(self.config.clone());
            }
            (from, command) => {
                log::warn!("Ignoring {:?} while {:?}", command, from);
                return Err(SessionError::InvalidTransition { from, command });
            }
        }
        Ok(())
    }

    pub fn start_game(&mut self) -> Result<(), SessionError> {
        self.apply(SessionCommand::Start)
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.apply(SessionCommand::Pause)
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.apply(SessionCommand::Resume)
    }

    pub fn end_game(&mut self) -> Result<(), SessionError> {
        self.apply(SessionCommand::End)
    }

    pub fn return_to_menu(&mut self) -> Result<(), SessionError> {
        self.apply(SessionCommand::ReturnToMenu)
    }

    /// Run one simulation tick. Outside `Playing` nothing happens and no
    /// cues are returned.
    pub fn tick(&mut self, input: &InputState, dt: f32) -> Vec<SoundCue> {
        if self.state.phase != GamePhase::Playing {
            return Vec::new();
        }

        let outcome = tick(&self.state, input, dt, &mut self.rng);
        self.state = outcome.state;

        if self.state.phase == GamePhase::GameOver {
            log::info!(
                "Game over at level {} with score {}",
                self.state.level,
                self.state.score
            );
            self.commit_high_score();
        }

        outcome.cues
    }

    /// Menu -> Playing reset: score, level, entities, ship and difficulty
    fn reset_for_play(&mut self) {
        let mut state = GameState::new(self.config.clone());
        state.phase = GamePhase::Playing;
        state.aliens = spawn_formation(
            state.difficulty.alien_rows,
            state.difficulty.alien_cols,
            &state.config,
        );
        self.state = state;
        log::info!("Game started (seed {})", self.seed);
    }

    fn commit_high_score(&mut self) {
        self.high_score.commit(self.state.score, &mut self.store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_DT;
    use crate::persistence::MemoryStore;
    use crate::sim::{Bullet, BulletOwner};
    use glam::Vec2;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.difficulty.alien_shoot_probability = 0.0;
        config
    }

    fn session_with_best(best: u64) -> Session<MemoryStore> {
        Session::new(
            quiet_config(),
            MemoryStore::with_value(HighScore::STORAGE_KEY, best),
            7,
        )
    }

    /// Drop an alien bullet right on top of the ship
    fn doom_ship(session: &mut Session<MemoryStore>) {
        let id = session.state.ids.next_id();
        let ship = session.state.ship.pos;
        session.state.bullets.push(Bullet {
            id,
            pos: Vec2::new(ship.x + 10.0, ship.y),
            width: 4.0,
            height: 10.0,
            speed: 3.0,
            owner: BulletOwner::Alien,
        });
    }

    #[test]
    fn test_starts_in_menu_with_stored_best() {
        let session = session_with_best(90);
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.high_score(), 90);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut session = session_with_best(0);
        session.start_game().unwrap();

        let state = session.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.aliens.len(), 18);
        assert!(state.bullets.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.ship.pos, Vec2::new(225.0, 580.0));
        assert_eq!(state.difficulty, session.config().difficulty);
    }

    #[test]
    fn test_invalid_commands_rejected() {
        let mut session = session_with_best(0);
        assert_eq!(
            session.pause(),
            Err(SessionError::InvalidTransition {
                from: GamePhase::Menu,
                command: SessionCommand::Pause,
            })
        );
        assert!(session.resume().is_err());
        assert!(session.end_game().is_err());
        assert!(session.return_to_menu().is_err());
        assert_eq!(session.phase(), GamePhase::Menu);

        session.start_game().unwrap();
        assert!(session.start_game().is_err());
        assert!(session.return_to_menu().is_err());
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut session = session_with_best(0);
        session.start_game().unwrap();
        let hold = InputState {
            left: true,
            shoot: true,
            ..Default::default()
        };
        session.tick(&hold, TICK_DT);

        session.pause().unwrap();
        let frozen = session.state().clone();
        for _ in 0..10 {
            assert!(session.tick(&hold, TICK_DT).is_empty());
        }
        assert_eq!(session.state().bullets, frozen.bullets);
        assert_eq!(session.state().ship, frozen.ship);
        assert_eq!(session.state().time_ticks, frozen.time_ticks);

        session.resume().unwrap();
        session.tick(&hold, TICK_DT);
        assert_eq!(session.state().time_ticks, frozen.time_ticks + 1);
        assert_eq!(session.state().ship.pos.x, frozen.ship.pos.x - 5.0);
    }

    #[test]
    fn test_ship_hit_commits_improved_score() {
        let mut session = session_with_best(0);
        session.start_game().unwrap();
        session.state.score = 50;
        doom_ship(&mut session);

        let cues = session.tick(&InputState::default(), TICK_DT);

        assert!(cues.contains(&SoundCue::GameOver));
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.high_score(), 50);
        assert_eq!(session.store().get(HighScore::STORAGE_KEY), Some(50));
        assert_eq!(session.store().write_count(), 1);

        // Further ticks are inert
        assert!(session.tick(&InputState::default(), TICK_DT).is_empty());
        assert_eq!(session.store().write_count(), 1);
    }

    #[test]
    fn test_lower_or_equal_score_leaves_store_alone() {
        for score in [10, 100] {
            let mut session = session_with_best(100);
            session.start_game().unwrap();
            session.state.score = score;
            doom_ship(&mut session);
            session.tick(&InputState::default(), TICK_DT);

            assert_eq!(session.phase(), GamePhase::GameOver);
            assert_eq!(session.high_score(), 100);
            assert_eq!(session.store().write_count(), 0);
        }
    }

    #[test]
    fn test_end_game_commits() {
        let mut session = session_with_best(20);
        session.start_game().unwrap();
        session.state.score = 30;

        let cues = session.tick(&InputState::default(), TICK_DT);
        assert!(cues.is_empty());
        session.end_game().unwrap();

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.high_score(), 30);
        assert_eq!(session.store().get(HighScore::STORAGE_KEY), Some(30));
    }

    #[test]
    fn test_end_from_pause_commits() {
        let mut session = session_with_best(0);
        session.start_game().unwrap();
        session.state.score = 10;
        session.pause().unwrap();
        session.end_game().unwrap();
        assert_eq!(session.high_score(), 10);
    }

    #[test]
    fn test_abandon_from_pause_discards_without_commit() {
        let mut session = session_with_best(0);
        session.start_game().unwrap();
        session.state.score = 500;
        session.pause().unwrap();
        session.return_to_menu().unwrap();

        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 0);
        assert_eq!(session.store().write_count(), 0);
    }

    #[test]
    fn test_full_cycle_back_to_menu_and_again() {
        let mut session = session_with_best(0);
        session.start_game().unwrap();
        doom_ship(&mut session);
        session.tick(&InputState::default(), TICK_DT);
        assert_eq!(session.phase(), GamePhase::GameOver);

        session.return_to_menu().unwrap();
        assert_eq!(session.phase(), GamePhase::Menu);
        session.start_game().unwrap();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.state().aliens.len(), 18);
    }

    #[test]
    fn test_failed_store_write_is_not_fatal() {
        let mut session = Session::new(quiet_config(), MemoryStore::failing(), 1);
        session.start_game().unwrap();
        session.state.score = 40;
        doom_ship(&mut session);
        session.tick(&InputState::default(), TICK_DT);

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.high_score(), 40);
        assert_eq!(session.snapshot().high_score, 40);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut config = GameConfig::default();
            config.difficulty.alien_shoot_probability = 0.02;
            let mut session = Session::new(config, MemoryStore::new(), 1234);
            session.start_game().unwrap();
            let mut cues = Vec::new();
            for i in 0..600 {
                let input = InputState {
                    left: i % 40 < 20,
                    right: i % 40 >= 20,
                    shoot: true,
                };
                cues.extend(session.tick(&input, TICK_DT));
            }
            (session.snapshot(), cues)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_with_defaults_hands_back_store() {
        let mut session = Session::with_defaults(MemoryStore::new(), 8);
        assert_eq!(session.config(), &GameConfig::default());
        session.start_game().unwrap();
        session.state.score = 70;
        session.end_game().unwrap();

        let store = session.into_store();
        assert_eq!(store.get(HighScore::STORAGE_KEY), Some(70));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_extreme_jitter_config_survives_kills() {
        let mut config = quiet_config();
        config.particle_jitter = f32::MAX;
        let mut session = Session::new(config, MemoryStore::new(), 4);
        session.start_game().unwrap();

        for _ in 0..400 {
            session.tick(&InputState { shoot: true, ..Default::default() }, TICK_DT);
        }

        assert!(session.score() > 0);
        assert!(session.config().particle_jitter <= crate::consts::MAX_PARTICLE_JITTER);
    }
}
