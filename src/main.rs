//! Star Invaders entry point
//!
//! Native builds run a headless autopilot session and report the result;
//! the browser build is driven from JavaScript through `star_invaders::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use star_invaders::consts::TICK_DT;
    use star_invaders::persistence::JsonFileStore;
    use star_invaders::sim::{BulletOwner, GamePhase, GameState, InputState, SoundCue};
    use star_invaders::{GameConfig, Session};

    /// Command line options
    #[derive(Debug)]
    pub struct Options {
        pub ticks: u64,
        pub seed: u64,
        pub config: Option<PathBuf>,
        pub store: PathBuf,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                ticks: 60 * 60 * 5,
                seed: 0x5eed,
                config: None,
                store: PathBuf::from("star_invaders_scores.json"),
            }
        }
    }

    const USAGE: &str =
        "usage: star-invaders [--ticks N] [--seed S] [--config PATH] [--store PATH]";

    pub fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, String> {
        let mut opts = Options::default();
        let mut args = args.skip(1);
        while let Some(flag) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{} needs a value", flag));
            match flag.as_str() {
                "--ticks" => {
                    opts.ticks = value()?.parse().map_err(|e| format!("--ticks: {}", e))?
                }
                "--seed" => opts.seed = value()?.parse().map_err(|e| format!("--seed: {}", e))?,
                "--config" => opts.config = Some(PathBuf::from(value()?)),
                "--store" => opts.store = PathBuf::from(value()?),
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("unknown argument {}\n{}", other, USAGE)),
            }
        }
        Ok(opts)
    }

    /// Steer under the nearest formation column, sidestep falling fire
    pub fn autopilot(state: &GameState) -> InputState {
        let ship = &state.ship;
        let ship_mid = ship.center_x();

        // Alien bullets about to land on the ship's column
        let threat = state.bullets.iter().find(|b| {
            b.owner == BulletOwner::Alien
                && b.pos.y + b.height > ship.pos.y - 60.0
                && b.pos.y < ship.pos.y + ship.height
                && b.pos.x + b.width > ship.pos.x - 4.0
                && b.pos.x < ship.pos.x + ship.width + 4.0
        });
        if let Some(bullet) = threat {
            let dodge_left = bullet.pos.x + bullet.width / 2.0 > ship_mid;
            let blocked = if dodge_left {
                ship.pos.x <= 0.0
            } else {
                ship.pos.x >= state.config.ship_max_x()
            };
            let go_left = dodge_left != blocked;
            return InputState {
                left: go_left,
                right: !go_left,
                shoot: false,
            };
        }

        let target = state
            .alive_aliens()
            .map(|a| a.center().x)
            .min_by(|a, b| {
                (a - ship_mid)
                    .abs()
                    .partial_cmp(&(b - ship_mid).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(ship_mid);

        let delta = target - ship_mid;
        InputState {
            left: delta < -ship.speed / 2.0,
            right: delta > ship.speed / 2.0,
            shoot: delta.abs() < ship.width,
        }
    }

    pub fn run(opts: Options) {
        let store = JsonFileStore::new(&opts.store);
        let mut session = match &opts.config {
            Some(path) => Session::new(GameConfig::load_or_default(path), store, opts.seed),
            None => Session::with_defaults(store, opts.seed),
        };
        let previous_best = session.high_score();

        if let Err(e) = session.start_game() {
            log::error!("Could not start: {}", e);
            return;
        }

        let mut cue_counts: HashMap<SoundCue, u64> = HashMap::new();
        let mut ticks = 0;
        while ticks < opts.ticks && session.phase() == GamePhase::Playing {
            let input = autopilot(session.state());
            for cue in session.tick(&input, TICK_DT) {
                *cue_counts.entry(cue).or_default() += 1;
            }
            ticks += 1;
        }

        if session.phase() == GamePhase::Playing {
            log::info!("Tick budget exhausted, ending run");
            let _ = session.end_game();
        }

        let snapshot = session.snapshot();
        println!("Star Invaders headless run (seed {})", session.seed());
        println!("  ticks:      {}", ticks);
        println!("  level:      {}", snapshot.level);
        println!("  score:      {}", snapshot.score);
        println!("  aliens up:  {}", session.state().alive_alien_count());
        println!(
            "  high score: {}{}",
            snapshot.high_score,
            if snapshot.high_score > previous_best { " (new!)" } else { "" }
        );
        let mut counts: Vec<_> = cue_counts.into_iter().collect();
        counts.sort_by_key(|(cue, _)| format!("{:?}", cue));
        for (cue, count) in counts {
            println!("  {:<14}{}", format!("{:?}:", cue), count);
        }

        let store = session.into_store();
        println!("  scores in:  {}", store.path().display());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Invaders (native) starting...");

    match headless::parse_args(std::env::args()) {
        Ok(opts) => headless::run(opts),
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is star_invaders::web::wasm_start, this is just to satisfy the compiler
}
