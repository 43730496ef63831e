//! Fruit Catcher entry point
//!
//! Runs the game loop headless: textures and sounds are resolved against the
//! asset root, the autopilot plays, and draw commands go to a counting
//! renderer. A JSON summary of the run is printed at the end.

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use serde::Serialize;

    use fruit_catcher::GameConfig;
    use fruit_catcher::assets::{AssetRegistry, HeadlessLoader};
    use fruit_catcher::audio::{AudioManager, HeadlessAudio};
    use fruit_catcher::consts::MAX_FRAME_DT;
    use fruit_catcher::input::InputTracker;
    use fruit_catcher::renderer::{CountingRenderer, Frame};
    use fruit_catcher::sim::{Category, GameEvent, GamePhase, Session, tick};

    #[derive(Parser, Debug)]
    #[command(about = "Play Fruit Catcher on autopilot and report the run", version)]
    pub struct Args {
        /// Configuration file (defaults are used when it is missing)
        #[arg(long, default_value = fruit_catcher::config::DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Directory asset paths are resolved against
        #[arg(long, default_value = ".")]
        assets: PathBuf,
        /// RNG seed; time-based when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated seconds before the run is cut off
        #[arg(long, default_value_t = 120.0)]
        seconds: f32,
        /// Frame delta fed to each tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        frame_dt: f32,
        /// Keep playing after game over (restarts on the next frame)
        #[arg(long)]
        endless: bool,
        /// Pretty-print the summary
        #[arg(long)]
        pretty: bool,
    }

    #[derive(Debug, Default, Serialize)]
    struct RunSummary {
        seed: u64,
        phase: Option<GamePhase>,
        score: u32,
        best_score: u32,
        lives: u32,
        level: u32,
        games: u32,
        playing_ticks: u64,
        frames: u64,
        seconds: f32,
        fruit_spawned: u32,
        insects_spawned: u32,
        sounds: std::collections::BTreeMap<String, u32>,
        sprites_drawn: u64,
        hud_drawn: u64,
        offscreen_draws: u64,
        textures_drawn: usize,
    }

    impl RunSummary {
        fn record(&mut self, event: &GameEvent) {
            match *event {
                GameEvent::Started => self.games += 1,
                GameEvent::Spawned { category, .. } => match category {
                    Category::Fruit => self.fruit_spawned += 1,
                    Category::Insect => self.insects_spawned += 1,
                    Category::Basket => {}
                },
                GameEvent::FruitCaught { score } => self.best_score = self.best_score.max(score),
                _ => {}
            }
        }
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run(args: Args) -> Result<(), serde_json::Error> {
        let config = GameConfig::load(&args.config);
        let seed = args.seed.unwrap_or_else(time_seed);
        let frame_dt = if args.frame_dt.is_finite() && args.frame_dt > 0.0 {
            args.frame_dt.min(MAX_FRAME_DT)
        } else {
            log::warn!("Invalid frame delta {}, using 1/60", args.frame_dt);
            1.0 / 60.0
        };

        let mut loader = HeadlessLoader::new(&args.assets);
        let assets = AssetRegistry::load(&config.assets, &mut loader);
        log::info!("{} textures loaded", loader.loaded().len());

        let mut audio = AudioManager::new(HeadlessAudio::new(&args.assets));
        audio.load(&config.assets);
        audio.start_music();

        let mut session =
            Session::new(&config, assets.spawn_catalog(), assets.basket_texture(), seed);
        let mut input = InputTracker::new();
        input.set_idle_mode(true);
        let mut renderer = CountingRenderer::new(session.screen);

        log::info!("{} starting with seed: {}", config.window.title, seed);

        let mut summary = RunSummary {
            seed,
            ..Default::default()
        };
        let mut elapsed = 0.0_f32;
        let mut frames = 0_u64;

        while elapsed < args.seconds && !input.quit_requested() {
            let cmd = input.tick_input();
            tick(&mut session, &cmd, frame_dt);

            let mut finished = false;
            for event in session.drain_events() {
                audio.handle_event(&event);
                summary.record(&event);
                match event {
                    GameEvent::LevelUp { level, .. } => log::debug!("Reached level {level}"),
                    GameEvent::GameOver { score } => {
                        log::info!("Game over after {elapsed:.1}s, score {score}");
                        finished = !args.endless;
                    }
                    _ => {}
                }
            }

            Frame::build(&session, &assets).submit(&mut renderer);
            frames += 1;
            elapsed += frame_dt;

            if finished {
                break;
            }
        }
        audio.stop_music();

        summary.phase = Some(session.phase);
        summary.score = session.score;
        summary.best_score = summary.best_score.max(session.score);
        summary.lives = session.lives;
        summary.level = session.spawner.level;
        summary.playing_ticks = session.time_ticks;
        summary.frames = frames;
        summary.seconds = elapsed;
        summary.sounds = audio.backend().plays.clone();
        summary.sprites_drawn = renderer.sprites;
        summary.hud_drawn = renderer.hud_elements;
        summary.offscreen_draws = renderer.offscreen;
        summary.textures_drawn = renderer.per_texture.len();

        let json = if args.pretty {
            serde_json::to_string_pretty(&summary)?
        } else {
            serde_json::to_string(&summary)?
        };
        println!("{json}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Fruit Catcher (headless) starting...");

    if let Err(e) = runner::run(runner::Args::parse()) {
        log::error!("Failed to write run summary: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web
}
