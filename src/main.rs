//! Time Attack entry point
//!
//! Runs a headless attract-mode match: bots play both seats on a fixed 60 Hz
//! clock, events are logged and the final frame's HUD is printed.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Time Attack (headless) starting...");

    if let Err(err) = headless::run() {
        log::error!("Simulation stopped: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives the simulation itself
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use time_attack::audio::SoundBank;
    use time_attack::consts::SIM_DT;
    use time_attack::persistence::SaveFile;
    use time_attack::renderer;
    use time_attack::sim::{
        FrameTime, GameEvent, MatchPhase, MatchSetup, MatchState, SimError, TextureSet, TickInput,
        tick,
    };
    use time_attack::{HighScores, Settings};

    pub fn run() -> Result<(), SimError> {
        let settings = Settings::load(&Settings::default_path());
        let mut store = SaveFile::new(settings.save_file_path());
        log::info!("High scores at {}", store.path().display());

        let tuning = settings.tuning.clone();
        // Cap the run at the lead-in plus match length, with slack
        let limit = tuning.lead_in_secs + f64::from(tuning.match_duration_secs) + 10.0;
        let setup = MatchSetup {
            textures: TextureSet::uniform(tuning.tile_length),
            sounds: SoundBank::sequential(),
            high_scores: HighScores::load(&store),
            tuning,
        };
        let mut state = MatchState::new(setup, 0.0)?;

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut total = 0.0;
        while state.phase != MatchPhase::GameOver && !state.exit_requested && total < limit {
            total += SIM_DT;
            tick(&mut state, &input, FrameTime::new(total, SIM_DT), &mut store)?;
            for event in &state.events {
                match event {
                    GameEvent::Sound(_) => {}
                    GameEvent::PhaseChanged(phase) => log::info!("{:.2}s: {:?}", total, phase),
                    other => log::debug!("{:.2}s: {:?}", total, other),
                }
            }
        }

        let frame = renderer::render(&state);
        println!("{}", frame.title);
        for text in frame.texts() {
            println!("  {text}");
        }
        Ok(())
    }
}
