//! SIGMA desktop entry point.
//!
//! Boots the SDL window and audio device, opens the mission store, seeds the
//! demo missions on first run, and drives the fixed-rate frame loop:
//! poll input, tick, render. Escape opens the exit dialog; confirming it (or
//! closing the window) ends the loop.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use sigma_audio::manager::register_default_sounds;
use sigma_audio::{AudioOutput, NullAudioOutput, SoundManager};
use sigma_backend_sdl::{SdlAudioOutput, SdlCanvas};
use sigma_game::{Game, GameCommand};
use sigma_missions::{JsonStore, list_or_empty, seed_demo};
use sigma_types::{Canvas, GameConfig};

// Clamp for debugger pauses and window drags; one late frame, not a
// fast-forwarded animation.
const MAX_FRAME_MS: u128 = 250;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var("SIGMA_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("sigma.toml"));
    let config = GameConfig::load(&config_path);
    log::info!(
        "Starting SIGMA ({}x{} @ {} Hz)",
        config.screen_width,
        config.screen_height,
        config.frame_rate,
    );

    let mut store = JsonStore::open(&config.mission_store);
    if let Err(e) = seed_demo(&mut store) {
        log::warn!("could not seed demo missions: {e}");
    }
    let missions = list_or_empty(&store);

    let mut canvas = SdlCanvas::new(
        &config.window_title,
        config.screen_width,
        config.screen_height,
    )?;

    // A machine without a sound device still gets a playable game.
    let output: Box<dyn AudioOutput> = match SdlAudioOutput::new() {
        Ok(out) => Box::new(out),
        Err(e) => {
            log::warn!("audio unavailable ({e}), continuing silent");
            Box::new(NullAudioOutput::new())
        },
    };
    let mut sounds = SoundManager::new(output).with_override_dir(config.sound_dir.clone());
    sounds.set_master_volume(config.master_volume);
    let mut synth_rng = match config.fx_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    register_default_sounds(&mut sounds, &mut synth_rng);
    if config.start_muted {
        sounds.toggle_mute();
    }
    sounds.play_music("theme", 2000);

    let mut game = Game::new(
        missions,
        sounds,
        config.screen_width,
        config.screen_height,
        config.fx_seed,
    );

    let frame_budget = config.frame_duration();
    let mut last = Instant::now();
    'running: loop {
        let frame_start = Instant::now();
        let dt_ms = frame_start.duration_since(last).as_millis().min(MAX_FRAME_MS) as u32;
        last = frame_start;

        for event in canvas.poll_events() {
            if game.handle_event(&event) == GameCommand::Quit {
                break 'running;
            }
        }

        game.tick(dt_ms);
        game.render(&mut canvas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }

    game.sounds_mut().stop_music(0);
    canvas.shutdown()?;
    log::info!("SIGMA shut down cleanly");
    Ok(())
}
