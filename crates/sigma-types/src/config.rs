//! Game configuration.
//!
//! Loaded from an optional TOML file; every field has a sensible default and
//! malformed values are substituted (with a warning) rather than rejected.
//! Nothing in here can fail the boot.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;
const DEFAULT_FRAME_RATE: u32 = 60;

fn default_title() -> String {
    "SIGMA: AI Hacker Protocol".to_string()
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

fn default_volume() -> f32 {
    0.5
}

fn default_store_path() -> PathBuf {
    PathBuf::from("missions.json")
}

fn default_sound_dir() -> PathBuf {
    PathBuf::from("assets/sounds")
}

/// Runtime configuration for the game.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window caption.
    pub window_title: String,
    /// Canvas width in pixels.
    pub screen_width: u32,
    /// Canvas height in pixels.
    pub screen_height: u32,
    /// Frame cap in Hz.
    pub frame_rate: u32,
    /// Master volume applied to every sound, 0.0 to 1.0.
    pub master_volume: f32,
    /// Start with audio muted.
    pub start_muted: bool,
    /// Path to the JSON mission store.
    pub mission_store: PathBuf,
    /// Directory searched for per-sound WAV overrides.
    pub sound_dir: PathBuf,
    /// Fixed seed for decorative effects. None seeds from entropy.
    pub fx_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: default_title(),
            screen_width: default_width(),
            screen_height: default_height(),
            frame_rate: default_frame_rate(),
            master_volume: default_volume(),
            start_muted: false,
            mission_store: default_store_path(),
            sound_dir: default_sound_dir(),
            fx_seed: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file
    /// is logged and yields the defaults too. Loaded values are passed
    /// through [`GameConfig::sanitize`].
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("could not read {}: {e}, using defaults", path.display());
                return Self::default();
            },
        };
        let mut config: GameConfig = match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("malformed config {}: {e}, using defaults", path.display());
                return Self::default();
            },
        };
        config.sanitize();
        config
    }

    /// Replace out-of-range values with safe defaults, logging each fix.
    pub fn sanitize(&mut self) {
        if self.screen_width == 0 {
            log::warn!("screen_width 0 is invalid, using {DEFAULT_WIDTH}");
            self.screen_width = DEFAULT_WIDTH;
        }
        if self.screen_height == 0 {
            log::warn!("screen_height 0 is invalid, using {DEFAULT_HEIGHT}");
            self.screen_height = DEFAULT_HEIGHT;
        }
        if self.frame_rate == 0 {
            log::warn!("frame_rate 0 is invalid, using {DEFAULT_FRAME_RATE}");
            self.frame_rate = DEFAULT_FRAME_RATE;
        }
        if !(0.0..=1.0).contains(&self.master_volume) {
            log::warn!(
                "master_volume {} out of range, clamping",
                self.master_volume
            );
            self.master_volume = self.master_volume.clamp(0.0, 1.0);
            if !self.master_volume.is_finite() {
                self.master_volume = default_volume();
            }
        }
    }

    /// Frame budget for the configured frame rate.
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.frame_rate as f64)
    }
}
