//! Named sound and music management.
//!
//! The manager owns the playback output and all registered buffers. It is a
//! plain owned value handed to the game -- mute and volume state live here,
//! not in a global. Playback failures (muted, unknown name, pool exhausted)
//! are silent no-ops by contract.

use std::collections::HashMap;
use std::path::PathBuf;

use rand::Rng;

use crate::output::{AudioOutput, ChannelId};
use crate::synth::{self, Pcm};
use crate::wav;

/// Default playback volume when the caller does not care.
pub const DEFAULT_VOLUME: f32 = 0.5;

struct Sound {
    pcm: Pcm,
    /// Last volume this sound was played at. Survives mute/unmute.
    volume: f32,
}

struct Fade {
    from: f32,
    to: f32,
    elapsed_ms: u32,
    duration_ms: u32,
    stop_at_end: bool,
}

struct Music {
    name: String,
    channel: ChannelId,
    target_volume: f32,
    fade: Option<Fade>,
}

/// Owns named sounds, channel assignment, mute state, and music fades.
pub struct SoundManager {
    output: Box<dyn AudioOutput>,
    sounds: HashMap<String, Sound>,
    override_dir: Option<PathBuf>,
    muted: bool,
    master_volume: f32,
    music: Option<Music>,
}

impl SoundManager {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            sounds: HashMap::new(),
            override_dir: None,
            muted: false,
            master_volume: 1.0,
            music: None,
        }
    }

    /// Directory searched for `<name>.wav` overrides during registration.
    pub fn with_override_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.override_dir = Some(dir.into());
        self
    }

    /// Master volume multiplied into every play. Out-of-range values are
    /// clamped with a warning.
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = sanitize_volume(volume);
    }

    /// Register a generated sound under `name`. Idempotent: a second
    /// registration of the same name is ignored. An on-disk WAV override
    /// takes precedence over the generated default; a broken override falls
    /// back to the default with a warning.
    pub fn register(&mut self, name: &str, default: Pcm) {
        if self.sounds.contains_key(name) {
            return;
        }
        let pcm = match self.load_override(name) {
            Some(pcm) => pcm,
            None => default,
        };
        self.sounds.insert(
            name.to_string(),
            Sound {
                pcm,
                volume: DEFAULT_VOLUME,
            },
        );
    }

    fn load_override(&self, name: &str) -> Option<Pcm> {
        let dir = self.override_dir.as_ref()?;
        let path = dir.join(format!("{name}.wav"));
        if !path.exists() {
            return None;
        }
        match wav::load(&path) {
            Ok(pcm) => {
                log::info!("loaded sound override {}", path.display());
                Some(pcm)
            },
            Err(e) => {
                log::warn!(
                    "failed to load {}, using generated default: {e}",
                    path.display()
                );
                None
            },
        }
    }

    /// Play a registered sound once. Returns the claimed channel, or `None`
    /// when muted, the name is unknown, or no channel is free. Never errors.
    pub fn play(&mut self, name: &str, volume: f32) -> Option<ChannelId> {
        self.play_inner(name, volume, false)
    }

    /// Play a registered sound on loop until stopped.
    pub fn play_looping(&mut self, name: &str, volume: f32) -> Option<ChannelId> {
        self.play_inner(name, volume, true)
    }

    fn play_inner(&mut self, name: &str, volume: f32, looping: bool) -> Option<ChannelId> {
        let volume = sanitize_volume(volume);
        let master = self.master_volume;
        let muted = self.muted;
        let Some(sound) = self.sounds.get_mut(name) else {
            log::warn!("play of unregistered sound '{name}' ignored");
            return None;
        };
        sound.volume = volume;
        if muted {
            return None;
        }
        self.output.play(&sound.pcm, volume * master, looping)
    }

    /// Start a music track, replacing any current one. With a nonzero
    /// `fade_in_ms` the track ramps from silence to its last-set volume.
    /// While muted the channel still starts, at zero volume, so that
    /// un-muting restores it like any running track.
    pub fn play_music(&mut self, name: &str, fade_in_ms: u32) {
        self.stop_music(0);
        let master = self.master_volume;
        let Some(sound) = self.sounds.get(name) else {
            log::warn!("play_music of unregistered track '{name}' ignored");
            return;
        };
        let target = sound.volume;
        let start = if fade_in_ms > 0 { 0.0 } else { target };
        let device_start = if self.muted { 0.0 } else { start * master };
        let Some(channel) = self.output.play(&sound.pcm, device_start, true) else {
            log::warn!("no free channel for music track '{name}'");
            return;
        };
        let fade = (fade_in_ms > 0).then_some(Fade {
            from: 0.0,
            to: target,
            elapsed_ms: 0,
            duration_ms: fade_in_ms,
            stop_at_end: false,
        });
        self.music = Some(Music {
            name: name.to_string(),
            channel,
            target_volume: target,
            fade,
        });
    }

    /// Stop the current music track, immediately or over a fade.
    pub fn stop_music(&mut self, fade_out_ms: u32) {
        let Some(music) = self.music.as_mut() else {
            return;
        };
        if fade_out_ms == 0 {
            self.output.stop(music.channel);
            self.music = None;
        } else {
            let from = current_fade_volume(music);
            music.fade = Some(Fade {
                from,
                to: 0.0,
                elapsed_ms: 0,
                duration_ms: fade_out_ms,
                stop_at_end: true,
            });
        }
    }

    /// Name of the active music track, if any.
    pub fn music_playing(&self) -> Option<&str> {
        self.music.as_ref().map(|m| m.name.as_str())
    }

    /// Flip the mute flag. While muted every play is a no-op and the music
    /// channel is silenced; un-muting restores last-set volumes exactly.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if let Some(music) = &self.music {
            let v = if self.muted {
                0.0
            } else {
                current_fade_volume(music) * self.master_volume
            };
            self.output.set_volume(music.channel, v);
        }
        log::info!("audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Last-set volume of a registered sound.
    pub fn volume(&self, name: &str) -> Option<f32> {
        self.sounds.get(name).map(|s| s.volume)
    }

    /// Advance playback time and music fades. Call once per frame.
    pub fn tick(&mut self, dt_ms: u32) {
        self.output.advance(dt_ms);
        let Some(music) = self.music.as_mut() else {
            return;
        };
        let Some(fade) = music.fade.as_mut() else {
            return;
        };
        fade.elapsed_ms = (fade.elapsed_ms + dt_ms).min(fade.duration_ms);
        let t = fade.elapsed_ms as f32 / fade.duration_ms.max(1) as f32;
        let v = fade.from + (fade.to - fade.from) * t;
        if !self.muted {
            self.output.set_volume(music.channel, v * self.master_volume);
        }
        if fade.elapsed_ms >= fade.duration_ms {
            let stop = fade.stop_at_end;
            music.fade = None;
            if stop {
                self.output.stop(music.channel);
                self.music = None;
            }
        }
    }

    /// Access the underlying output (tests and the frame loop use this).
    pub fn output(&self) -> &dyn AudioOutput {
        self.output.as_ref()
    }

    pub fn output_mut(&mut self) -> &mut dyn AudioOutput {
        self.output.as_mut()
    }
}

/// Volume of a music track right now, mid-fade or settled.
fn current_fade_volume(music: &Music) -> f32 {
    match &music.fade {
        Some(fade) => {
            let t = fade.elapsed_ms as f32 / fade.duration_ms.max(1) as f32;
            fade.from + (fade.to - fade.from) * t
        },
        None => music.target_volume,
    }
}

fn sanitize_volume(volume: f32) -> f32 {
    if (0.0..=1.0).contains(&volume) {
        volume
    } else {
        log::warn!("volume {volume} out of range, clamping");
        let v = volume.clamp(0.0, 1.0);
        if v.is_finite() { v } else { DEFAULT_VOLUME }
    }
}

/// Register the stock SIGMA sound set: UI beeps, mission start effects, and
/// the looping theme. Mission `kind` tags map to `<kind>_start`-style names
/// at the call site.
pub fn register_default_sounds(manager: &mut SoundManager, rng: &mut impl Rng) {
    manager.register("select", synth::beep(440.0, 50));
    manager.register("confirm", synth::beep(660.0, 100));
    manager.register("back", synth::beep(220.0, 50));
    manager.register("hack_start", synth::glitch(3000, 0.1, rng));
    manager.register("download", synth::sweep(200.0, 1000.0, 2000, 0.1, rng));
    manager.register("decrypt", synth::arc_sweep(100.0, 1000.0, 1000, 0.05, rng));
    manager.register("success", synth::beep(880.0, 150));
    manager.register("failure", synth::beep(110.0, 300));
    manager.register("theme", synth::music_loop());
}
