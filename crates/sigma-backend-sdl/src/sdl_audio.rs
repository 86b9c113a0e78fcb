//! SDL2 audio output driver.
//!
//! A fixed 8-channel software mixer runs inside the SDL audio callback.
//! Playback state lives behind a mutex shared with the game thread; the
//! callback accumulates active channels into a signed 32-bit sum and clamps
//! to the 16-bit output range.

use std::sync::{Arc, Mutex, MutexGuard};

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use sigma_audio::output::{AudioOutput, CHANNEL_COUNT, ChannelId};
use sigma_audio::synth::{Pcm, SAMPLE_RATE};
use sigma_types::error::{Result, SigmaError};

struct PlaybackChannel {
    samples: Arc<Vec<i16>>,
    pos: usize,
    volume: f32,
    looping: bool,
}

#[derive(Default)]
struct MixerState {
    channels: [Option<PlaybackChannel>; CHANNEL_COUNT],
}

struct Mixer {
    state: Arc<Mutex<MixerState>>,
}

impl AudioCallback for Mixer {
    type Channel = i16;

    fn callback(&mut self, out: &mut [i16]) {
        let Ok(mut state) = self.state.lock() else {
            out.fill(0);
            return;
        };
        for sample in out.iter_mut() {
            let mut acc: i32 = 0;
            for slot in &mut state.channels {
                let Some(ch) = slot else { continue };
                acc += (ch.samples[ch.pos] as f32 * ch.volume) as i32;
                ch.pos += 1;
                if ch.pos >= ch.samples.len() {
                    if ch.looping {
                        ch.pos = 0;
                    } else {
                        *slot = None;
                    }
                }
            }
            *sample = acc.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        }
    }
}

/// SDL2-backed playback device.
pub struct SdlAudioOutput {
    state: Arc<Mutex<MixerState>>,
    // Held to keep the callback running; pausing on drop is SDL's default.
    _device: AudioDevice<Mixer>,
}

impl SdlAudioOutput {
    /// Open the default audio device at the synth sample rate.
    pub fn new() -> Result<Self> {
        let sdl = sdl2::init().map_err(SigmaError::Audio)?;
        let audio = sdl.audio().map_err(SigmaError::Audio)?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE as i32),
            channels: Some(1),
            samples: Some(512),
        };
        let state = Arc::new(Mutex::new(MixerState::default()));
        let callback_state = Arc::clone(&state);
        let device = audio
            .open_playback(None, &desired, move |spec| {
                if spec.freq != SAMPLE_RATE as i32 {
                    log::warn!(
                        "audio device opened at {} Hz, synth output is {} Hz",
                        spec.freq,
                        SAMPLE_RATE
                    );
                }
                Mixer {
                    state: callback_state,
                }
            })
            .map_err(SigmaError::Audio)?;
        device.resume();
        log::info!("SDL2 audio device opened ({CHANNEL_COUNT} mix channels)");
        Ok(Self {
            state,
            _device: device,
        })
    }

    fn lock(&self) -> Option<MutexGuard<'_, MixerState>> {
        self.state.lock().ok()
    }
}

impl AudioOutput for SdlAudioOutput {
    fn play(&mut self, pcm: &Pcm, volume: f32, looping: bool) -> Option<ChannelId> {
        if pcm.samples.is_empty() {
            return None;
        }
        let mut state = self.lock()?;
        let idx = state.channels.iter().position(|c| c.is_none())?;
        state.channels[idx] = Some(PlaybackChannel {
            samples: Arc::new(pcm.samples.clone()),
            pos: 0,
            volume,
            looping,
        });
        Some(ChannelId(idx))
    }

    fn stop(&mut self, channel: ChannelId) {
        if let Some(mut state) = self.lock()
            && let Some(slot) = state.channels.get_mut(channel.0)
        {
            *slot = None;
        }
    }

    fn set_volume(&mut self, channel: ChannelId, volume: f32) {
        if let Some(mut state) = self.lock()
            && let Some(Some(ch)) = state.channels.get_mut(channel.0)
        {
            ch.volume = volume;
        }
    }

    fn is_active(&self, channel: ChannelId) -> bool {
        match self.lock() {
            Some(state) => matches!(state.channels.get(channel.0), Some(Some(_))),
            None => false,
        }
    }
}
