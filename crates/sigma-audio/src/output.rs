//! Playback output trait and the null driver.
//!
//! An output owns a fixed pool of playback channels. `play` claims a free
//! channel or reports `None`; it never blocks and never errors. The SDL
//! implementation lives in the backend crate.

use crate::synth::Pcm;

/// Number of simultaneous playback channels every output provides.
pub const CHANNEL_COUNT: usize = 8;

/// Handle to a claimed playback channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub usize);

/// Fire-and-forget playback device.
pub trait AudioOutput {
    /// Start playing `pcm` on a free channel. Returns `None` when the pool
    /// is exhausted.
    fn play(&mut self, pcm: &Pcm, volume: f32, looping: bool) -> Option<ChannelId>;

    /// Stop a channel. Stopping an inactive channel is a no-op.
    fn stop(&mut self, channel: ChannelId);

    /// Adjust a playing channel's volume.
    fn set_volume(&mut self, channel: ChannelId, volume: f32);

    /// Whether the channel is still playing.
    fn is_active(&self, channel: ChannelId) -> bool;

    /// Advance playback time for outputs that are not driven by a real-time
    /// callback. Default is a no-op.
    fn advance(&mut self, _dt_ms: u32) {}
}

/// A silent output for headless runs and tests.
///
/// Channels are claimed and released with the same bookkeeping as a real
/// device; non-looping buffers are retired by [`AudioOutput::advance`],
/// which tests and the manager's tick drive in place of wall-clock playback.
#[derive(Debug, Default)]
pub struct NullAudioOutput {
    channels: [Option<NullChannel>; CHANNEL_COUNT],
}

#[derive(Debug, Clone)]
struct NullChannel {
    remaining_ms: u32,
    volume: f32,
    looping: bool,
}

impl NullAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Volume of an active channel, for assertions.
    pub fn volume(&self, channel: ChannelId) -> Option<f32> {
        self.channels.get(channel.0)?.as_ref().map(|c| c.volume)
    }

    /// Number of currently active channels.
    pub fn active_count(&self) -> usize {
        self.channels.iter().filter(|c| c.is_some()).count()
    }
}

impl AudioOutput for NullAudioOutput {
    fn play(&mut self, pcm: &Pcm, volume: f32, looping: bool) -> Option<ChannelId> {
        let idx = self.channels.iter().position(|c| c.is_none())?;
        self.channels[idx] = Some(NullChannel {
            remaining_ms: pcm.duration_ms(),
            volume,
            looping,
        });
        Some(ChannelId(idx))
    }

    fn stop(&mut self, channel: ChannelId) {
        if let Some(slot) = self.channels.get_mut(channel.0) {
            *slot = None;
        }
    }

    fn set_volume(&mut self, channel: ChannelId, volume: f32) {
        if let Some(Some(ch)) = self.channels.get_mut(channel.0) {
            ch.volume = volume;
        }
    }

    fn is_active(&self, channel: ChannelId) -> bool {
        matches!(self.channels.get(channel.0), Some(Some(_)))
    }

    /// Retire finished one-shot channels.
    fn advance(&mut self, dt_ms: u32) {
        for slot in &mut self.channels {
            if let Some(ch) = slot {
                if ch.looping {
                    continue;
                }
                if ch.remaining_ms <= dt_ms {
                    *slot = None;
                } else {
                    ch.remaining_ms -= dt_ms;
                }
            }
        }
    }
}
