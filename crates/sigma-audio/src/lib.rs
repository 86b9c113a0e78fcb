//! Audio subsystem: procedural waveform synthesis, channel output trait,
//! and the sound/music manager.
//!
//! Synthesis is pure (parameters in, PCM buffer out). Playback is
//! fire-and-forget through [`AudioOutput`]; once a buffer is handed to a
//! channel it is not further synchronized with the frame loop.

pub mod manager;
pub mod output;
pub mod synth;
pub mod wav;

pub use manager::SoundManager;
pub use output::{AudioOutput, ChannelId, NullAudioOutput};
pub use synth::Pcm;
