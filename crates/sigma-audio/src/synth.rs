//! Waveform generators.
//!
//! Every generator is a pure function of its parameters (plus an explicit
//! rng for noise draws) producing a fixed-length mono PCM16 buffer. A linear
//! attack/release envelope is applied so buffers start and end at exactly
//! zero amplitude, and the combined waveform is clipped to i16 range before
//! conversion.

use std::f32::consts::PI;

use rand::Rng;

/// Sample rate used for all generated audio.
pub const SAMPLE_RATE: u32 = 44_100;

/// Attack ramp length for generated sounds.
const ATTACK_MS: u32 = 5;
/// Release ramp length for generated sounds.
const RELEASE_MS: u32 = 10;

/// A mono PCM16 sample buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcm {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl Pcm {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Buffer length in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        (self.samples.len() as u64 * 1000 / self.sample_rate as u64) as u32
    }
}

fn sample_count(duration_ms: u32) -> usize {
    (SAMPLE_RATE as u64 * duration_ms as u64 / 1000) as usize
}

/// Apply a linear attack/release envelope in place.
///
/// The first sample is scaled to 0, ramping up over the attack; the last
/// sample is scaled to 0, ramping down over the release. Ramps shrink for
/// buffers too short to hold them.
fn apply_envelope(samples: &mut [f32], attack_ms: u32, release_ms: u32) {
    let n = samples.len();
    if n < 2 {
        samples.iter_mut().for_each(|s| *s = 0.0);
        return;
    }
    let attack = sample_count(attack_ms).clamp(1, n / 2);
    let release = sample_count(release_ms).clamp(1, n / 2);
    for i in 0..attack {
        samples[i] *= i as f32 / attack as f32;
    }
    for i in 0..release {
        // Index from the end: the very last sample gets factor 0.
        samples[n - 1 - i] *= i as f32 / release as f32;
    }
}

/// Clip to [-1, 1] and convert to PCM16.
fn to_pcm(mut samples: Vec<f32>) -> Pcm {
    apply_envelope(&mut samples, ATTACK_MS, RELEASE_MS);
    let out = samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect();
    Pcm::new(out, SAMPLE_RATE)
}

/// Simple sine beep at a fixed frequency.
pub fn beep(freq_hz: f32, duration_ms: u32) -> Pcm {
    let n = sample_count(duration_ms);
    let samples = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * PI * freq_hz * t).sin() * 0.5
        })
        .collect();
    to_pcm(samples)
}

/// Rising linear frequency sweep with sparse noise mixed in.
///
/// The "download" sound is `sweep(200, 1000, 2000, 0.1)`. Phase is
/// accumulated per sample so the sweep stays continuous.
pub fn sweep(
    start_hz: f32,
    end_hz: f32,
    duration_ms: u32,
    noise_density: f64,
    rng: &mut impl Rng,
) -> Pcm {
    let n = sample_count(duration_ms);
    let mut phase = 0.0f32;
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let progress = i as f32 / n.max(1) as f32;
        let freq = start_hz + (end_hz - start_hz) * progress;
        phase += 2.0 * PI * freq / SAMPLE_RATE as f32;
        let mut s = phase.sin() * 0.3;
        if rng.gen_bool(noise_density) {
            s += rng.gen_range(-0.1..0.1);
        }
        samples.push(s);
    }
    to_pcm(samples)
}

/// Sine-shaped frequency arc (up then back down) with noise replacement.
///
/// The "decrypt" sound is `arc_sweep(100, 1000, 1000, 0.05)`: frequency
/// rises from `base_hz` by up to `peak_hz` at the midpoint. Noise draws
/// replace the tone sample entirely, like bursts of static.
pub fn arc_sweep(
    base_hz: f32,
    peak_hz: f32,
    duration_ms: u32,
    noise_density: f64,
    rng: &mut impl Rng,
) -> Pcm {
    let n = sample_count(duration_ms);
    let mut phase = 0.0f32;
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let progress = i as f32 / n.max(1) as f32;
        let freq = base_hz + (progress * PI).sin() * peak_hz;
        phase += 2.0 * PI * freq / SAMPLE_RATE as f32;
        let s = if rng.gen_bool(noise_density) {
            rng.gen_range(-1.0..1.0)
        } else {
            phase.sin() * 0.4
        };
        samples.push(s);
    }
    to_pcm(samples)
}

/// Glitchy burst: silence with full-scale impulse samples at `density`.
///
/// The "hack_start" sound is `glitch(3000, 0.1)`.
pub fn glitch(duration_ms: u32, density: f64, rng: &mut impl Rng) -> Pcm {
    let n = sample_count(duration_ms);
    let samples = (0..n)
        .map(|_| {
            if rng.gen_bool(density) {
                rng.gen_range(-1.0f32..1.0)
            } else {
                0.0
            }
        })
        .collect();
    to_pcm(samples)
}

/// Loop-ready background track: a slow minor arpeggio of filtered square-ish
/// notes. Each note carries its own envelope so the loop seam is silent.
pub fn music_loop() -> Pcm {
    // A minor: A2, C3, E3, A3, E3, C3.
    const NOTES: [f32; 6] = [110.0, 130.81, 164.81, 220.0, 164.81, 130.81];
    const NOTE_MS: u32 = 400;
    let note_n = sample_count(NOTE_MS);
    let mut samples = Vec::with_capacity(note_n * NOTES.len());
    for &freq in &NOTES {
        let mut note: Vec<f32> = (0..note_n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                // Sine + third harmonic for a retro square-ish timbre.
                let wave = (2.0 * PI * freq * t).sin() * 0.7
                    + (2.0 * PI * freq * 3.0 * t).sin() * 0.3;
                wave * 0.2
            })
            .collect();
        apply_envelope(&mut note, 10, 60);
        samples.extend(note);
    }
    let out = samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect();
    Pcm::new(out, SAMPLE_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn beep_length_matches_duration() {
        let pcm = beep(440.0, 50);
        assert_eq!(pcm.samples.len(), 2205);
        assert_eq!(pcm.duration_ms(), 50);
    }

    #[test]
    fn envelope_zeroes_buffer_edges() {
        let pcm = beep(440.0, 100);
        assert_eq!(pcm.samples[0], 0);
        assert_eq!(*pcm.samples.last().unwrap(), 0);
    }

    #[test]
    fn beep_is_not_silent() {
        let pcm = beep(440.0, 100);
        assert!(pcm.samples.iter().any(|&s| s.unsigned_abs() > 8000));
    }

    #[test]
    fn sweep_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let pcm = sweep(200.0, 1000.0, 2000, 0.1, &mut rng);
        assert_eq!(pcm.duration_ms(), 2000);
        // 0.3 tone + 0.1 noise never reaches the clip ceiling, but every
        // sample must be a valid i16 regardless.
        assert!(pcm.samples.iter().all(|&s| s > i16::MIN));
    }

    #[test]
    fn glitch_density_roughly_holds() {
        let mut rng = SmallRng::seed_from_u64(42);
        let pcm = glitch(1000, 0.1, &mut rng);
        let nonzero = pcm.samples.iter().filter(|&&s| s != 0).count();
        let ratio = nonzero as f64 / pcm.samples.len() as f64;
        assert!(ratio > 0.05 && ratio < 0.15, "impulse ratio {ratio}");
    }

    #[test]
    fn music_loop_seam_is_silent() {
        let pcm = music_loop();
        assert_eq!(pcm.samples[0], 0);
        assert_eq!(*pcm.samples.last().unwrap(), 0);
        assert!(pcm.duration_ms() >= 2000);
    }

    #[test]
    fn zero_duration_yields_empty_buffer() {
        let pcm = beep(440.0, 0);
        assert!(pcm.samples.is_empty());
    }

    #[test]
    fn overdriven_input_clips_to_full_scale() {
        // A combined waveform exceeding [-1, 1] must clip, not wrap.
        let loud = vec![2.5f32; 4410];
        let pcm = to_pcm(loud);
        assert_eq!(pcm.samples.iter().copied().max().unwrap(), i16::MAX);
        assert!(pcm.samples.iter().all(|&s| s >= 0));

        let quiet = vec![-3.0f32; 4410];
        let pcm = to_pcm(quiet);
        assert_eq!(pcm.samples.iter().copied().min().unwrap(), -i16::MAX);
    }

    proptest! {
        // Amplitude invariant: generated buffers are valid i16 after
        // clipping for a grid of frequency/duration/density combinations.
        #[test]
        fn generated_samples_within_signed_range(
            freq in 20.0f32..4000.0,
            duration in 1u32..300,
            density in 0.0f64..0.5,
            seed in any::<u64>(),
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            for pcm in [
                beep(freq, duration),
                sweep(freq, freq * 2.0, duration, density, &mut rng),
                arc_sweep(freq, freq * 4.0, duration, density, &mut rng),
                glitch(duration, density, &mut rng),
            ] {
                // Conversion from clamped f32 cannot overflow; check the
                // edges are enveloped to silence too.
                if let (Some(first), Some(last)) = (pcm.samples.first(), pcm.samples.last()) {
                    prop_assert_eq!(*first, 0);
                    prop_assert_eq!(*last, 0);
                }
                // i16::MIN is unreachable: clipping bottoms out at -i16::MAX.
                prop_assert!(pcm.samples.iter().all(|&s| s > i16::MIN));
            }
        }
    }
}
