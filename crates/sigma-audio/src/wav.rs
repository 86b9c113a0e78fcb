//! Minimal WAV reader for on-disk sound overrides.
//!
//! Accepts RIFF/WAVE files with a PCM16 `fmt ` chunk, mono or stereo
//! (stereo is averaged down to mono). Anything else is a decode error; the
//! caller falls back to the generated default.

use std::path::Path;

use sigma_types::{Result, SigmaError};

use crate::synth::Pcm;

fn bad(msg: &str) -> SigmaError {
    SigmaError::Audio(format!("wav decode: {msg}"))
}

fn read_u16(data: &[u8], at: usize) -> Result<u16> {
    let bytes = data
        .get(at..at + 2)
        .ok_or_else(|| bad("truncated chunk"))?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], at: usize) -> Result<u32> {
    let bytes = data
        .get(at..at + 4)
        .ok_or_else(|| bad("truncated chunk"))?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Decode a PCM16 WAV file into a mono buffer.
pub fn load(path: &Path) -> Result<Pcm> {
    let data = std::fs::read(path)?;
    decode(&data)
}

fn decode(data: &[u8]) -> Result<Pcm> {
    if data.len() < 12 || &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        return Err(bad("not a RIFF/WAVE file"));
    }

    let mut channels = 0u16;
    let mut sample_rate = 0u32;
    let mut pcm_data: Option<&[u8]> = None;

    let mut at = 12;
    while at + 8 <= data.len() {
        let id = &data[at..at + 4];
        let size = read_u32(data, at + 4)? as usize;
        let body = data
            .get(at + 8..at + 8 + size)
            .ok_or_else(|| bad("chunk overruns file"))?;
        match id {
            b"fmt " => {
                let format = read_u16(body, 0)?;
                if format != 1 {
                    return Err(bad("only uncompressed PCM is supported"));
                }
                channels = read_u16(body, 2)?;
                sample_rate = read_u32(body, 4)?;
                let bits = read_u16(body, 14)?;
                if bits != 16 {
                    return Err(bad("only 16-bit samples are supported"));
                }
            },
            b"data" => pcm_data = Some(body),
            _ => {},
        }
        // Chunks are word-aligned.
        at += 8 + size + (size & 1);
    }

    let body = pcm_data.ok_or_else(|| bad("missing data chunk"))?;
    if sample_rate == 0 {
        return Err(bad("missing fmt chunk"));
    }
    if channels == 0 || channels > 2 {
        return Err(bad("only mono or stereo is supported"));
    }

    let frame_bytes = 2 * channels as usize;
    let mut samples = Vec::with_capacity(body.len() / frame_bytes);
    for frame in body.chunks_exact(frame_bytes) {
        if channels == 1 {
            samples.push(i16::from_le_bytes([frame[0], frame[1]]));
        } else {
            let l = i16::from_le_bytes([frame[0], frame[1]]) as i32;
            let r = i16::from_le_bytes([frame[2], frame[3]]) as i32;
            samples.push(((l + r) / 2) as i16);
        }
    }
    Ok(Pcm::new(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(channels: u16, sample_rate: u32, frames: &[i16]) -> Vec<u8> {
        let data_len = frames.len() * 2;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&((36 + data_len) as u32).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        let byte_rate = sample_rate * channels as u32 * 2;
        out.extend_from_slice(&byte_rate.to_le_bytes());
        out.extend_from_slice(&(channels * 2).to_le_bytes()); // block align
        out.extend_from_slice(&16u16.to_le_bytes()); // bits
        out.extend_from_slice(b"data");
        out.extend_from_slice(&(data_len as u32).to_le_bytes());
        for s in frames {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }

    #[test]
    fn decodes_mono_pcm16() {
        let bytes = wav_bytes(1, 22_050, &[0, 100, -100, 32_000]);
        let pcm = decode(&bytes).unwrap();
        assert_eq!(pcm.sample_rate, 22_050);
        assert_eq!(pcm.samples, vec![0, 100, -100, 32_000]);
    }

    #[test]
    fn stereo_is_averaged_to_mono() {
        let bytes = wav_bytes(2, 44_100, &[100, 200, -100, -300]);
        let pcm = decode(&bytes).unwrap();
        assert_eq!(pcm.samples, vec![150, -200]);
    }

    #[test]
    fn rejects_non_riff() {
        assert!(decode(b"OggS0000000000000000").is_err());
    }

    #[test]
    fn rejects_compressed_format() {
        let mut bytes = wav_bytes(1, 44_100, &[0]);
        // Patch the format tag to something non-PCM.
        bytes[20] = 85;
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn rejects_truncated_data_chunk() {
        let mut bytes = wav_bytes(1, 44_100, &[1, 2, 3, 4]);
        bytes.truncate(bytes.len() - 3);
        assert!(decode(&bytes).is_err());
    }
}
