//! Binary-rain "hacking" loading animation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sigma_types::color::dim;
use sigma_types::error::Result;
use sigma_types::{Canvas, Color};

use crate::timer::Timer;

/// Fixed duration of the hacking animation.
pub const DURATION_MS: u32 = 3500;

const CELL_H: i32 = 20;
const STREAM_SPACING: u32 = 20;
const FONT_SIZE: u16 = 16;

struct Stream {
    x: i32,
    y: f32,
    /// Cells per 16 ms frame, scaled by elapsed time in `advance`.
    speed: f32,
    chars: Vec<char>,
}

/// Matrix-style falling columns of '0'/'1' with a progress bar.
pub struct HackingFx {
    timer: Timer,
    width: u32,
    height: u32,
    streams: Vec<Stream>,
    rng: SmallRng,
}

impl HackingFx {
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let stream_count = (width / STREAM_SPACING).max(1);
        let streams = (0..stream_count)
            .map(|_| {
                let length = rng.gen_range(5..=15);
                Stream {
                    x: rng.gen_range(0..width.max(1) as i32),
                    y: rng.gen_range(-100..=0) as f32,
                    speed: rng.gen_range(2.0..5.0),
                    chars: (0..length).map(|_| roll_bit(&mut rng)).collect(),
                }
            })
            .collect();
        Self {
            timer: Timer::new(DURATION_MS),
            width,
            height,
            streams,
            rng,
        }
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn finish(&mut self) {
        self.timer.finish();
    }

    /// Advance progress and decorative stream state. No-op once complete.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        if self.timer.is_complete() {
            return true;
        }
        let done = self.timer.advance(dt_ms);

        let step = dt_ms as f32 / 16.0;
        for stream in &mut self.streams {
            stream.y += stream.speed * step;
            let len_px = stream.chars.len() as i32 * CELL_H;
            if stream.y > (self.height as i32 + len_px) as f32 {
                stream.y = -(len_px as f32);
                stream.x = self.rng.gen_range(0..self.width.max(1) as i32);
            }
            // Occasionally re-roll one character.
            if self.rng.gen_bool(0.1) {
                let idx = self.rng.gen_range(0..stream.chars.len());
                stream.chars[idx] = roll_bit(&mut self.rng);
            }
        }
        done
    }

    pub fn render(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let (w, h) = (self.width, self.height);

        // Dim backdrop.
        canvas.fill_rect(0, 0, w, h, Color::rgba(0, 0, 0, 200))?;

        // Falling streams; head cell brightest, tail fading to dim green.
        let mut buf = [0u8; 4];
        for stream in &self.streams {
            for (i, &ch) in stream.chars.iter().enumerate() {
                let y = stream.y as i32 + i as i32 * CELL_H;
                if y < 0 || y >= h as i32 {
                    continue;
                }
                let fade = (1.0 - 0.12 * i as f32).max(0.35);
                let color = dim(Color::rgb(0, 255, 70), fade);
                canvas.draw_text(ch.encode_utf8(&mut buf), stream.x, y, FONT_SIZE, color)?;
            }
        }

        // Progress bar along the bottom.
        let bar_w = w.saturating_sub(100);
        let bar_h = 20u32;
        let bar_x = ((w - bar_w) / 2) as i32;
        let bar_y = h as i32 - 50;
        canvas.fill_rect(bar_x, bar_y, bar_w, bar_h, Color::rgb(0, 50, 0))?;
        let fill = (bar_w as f32 * self.timer.progress()) as u32;
        canvas.fill_rect(bar_x, bar_y, fill, bar_h, Color::rgb(0, 255, 0))?;
        canvas.stroke_rect(bar_x, bar_y, bar_w, bar_h, 2, Color::rgb(0, 200, 0))?;

        let status = if self.timer.is_complete() {
            "ACCESS GRANTED"
        } else {
            "HACKING MAINFRAME..."
        };
        let tx = (w as i32 - canvas.measure_text(status, FONT_SIZE) as i32) / 2;
        canvas.draw_text(status, tx, bar_y - 26, FONT_SIZE, Color::rgb(0, 255, 0))?;
        Ok(())
    }
}

fn roll_bit(rng: &mut SmallRng) -> char {
    if rng.r#gen::<bool>() { '1' } else { '0' }
}
