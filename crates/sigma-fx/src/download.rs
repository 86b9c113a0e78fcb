//! File-list "download" loading animation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sigma_types::color::lerp_color;
use sigma_types::error::Result;
use sigma_types::{Canvas, Color};

use crate::timer::Timer;

/// Fixed duration of the download animation.
pub const DURATION_MS: u32 = 4000;

/// Per-file progress steps every this often.
const STEP_MS: u32 = 100;

const FILES: [&str; 5] = [
    "root_access.sh",
    "firewall_bypass.exe",
    "data_packet_encryptor.dll",
    "security_override.ko",
    "crypto_keys.bin",
];

const FONT_SIZE: u16 = 16;
const SMALL_FONT: u16 = 8;

/// Scrolling list of files with per-file progress bars.
pub struct DownloadFx {
    timer: Timer,
    width: u32,
    height: u32,
    current_file: usize,
    file_progress: f32,
    step_accum_ms: u32,
    rng: SmallRng,
}

impl DownloadFx {
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            timer: Timer::new(DURATION_MS),
            width,
            height,
            current_file: 0,
            file_progress: 0.0,
            step_accum_ms: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn finish(&mut self) {
        self.timer.finish();
    }

    /// Advance progress and the decorative per-file counters. No-op once
    /// complete.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        if self.timer.is_complete() {
            return true;
        }
        let done = self.timer.advance(dt_ms);

        self.step_accum_ms += dt_ms;
        while self.step_accum_ms >= STEP_MS {
            self.step_accum_ms -= STEP_MS;
            self.file_progress += self.rng.gen_range(0.05..0.15);
            if self.file_progress >= 1.0 {
                self.file_progress = 0.0;
                self.current_file = (self.current_file + 1).min(FILES.len() - 1);
            }
        }
        done
    }

    pub fn render(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let (w, h) = (self.width, self.height);

        // Dark blue backdrop.
        canvas.fill_rect(0, 0, w, h, Color::rgba(0, 0, 50, 220))?;

        let title = "SECURE DOWNLOAD IN PROGRESS";
        let tx = (w as i32 - canvas.measure_text(title, FONT_SIZE) as i32) / 2;
        canvas.draw_text(title, tx, 50, FONT_SIZE, Color::rgb(100, 200, 255))?;

        for (i, filename) in FILES.iter().enumerate() {
            let y = 120 + i as i32 * 40;
            let color = if i < self.current_file {
                Color::rgb(0, 255, 0)
            } else {
                Color::rgb(100, 100, 100)
            };
            canvas.draw_text(&format!("> {filename}"), 100, y, FONT_SIZE, color)?;

            if i == self.current_file {
                let bar_w = 300u32;
                let bar_h = 10u32;
                let bar_x = w as i32 - 100 - bar_w as i32;
                let bar_y = y + 15;
                canvas.fill_rect(bar_x, bar_y, bar_w, bar_h, Color::rgb(0, 50, 0))?;
                let fill = (bar_w as f32 * self.file_progress) as u32;
                // Bar brightens as the file nears completion.
                let fill_color = lerp_color(
                    Color::rgb(0, 120, 0),
                    Color::rgb(0, 230, 0),
                    self.file_progress,
                );
                canvas.fill_rect(bar_x, bar_y, fill, bar_h, fill_color)?;
                canvas.stroke_rect(bar_x, bar_y, bar_w, bar_h, 1, Color::rgb(0, 255, 0))?;

                let percent = format!("{}%", (self.file_progress * 100.0) as u32);
                canvas.draw_text(
                    &percent,
                    bar_x + bar_w as i32 + 10,
                    bar_y - 3,
                    SMALL_FONT,
                    Color::rgb(200, 200, 200),
                )?;
            } else if i < self.current_file {
                canvas.draw_text(
                    "[COMPLETE]",
                    w as i32 - 150,
                    y,
                    SMALL_FONT,
                    Color::rgb(0, 255, 0),
                )?;
            }
        }

        let overall = format!("Downloading files: {}/{}", self.current_file + 1, FILES.len());
        let ox = (w as i32 - canvas.measure_text(&overall, FONT_SIZE) as i32) / 2;
        canvas.draw_text(&overall, ox, h as i32 - 50, FONT_SIZE, Color::rgb(200, 200, 255))?;
        Ok(())
    }
}
