//! Stateless per-frame overlay effects.
//!
//! Shape is deterministic in the inputs; content comes from the rng the
//! caller passes in, so game logic stays unaffected by cosmetic draws.

use rand::Rng;
use rand::rngs::SmallRng;

use sigma_types::error::Result;
use sigma_types::{Canvas, Color};

/// Darken every `spacing`-th scan line across the whole canvas.
pub fn scanlines(canvas: &mut dyn Canvas, spacing: u32, alpha: u8) -> Result<()> {
    let (w, h) = canvas.size();
    let spacing = spacing.max(1) as i32;
    let color = Color::rgba(0, 0, 0, alpha);
    let mut y = 0;
    while y < h as i32 {
        canvas.draw_line(0, y, w as i32, y, color)?;
        y += spacing;
    }
    Ok(())
}

/// Random horizontal slivers of bright color, CRT-glitch style.
///
/// `intensity` in `[0, 1]` scales the sliver count; 0 draws nothing.
pub fn glitch_flicker(canvas: &mut dyn Canvas, rng: &mut SmallRng, intensity: f32) -> Result<()> {
    let (w, h) = canvas.size();
    let count = (intensity.clamp(0.0, 1.0) * 8.0) as u32;
    for _ in 0..count {
        let y = rng.gen_range(0..h.max(1) as i32);
        let sliver_h = rng.gen_range(1..4);
        let x = rng.gen_range(-20..20);
        let color = if rng.gen_bool(0.5) {
            Color::rgba(0, 255, 70, 90)
        } else {
            Color::rgba(255, 255, 255, 60)
        };
        canvas.fill_rect(x, y, w, sliver_h, color)?;
    }
    Ok(())
}
