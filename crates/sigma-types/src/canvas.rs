//! Canvas trait definition.
//!
//! Every render backend implements [`Canvas`]. The game crates dispatch all
//! drawing through this trait boundary -- they never call platform-specific
//! APIs. The surface is a fixed-size 2D canvas redrawn fully each frame.

use crate::error::Result;

/// A color in RGBA format (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return the same color with a different alpha value.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

/// Rendering canvas trait.
///
/// Implementations: SDL2 (desktop) and the recording mock used in tests.
/// Alpha-blended colors must blend against the existing frame contents.
pub trait Canvas {
    /// Fill the whole surface with a solid color.
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()>;

    /// Outline an axis-aligned rectangle.
    fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        stroke_width: u16,
        color: Color,
    ) -> Result<()>;

    /// Draw a straight line.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<()>;

    /// Draw text with the backend's bitmap font. `font_size` is the glyph
    /// height in pixels; backends round down to a whole glyph scale.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: u16, color: Color)
    -> Result<()>;

    /// Pixel width `text` would occupy at `font_size`.
    fn measure_text(&self, text: &str, font_size: u16) -> u32;

    /// Surface dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// Present the finished frame.
    fn swap_buffers(&mut self) -> Result<()>;

    /// Release backend resources.
    fn shutdown(&mut self) -> Result<()>;
}
