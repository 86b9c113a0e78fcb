//! Shared test utilities: a canvas that records draw calls for assertion.

use sigma_types::error::Result;
use sigma_types::{Canvas, Color};

/// A recorded draw call from the mock canvas.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum DrawCall {
    Clear {
        color: Color,
    },
    FillRect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Color,
    },
    StrokeRect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Color,
    },
    DrawLine {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    },
    DrawText {
        text: String,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
    },
}

/// A mock canvas that records all draw calls.
pub struct MockCanvas {
    pub calls: Vec<DrawCall>,
    pub width: u32,
    pub height: u32,
}

impl MockCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            calls: Vec::new(),
            width,
            height,
        }
    }

    pub fn fill_rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillRect { .. }))
            .count()
    }

    pub fn draw_text_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::DrawText { .. }))
            .count()
    }

    /// Check if any `DrawText` call contains the given substring.
    pub fn has_text(&self, needle: &str) -> bool {
        self.calls.iter().any(|c| {
            if let DrawCall::DrawText { text, .. } = c {
                text.contains(needle)
            } else {
                false
            }
        })
    }
}

impl Canvas for MockCanvas {
    fn clear(&mut self, color: Color) -> Result<()> {
        self.calls.push(DrawCall::Clear { color });
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.calls.push(DrawCall::FillRect { x, y, w, h, color });
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        _stroke_width: u16,
        color: Color,
    ) -> Result<()> {
        self.calls.push(DrawCall::StrokeRect { x, y, w, h, color });
        Ok(())
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<()> {
        self.calls.push(DrawCall::DrawLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
    ) -> Result<()> {
        self.calls.push(DrawCall::DrawText {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, font_size: u16) -> u32 {
        let scale = (font_size / 8).max(1) as u32;
        text.chars().count() as u32 * 8 * scale
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn swap_buffers(&mut self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
