//! SDL2 backend for SIGMA.
//!
//! Implements [`Canvas`] and event polling using SDL2, plus the audio output
//! driver in [`sdl_audio`]. Used for desktop runs; the rest of the game only
//! sees the trait boundaries.

mod font;
mod sdl_audio;

use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas as SdlRenderCanvas;
use sdl2::video::Window;

use sigma_types::error::{Result, SigmaError};
use sigma_types::{Button, Canvas, Color, InputEvent};

pub use sdl_audio::SdlAudioOutput;

/// SDL2 window canvas with keyboard input.
///
/// Supports solid and alpha-blended fills, lines, and 8x8 bitmap text scaled
/// to whole multiples.
pub struct SdlCanvas {
    canvas: SdlRenderCanvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

impl SdlCanvas {
    /// Create the window and renderer.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let sdl = sdl2::init().map_err(SigmaError::Backend)?;
        let video = sdl.video().map_err(SigmaError::Backend)?;
        let window = video
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| SigmaError::Backend(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| SigmaError::Backend(e.to_string()))?;
        let event_pump = sdl.event_pump().map_err(SigmaError::Backend)?;

        log::info!("SDL2 backend initialized: {width}x{height}");

        Ok(Self {
            canvas,
            event_pump,
            width,
            height,
        })
    }

    /// Drain pending SDL events into game input events.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            if let Some(e) = map_sdl_event(event) {
                events.push(e);
            }
        }
        events
    }

    fn set_color(&mut self, color: Color) {
        if color.a < 255 {
            self.canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        } else {
            self.canvas.set_blend_mode(sdl2::render::BlendMode::None);
        }
        self.canvas.set_draw_color(sdl2::pixels::Color::RGBA(
            color.r, color.g, color.b, color.a,
        ));
    }
}

impl Canvas for SdlCanvas {
    fn clear(&mut self, color: Color) -> Result<()> {
        self.canvas.set_draw_color(sdl2::pixels::Color::RGBA(
            color.r, color.g, color.b, color.a,
        ));
        self.canvas.clear();
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.set_color(color);
        self.canvas
            .fill_rect(Rect::new(x, y, w, h))
            .map_err(SigmaError::Backend)?;
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        stroke_width: u16,
        color: Color,
    ) -> Result<()> {
        self.set_color(color);
        if stroke_width <= 1 {
            self.canvas
                .draw_rect(Rect::new(x, y, w, h))
                .map_err(SigmaError::Backend)?;
        } else {
            let sw = stroke_width as u32;
            let _ = self.canvas.fill_rect(Rect::new(x, y, w, sw));
            let _ = self
                .canvas
                .fill_rect(Rect::new(x, y + h as i32 - sw as i32, w, sw));
            let _ = self
                .canvas
                .fill_rect(Rect::new(x, y + sw as i32, sw, h.saturating_sub(sw * 2)));
            let _ = self.canvas.fill_rect(Rect::new(
                x + w as i32 - sw as i32,
                y + sw as i32,
                sw,
                h.saturating_sub(sw * 2),
            ));
        }
        Ok(())
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) -> Result<()> {
        self.set_color(color);
        self.canvas
            .draw_line(Point::new(x1, y1), Point::new(x2, y2))
            .map_err(SigmaError::Backend)?;
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
        let scale = if font_size >= 8 {
            (font_size / 8) as i32
        } else {
            1
        };
        let glyph_w = (font::GLYPH_WIDTH as i32) * scale;
        self.set_color(color);

        let mut cx = x;
        for ch in text.chars() {
            let glyph_data = font::glyph(ch);
            for row in 0..8i32 {
                let bits = glyph_data[row as usize];
                for col in 0..8i32 {
                    if bits & (0x80 >> col) != 0 {
                        let px = cx + col * scale;
                        let py = y + row * scale;
                        if scale == 1 {
                            let _ = self.canvas.draw_point(Point::new(px, py));
                        } else {
                            let _ = self.canvas.fill_rect(Rect::new(
                                px,
                                py,
                                scale as u32,
                                scale as u32,
                            ));
                        }
                    }
                }
            }
            cx += glyph_w;
        }
        Ok(())
    }

    fn measure_text(&self, text: &str, font_size: u16) -> u32 {
        let scale = if font_size >= 8 {
            (font_size / 8) as u32
        } else {
            1
        };
        text.chars().count() as u32 * font::GLYPH_WIDTH * scale
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.canvas.present();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!("SDL2 backend shut down");
        Ok(())
    }
}

/// Map an SDL2 event to a game input event.
fn map_sdl_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(key), ..
        } => map_key_down(key),
        _ => None,
    }
}

fn map_key_down(key: Keycode) -> Option<InputEvent> {
    match key {
        Keycode::Up | Keycode::W => Some(InputEvent::ButtonPress(Button::Up)),
        Keycode::Down | Keycode::S => Some(InputEvent::ButtonPress(Button::Down)),
        Keycode::Return | Keycode::Space => Some(InputEvent::ButtonPress(Button::Confirm)),
        Keycode::Escape => Some(InputEvent::ButtonPress(Button::Cancel)),
        Keycode::M => Some(InputEvent::ButtonPress(Button::Mute)),
        _ => None,
    }
}
