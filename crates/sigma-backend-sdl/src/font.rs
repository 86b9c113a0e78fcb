//! Bitmap font re-export from the shared `sigma-types::bitmap_font` module.
//!
//! All glyph data and lookup lives in the shared crate so headless tools can
//! measure text without linking SDL.

pub use sigma_types::bitmap_font::*;
