//! Foundation types for SIGMA.
//!
//! This crate contains the platform-agnostic core types shared by all SIGMA
//! crates: colors, input events, the canvas trait every render backend
//! implements, configuration, and error types.

pub mod bitmap_font;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod input;

pub use canvas::{Canvas, Color};
pub use config::GameConfig;
pub use error::{Result, SigmaError};
pub use input::{Button, InputEvent};
