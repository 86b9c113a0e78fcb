//! Time-driven visual effects.
//!
//! Loading animations share one contract: `advance(dt_ms)` drives a
//! monotonic progress fraction to completion (idempotent afterwards), and
//! `render` is a pure function of progress plus decorative rng state that
//! only `advance` mutates. Overlay effects are stateless per frame.

pub mod download;
pub mod loading;
pub mod overlay;
pub mod rain;
pub mod timer;
pub mod typing;

#[cfg(test)]
pub(crate) mod test_utils;

pub use loading::LoadingFx;
pub use timer::Timer;
pub use typing::TypingReveal;
