//! The SIGMA game core: a single-threaded state machine driving the menu,
//! loading, result, and exit-confirmation screens.
//!
//! The frame loop calls [`Game::handle_event`] for each polled input,
//! [`Game::tick`] once per frame, and [`Game::render`] to redraw the whole
//! canvas. No screen ever blocks; the exit confirmation is a nested state,
//! not a modal sub-loop.

pub mod palette;
pub mod render;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use state::{Game, GameCommand, LoadingSession, MissionOutcome, OutcomePolicy, Screen};
