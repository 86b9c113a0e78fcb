//! Mission records and the stores that supply them.
//!
//! Missions are created externally and read-only to the game; the store
//! contract is "list in id order" and "insert returns the new id". Fetch
//! failures degrade to an empty list at the call site, never a crash.

pub mod mission;
pub mod store;

pub use mission::{Difficulty, Mission};
pub use store::{JsonStore, MemoryStore, MissionSource, list_or_empty, seed_demo};
