//! Application screens.

pub mod workout;

pub use workout::{key_action, WorkoutScreen};
