//! Workout module: the running session and its presentation layer.

pub mod format;
pub mod session;
pub mod view_model;

pub use format::{format_decimal, format_distance, format_elapsed_time};
pub use session::WorkoutSession;
pub use view_model::{WorkoutAction, WorkoutViewModel, DEFAULT_STEP};
