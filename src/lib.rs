//! NongoFit - treadmill workout tracker.
//!
//! Tracks a treadmill workout on screen: elapsed time, speed, distance and
//! incline, with speed and incline adjusted by hand. Also includes a reader
//! for the Bluetooth LE output of iFit treadmills that decodes their state
//! and records it as CSV.

pub mod metrics;
pub mod recording;
pub mod sensors;
pub mod storage;
pub mod ui;
pub mod workouts;

// Re-export commonly used types
pub use metrics::{Metric, Observable};
pub use sensors::{PacketReader, TreadmillState};
pub use storage::config::AppConfig;
pub use workouts::{WorkoutSession, WorkoutViewModel};
