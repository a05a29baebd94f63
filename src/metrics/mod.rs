//! Workout metrics: observable values that the workout screen renders.
//!
//! "Manual" metrics are calculated locally instead of being read from a
//! device: elapsed time counts timer ticks, distance is integrated from the
//! current speed, and speed/incline change only when the user presses a button.

pub mod distance;
pub mod elapsed;
pub mod incline;
pub mod observable;
pub mod speed;
pub mod ticker;

pub use distance::ManualDistanceMetric;
pub use elapsed::ManualElapsedTimeMetric;
pub use incline::ManualInclineMetric;
pub use observable::Observable;
pub use speed::ManualSpeedMetric;
pub use ticker::{RepeatingTimer, TimerExit};

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Milliseconds in one second.
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Default speed (mph) and incline (%) when a workout starts.
pub const DEFAULT_ADJUSTABLE_VALUE: f64 = 3.5;

/// A metric exposing a single observable value.
pub trait Metric: Send + Sync {
    /// Value type published by this metric.
    type Value;

    /// The observable slot holding the metric's current value.
    fn get(&self) -> &Observable<Self::Value>;
}

/// A metric the user adjusts directly.
///
/// Values are not clamped; increasing or decreasing past zero is allowed.
pub trait AdjustableMetric: Metric<Value = f64> {
    /// Add `amount` to the current value.
    fn increase(&self, amount: f64);

    /// Subtract `amount` from the current value.
    fn decrease(&self, amount: f64);
}

/// Total elapsed seconds since the workout started.
pub trait ElapsedTimeMetric: Metric<Value = u32> {}

/// Current speed in miles per hour.
pub trait SpeedMetric: AdjustableMetric {}

/// Total distance covered in miles.
pub trait DistanceMetric: Metric<Value = f64> {}

/// Current incline in percent.
pub trait InclineMetric: AdjustableMetric {}

/// Shift an adjustable value by `delta`, treating an unset value as zero.
pub(crate) fn adjust(slot: &Observable<f64>, delta: f64) -> f64 {
    let mut adjusted = 0.0;
    slot.update(|current| {
        adjusted = current.copied().unwrap_or(0.0) + delta;
        adjusted
    });
    adjusted
}
