//! Distance metric integrated from the current speed.

use super::{
    DistanceMetric, Metric, Observable, RepeatingTimer, SpeedMetric, MILLIS_PER_SECOND,
    SECONDS_PER_HOUR,
};
use std::time::Duration;
use tokio::sync::watch;

/// Default distance tick period.
pub const DISTANCE_TICK: Duration = Duration::from_millis(500);

/// Miles covered during one tick at `speed_mph`.
///
/// ```text
///              speed_mph                      1 hr
///   -----------------------------  *  ---------------
///   (millis_per_second / tick_ms)      seconds_per_hour
/// ```
pub fn distance_per_tick(speed_mph: f64, tick: Duration) -> f64 {
    let tick_ms = tick.as_secs_f64() * MILLIS_PER_SECOND;
    speed_mph / ((MILLIS_PER_SECOND / tick_ms) * SECONDS_PER_HOUR)
}

/// Distance (miles) accumulated from the speed metric on every tick.
///
/// Each tick reads the speed slot through a watch receiver, so it uses the
/// last speed published at or before that tick.
#[derive(Debug)]
pub struct ManualDistanceMetric {
    /// Total miles covered
    total_distance: Observable<f64>,
    /// Timer driving the integration
    timer: RepeatingTimer,
}

impl ManualDistanceMetric {
    /// Start integrating `speed` with the default 500 ms tick.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S>(speed: &S) -> Self
    where
        S: SpeedMetric + ?Sized,
    {
        Self::with_tick(speed, DISTANCE_TICK)
    }

    /// Start integrating `speed` with a custom tick period.
    pub fn with_tick<S>(speed: &S, tick: Duration) -> Self
    where
        S: SpeedMetric + ?Sized,
    {
        let speed_rx = speed.get().subscribe();

        let total_distance = Observable::new();
        let slot = total_distance.clone();
        let timer = RepeatingTimer::start("distance", tick, move || {
            record_tick(&slot, current_speed(&speed_rx), tick);
        });

        Self {
            total_distance,
            timer,
        }
    }

    /// Whether distance is still accumulating.
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Stop accumulating; the last total stays readable.
    pub fn stop(&mut self) {
        self.timer.stop();
    }
}

/// Latest published speed, zero when unset.
fn current_speed(speed_rx: &watch::Receiver<Option<f64>>) -> f64 {
    (*speed_rx.borrow()).unwrap_or(0.0)
}

fn record_tick(slot: &Observable<f64>, speed_mph: f64, tick: Duration) -> f64 {
    let delta = distance_per_tick(speed_mph, tick);
    let mut total = 0.0;
    slot.update(|previous| {
        total = previous.copied().unwrap_or(0.0) + delta;
        total
    });
    total
}

impl Metric for ManualDistanceMetric {
    type Value = f64;

    fn get(&self) -> &Observable<f64> {
        &self.total_distance
    }
}

impl DistanceMetric for ManualDistanceMetric {}
