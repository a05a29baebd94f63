//! Elapsed time metric driven by a one-second timer.

use super::{ElapsedTimeMetric, Metric, Observable, RepeatingTimer};
use std::time::Duration;

/// Default elapsed-time tick period.
pub const ELAPSED_TICK: Duration = Duration::from_millis(1000);

/// Elapsed time counted by incrementing a counter on every timer tick.
#[derive(Debug)]
pub struct ManualElapsedTimeMetric {
    /// Seconds elapsed since the metric started tracking
    elapsed_seconds: Observable<u32>,
    /// Timer driving the counter
    timer: RepeatingTimer,
}

impl ManualElapsedTimeMetric {
    /// Start counting with the default one-second tick.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start() -> Self {
        Self::with_tick(ELAPSED_TICK)
    }

    /// Start counting with a custom tick period.
    ///
    /// Every tick adds exactly one to the counter regardless of the period.
    pub fn with_tick(tick: Duration) -> Self {
        let elapsed_seconds = Observable::new();

        let slot = elapsed_seconds.clone();
        let timer = RepeatingTimer::start("elapsed-time", tick, move || {
            record_tick(&slot);
        });

        Self {
            elapsed_seconds,
            timer,
        }
    }

    /// Whether the counter is still ticking.
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Stop counting; the last value stays readable.
    pub fn stop(&mut self) {
        self.timer.stop();
    }
}

fn record_tick(slot: &Observable<u32>) -> u32 {
    let mut seconds = 0;
    slot.update(|previous| {
        seconds = previous.copied().unwrap_or(0).saturating_add(1);
        seconds
    });
    seconds
}

impl Metric for ManualElapsedTimeMetric {
    type Value = u32;

    fn get(&self) -> &Observable<u32> {
        &self.elapsed_seconds
    }
}

impl ElapsedTimeMetric for ManualElapsedTimeMetric {}
