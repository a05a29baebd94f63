//! Speed metric adjusted by user input.

use super::{adjust, AdjustableMetric, Metric, Observable, SpeedMetric, DEFAULT_ADJUSTABLE_VALUE};

/// Speed (mph) changed only by explicit increase/decrease calls.
#[derive(Debug, Clone)]
pub struct ManualSpeedMetric {
    speed: Observable<f64>,
}

impl Default for ManualSpeedMetric {
    fn default() -> Self {
        Self::new(DEFAULT_ADJUSTABLE_VALUE)
    }
}

impl ManualSpeedMetric {
    /// Create a speed metric starting at `initial` mph.
    pub fn new(initial: f64) -> Self {
        Self {
            speed: Observable::with_value(initial),
        }
    }
}

impl Metric for ManualSpeedMetric {
    type Value = f64;

    fn get(&self) -> &Observable<f64> {
        &self.speed
    }
}

impl AdjustableMetric for ManualSpeedMetric {
    fn increase(&self, amount: f64) {
        let speed = adjust(&self.speed, amount);
        tracing::debug!("Speed increased to {} mph", speed);
    }

    fn decrease(&self, amount: f64) {
        let speed = adjust(&self.speed, -amount);
        tracing::debug!("Speed decreased to {} mph", speed);
    }
}

impl SpeedMetric for ManualSpeedMetric {}
