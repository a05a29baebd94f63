//! Incline metric adjusted by user input.

use super::{
    adjust, AdjustableMetric, InclineMetric, Metric, Observable, DEFAULT_ADJUSTABLE_VALUE,
};

/// Incline (%) changed only by explicit increase/decrease calls.
///
/// Stored independently of speed; the two never influence each other.
#[derive(Debug, Clone)]
pub struct ManualInclineMetric {
    incline: Observable<f64>,
}

impl Default for ManualInclineMetric {
    fn default() -> Self {
        Self::new(DEFAULT_ADJUSTABLE_VALUE)
    }
}

impl ManualInclineMetric {
    /// Create an incline metric starting at `initial` percent.
    pub fn new(initial: f64) -> Self {
        Self {
            incline: Observable::with_value(initial),
        }
    }
}

impl Metric for ManualInclineMetric {
    type Value = f64;

    fn get(&self) -> &Observable<f64> {
        &self.incline
    }
}

impl AdjustableMetric for ManualInclineMetric {
    fn increase(&self, amount: f64) {
        let incline = adjust(&self.incline, amount);
        tracing::debug!("Incline increased to {}%", incline);
    }

    fn decrease(&self, amount: f64) {
        let incline = adjust(&self.incline, -amount);
        tracing::debug!("Incline decreased to {}%", incline);
    }
}

impl InclineMetric for ManualInclineMetric {}
