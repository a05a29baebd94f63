//! Workout session: owns the metrics for one workout.
//!
//! The session is the composition root for the metrics. It builds speed and
//! incline, wires distance to speed, starts the elapsed-time and distance
//! timers, and stops them again when the workout ends.

use crate::metrics::{
    ManualDistanceMetric, ManualElapsedTimeMetric, ManualInclineMetric, ManualSpeedMetric,
};
use crate::storage::config::MetricsSettings;

/// Metrics for a single running workout.
#[derive(Debug)]
pub struct WorkoutSession {
    /// Seconds since the workout started
    elapsed_time: ManualElapsedTimeMetric,
    /// Current speed
    speed: ManualSpeedMetric,
    /// Total distance covered
    distance: ManualDistanceMetric,
    /// Current incline
    incline: ManualInclineMetric,
}

impl WorkoutSession {
    /// Build the metrics and start both timers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(settings: &MetricsSettings) -> Self {
        let speed = ManualSpeedMetric::new(settings.initial_speed);
        let incline = ManualInclineMetric::new(settings.initial_incline);
        let elapsed_time = ManualElapsedTimeMetric::with_tick(settings.elapsed_tick());
        let distance = ManualDistanceMetric::with_tick(&speed, settings.distance_tick());

        tracing::info!(
            "Workout started at {} mph, {}% incline",
            settings.initial_speed,
            settings.initial_incline
        );

        Self {
            elapsed_time,
            speed,
            distance,
            incline,
        }
    }

    /// Start a session with default settings.
    pub fn with_defaults() -> Self {
        Self::start(&MetricsSettings::default())
    }

    /// Elapsed time metric.
    pub fn elapsed_time(&self) -> &ManualElapsedTimeMetric {
        &self.elapsed_time
    }

    /// Speed metric.
    pub fn speed(&self) -> &ManualSpeedMetric {
        &self.speed
    }

    /// Distance metric.
    pub fn distance(&self) -> &ManualDistanceMetric {
        &self.distance
    }

    /// Incline metric.
    pub fn incline(&self) -> &ManualInclineMetric {
        &self.incline
    }

    /// Whether either timer is still ticking.
    pub fn is_running(&self) -> bool {
        self.elapsed_time.is_running() || self.distance.is_running()
    }

    /// Stop both timers. Values remain readable afterwards.
    pub fn stop(&mut self) {
        let was_running = self.is_running();
        self.elapsed_time.stop();
        self.distance.stop();
        if was_running {
            tracing::info!("Workout stopped");
        }
    }
}

impl Drop for WorkoutSession {
    fn drop(&mut self) {
        self.stop();
    }
}
