//! Presentation state for the workout screen.
//!
//! Maps the session's raw metric values to display strings and turns button
//! presses into metric adjustments.

use crate::metrics::{AdjustableMetric, Metric};
use crate::workouts::format::{format_decimal, format_distance, format_elapsed_time};
use crate::workouts::session::WorkoutSession;

/// Default change applied by one button press.
pub const DEFAULT_STEP: f64 = 0.5;

/// User actions on the workout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutAction {
    /// Raise speed by one step
    SpeedUp,
    /// Lower speed by one step
    SpeedDown,
    /// Raise incline by one step
    InclineUp,
    /// Lower incline by one step
    InclineDown,
}

impl std::fmt::Display for WorkoutAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutAction::SpeedUp => write!(f, "Speed Up"),
            WorkoutAction::SpeedDown => write!(f, "Speed Down"),
            WorkoutAction::InclineUp => write!(f, "Incline Up"),
            WorkoutAction::InclineDown => write!(f, "Incline Down"),
        }
    }
}

/// View model wrapping all state for the current workout.
#[derive(Debug)]
pub struct WorkoutViewModel {
    /// The running session
    session: WorkoutSession,
    /// Amount applied per button press
    step: f64,
}

impl WorkoutViewModel {
    /// Create a view model over `session`, adjusting by `step` per press.
    pub fn new(session: WorkoutSession, step: f64) -> Self {
        Self { session, step }
    }

    /// Create a view model with the default 0.5 step.
    pub fn with_default_step(session: WorkoutSession) -> Self {
        Self::new(session, DEFAULT_STEP)
    }

    /// The underlying session.
    pub fn session(&self) -> &WorkoutSession {
        &self.session
    }

    /// Mutable access to the underlying session.
    pub fn session_mut(&mut self) -> &mut WorkoutSession {
        &mut self.session
    }

    /// Step applied per button press.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Total elapsed time, `MM:SS` under an hour and `H:MM:SS` after.
    pub fn elapsed_time(&self) -> String {
        format_elapsed_time(self.session.elapsed_time().get().get())
    }

    /// Display value for current speed (mph).
    pub fn speed(&self) -> String {
        format_decimal(self.session.speed().get().get())
    }

    /// Display value for total distance covered, three decimals (e.g. 1.234).
    pub fn total_distance(&self) -> String {
        format_distance(self.session.distance().get().get())
    }

    /// Display value for current incline.
    pub fn incline(&self) -> String {
        format_decimal(self.session.incline().get().get())
    }

    pub fn increase_speed(&self) {
        self.session.speed().increase(self.step);
    }

    pub fn decrease_speed(&self) {
        self.session.speed().decrease(self.step);
    }

    pub fn increase_incline(&self) {
        self.session.incline().increase(self.step);
    }

    pub fn decrease_incline(&self) {
        self.session.incline().decrease(self.step);
    }

    /// Whether the controls accept input; false once the workout has ended.
    pub fn accepts_input(&self) -> bool {
        self.session.is_running()
    }

    /// Apply a single user action. Each call is exactly one adjustment.
    ///
    /// Returns `false`, leaving every metric untouched, once the session has
    /// been stopped.
    pub fn handle(&self, action: WorkoutAction) -> bool {
        if !self.accepts_input() {
            tracing::debug!("Ignoring action after workout ended: {}", action);
            return false;
        }

        tracing::debug!("Handling action: {}", action);
        match action {
            WorkoutAction::SpeedUp => self.increase_speed(),
            WorkoutAction::SpeedDown => self.decrease_speed(),
            WorkoutAction::InclineUp => self.increase_incline(),
            WorkoutAction::InclineDown => self.decrease_incline(),
        }
        true
    }
}
