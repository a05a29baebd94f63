//! Cancellable repeating timer used to drive tick-based metrics.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest period a timer will run at.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// How a timer's task had ended by the time it was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerExit {
    /// The task was still ticking and has been aborted
    Cancelled,
    /// A tick panicked and took the task down earlier
    Panicked,
    /// `stop` had already been called
    AlreadyStopped,
}

/// Handle to a periodic background task.
///
/// The first tick fires as soon as the timer starts, later ticks follow at a
/// fixed rate. Stopping (or dropping) the handle aborts the task, so no tick
/// runs after `stop()` returns control to the runtime.
#[derive(Debug)]
pub struct RepeatingTimer {
    /// Name used in log output
    name: String,
    /// Tick period
    period: Duration,
    /// Running task, `None` once stopped
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTimer {
    /// Spawn a repeating task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime context.
    pub fn start<F>(name: impl Into<String>, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let name = name.into();
        let period = period.max(MIN_PERIOD);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                on_tick();
            }
        });

        tracing::debug!("Started timer '{}' every {:?}", name, period);

        Self {
            name,
            period,
            handle: Some(handle),
        }
    }

    /// Timer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the task is still scheduled.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop ticking. Calling this more than once is a no-op.
    ///
    /// A panicking tick ends only its own task; the panic is reported here.
    pub fn stop(&mut self) -> TimerExit {
        let Some(handle) = self.handle.take() else {
            return TimerExit::AlreadyStopped;
        };

        // The loop never returns, so a finished task means a tick panicked.
        let exit = if handle.is_finished() {
            tracing::error!("Timer '{}' had already stopped: a tick panicked", self.name);
            TimerExit::Panicked
        } else {
            TimerExit::Cancelled
        };

        handle.abort();
        tracing::debug!("Stopped timer '{}'", self.name);
        exit
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
