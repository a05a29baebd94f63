//! Reusable UI widgets.

pub mod metric_display;

pub use metric_display::{MetricDisplay, MetricSize};
