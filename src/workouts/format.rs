//! Display formatting for workout metrics.

/// Format elapsed seconds as `MM:SS`, or `H:MM:SS` from one hour upwards.
///
/// An absent reading is shown as zero.
pub fn format_elapsed_time(seconds: Option<u32>) -> String {
    let seconds = seconds.unwrap_or(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Format a speed or incline value.
///
/// Uses the shortest representation that round-trips, always keeping a
/// fractional part (`4.0`, not `4`).
pub fn format_decimal(value: Option<f64>) -> String {
    format!("{:?}", value.unwrap_or(0.0))
}

/// Format a distance with three decimal places.
pub fn format_distance(miles: Option<f64>) -> String {
    format!("{:.3}", miles.unwrap_or(0.0))
}
