//! Unit tests for metric timers under a paused clock.

use std::time::Duration;

use nongofit::metrics::distance::distance_per_tick;
use nongofit::metrics::{AdjustableMetric, Metric};
use nongofit::storage::config::MetricsSettings;
use nongofit::workouts::WorkoutSession;

const HALF_SECOND: Duration = Duration::from_millis(500);

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_counts_ticks() {
    let session = WorkoutSession::with_defaults();

    // Ticks at 0, 1000, 2000 and 3000 ms
    tokio::time::sleep(Duration::from_millis(3500)).await;

    assert_eq!(session.elapsed_time().get().get(), Some(4));
}

#[tokio::test(start_paused = true)]
async fn test_distance_at_constant_speed() {
    let session = WorkoutSession::with_defaults();

    // Ticks at 0, 500, 1000, 1500 and 2000 ms
    tokio::time::sleep(Duration::from_millis(2250)).await;

    let total = session.distance().get().get().unwrap();
    assert!(approx_eq(total, 5.0 * 3.5 / 7200.0));
}

#[tokio::test(start_paused = true)]
async fn test_distance_follows_speed_changes() {
    let session = WorkoutSession::with_defaults();

    // Two ticks at 3.5 mph
    tokio::time::sleep(Duration::from_millis(750)).await;
    session.speed().increase(3.7);

    // Three more at 7.2 mph
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let expected =
        2.0 * distance_per_tick(3.5, HALF_SECOND) + 3.0 * distance_per_tick(7.2, HALF_SECOND);
    let total = session.distance().get().get().unwrap();
    assert!(approx_eq(total, expected));
}

#[tokio::test(start_paused = true)]
async fn test_stop_freezes_values() {
    let mut session = WorkoutSession::with_defaults();
    tokio::time::sleep(Duration::from_millis(1250)).await;

    session.stop();
    assert!(!session.is_running());

    let elapsed = session.elapsed_time().get().get();
    let distance = session.distance().get().get();

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(session.elapsed_time().get().get(), elapsed);
    assert_eq!(session.distance().get().get(), distance);
}

#[tokio::test(start_paused = true)]
async fn test_custom_tick_settings() {
    let settings = MetricsSettings {
        elapsed_tick_ms: 100,
        distance_tick_ms: 100,
        initial_speed: 7.2,
        ..MetricsSettings::default()
    };
    let session = WorkoutSession::start(&settings);

    // Ticks at 0, 100, ..., 900 ms
    tokio::time::sleep(Duration::from_millis(950)).await;

    assert_eq!(session.elapsed_time().get().get(), Some(10));
    let total = session.distance().get().get().unwrap();
    assert!(approx_eq(total, 10.0 * 7.2 / 36_000.0));
}

#[tokio::test]
async fn test_speed_and_incline_are_independent() {
    let session = WorkoutSession::with_defaults();

    session.speed().increase(1.0);
    session.incline().decrease(2.0);

    assert_eq!(session.speed().get().get(), Some(4.5));
    assert_eq!(session.incline().get().get(), Some(1.5));
}

#[tokio::test]
async fn test_get_is_idempotent() {
    let session = WorkoutSession::with_defaults();

    let first = session.speed().get().get();
    let second = session.speed().get().get();

    assert_eq!(first, second);
    assert_eq!(first, Some(3.5));
}
