//! Unit tests for workout presentation and button handling.

use std::time::Duration;

use nongofit::metrics::Metric;
use nongofit::workouts::{WorkoutAction, WorkoutSession, WorkoutViewModel};

#[tokio::test]
async fn test_initial_display_values() {
    let view_model = WorkoutViewModel::with_default_step(WorkoutSession::with_defaults());

    assert_eq!(view_model.speed(), "3.5");
    assert_eq!(view_model.incline(), "3.5");
}

#[tokio::test]
async fn test_speed_button_sequence() {
    let view_model = WorkoutViewModel::with_default_step(WorkoutSession::with_defaults());

    view_model.handle(WorkoutAction::SpeedUp);
    view_model.handle(WorkoutAction::SpeedUp);
    view_model.handle(WorkoutAction::SpeedDown);

    assert_eq!(view_model.speed(), "4.0");
    assert_eq!(view_model.incline(), "3.5");
}

#[tokio::test]
async fn test_incline_buttons() {
    let view_model = WorkoutViewModel::with_default_step(WorkoutSession::with_defaults());

    for _ in 0..8 {
        view_model.decrease_incline();
    }
    assert_eq!(view_model.incline(), "-0.5");

    view_model.increase_incline();
    assert_eq!(view_model.incline(), "0.0");
}

#[tokio::test]
async fn test_custom_step() {
    let view_model = WorkoutViewModel::new(WorkoutSession::with_defaults(), 0.1);

    view_model.handle(WorkoutAction::SpeedUp);

    let speed = view_model.session().speed().get().get().unwrap();
    assert!((speed - 3.6).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_and_distance_strings() {
    let view_model = WorkoutViewModel::with_default_step(WorkoutSession::with_defaults());

    // 66 elapsed ticks, the first at t=0
    tokio::time::sleep(Duration::from_millis(65_750)).await;

    assert_eq!(view_model.elapsed_time(), "01:06");
    // 132 ticks at 3.5 mph
    assert_eq!(view_model.total_distance(), "0.064");
}

#[tokio::test(start_paused = true)]
async fn test_actions_ignored_after_workout_ends() {
    let mut view_model = WorkoutViewModel::with_default_step(WorkoutSession::with_defaults());
    assert!(view_model.accepts_input());
    assert!(view_model.handle(WorkoutAction::InclineUp));

    view_model.session_mut().stop();
    assert!(!view_model.accepts_input());

    for action in [
        WorkoutAction::SpeedUp,
        WorkoutAction::SpeedDown,
        WorkoutAction::InclineUp,
        WorkoutAction::InclineDown,
    ] {
        assert!(!view_model.handle(action));
    }

    assert_eq!(view_model.speed(), "3.5");
    assert_eq!(view_model.incline(), "4.0");
}

#[test]
fn test_action_labels() {
    assert_eq!(WorkoutAction::SpeedUp.to_string(), "Speed Up");
    assert_eq!(WorkoutAction::InclineDown.to_string(), "Incline Down");
}
