//! Workout screen: four metric tiles with speed and incline controls.

use egui::{Align, Button, Key, Layout, RichText, Ui};

use crate::ui::widgets::{MetricDisplay, MetricSize};
use crate::workouts::{WorkoutAction, WorkoutViewModel};

/// Keyboard shortcut for an action, if any.
///
/// Up/Down adjust speed, PageUp/PageDown adjust incline.
pub fn key_action(key: Key) -> Option<WorkoutAction> {
    match key {
        Key::ArrowUp => Some(WorkoutAction::SpeedUp),
        Key::ArrowDown => Some(WorkoutAction::SpeedDown),
        Key::PageUp => Some(WorkoutAction::InclineUp),
        Key::PageDown => Some(WorkoutAction::InclineDown),
        _ => None,
    }
}

const SHORTCUT_KEYS: [Key; 4] = [Key::ArrowUp, Key::ArrowDown, Key::PageUp, Key::PageDown];

/// Workout screen state.
#[derive(Debug, Clone)]
pub struct WorkoutScreen {
    /// Tile size
    pub size: MetricSize,
    /// Font scale from settings
    pub font_scale: f32,
}

impl Default for WorkoutScreen {
    fn default() -> Self {
        Self {
            size: MetricSize::Large,
            font_scale: 1.0,
        }
    }
}

impl WorkoutScreen {
    pub fn new(font_scale: f32) -> Self {
        Self {
            font_scale,
            ..Self::default()
        }
    }

    /// Render the screen and apply any button or key presses to `view_model`.
    ///
    /// Controls are disabled and shortcuts ignored once the workout has
    /// ended. Returns the actions handled this frame.
    pub fn show(&mut self, ui: &mut Ui, view_model: &WorkoutViewModel) -> Vec<WorkoutAction> {
        let enabled = view_model.accepts_input();
        let mut actions: Vec<WorkoutAction> = if enabled {
            ui.input(|i| {
                SHORTCUT_KEYS
                    .iter()
                    .filter(|key| i.key_pressed(**key))
                    .filter_map(|key| key_action(*key))
                    .collect()
            })
        } else {
            Vec::new()
        };

        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                MetricDisplay::elapsed_time(view_model.elapsed_time())
                    .with_size(self.size)
                    .with_scale(self.font_scale)
                    .show(ui);
                MetricDisplay::distance(view_model.total_distance())
                    .with_size(self.size)
                    .with_scale(self.font_scale)
                    .show(ui);
            });

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                self.adjustable_tile(
                    ui,
                    MetricDisplay::speed(view_model.speed()),
                    (WorkoutAction::SpeedUp, WorkoutAction::SpeedDown),
                    enabled,
                    &mut actions,
                );
                self.adjustable_tile(
                    ui,
                    MetricDisplay::incline(view_model.incline()),
                    (WorkoutAction::InclineUp, WorkoutAction::InclineDown),
                    enabled,
                    &mut actions,
                );
            });
        });

        actions.retain(|action| view_model.handle(*action));
        actions
    }

    fn adjustable_tile(
        &self,
        ui: &mut Ui,
        display: MetricDisplay<'_>,
        (up, down): (WorkoutAction, WorkoutAction),
        enabled: bool,
        actions: &mut Vec<WorkoutAction>,
    ) {
        let button_size = 20.0 * self.font_scale;

        ui.vertical(|ui| {
            display
                .with_size(self.size)
                .with_scale(self.font_scale)
                .show(ui);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(enabled, Button::new(RichText::new("▲").size(button_size)))
                    .on_hover_text(up.to_string())
                    .clicked()
                {
                    actions.push(up);
                }
                if ui
                    .add_enabled(enabled, Button::new(RichText::new("▼").size(button_size)))
                    .on_hover_text(down.to_string())
                    .clicked()
                {
                    actions.push(down);
                }
            });
        });
    }
}
