//! Main application state and egui integration.

use std::time::Duration;

use eframe::egui;

use tokio::sync::watch;

use nongofit::metrics::Metric;
use nongofit::storage::config::AppConfig;
use nongofit::ui::screens::WorkoutScreen;
use nongofit::workouts::{WorkoutSession, WorkoutViewModel};

/// Fallback repaint interval in case no metric publishes.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

/// Main application state.
pub struct NongoFitApp {
    /// Current workout; dropped before the runtime so its timers stop first
    view_model: WorkoutViewModel,
    /// Workout screen state
    screen: WorkoutScreen,
    /// Runtime driving the metric timers
    _runtime: tokio::runtime::Runtime,
}

impl NongoFitApp {
    /// Create the app and start a workout immediately.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        let session = {
            let _guard = runtime.enter();
            WorkoutSession::start(&config.metrics)
        };
        let view_model = WorkoutViewModel::new(session, config.metrics.adjust_step);

        {
            let session = view_model.session();
            spawn_repaint(&runtime, session.elapsed_time().get().subscribe(), &cc.egui_ctx);
            spawn_repaint(&runtime, session.distance().get().subscribe(), &cc.egui_ctx);
        }

        Self {
            view_model,
            screen: WorkoutScreen::new(config.ui.font_scale),
            _runtime: runtime,
        }
    }
}

/// Repaint whenever `rx` publishes; ends when the slot is dropped.
fn spawn_repaint<T>(
    runtime: &tokio::runtime::Runtime,
    mut rx: watch::Receiver<Option<T>>,
    ctx: &egui::Context,
) where
    T: Send + Sync + 'static,
{
    let ctx = ctx.clone();
    runtime.spawn(async move {
        while rx.changed().await.is_ok() {
            ctx.request_repaint();
        }
    });
}

impl eframe::App for NongoFitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.view_model.session().is_running() {
            ctx.request_repaint_after(IDLE_REPAINT);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("NongoFit");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.view_model.session().is_running() {
                        if ui.button("End Workout").clicked() {
                            self.view_model.session_mut().stop();
                        }
                    } else {
                        ui.label("Workout ended");
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.screen.show(ui, &self.view_model);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Step: {}", self.view_model.step()));
                ui.separator();
                ui.label("↑/↓ speed    PgUp/PgDn incline").on_hover_text("Keyboard shortcuts");
            });
        });
    }
}
