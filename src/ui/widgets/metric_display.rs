//! Metric tile showing a label, a large value and its unit.

use egui::{Align, Layout, RichText, Ui, Vec2};

/// A widget for displaying a single workout metric.
pub struct MetricDisplay<'a> {
    value: String,
    unit: &'a str,
    label: &'a str,
    size: MetricSize,
    scale: f32,
}

/// Size variants for metric display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricSize {
    /// Secondary display
    Small,
    /// Standard display
    #[default]
    Medium,
    /// Primary focus
    Large,
}

impl MetricSize {
    fn value_size(&self) -> f32 {
        match self {
            MetricSize::Small => 28.0,
            MetricSize::Medium => 42.0,
            MetricSize::Large => 64.0,
        }
    }

    fn unit_size(&self) -> f32 {
        match self {
            MetricSize::Small => 12.0,
            MetricSize::Medium => 14.0,
            MetricSize::Large => 18.0,
        }
    }

    fn label_size(&self) -> f32 {
        match self {
            MetricSize::Small => 11.0,
            MetricSize::Medium => 13.0,
            MetricSize::Large => 15.0,
        }
    }

    fn min_size(&self) -> Vec2 {
        match self {
            MetricSize::Small => Vec2::new(80.0, 60.0),
            MetricSize::Medium => Vec2::new(120.0, 80.0),
            MetricSize::Large => Vec2::new(180.0, 100.0),
        }
    }
}

impl<'a> MetricDisplay<'a> {
    /// Create a new metric display from an already formatted value.
    pub fn new(value: impl Into<String>, unit: &'a str, label: &'a str) -> Self {
        Self {
            value: value.into(),
            unit,
            label,
            size: MetricSize::default(),
            scale: 1.0,
        }
    }

    pub fn elapsed_time(value: impl Into<String>) -> Self {
        Self::new(value, "", "Time")
    }

    pub fn speed(value: impl Into<String>) -> Self {
        Self::new(value, "mph", "Speed")
    }

    pub fn distance(value: impl Into<String>) -> Self {
        Self::new(value, "mi", "Distance")
    }

    pub fn incline(value: impl Into<String>) -> Self {
        Self::new(value, "%", "Incline")
    }

    /// Set the display size.
    pub fn with_size(mut self, size: MetricSize) -> Self {
        self.size = size;
        self
    }

    /// Multiply all font sizes by `scale`.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        self.label
    }

    pub fn unit(&self) -> &str {
        self.unit
    }

    /// Render the metric display.
    pub fn show(self, ui: &mut Ui) {
        let scale = self.scale;

        egui::Frame::new().inner_margin(8.0).show(ui, |ui| {
            ui.set_min_size(self.size.min_size() * scale);

            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.label(
                    RichText::new(self.label)
                        .size(self.size.label_size() * scale)
                        .weak(),
                );

                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&self.value)
                            .size(self.size.value_size() * scale)
                            .strong(),
                    );
                    if !self.unit.is_empty() {
                        ui.label(
                            RichText::new(self.unit)
                                .size(self.size.unit_size() * scale)
                                .weak(),
                        );
                    }
                });
            });
        });
    }
}
