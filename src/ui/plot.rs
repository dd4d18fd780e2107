use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, Points};

use crate::chart::{ChartSpec, X_LABEL, Y_LABEL};
use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Bubble scatter plot
// ---------------------------------------------------------------------------

const PLOT_HEIGHT: f32 = 440.0;

/// Render the happiness vs GDP bubble chart.
pub fn bubble_chart(ui: &mut Ui, chart: &ChartSpec, color_map: Option<&ColorMap>) {
    ui.strong(&chart.title);
    if let Some(note) = chart.skipped_note() {
        ui.label(RichText::new(note).weak().small());
    }

    Plot::new("bubble_chart")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(X_LABEL)
        .y_axis_label(Y_LABEL)
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!(
                    "{name}\n{X_LABEL}: {:.3}\n{Y_LABEL}: {:.3}",
                    value.x, value.y
                )
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for bubble in &chart.bubbles {
                let color = color_map
                    .map(|cm| cm.color_for(&bubble.country))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points = Points::new(vec![[bubble.gdp_per_capita, bubble.score]])
                    .name(&bubble.country)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(bubble.radius)
                    .color(color.gamma_multiply(0.8));

                plot_ui.points(points);
            }
        });
}
