use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::presentation::{PipelineState, ROW_LIMIT_STEP};
use crate::state::{AppState, EMPTY_NOTICE};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Central panel – header, status, table and chart
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let mut new_row_limit = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Global Happiness vs Economy Dashboard");
            ui.label(
                "Explore how economic factors like GDP, inflation, and happiness scores \
                 vary across the world from 2015 to 2023.",
            );
            ui.separator();

            let (Some(dataset), Some(selection)) = (&state.dataset, &state.selection) else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a dataset to begin  (File → Open…)");
                });
                return;
            };

            for line in state.status_lines() {
                ui.label(RichText::new(line).weak().small());
            }
            ui.add_space(8.0);

            let presentation = match &state.pipeline {
                PipelineState::FilteredNonEmpty(p) => p,
                PipelineState::FilteredEmpty => {
                    ui.label(RichText::new(EMPTY_NOTICE).color(ui.visuals().warn_fg_color));
                    return;
                }
                PipelineState::Loaded => return,
            };

            // ---- Table ----
            ui.heading("Table of Filtered Countries");
            ui.label("These are the countries that match your selected filters.");

            let bounds = presentation.row_limit;
            let mut limit = presentation.table.row_limit;
            ui.horizontal(|ui: &mut Ui| {
                ui.add(
                    egui::Slider::new(&mut limit, bounds.min..=bounds.max)
                        .step_by(ROW_LIMIT_STEP as f64)
                        .text("Max rows to display"),
                );
                if ui.small_button("Reset").clicked() {
                    limit = bounds.default_limit();
                }
            });
            if limit != presentation.table.row_limit {
                new_row_limit = Some(limit);
            }

            table::filtered_table(ui, dataset, &presentation.table);
            ui.add_space(16.0);

            // ---- Chart ----
            ui.heading("Happiness vs GDP Chart");
            ui.label(format!(
                "This chart compares GDP per capita and happiness scores. \
                 The bubble size shows {}.",
                selection.metric.column_name().to_lowercase()
            ));
            if let Some(chart) = &state.chart {
                plot::bubble_chart(ui, chart, state.color_map.as_ref());
            }
        });

    if let Some(limit) = new_row_limit {
        if let Some(mut selection) = state.selection.clone() {
            selection.row_limit = limit;
            state.apply_selection(selection);
        }
    }
}
