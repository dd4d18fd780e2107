use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::InflationMetric;
use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (Some(domains), Some(current)) = (&state.domains, &state.selection) else {
        ui.label("No dataset loaded.");
        return;
    };
    let mut sel = current.clone();

    // ---- Year ----
    ui.strong("Select a Year");
    egui::ComboBox::from_id_salt("year")
        .selected_text(sel.year.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &domains.years {
                ui.selectable_value(&mut sel.year, year, year.to_string());
            }
        });
    ui.add_space(8.0);

    // ---- Region ----
    ui.strong("Select a Region");
    egui::ComboBox::from_id_salt("region")
        .selected_text(&sel.region)
        .show_ui(ui, |ui: &mut Ui| {
            for region in &domains.regions {
                ui.selectable_value(&mut sel.region, region.clone(), region);
            }
        });
    ui.add_space(8.0);

    // ---- Happiness threshold ----
    ui.strong("Filter by Happiness Score");
    ui.label("Only show countries above this happiness threshold.");
    let (lo, hi) = domains.score_range;
    ui.add(
        egui::Slider::new(&mut sel.threshold, lo..=hi)
            .step_by(0.1)
            .fixed_decimals(1)
            .text("Min score"),
    );
    ui.add_space(8.0);

    // ---- Inflation metric ----
    ui.strong("Inflation Type for Bubble Size");
    egui::ComboBox::from_id_salt("inflation_metric")
        .selected_text(sel.metric.column_name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in InflationMetric::ALL {
                ui.selectable_value(&mut sel.metric, metric, metric.column_name());
            }
        });

    state.apply_selection(sel);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{source}: {} records, {} matching",
                ds.len(),
                state.pipeline.matched_rows()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open happiness dataset")
        .add_filter("Supported files", &SUPPORTED_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}
