use std::path::{Path, PathBuf};

use crate::chart::ChartSpec;
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::error::DatasetError;
use crate::data::filter::{Selection, SelectionDomains};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::data::presentation::{run_pipeline, PipelineState};

pub const EMPTY_NOTICE: &str =
    "No data matches the current filters. Try adjusting the filters above.";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Values offered by each control.
    pub domains: Option<SelectionDomains>,

    /// Current control values.
    pub selection: Option<Selection>,

    /// Result of the latest recomputation.
    pub pipeline: PipelineState,

    /// Bubble chart for the current chart view (None when nothing matched).
    pub chart: Option<ChartSpec>,

    /// Country colours for the current chart.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Open the file or named dataset the configuration points at. A missing
    /// dataset leaves the state empty with a status message.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let mut state = AppState::default();
        match &config.file {
            Some(path) => state.load_file(path),
            None => state.load_named(&config.data_dir, &config.dataset),
        }
        state
    }

    /// Load `path`, replacing the current dataset on success.
    pub fn load_file(&mut self, path: &Path) {
        let result = loader::load_file(path).map(|ds| (path.to_path_buf(), ds));
        self.finish_load(result);
    }

    /// Load the dataset registered as `identifier` inside `dir`.
    pub fn load_named(&mut self, dir: &Path, identifier: &str) {
        let result = loader::load_named(dir, identifier);
        self.finish_load(result);
    }

    fn finish_load(&mut self, result: anyhow::Result<(PathBuf, Dataset)>) {
        let outcome = result.and_then(|(path, ds)| {
            self.set_dataset(ds)?;
            self.source = Some(path);
            Ok(())
        });
        if let Err(e) = outcome {
            log::error!("Failed to load dataset: {e:#}");
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    /// Ingest a newly loaded dataset, reset the controls to their defaults and
    /// run the pipeline once.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Result<(), DatasetError> {
        let domains = SelectionDomains::from_dataset(&dataset)?;
        self.selection = Some(domains.default_selection());
        self.domains = Some(domains);
        self.dataset = Some(dataset);
        self.pipeline = PipelineState::Loaded;
        self.status_message = None;
        self.recompute();
        Ok(())
    }

    /// Replace the selection and recompute if anything changed.
    pub fn apply_selection(&mut self, selection: Selection) {
        if self.selection.as_ref() == Some(&selection) {
            return;
        }
        log::debug!("Selection changed: {selection:?}");
        self.selection = Some(selection);
        self.recompute();
    }

    /// Recompute every derived view from the dataset and selection.
    pub fn recompute(&mut self) {
        let (Some(ds), Some(sel)) = (&self.dataset, &self.selection) else {
            return;
        };

        self.pipeline = run_pipeline(ds, sel);
        match &self.pipeline {
            PipelineState::FilteredNonEmpty(p) => {
                let spec = ChartSpec::build(ds, &p.chart, sel);
                self.color_map = Some(ColorMap::new(
                    spec.bubbles.iter().map(|b| b.country.as_str()),
                ));
                self.chart = Some(spec);
            }
            _ => {
                self.chart = None;
                self.color_map = None;
            }
        }
    }

    /// Informational lines shown above the results, in order.
    pub fn status_lines(&self) -> Vec<String> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        let mut lines = vec!["Dataset loaded".to_string(), column_list(&ds.columns)];
        if !matches!(self.pipeline, PipelineState::Loaded) {
            lines.push(format!("Filtered rows: {}", self.pipeline.matched_rows()));
        }
        lines
    }
}

/// `['Country', 'Year', ...]`
fn column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{c}'")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::dataset;
    use crate::data::model::InflationMetric;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state
            .set_dataset(dataset(&[
                ("Japan", 2019, "Asia", 5.9, Some(0.5)),
                ("Japan", 2020, "Asia", 5.9, Some(0.0)),
                ("Nepal", 2020, "Asia", 5.2, None),
                ("India", 2020, "Asia", 4.0, Some(6.2)),
                ("France", 2020, "Europe", 6.7, Some(0.5)),
            ]))
            .unwrap();
        state
    }

    #[test]
    fn loading_selects_defaults_and_filters() {
        let state = loaded();
        let sel = state.selection.as_ref().unwrap();
        assert_eq!(sel.year, 2020);
        assert_eq!(sel.region, "Asia");

        let PipelineState::FilteredNonEmpty(p) = &state.pipeline else {
            panic!("expected matches");
        };
        assert_eq!(p.filtered.indices, vec![1, 2]);
        assert_eq!(state.chart.as_ref().unwrap().bubbles.len(), 1);
        assert_eq!(
            state.status_lines().last().map(String::as_str),
            Some("Filtered rows: 2")
        );
    }

    #[test]
    fn status_lists_columns_single_quoted() {
        let state = loaded();
        let lines = state.status_lines();
        assert_eq!(lines[0], "Dataset loaded");
        assert!(lines[1].starts_with("['Country', 'Year', 'Continent/Region', "));
        assert!(lines[1].ends_with("'Producer Price Inflation']"));
    }

    #[test]
    fn selection_change_recomputes() {
        let mut state = loaded();
        let mut sel = state.selection.clone().unwrap();
        sel.region = "Europe".into();
        sel.metric = InflationMetric::Food;
        state.apply_selection(sel);

        let PipelineState::FilteredNonEmpty(p) = &state.pipeline else {
            panic!("expected matches");
        };
        assert_eq!(p.filtered.indices, vec![4]);
        assert_eq!(p.chart.metric, InflationMetric::Food);
        assert!(state.chart.as_ref().unwrap().title.contains("Food"));
    }

    #[test]
    fn empty_result_clears_chart() {
        let mut state = loaded();
        let mut sel = state.selection.clone().unwrap();
        sel.threshold = 9.0;
        state.apply_selection(sel);

        assert_eq!(state.pipeline, PipelineState::FilteredEmpty);
        assert!(state.chart.is_none());
        assert!(state.color_map.is_none());
        assert_eq!(
            state.status_lines().last().map(String::as_str),
            Some("Filtered rows: 0")
        );
    }

    #[test]
    fn failed_load_reports_status_and_keeps_state_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.load_named(dir.path(), "WHI_Inflation");

        assert!(state.dataset.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("WHI_Inflation"));
    }
}
