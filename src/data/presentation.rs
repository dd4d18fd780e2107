use super::filter::{derive_filtered_view, FilteredView, Selection, DEFAULT_ROW_LIMIT};
use super::model::{Dataset, InflationMetric};

// ---------------------------------------------------------------------------
// Row-limit domain
// ---------------------------------------------------------------------------

/// Smallest row limit the slider offers when enough rows matched.
pub const ROW_LIMIT_MIN: usize = 5;
/// Largest row limit ever offered.
pub const ROW_LIMIT_CAP: usize = 100;
pub const ROW_LIMIT_STEP: usize = 5;

/// Inclusive bounds of the row-limit slider for a given match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLimitBounds {
    pub min: usize,
    pub max: usize,
}

impl RowLimitBounds {
    /// `[5, min(matched, 100)]`, with the lower bound clamped down to the
    /// match count when fewer than five rows matched. `None` for no matches.
    pub fn for_matches(matched: usize) -> Option<Self> {
        if matched == 0 {
            return None;
        }
        let max = matched.min(ROW_LIMIT_CAP);
        Some(RowLimitBounds {
            min: ROW_LIMIT_MIN.min(max),
            max,
        })
    }

    pub fn default_limit(&self) -> usize {
        DEFAULT_ROW_LIMIT.min(self.max)
    }

    pub fn clamp(&self, requested: usize) -> usize {
        requested.clamp(self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Table and chart derivations
// ---------------------------------------------------------------------------

/// Prefix of the filtered view shown in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub indices: Vec<usize>,
    pub row_limit: usize,
}

impl TableView {
    pub fn title(&self) -> String {
        format!("Top {} Countries by Filters", self.row_limit)
    }
}

/// Filtered records that carry a value for the chosen metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartView {
    pub indices: Vec<usize>,
    pub metric: InflationMetric,
}

/// First `row_limit` records of `filtered`, in dataset order. Nulls are kept.
pub fn derive_table_view(filtered: &FilteredView, row_limit: usize) -> TableView {
    TableView {
        indices: filtered.indices.iter().copied().take(row_limit).collect(),
        row_limit,
    }
}

/// Every filtered record whose `metric` value is present. No row cap.
pub fn derive_chart_view(
    dataset: &Dataset,
    filtered: &FilteredView,
    metric: InflationMetric,
) -> ChartView {
    let indices = filtered
        .indices
        .iter()
        .copied()
        .filter(|&i| dataset.records[i].inflation(metric).is_some())
        .collect();
    ChartView { indices, metric }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Everything rendered below the controls when at least one record matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub filtered: FilteredView,
    pub row_limit: RowLimitBounds,
    pub table: TableView,
    pub chart: ChartView,
}

/// Where the dashboard stands after the latest recomputation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PipelineState {
    /// A dataset is loaded but nothing has been derived from it yet.
    #[default]
    Loaded,
    /// No record passed the filters; only the empty-state notice is shown.
    FilteredEmpty,
    FilteredNonEmpty(Presentation),
}

impl PipelineState {
    pub fn matched_rows(&self) -> usize {
        match self {
            PipelineState::FilteredNonEmpty(p) => p.filtered.len(),
            _ => 0,
        }
    }
}

/// Filter, then derive the table and chart views. Pure: the same dataset and
/// selection always give the same state.
pub fn run_pipeline(dataset: &Dataset, selection: &Selection) -> PipelineState {
    let filtered = derive_filtered_view(dataset, selection);

    let Some(bounds) = RowLimitBounds::for_matches(filtered.len()) else {
        log::warn!(
            "No records for year={} region={:?} score>{}",
            selection.year,
            selection.region,
            selection.threshold
        );
        return PipelineState::FilteredEmpty;
    };

    let row_limit = bounds.clamp(selection.row_limit);
    let table = derive_table_view(&filtered, row_limit);
    let chart = derive_chart_view(dataset, &filtered, selection.metric);

    log::debug!(
        "Filtered {} of {} records, table {} rows, chart {} points",
        filtered.len(),
        dataset.len(),
        table.indices.len(),
        chart.indices.len()
    );

    PipelineState::FilteredNonEmpty(Presentation {
        filtered,
        row_limit: bounds,
        table,
        chart,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::dataset;

    fn selection(threshold: f64, row_limit: usize) -> Selection {
        Selection {
            year: 2020,
            region: "Asia".into(),
            threshold,
            metric: InflationMetric::Headline,
            row_limit,
        }
    }

    #[test]
    fn bounds_follow_match_count() {
        assert_eq!(RowLimitBounds::for_matches(0), None);
        assert_eq!(
            RowLimitBounds::for_matches(2),
            Some(RowLimitBounds { min: 2, max: 2 })
        );
        assert_eq!(
            RowLimitBounds::for_matches(37),
            Some(RowLimitBounds { min: 5, max: 37 })
        );
        assert_eq!(
            RowLimitBounds::for_matches(250),
            Some(RowLimitBounds { min: 5, max: 100 })
        );
    }

    #[test]
    fn default_limit_is_ten_or_upper_bound() {
        let bounds = RowLimitBounds::for_matches(7).unwrap();
        assert_eq!(bounds.default_limit(), 7);
        assert_eq!(bounds.clamp(DEFAULT_ROW_LIMIT), 7);

        let bounds = RowLimitBounds::for_matches(60).unwrap();
        assert_eq!(bounds.default_limit(), 10);
        assert_eq!(bounds.clamp(1), 5);
    }

    #[test]
    fn table_is_a_stable_prefix() {
        let filtered = FilteredView {
            indices: vec![3, 8, 9, 14, 20, 21],
        };
        let first = derive_table_view(&filtered, 5);
        assert_eq!(first.indices, vec![3, 8, 9, 14, 20]);
        assert_eq!(derive_table_view(&filtered, 5), first);
        assert_eq!(first.title(), "Top 5 Countries by Filters");
    }

    #[test]
    fn asia_2020_scenario() {
        let ds = dataset(&[
            ("Nepal", 2020, "Asia", 4.0, Some(3.0)),
            ("Japan", 2020, "Asia", 5.5, Some(0.0)),
            ("Taiwan", 2020, "Asia", 6.2, None),
        ]);

        let PipelineState::FilteredNonEmpty(p) = run_pipeline(&ds, &selection(5.0, 10)) else {
            panic!("expected matches");
        };
        assert_eq!(p.filtered.indices, vec![1, 2]);
        assert_eq!(p.row_limit, RowLimitBounds { min: 2, max: 2 });
        assert_eq!(p.table.indices, vec![1, 2]);
        assert_eq!(p.table.row_limit, 2);
        assert_eq!(p.chart.indices, vec![1]);
    }

    #[test]
    fn chart_ignores_row_limit_and_drops_only_nulls() {
        let rows: Vec<(&str, i64, &str, f64, Option<f64>)> = (0..30)
            .map(|i| ("C", 2020, "Asia", 6.0, (i % 3 != 0).then_some(i as f64)))
            .collect();
        let ds = dataset(&rows);

        let PipelineState::FilteredNonEmpty(p) = run_pipeline(&ds, &selection(5.0, 5)) else {
            panic!("expected matches");
        };
        assert_eq!(p.table.indices.len(), 5);
        assert_eq!(p.chart.indices.len(), 20);
        assert!(p.chart.indices.iter().all(|&i| i % 3 != 0));
        // the table keeps the null rows
        assert_eq!(p.table.indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_result_produces_no_presentation() {
        let ds = dataset(&[("Japan", 2020, "Asia", 5.0, Some(1.0))]);
        let state = run_pipeline(&ds, &selection(5.0, 10));
        assert_eq!(state, PipelineState::FilteredEmpty);
        assert_eq!(state.matched_rows(), 0);
    }
}
