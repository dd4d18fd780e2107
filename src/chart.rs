use crate::data::filter::Selection;
use crate::data::model::Dataset;
use crate::data::presentation::ChartView;

// ---------------------------------------------------------------------------
// Bubble chart description (renderer-independent)
// ---------------------------------------------------------------------------

pub const X_LABEL: &str = "GDP per Capita";
pub const Y_LABEL: &str = "Score";

/// Radius of the bubble with the largest absolute metric value.
pub const MAX_RADIUS: f32 = 20.0;
/// Radius floor so zero-valued bubbles stay visible.
pub const MIN_RADIUS: f32 = 2.0;

/// One plotted country.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub country: String,
    pub gdp_per_capita: f64,
    pub score: f64,
    /// Raw metric value driving the size.
    pub value: f64,
    pub radius: f32,
}

/// Field mapping handed to the plot: x = GDP, y = score, size = metric,
/// colour and hover label = country.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub bubbles: Vec<Bubble>,
    /// Records with no GDP or score, which have no position on the plot.
    pub skipped: usize,
}

impl ChartSpec {
    pub fn build(dataset: &Dataset, chart: &ChartView, selection: &Selection) -> Self {
        let max_abs = chart
            .indices
            .iter()
            .filter_map(|&i| dataset.records[i].inflation(chart.metric))
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));

        let mut skipped = 0;
        let mut bubbles = Vec::with_capacity(chart.indices.len());
        for &i in &chart.indices {
            let r = &dataset.records[i];
            let (Some(x), Some(y), Some(value)) =
                (r.gdp_per_capita, r.score, r.inflation(chart.metric))
            else {
                skipped += 1;
                continue;
            };
            bubbles.push(Bubble {
                country: r.country.clone(),
                gdp_per_capita: x,
                score: y,
                value,
                radius: bubble_radius(value, max_abs),
            });
        }

        if skipped > 0 {
            log::warn!("{skipped} chart records have no GDP or score and were not plotted");
        }

        ChartSpec {
            title: chart_title(selection),
            bubbles,
            skipped,
        }
    }

    /// Note shown under the title when some records could not be placed.
    pub fn skipped_note(&self) -> Option<String> {
        (self.skipped > 0).then(|| {
            format!(
                "{} {} without GDP per capita or score not shown",
                self.skipped,
                if self.skipped == 1 { "country" } else { "countries" }
            )
        })
    }
}

pub fn chart_title(selection: &Selection) -> String {
    format!(
        "Happiness vs GDP ({}) – {}, {}",
        selection.metric, selection.region, selection.year
    )
}

/// Area-proportional radius: `MAX_RADIUS * sqrt(|value| / max_abs)`, floored
/// at `MIN_RADIUS`. Negative values are sized by magnitude.
pub fn bubble_radius(value: f64, max_abs: f64) -> f32 {
    if max_abs <= 0.0 || !value.is_finite() {
        return MIN_RADIUS;
    }
    let scaled = MAX_RADIUS * (value.abs() / max_abs).sqrt() as f32;
    scaled.max(MIN_RADIUS)
}
