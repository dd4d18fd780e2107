use std::collections::BTreeSet;

use super::error::DatasetError;
use super::model::{Dataset, InflationMetric, Record};

// ---------------------------------------------------------------------------
// Selection: the current control values
// ---------------------------------------------------------------------------

/// Threshold the happiness slider starts at.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Rows shown in the table before the user moves the row-limit slider.
pub const DEFAULT_ROW_LIMIT: usize = 10;

/// One value per control widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub year: i64,
    pub region: String,
    /// Records must score strictly above this.
    pub threshold: f64,
    pub metric: InflationMetric,
    /// Requested table length; clamped against the matched rows when the
    /// table is derived.
    pub row_limit: usize,
}

// ---------------------------------------------------------------------------
// Domains offered by the controls
// ---------------------------------------------------------------------------

/// The values each control may take, computed once per dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDomains {
    /// Sorted distinct years.
    pub years: Vec<i64>,
    /// Sorted distinct regions.
    pub regions: Vec<String>,
    /// `(min, max)` score, each rounded to one decimal.
    pub score_range: (f64, f64),
}

impl SelectionDomains {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, DatasetError> {
        let years: BTreeSet<i64> = dataset.records.iter().filter_map(|r| r.year).collect();
        let regions: BTreeSet<&str> = dataset
            .records
            .iter()
            .filter_map(|r| r.region.as_deref())
            .collect();

        let (min, max) = dataset
            .records
            .iter()
            .filter_map(|r| r.score)
            .fold(None, |acc: Option<(f64, f64)>, s| match acc {
                None => Some((s, s)),
                Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
            })
            .ok_or(DatasetError::EmptyDomain(super::model::COL_SCORE))?;

        if years.is_empty() {
            return Err(DatasetError::EmptyDomain(super::model::COL_YEAR));
        }
        if regions.is_empty() {
            return Err(DatasetError::EmptyDomain(super::model::COL_REGION));
        }

        Ok(SelectionDomains {
            years: years.into_iter().collect(),
            regions: regions.into_iter().map(str::to_string).collect(),
            score_range: (round1(min), round1(max)),
        })
    }

    /// Latest year, first region, fixed threshold, first metric. The threshold
    /// is pulled into the score range so the slider never has to move it.
    pub fn default_selection(&self) -> Selection {
        let (lo, hi) = self.score_range;
        Selection {
            year: self.years.last().copied().unwrap_or_default(),
            region: self.regions.first().cloned().unwrap_or_default(),
            threshold: DEFAULT_THRESHOLD.clamp(lo, hi),
            metric: InflationMetric::default(),
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Indices of the records passing the current selection, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the indices against the dataset they were derived from.
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> + 'a {
        self.indices.iter().map(move |&i| &dataset.records[i])
    }
}

/// Whether `record` passes year, region and threshold. A null in any of the
/// three fields never matches.
pub fn matches_selection(record: &Record, selection: &Selection) -> bool {
    record.year == Some(selection.year)
        && record.region.as_deref() == Some(selection.region.as_str())
        && record.score.is_some_and(|s| s > selection.threshold)
}

/// Return the records that pass all three predicates, preserving order.
pub fn derive_filtered_view(dataset: &Dataset, selection: &Selection) -> FilteredView {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_selection(r, selection))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::model::{CellValue, COL_COUNTRY, COL_GDP, COL_REGION, COL_SCORE, COL_YEAR};

    /// `(country, year, region, score, headline inflation)`
    pub(crate) fn dataset(rows: &[(&str, i64, &str, f64, Option<f64>)]) -> Dataset {
        let mut cols: Vec<String> = [COL_COUNTRY, COL_YEAR, COL_REGION, COL_SCORE, COL_GDP]
            .iter()
            .map(|s| s.to_string())
            .collect();
        cols.extend(InflationMetric::ALL.iter().map(|m| m.column_name().to_string()));

        let rows = rows
            .iter()
            .map(|&(country, year, region, score, headline)| {
                let mut cells = vec![
                    CellValue::String(country.into()),
                    CellValue::Integer(year),
                    CellValue::String(region.into()),
                    CellValue::Float(score),
                    CellValue::Float(score * 0.2),
                    headline.map_or(CellValue::Null, CellValue::Float),
                ];
                cells.extend((1..InflationMetric::COUNT).map(|i| CellValue::Float(i as f64)));
                cells
            })
            .collect();
        Dataset::from_rows(cols, rows).unwrap()
    }

    fn selection(year: i64, region: &str, threshold: f64) -> Selection {
        Selection {
            year,
            region: region.to_string(),
            threshold,
            metric: InflationMetric::Headline,
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }

    #[test]
    fn keeps_exactly_the_conjunction() {
        let ds = dataset(&[
            ("Japan", 2020, "Asia", 6.0, Some(1.0)),
            ("Japan", 2019, "Asia", 6.0, Some(1.0)),
            ("France", 2020, "Europe", 6.5, Some(1.0)),
            ("India", 2020, "Asia", 4.0, Some(1.0)),
            ("Korea", 2020, "Asia", 5.9, None),
        ]);
        let view = derive_filtered_view(&ds, &selection(2020, "Asia", 5.0));
        assert_eq!(view.indices, vec![0, 4]);
    }

    #[test]
    fn score_equal_to_threshold_is_excluded() {
        let ds = dataset(&[
            ("A", 2020, "Asia", 5.0, Some(1.0)),
            ("B", 2020, "Asia", 5.000001, Some(1.0)),
        ]);
        let view = derive_filtered_view(&ds, &selection(2020, "Asia", 5.0));
        assert_eq!(view.indices, vec![1]);
    }

    #[test]
    fn preserves_dataset_order() {
        let ds = dataset(&[
            ("Z", 2021, "Africa", 7.0, None),
            ("A", 2021, "Africa", 6.0, None),
            ("M", 2021, "Africa", 8.0, None),
        ]);
        let view = derive_filtered_view(&ds, &selection(2021, "Africa", 0.0));
        let names: Vec<&str> = view.records(&ds).map(|r| r.country.as_str()).collect();
        assert_eq!(names, ["Z", "A", "M"]);
    }

    #[test]
    fn no_match_gives_empty_view() {
        let ds = dataset(&[("A", 2020, "Asia", 6.0, None)]);
        let view = derive_filtered_view(&ds, &selection(2020, "Europe", 5.0));
        assert!(view.is_empty());
    }

    #[test]
    fn domains_are_sorted_and_defaults_follow_them() {
        let ds = dataset(&[
            ("A", 2021, "Europe", 7.46, None),
            ("B", 2015, "Asia", 3.04, None),
            ("C", 2023, "Africa", 5.0, None),
            ("D", 2021, "Asia", 6.0, None),
        ]);
        let domains = SelectionDomains::from_dataset(&ds).unwrap();
        assert_eq!(domains.years, vec![2015, 2021, 2023]);
        assert_eq!(domains.regions, vec!["Africa", "Asia", "Europe"]);
        assert_eq!(domains.score_range, (3.0, 7.5));

        let sel = domains.default_selection();
        assert_eq!(sel.year, 2023);
        assert_eq!(sel.region, "Africa");
        assert_eq!(sel.threshold, DEFAULT_THRESHOLD);
        assert_eq!(sel.metric, InflationMetric::Headline);
        assert_eq!(sel.row_limit, DEFAULT_ROW_LIMIT);
    }

    #[test]
    fn default_threshold_is_kept_inside_score_range() {
        let high = dataset(&[("A", 2020, "Europe", 6.2, None), ("B", 2020, "Europe", 7.8, None)]);
        let sel = SelectionDomains::from_dataset(&high).unwrap().default_selection();
        assert_eq!(sel.threshold, 6.2);

        let low = dataset(&[("A", 2020, "Africa", 3.1, None), ("B", 2020, "Africa", 4.4, None)]);
        let sel = SelectionDomains::from_dataset(&low).unwrap().default_selection();
        assert_eq!(sel.threshold, 4.4);
    }

    #[test]
    fn empty_dataset_has_no_domain() {
        let ds = dataset(&[]);
        assert!(matches!(
            SelectionDomains::from_dataset(&ds),
            Err(DatasetError::EmptyDomain(_))
        ));
    }
}
