use std::fmt;

use super::error::DatasetError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_COUNTRY: &str = "Country";
pub const COL_YEAR: &str = "Year";
pub const COL_REGION: &str = "Continent/Region";
pub const COL_SCORE: &str = "Score";
pub const COL_GDP: &str = "GDP per Capita";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the common dataframe dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_nan() => write!(f, "NaN"),
            CellValue::Float(v) => write!(f, "{v:.3}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "None"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell. NaN floats count as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view of the cell. Whole floats (`2019.0`) are accepted since
    /// a column with a single null is usually stored as float.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Text view of the cell, `None` only for nulls.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) => Some(s.clone()),
            CellValue::Float(v) if v.is_nan() => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// InflationMetric – the fixed set of bubble-size columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InflationMetric {
    #[default]
    Headline,
    Energy,
    Food,
    OfficialCore,
    Producer,
}

impl InflationMetric {
    pub const COUNT: usize = 5;

    /// All metrics in the order they are offered to the user.
    pub const ALL: [InflationMetric; Self::COUNT] = [
        InflationMetric::Headline,
        InflationMetric::Energy,
        InflationMetric::Food,
        InflationMetric::OfficialCore,
        InflationMetric::Producer,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            InflationMetric::Headline => "Headline Consumer Price Inflation",
            InflationMetric::Energy => "Energy Consumer Price Inflation",
            InflationMetric::Food => "Food Consumer Price Inflation",
            InflationMetric::OfficialCore => "Official Core Consumer Price Inflation",
            InflationMetric::Producer => "Producer Price Inflation",
        }
    }

    /// Position inside [`Record::inflation`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for InflationMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Record – one country-year observation
// ---------------------------------------------------------------------------

/// One row of the dataset with the dashboard's columns pulled out and typed.
///
/// `cells` keeps every source cell in [`Dataset::columns`] order so the table
/// can show columns the dashboard does not otherwise use.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub year: Option<i64>,
    pub region: Option<String>,
    pub score: Option<f64>,
    pub gdp_per_capita: Option<f64>,
    pub inflation: [Option<f64>; InflationMetric::COUNT],
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn inflation(&self, metric: InflationMetric) -> Option<f64> {
        self.inflation[metric.index()]
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed dataset. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Whitespace-trimmed column names, in source order.
    pub columns: Vec<String>,
    /// All records, in source order.
    pub records: Vec<Record>,
}

/// Column positions resolved once against the trimmed header.
struct ColumnIndex {
    country: usize,
    year: usize,
    region: usize,
    score: usize,
    gdp: usize,
    inflation: [usize; InflationMetric::COUNT],
}

impl ColumnIndex {
    fn resolve(columns: &[String]) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let country = find(COL_COUNTRY)?;
        let year = find(COL_YEAR)?;
        let region = find(COL_REGION)?;
        let score = find(COL_SCORE)?;
        let gdp = find(COL_GDP)?;

        let mut inflation = [0; InflationMetric::COUNT];
        for metric in InflationMetric::ALL {
            inflation[metric.index()] = find(metric.column_name())?;
        }

        Ok(ColumnIndex {
            country,
            year,
            region,
            score,
            gdp,
            inflation,
        })
    }
}

impl Dataset {
    /// Build a dataset from a header and rows of cells.
    ///
    /// Column names are trimmed here; every later lookup uses the trimmed set.
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, DatasetError> {
        let columns: Vec<String> = columns.iter().map(|c| c.trim().to_string()).collect();
        let idx = ColumnIndex::resolve(&columns)?;

        let mut records = Vec::with_capacity(rows.len());
        for (row_no, cells) in rows.into_iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(DatasetError::RaggedRow {
                    row: row_no,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }

            let mut inflation = [None; InflationMetric::COUNT];
            for (slot, &col) in inflation.iter_mut().zip(idx.inflation.iter()) {
                *slot = cells[col].as_f64();
            }

            records.push(Record {
                country: cells[idx.country].as_text().unwrap_or_default(),
                year: cells[idx.year].as_i64(),
                region: cells[idx.region].as_text(),
                score: cells[idx.score].as_f64(),
                gdp_per_capita: cells[idx.gdp].as_f64(),
                inflation,
                cells,
            });
        }

        Ok(Dataset { columns, records })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        let mut cols: Vec<String> = [COL_COUNTRY, COL_YEAR, COL_REGION, COL_SCORE, COL_GDP]
            .iter()
            .map(|s| s.to_string())
            .collect();
        cols.extend(InflationMetric::ALL.iter().map(|m| m.column_name().to_string()));
        cols
    }

    fn row(country: &str, year: i64, food: CellValue) -> Vec<CellValue> {
        vec![
            CellValue::String(country.into()),
            CellValue::Integer(year),
            CellValue::String("Europe".into()),
            CellValue::Float(6.5),
            CellValue::Float(1.2),
            CellValue::Float(2.0),
            CellValue::Float(3.0),
            food,
            CellValue::Null,
            CellValue::Integer(4),
        ]
    }

    #[test]
    fn from_rows_trims_headers_and_types_cells() {
        let cols: Vec<String> = header().into_iter().map(|c| format!("  {c} ")).collect();
        let ds = Dataset::from_rows(cols, vec![row("France", 2019, CellValue::Float(1.5))])
            .unwrap();

        assert_eq!(ds.columns[2], COL_REGION);
        let r = &ds.records[0];
        assert_eq!(r.country, "France");
        assert_eq!(r.year, Some(2019));
        assert_eq!(r.region.as_deref(), Some("Europe"));
        assert_eq!(r.inflation(InflationMetric::Food), Some(1.5));
        assert_eq!(r.inflation(InflationMetric::OfficialCore), None);
        assert_eq!(r.inflation(InflationMetric::Producer), Some(4.0));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let mut cols = header();
        cols.retain(|c| c != COL_GDP);
        let err = Dataset::from_rows(cols, Vec::new()).unwrap_err();
        assert_eq!(err, DatasetError::MissingColumn(COL_GDP.to_string()));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let mut short = row("Peru", 2020, CellValue::Null);
        short.pop();
        let err = Dataset::from_rows(header(), vec![short]).unwrap_err();
        assert!(matches!(err, DatasetError::RaggedRow { row: 0, .. }));
    }

    #[test]
    fn nan_counts_as_missing() {
        let ds = Dataset::from_rows(header(), vec![row("Chile", 2021, CellValue::Float(f64::NAN))])
            .unwrap();
        assert_eq!(ds.records[0].inflation(InflationMetric::Food), None);
        assert!(CellValue::Float(f64::NAN).is_null());
    }

    #[test]
    fn whole_float_year_is_an_integer() {
        assert_eq!(CellValue::Float(2018.0).as_i64(), Some(2018));
        assert_eq!(CellValue::Float(2018.5).as_i64(), None);
    }

    #[test]
    fn metrics_are_listed_in_column_order() {
        let names: Vec<&str> = InflationMetric::ALL.iter().map(|m| m.column_name()).collect();
        assert_eq!(names[0], "Headline Consumer Price Inflation");
        assert_eq!(names[4], "Producer Price Inflation");
        assert_eq!(InflationMetric::default(), InflationMetric::ALL[0]);
        assert!(InflationMetric::ALL.iter().enumerate().all(|(i, m)| m.index() == i));
    }
}
