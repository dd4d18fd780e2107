use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};

/// Extensions tried, in order, when resolving a dataset identifier.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "parquet", "pq", "json"];

/// Cell texts read as missing values.
const NULL_TOKENS: [&str; 7] = ["", "NaN", "nan", "NA", "N/A", "null", "None"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Find `<dir>/<identifier>.<ext>` for the first supported extension present.
pub fn resolve_named(dir: &Path, identifier: &str) -> Option<PathBuf> {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{identifier}.{ext}")))
        .find(|p| p.is_file())
}

/// Load the dataset registered under `identifier` inside `dir`.
pub fn load_named(dir: &Path, identifier: &str) -> Result<(PathBuf, Dataset)> {
    let path = resolve_named(dir, identifier).with_context(|| {
        format!(
            "no dataset named '{identifier}' in {} (looked for .{})",
            dir.display(),
            SUPPORTED_EXTENSIONS.join(", .")
        )
    })?;
    let dataset = load_file(&path)?;
    Ok((path, dataset))
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one row per country-year
/// * `.parquet` – flat columns of strings / ints / floats
/// * `.json`    – `[{ "Country": ..., "Year": ..., ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (columns, rows) = match ext.as_str() {
        "csv" => read_csv(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        "json" => read_json(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = Dataset::from_rows(columns, rows)
        .with_context(|| format!("validating {}", path.display()))?;
    log::info!(
        "Loaded {} records from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.columns
    );
    Ok(dataset)
}

type Table = (Vec<String>, Vec<Vec<CellValue>>);

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok((headers, rows))
}

/// Only headers are trimmed; text cells keep their surrounding whitespace so
/// `" Asia"` stays a different region from `"Asia"`.
fn guess_cell_type(raw: &str) -> CellValue {
    if NULL_TOKENS.contains(&raw) {
        return CellValue::Null;
    }
    let numeric = raw.trim();
    if let Ok(i) = numeric.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = numeric.parse::<f64>() {
        return CellValue::Float(f);
    }
    if raw == "true" || raw == "false" {
        return CellValue::Bool(raw == "true");
    }
    CellValue::String(raw.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Columns are taken in order of first appearance; absent keys are nulls.
fn read_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            columns
                .iter()
                .map(|c| obj.get(c).map_or(CellValue::Null, json_to_cell))
                .collect()
        })
        .collect();

    Ok((columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file. Works with files written by **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for (batch_no, batch_result) in reader.enumerate() {
        let batch = batch_result.context("reading parquet record batch")?;

        if batch_no == 0 && log::log_enabled!(log::Level::Trace) {
            let head = batch.slice(0, batch.num_rows().min(5));
            if let Ok(table) = arrow::util::pretty::pretty_format_batches(&[head]) {
                log::trace!("First parquet rows:\n{table}");
            }
        }

        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_cell(col, row))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("batch {batch_no}, row {row}"))?;
            rows.push(cells);
        }
    }

    Ok((columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let any = col.as_any();
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::Float(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        _ => {
            let formatter = ArrayFormatter::try_new(col.as_ref(), &FormatOptions::default())
                .context("formatting parquet cell")?;
            Some(CellValue::String(formatter.value(row).to_string()))
        }
    };
    cell.with_context(|| format!("column type {:?} did not match its array", col.data_type()))
}
