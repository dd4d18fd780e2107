use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Write a synthetic `WHI_Inflation` dataset as CSV and Parquet.
#[derive(Debug, Parser)]
struct Args {
    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Base name of the written files.
    #[arg(long, default_value = "WHI_Inflation")]
    name: String,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, PartialEq, Serialize)]
struct SampleRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Headline Consumer Price Inflation")]
    headline: Option<f64>,
    #[serde(rename = "Energy Consumer Price Inflation")]
    energy: Option<f64>,
    #[serde(rename = "Food Consumer Price Inflation")]
    food: Option<f64>,
    #[serde(rename = "Official Core Consumer Price Inflation")]
    core: Option<f64>,
    #[serde(rename = "Producer Price Inflation")]
    producer: Option<f64>,
    #[serde(rename = "Continent/Region")]
    region: String,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "GDP per Capita")]
    gdp_per_capita: f64,
    #[serde(rename = "Social support")]
    social_support: f64,
    #[serde(rename = "Generosity")]
    generosity: f64,
}

/// `(country, region, base score, base GDP per capita)`
const COUNTRIES: [(&str, &str, f64, f64); 20] = [
    ("Finland", "Europe", 7.7, 1.85),
    ("Denmark", "Europe", 7.5, 1.90),
    ("Germany", "Europe", 7.0, 1.80),
    ("Greece", "Europe", 5.6, 1.55),
    ("Japan", "Asia", 6.0, 1.70),
    ("India", "Asia", 4.2, 0.95),
    ("Vietnam", "Asia", 5.6, 1.05),
    ("Nepal", "Asia", 5.1, 0.80),
    ("Thailand", "Asia", 5.9, 1.25),
    ("Kenya", "Africa", 4.5, 0.70),
    ("Ghana", "Africa", 4.9, 0.80),
    ("Nigeria", "Africa", 5.0, 0.85),
    ("Morocco", "Africa", 5.1, 1.00),
    ("Brazil", "South America", 6.3, 1.30),
    ("Chile", "South America", 6.2, 1.45),
    ("Peru", "South America", 5.8, 1.20),
    ("Canada", "North America", 7.0, 1.85),
    ("Mexico", "North America", 6.4, 1.35),
    ("Australia", "Oceania", 7.2, 1.85),
    ("New Zealand", "Oceania", 7.2, 1.75),
];

/// Uniform noise in `[-spread, spread]`.
fn jitter(rng: &mut StdRng, spread: f64) -> f64 {
    rng.random_range(-spread..=spread)
}

/// `Some(value)` except for a `missing` fraction of draws.
fn maybe(rng: &mut StdRng, value: f64, missing: f64) -> Option<f64> {
    (!rng.random_bool(missing)).then_some(value)
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let p = 10f64.powi(decimals);
    (v * p).round() / p
}

fn generate_rows(rng: &mut StdRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for year in 2015..=2023_i64 {
        // Shared shock so inflation moves together across countries, peaking in 2022.
        let shock = match year {
            2021 => 2.5,
            2022 => 6.0,
            2023 => 3.5,
            _ => 0.0,
        };
        for &(country, region, base_score, base_gdp) in &COUNTRIES {
            let headline = 2.0 + shock + jitter(rng, 2.5);
            let energy = headline * 2.0 + jitter(rng, 6.0);
            let food = headline + 0.5 + jitter(rng, 2.5);
            let core = headline * 0.7 + jitter(rng, 1.0);
            let producer = headline * 1.4 + jitter(rng, 5.0);
            rows.push(SampleRow {
                country: country.to_string(),
                year,
                headline: maybe(rng, round_to(headline, 2), 0.02),
                energy: maybe(rng, round_to(energy, 2), 0.15),
                food: maybe(rng, round_to(food, 2), 0.05),
                core: maybe(rng, round_to(core, 2), 0.25),
                producer: maybe(rng, round_to(producer, 2), 0.20),
                region: region.to_string(),
                score: round_to((base_score + jitter(rng, 0.25)).clamp(2.0, 8.0), 3),
                gdp_per_capita: round_to((base_gdp + jitter(rng, 0.08)).max(0.1), 3),
                social_support: round_to(rng.random_range(0.9..1.5), 3),
                generosity: round_to(rng.random_range(0.0..0.4), 3),
            });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let text = |f: fn(&SampleRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&SampleRow) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let nullable = |f: fn(&SampleRow) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(Field, ArrayRef)> = vec![
        (Field::new("Country", DataType::Utf8, false), text(|r| &r.country)),
        (
            Field::new("Year", DataType::Int64, false),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())) as ArrayRef,
        ),
        (Field::new("Headline Consumer Price Inflation", DataType::Float64, true), nullable(|r| r.headline)),
        (Field::new("Energy Consumer Price Inflation", DataType::Float64, true), nullable(|r| r.energy)),
        (Field::new("Food Consumer Price Inflation", DataType::Float64, true), nullable(|r| r.food)),
        (Field::new("Official Core Consumer Price Inflation", DataType::Float64, true), nullable(|r| r.core)),
        (Field::new("Producer Price Inflation", DataType::Float64, true), nullable(|r| r.producer)),
        (Field::new("Continent/Region", DataType::Utf8, false), text(|r| &r.region)),
        (Field::new("Score", DataType::Float64, false), float(|r| r.score)),
        (Field::new("GDP per Capita", DataType::Float64, false), float(|r| r.gdp_per_capita)),
        (Field::new("Social support", DataType::Float64, false), float(|r| r.social_support)),
        (Field::new("Generosity", DataType::Float64, false), float(|r| r.generosity)),
    ];

    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let rows = generate_rows(&mut rng);

    std::fs::create_dir_all(&args.out_dir).context("creating output directory")?;
    let csv_path = args.out_dir.join(format!("{}.csv", args.name));
    let parquet_path = args.out_dir.join(format!("{}.parquet", args.name));

    write_csv(&csv_path, &rows)?;
    write_parquet(&parquet_path, &rows)?;

    println!(
        "Wrote {} country-year rows to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
