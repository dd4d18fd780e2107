use std::path::PathBuf;

use clap::Parser;

/// Identifier of the dataset opened at startup.
pub const DEFAULT_DATASET: &str = "WHI_Inflation";

#[derive(Debug, Clone, Parser)]
#[command(name = "happiness-dashboard", version, about = "Global happiness vs economy dashboard")]
pub struct DashboardConfig {
    /// Directory searched for the named dataset.
    #[arg(long, env = "HAPPINESS_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Dataset identifier, resolved to `<data-dir>/<dataset>.{csv,parquet,pq,json}`.
    #[arg(long, env = "HAPPINESS_DATASET", default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Open this file instead of the named dataset.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_arguments_are_parsed() {
        let config = DashboardConfig::try_parse_from([
            "happiness-dashboard",
            "--data-dir",
            "/srv/data",
            "--dataset",
            "WHI_2023",
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.dataset, "WHI_2023");
        assert!(config.file.is_none());
    }

    #[test]
    fn file_overrides_are_kept() {
        let config =
            DashboardConfig::try_parse_from(["happiness-dashboard", "--file", "sample.parquet"])
                .unwrap();
        assert_eq!(config.file, Some(PathBuf::from("sample.parquet")));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(DashboardConfig::try_parse_from(["happiness-dashboard", "--port", "1"]).is_err());
    }
}
