use thiserror::Error;

/// Schema-level problems found while turning parsed rows into a [`Dataset`].
///
/// File-level failures (I/O, CSV/JSON/Parquet decoding) are reported through
/// `anyhow` by the loader; these variants cover a file that parsed fine but
/// cannot drive the dashboard.
///
/// [`Dataset`]: super::model::Dataset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("column '{0}' has no usable values")]
    EmptyDomain(&'static str),

    #[error("row {row} has {found} cells but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
