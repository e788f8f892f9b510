use thiserror::Error;

/// Anything that stops the dataset from loading. All of these are fatal:
/// the dashboard never renders from a partial table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("row {row}: `{value}` is not a four-digit release year")]
    InvalidYear { row: usize, value: String },

    #[error("row {row}: unknown universe `{value}` (expected Marvel or DC)")]
    UnknownUniverse { row: usize, value: String },

    #[error("row {row}: column `{column}` has non-numeric value `{value}`")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// A universe label other than `Marvel` or `DC`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown universe `{0}` (expected Marvel or DC)")]
pub struct UnknownUniverse(pub String);

/// Errors that can occur while drawing a chart.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to draw chart: {0}")]
    Drawing(String),
}

pub(crate) fn drawing<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}
