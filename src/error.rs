use thiserror::Error;

use crate::record::Column;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that stop a whole stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required column is absent from the input header
    #[error("required column `{column}` is missing from the input header")]
    MissingColumn { column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single row or line was dropped. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("row could not be parsed as CSV: {0}")]
    MalformedRow(String),

    #[error("row has no value for `{0}`")]
    MissingField(Column),

    #[error("rating `{0}` is not an integer")]
    InvalidRating(String),

    #[error("row does not pass the job filter")]
    Filtered,

    #[error("key is empty")]
    EmptyKey,

    #[error("key contains a tab or line break")]
    InvalidKey,

    #[error("line has no tab separator")]
    MalformedLine,

    #[error("value `{0}` is not an integer")]
    InvalidValue(String),
}

impl SkipReason {
    /// Stable label used as the counter name in run summaries.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::MalformedRow(_) => "malformed_row",
            SkipReason::MissingField(_) => "missing_field",
            SkipReason::InvalidRating(_) => "invalid_rating",
            SkipReason::Filtered => "filtered",
            SkipReason::EmptyKey => "empty_key",
            SkipReason::InvalidKey => "invalid_key",
            SkipReason::MalformedLine => "malformed_line",
            SkipReason::InvalidValue(_) => "invalid_value",
        }
    }
}
