//! Error type shared by every library module.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Two parallel inputs (e.g. start and end dates) differ in length.
    #[error("length mismatch: {left} start values but {right} end values")]
    LengthMismatch { left: usize, right: usize },

    #[error("function can only be applied to dates in the same year: {from} and {to}")]
    DifferentYears { from: String, to: String },

    #[error("function can only be applied to date pairs in the same month: {from} and {to}")]
    DifferentMonths { from: String, to: String },

    #[error("invalid quarter '{0}': expected 1, 2, 3 or 4")]
    InvalidQuarter(String),

    #[error("invalid year '{0}'")]
    InvalidYear(String),

    #[error("invalid period '{period}': {reason}")]
    InvalidPeriod { period: String, reason: String },

    #[error("frequency needs to be either monthly or quarterly, got '{0}'")]
    InvalidFrequency(String),

    #[error("no format with name {0} within given dictionary")]
    UnknownFormat(String),

    #[error("non-digits in dictionary keys of format {0}; fix your JSON file")]
    NonDigitKeys(String),

    #[error("columns {} are not present in the table", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("values {} are not numeric; specify aggregation functions", .0.join(", "))]
    NonNumericColumns(Vec<String>),

    #[error("invalid merge: {0}")]
    InvalidMerge(String),

    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Cloud storage locations cannot be scanned from this crate.
    #[error("unsupported storage location '{0}': only local directories can be searched")]
    UnsupportedLocation(String),

    #[error("KLASS request to {url} failed with status {status}")]
    Klass { status: u16, url: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}
