use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    Report(#[from] ReportError),

    #[error("{0}")]
    Filter(#[from] FilterError),

    #[error("Could not open file \"{}\": {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write to \"{}\": {source}", .path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub(crate) enum ReportError {
    #[error(
        "Invalid since \"{input}\" (expected unix seconds, YYYY-MM-DD, YYYYMMDD or YYYY-MM-DDTHH:MM:SS)"
    )]
    InvalidSince { input: String },

    #[error("Failed to compile grep pattern \"{pattern}\": {source}")]
    InvalidGrep {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Error reading log: {0}")]
    Read(#[from] ReadError),

    #[error("Error writing report: {0}")]
    Write(std::io::Error),

    #[error("Failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
pub(crate) enum ReadError {
    #[error("A line detected that is longer than {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub(crate) enum FilterError {
    #[error("Parsing filters failed: {0}")]
    Invalid(String),

    #[error("Could not access filter file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
