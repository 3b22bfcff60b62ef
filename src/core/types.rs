//! Core data types for one report run

use regex::Regex;
use std::path::PathBuf;

use crate::core::TimeFormatter;
use crate::error::ReportError;

/// One log line projected for display.
///
/// An empty `display_time` marks the record as filtered out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct DisplayRecord {
    pub(crate) display_time: String,
    pub(crate) session: String,
    pub(crate) command: String,
    /// Filled in by the working-directory pass only
    pub(crate) cwd: String,
}

impl DisplayRecord {
    pub(crate) fn is_kept(&self) -> bool {
        !self.display_time.is_empty()
    }
}

/// Record filters, fixed for the duration of a run
#[derive(Debug, Clone, Default)]
pub(crate) struct FilterConfig {
    pub(crate) session: Option<String>,
    pub(crate) grep: Option<Regex>,
    /// Inclusive lower bound in unix seconds
    pub(crate) since: Option<i64>,
}

impl FilterConfig {
    pub(crate) fn new(
        session: Option<&str>,
        grep: Option<&str>,
        since: Option<i64>,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            session: session.filter(|s| !s.is_empty()).map(str::to_string),
            grep: match grep {
                Some(term) => compile_grep(term)?,
                None => None,
            },
            since,
        })
    }
}

/// Compile a loose grep term: whitespace-separated tokens must appear in
/// order, anything may sit between them.
pub(crate) fn compile_grep(term: &str) -> Result<Option<Regex>, ReportError> {
    let tokens: Vec<&str> = term.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    let pattern = tokens.join(".*");
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| ReportError::InvalidGrep {
            pattern: term.to_string(),
            source,
        })
}

/// Everything `run_report` needs besides the reader and the sink
#[derive(Debug, Clone)]
pub(crate) struct ReportOptions {
    pub(crate) filter: FilterConfig,
    pub(crate) time: TimeFormatter,
    /// Annotate records with the inferred working directory
    pub(crate) pwd: bool,
    /// Print in reverse file order
    pub(crate) reverse: bool,
    /// Starting directory of every session
    pub(crate) home: PathBuf,
    pub(crate) workers: usize,
    pub(crate) flush_lines: usize,
}

/// Counts gathered during a run, for diagnostics only
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportSummary {
    pub(crate) lines: usize,
    pub(crate) printed: usize,
}
