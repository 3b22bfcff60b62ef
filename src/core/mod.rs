//! Report core - parsing, ordering and working-directory inference

mod engine;
mod parser;
mod pwd;
mod report;
mod time;
mod types;

pub(crate) use engine::{Pipeline, ReportBuffer};
pub(crate) use parser::parse_line;
pub(crate) use pwd::resolve_directories;
pub(crate) use report::run_report;
pub(crate) use time::TimeFormatter;
pub(crate) use types::{DisplayRecord, FilterConfig, ReportOptions, ReportSummary};
