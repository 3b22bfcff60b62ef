//! Writing side of the command log

mod append;
mod filters;

pub(crate) use append::{append_line, open_log_for_append};
pub(crate) use filters::ExclusionFilters;
