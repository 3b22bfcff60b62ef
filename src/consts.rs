/// Absolute timestamp format used for records older than a week
pub(crate) const ABSOLUTE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Rendered in place of the time when a record's timestamp does not parse
pub(crate) const INVALID_TIME: &str = "<invalid time>";

/// Default upper bound for a single log line, in bytes
pub(crate) const DEFAULT_MAX_LINE_LENGTH: usize = 256 * 1024;

/// Number of written lines between flushes of the report output
pub(crate) const DEFAULT_FLUSH_LINES: usize = 256;

/// Initial slot capacity of the report buffer
pub(crate) const INITIAL_REPORT_LEN: usize = 16 * 1024;
