//! Log line parsing and filtering
//!
//! A log line is `<unix-seconds>\t<session>\t<command>`; the command is
//! everything after the second tab.

use crate::consts::INVALID_TIME;
use crate::core::{DisplayRecord, FilterConfig, TimeFormatter};

/// Parse one raw line. Malformed or filtered lines come back as the default
/// (filtered-out) record.
pub(crate) fn parse_line(line: &str, filter: &FilterConfig, time: &TimeFormatter) -> DisplayRecord {
    let mut items = line.splitn(3, '\t');
    let (Some(timestamp), Some(session), Some(command)) = (items.next(), items.next(), items.next())
    else {
        return DisplayRecord::default();
    };

    if let Some(wanted) = &filter.session
        && wanted != session
    {
        return DisplayRecord::default();
    }

    // Unparsable timestamps cannot be compared to the bound and are kept
    let parsed = timestamp.parse::<i64>().ok();
    if let (Some(since), Some(ts)) = (filter.since, parsed)
        && ts < since
    {
        return DisplayRecord::default();
    }

    if let Some(re) = &filter.grep
        && !re.is_match(command)
    {
        return DisplayRecord::default();
    }

    let display_time = match parsed {
        Some(ts) => time.format(ts),
        None => INVALID_TIME.to_string(),
    };

    DisplayRecord {
        display_time,
        session: session.to_string(),
        command: command.to_string(),
        cwd: String::new(),
    }
}
