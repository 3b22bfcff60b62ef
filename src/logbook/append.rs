use regex::Regex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::LazyLock;

use super::ExclusionFilters;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[\r\n]+").expect("static pattern"));

/// Open the log for appending, creating it owner-readable only
pub(crate) fn open_log_for_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Append one `<now>\t<session>\t<command>` line.
///
/// Line breaks in the command collapse to single spaces and trailing spaces
/// are dropped. Returns `false` when an exclusion filter matched and nothing
/// was written.
pub(crate) fn append_line<W: Write>(
    out: &mut W,
    session: &str,
    command: &str,
    filters: &ExclusionFilters,
    now: i64,
) -> io::Result<bool> {
    let single = LINE_BREAKS.replace_all(command, " ");
    let command = single.trim_end_matches(' ');

    if filters.excludes(command) {
        return Ok(false);
    }

    // One write per record keeps concurrent appenders from interleaving
    let line = format!("{now}\t{session}\t{command}\n");
    out.write_all(line.as_bytes())?;
    out.flush()?;
    Ok(true)
}
