use crate::core::DisplayRecord;

/// Render one report line: `[<session> ]<time>[\t<cwd>]\t<command>\n`
pub(crate) fn format_record(record: &DisplayRecord, show_session: bool, show_cwd: bool) -> String {
    let mut line = String::with_capacity(
        record.session.len() + record.display_time.len() + record.cwd.len() + record.command.len() + 4,
    );
    if show_session {
        line.push_str(&record.session);
        line.push(' ');
    }
    line.push_str(&record.display_time);
    if show_cwd {
        line.push('\t');
        line.push_str(&record.cwd);
    }
    line.push('\t');
    line.push_str(&record.command);
    line.push('\n');
    line
}
