//! The report entry point
//!
//! Streams when the reader already delivers lines in the requested order and
//! no directory annotation is needed. Otherwise every record is buffered first,
//! directories are resolved, and the buffer is printed in one sweep.

use std::io::Write;
use std::time::Instant;
use tracing::debug;

use crate::core::{DisplayRecord, Pipeline, ReportBuffer, ReportOptions, ReportSummary, resolve_directories};
use crate::error::ReportError;
use crate::output::{BufferedWriter, format_record};
use crate::reader::{Direction, LineReader};

pub(crate) fn run_report<W: Write>(
    reader: &mut dyn LineReader,
    options: &ReportOptions,
    out: W,
) -> Result<ReportSummary, ReportError> {
    let start = Instant::now();
    let reader_reversed = reader.direction() == Direction::Reverse;
    let streaming = !options.pwd && options.reverse == reader_reversed;
    // A constant session column is left out
    let show_session = options.filter.session.is_none();

    let pipeline = Pipeline::new(&options.filter, &options.time, options.workers);
    let buffer = ReportBuffer::new();
    let mut writer = BufferedWriter::new(out, options.flush_lines);
    let mut printed = 0;

    let lines = if streaming {
        pipeline.run(reader, &buffer, |index| {
            let line = buffer
                .with_record(index, |r| r.is_kept().then(|| format_record(r, show_session, false)))
                .flatten();
            if let Some(line) = line {
                writer.write_line(&line).map_err(ReportError::Write)?;
                printed += 1;
            }
            Ok(())
        })?
    } else {
        let lines = pipeline.run(reader, &buffer, |_| Ok(()))?;
        let mut records = buffer.into_records(lines);
        if options.pwd {
            resolve_directories(&mut records, &options.home, reader_reversed);
        }
        let backwards = options.reverse != reader_reversed;
        printed = if backwards {
            write_records(&mut writer, records.iter().rev(), show_session, options.pwd)?
        } else {
            write_records(&mut writer, records.iter(), show_session, options.pwd)?
        };
        lines
    };

    writer.close().map_err(ReportError::Write)?;

    debug!(
        lines,
        printed,
        streaming,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "report finished"
    );
    Ok(ReportSummary { lines, printed })
}

fn write_records<'a, W: Write>(
    writer: &mut BufferedWriter<W>,
    records: impl Iterator<Item = &'a DisplayRecord>,
    show_session: bool,
    show_cwd: bool,
) -> Result<usize, ReportError> {
    let mut printed = 0;
    for record in records.filter(|r| r.is_kept()) {
        writer
            .write_line(&format_record(record, show_session, show_cwd))
            .map_err(ReportError::Write)?;
        printed += 1;
    }
    Ok(printed)
}
