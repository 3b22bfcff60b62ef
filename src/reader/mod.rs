//! Line readers over the command log
//!
//! Both readers split a byte stream the same way: every `\n` ends a line and
//! whatever follows the last `\n` is one more (possibly empty) line. An empty
//! stream has no lines. Reversing the forward output gives the reverse output.

mod forward;
mod reverse;

pub(crate) use forward::ForwardLineReader;
pub(crate) use reverse::ReverseLineReader;

use crate::error::ReadError;

/// File order in which a reader yields its lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Reverse,
}

/// Anything that yields log lines one at a time
pub(crate) trait LineReader: Send {
    /// Next line without its terminator, or `None` at end of stream
    fn read_line(&mut self) -> Result<Option<String>, ReadError>;

    fn direction(&self) -> Direction;
}

pub(super) fn decode_line(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
pub(crate) fn collect_lines(reader: &mut dyn LineReader) -> Result<Vec<String>, ReadError> {
    let mut lines = Vec::new();
    while let Some(line) = reader.read_line()? {
        lines.push(line);
    }
    Ok(lines)
}
