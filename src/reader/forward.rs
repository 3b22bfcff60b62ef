use std::io::{BufRead, BufReader, Read};

use super::{Direction, LineReader, decode_line};
use crate::error::ReadError;

/// Reads lines front to back through a buffer sized to the line limit
pub(crate) struct ForwardLineReader<R> {
    reader: BufReader<R>,
    max_line_length: usize,
    seen_any: bool,
    done: bool,
}

impl<R: Read> ForwardLineReader<R> {
    pub(crate) fn new(inner: R, max_line_length: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(max_line_length.max(1), inner),
            max_line_length,
            seen_any: false,
            done: false,
        }
    }
}

impl<R: Read + Send> LineReader for ForwardLineReader<R> {
    fn read_line(&mut self) -> Result<Option<String>, ReadError> {
        if self.done {
            return Ok(None);
        }

        // One byte over the limit leaves room for the terminator
        let limit = self.max_line_length as u64 + 1;
        let mut buf = Vec::new();
        let read = self.reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            self.seen_any = true;
            return Ok(Some(decode_line(buf)));
        }

        if buf.len() > self.max_line_length {
            return Err(ReadError::LineTooLong {
                limit: self.max_line_length,
            });
        }

        // End of stream: the tail after the last newline is a line of its own
        self.done = true;
        if read == 0 && !self.seen_any {
            return Ok(None);
        }
        Ok(Some(decode_line(buf)))
    }

    fn direction(&self) -> Direction {
        Direction::Forward
    }
}
