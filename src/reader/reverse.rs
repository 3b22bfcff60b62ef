use std::io::{Read, Seek, SeekFrom};

use super::{Direction, LineReader, decode_line};
use crate::error::ReadError;

/// Reads lines back to front without loading the whole file.
///
/// The buffer holds `max_line_length + 1` bytes: one line plus the newline
/// that precedes it. Valid bytes always live in `buf[..len]`, and
/// `offset` is the file position of `buf[0]`.
pub(crate) struct ReverseLineReader<R> {
    inner: R,
    buf: Vec<u8>,
    len: usize,
    offset: u64,
    max_line_length: usize,
    done: bool,
}

impl<R: Read + Seek> ReverseLineReader<R> {
    pub(crate) fn new(mut inner: R, max_line_length: usize) -> Result<Self, ReadError> {
        let offset = inner.seek(SeekFrom::End(0))?;
        Ok(Self {
            inner,
            buf: vec![0; max_line_length + 1],
            len: 0,
            offset,
            max_line_length,
            done: offset == 0,
        })
    }

    /// Move the buffered bytes up and read the file region just before them
    /// into the freed prefix.
    fn fill(&mut self) -> Result<(), ReadError> {
        let free = (self.buf.len() - self.len) as u64;
        let want = free.min(self.offset) as usize;
        if want == 0 {
            return Err(ReadError::LineTooLong {
                limit: self.max_line_length,
            });
        }

        self.buf.copy_within(..self.len, want);
        self.offset -= want as u64;
        self.inner.seek(SeekFrom::Start(self.offset))?;
        self.inner.read_exact(&mut self.buf[..want])?;
        self.len += want;
        Ok(())
    }

    fn last_newline(&self) -> Option<usize> {
        self.buf[..self.len].iter().rposition(|&b| b == b'\n')
    }
}

impl<R: Read + Seek + Send> LineReader for ReverseLineReader<R> {
    fn read_line(&mut self) -> Result<Option<String>, ReadError> {
        if self.done {
            return Ok(None);
        }

        loop {
            if let Some(idx) = self.last_newline() {
                let line = self.buf[idx + 1..self.len].to_vec();
                // The newline itself is consumed; whatever precedes it,
                // even nothing, is still a line to be returned later.
                self.len = idx;
                return Ok(Some(decode_line(line)));
            }

            if self.offset == 0 {
                // The buffer holds one spare byte for a newline this line lacks
                if self.len > self.max_line_length {
                    return Err(ReadError::LineTooLong {
                        limit: self.max_line_length,
                    });
                }
                let line = self.buf[..self.len].to_vec();
                self.len = 0;
                self.done = true;
                return Ok(Some(decode_line(line)));
            }

            self.fill()?;
        }
    }

    fn direction(&self) -> Direction {
        Direction::Reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::collect_lines;
    use std::io::Cursor;

    fn lines(data: &str, max: usize) -> Result<Vec<String>, ReadError> {
        let mut reader = ReverseLineReader::new(Cursor::new(data.as_bytes().to_vec()), max)?;
        collect_lines(&mut reader)
    }

    #[test]
    fn empty_data() {
        assert!(lines("", 16).unwrap().is_empty());
    }

    #[test]
    fn single_row() {
        assert_eq!(lines("a", 16).unwrap(), vec!["a"]);
    }

    #[test]
    fn two_rows() {
        assert_eq!(lines("a\nb", 16).unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn empty_line_at_end() {
        assert_eq!(lines("a\n", 16).unwrap(), vec!["", "a"]);
    }

    #[test]
    fn lone_newline_is_two_empty_lines() {
        assert_eq!(lines("\n", 16).unwrap(), vec!["", ""]);
    }

    #[test]
    fn leading_empty_line_is_kept() {
        assert_eq!(lines("\nx\n", 16).unwrap(), vec!["", "x", ""]);
    }

    #[test]
    fn content_survives_refills() {
        // Buffer of 4 bytes forces a refill for nearly every line
        let data = "abc\nde\nf\n\nghi";
        assert_eq!(
            lines(data, 3).unwrap(),
            vec!["ghi", "", "f", "de", "abc"]
        );
    }

    #[test]
    fn line_longer_than_buffer_is_an_error() {
        let err = lines("x\nabcdefgh\ny\n", 4).unwrap_err();
        assert!(matches!(err, ReadError::LineTooLong { limit: 4 }));
    }

    #[test]
    fn first_line_longer_than_buffer_is_an_error() {
        let err = lines("abcdefgh", 4).unwrap_err();
        assert!(matches!(err, ReadError::LineTooLong { limit: 4 }));
    }

    #[test]
    fn direction_is_reverse() {
        let reader = ReverseLineReader::new(Cursor::new(Vec::new()), 4).unwrap();
        assert_eq!(reader.direction(), Direction::Reverse);
    }
}
