use std::io::{self, BufWriter, Write};

/// Line sink that flushes every `flush_lines` writes and once more on close
pub(crate) struct BufferedWriter<W: Write> {
    inner: BufWriter<W>,
    flush_lines: usize,
    pending: usize,
}

impl<W: Write> BufferedWriter<W> {
    pub(crate) fn new(out: W, flush_lines: usize) -> Self {
        Self {
            inner: BufWriter::new(out),
            flush_lines: flush_lines.max(1),
            pending: 0,
        }
    }

    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_all(line.as_bytes())?;
        self.pending += 1;
        if self.pending >= self.flush_lines {
            self.inner.flush()?;
            self.pending = 0;
        }
        Ok(())
    }

    /// Flush what is left and give back the sink
    pub(crate) fn close(self) -> io::Result<W> {
        let mut inner = self.inner;
        inner.flush()?;
        inner.into_inner().map_err(|e| e.into_error())
    }
}
