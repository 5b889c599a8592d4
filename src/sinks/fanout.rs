//! Writer duplicating every write to several streams

use super::Sink;
use std::io::{self, Write};

/// Duplicates each write to every inner stream, in order.
///
/// A failure on any stream fails the whole write; later streams are not
/// attempted.
pub struct FanOut {
    writers: Vec<Sink>,
}

impl FanOut {
    pub fn new(writers: Vec<Sink>) -> Self {
        Self { writers }
    }

    /// Builder-style helper for adding another stream
    #[must_use]
    pub fn with(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writers.push(Box::new(writer));
        self
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl Write for FanOut {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for writer in self.writers.iter_mut() {
            writer.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for writer in self.writers.iter_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}
