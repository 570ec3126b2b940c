//! Fixed-capacity, NUL-terminated byte writer

use core::fmt;

/// `fmt::Write` target over a borrowed byte buffer
///
/// Stores at most `buffer.len() - 1` bytes and keeps counting past that, so
/// the caller learns how long the complete output would have been. Never
/// returns an error.
pub struct BoundedWriter<'a> {
    buffer: &'a mut [u8],
    /// Bytes stored in `buffer`
    stored: usize,
    /// Bytes the complete output needs
    len: usize,
}

impl<'a> BoundedWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            stored: 0,
            len: 0,
        }
    }

    /// Terminate the stored bytes with a NUL and return the full length
    pub fn finish(self) -> usize {
        if let Some(slot) = self.buffer.get_mut(self.stored) {
            *slot = 0;
        }
        self.len
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buffer.len().saturating_sub(1) - self.stored;
        let take = room.min(s.len());

        self.buffer[self.stored..self.stored + take].copy_from_slice(&s.as_bytes()[..take]);
        self.stored += take;
        self.len += s.len();

        Ok(())
    }
}
