//! Serial sink over any `embedded_io::Write` device

use super::{LineSink, SerialSink};
use embedded_io::Write;

/// Line terminator written after every line, as Arduino-style `println` does
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Serial sink wrapping a blocking byte writer (UART, USB-serial, ...)
///
/// Write and flush errors are dropped: logging is best effort.
pub struct IoSerial<W> {
    inner: W,
    present: bool,
}

impl<W> IoSerial<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            present: true,
        }
    }

    /// Mark the port attached or detached (e.g. USB host gone)
    pub fn set_present(&mut self, present: bool) {
        self.present = present;
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> LineSink for IoSerial<W> {
    fn is_present(&self) -> bool {
        self.present
    }

    fn write_line(&mut self, line: &str) {
        let _ = self
            .inner
            .write_all(line.as_bytes())
            .and_then(|()| self.inner.write_all(LINE_ENDING));
    }
}

impl<W: Write> SerialSink for IoSerial<W> {
    fn flush(&mut self) {
        let _ = self.inner.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_write_line_appends_crlf() {
        let mut serial = IoSerial::new(Vec::<u8>::new());
        serial.write_line("7-42");
        serial.write_line("");
        serial.flush();

        assert_eq!(serial.into_inner(), b"7-42\r\n\r\n");
    }

    #[test]
    fn test_presence() {
        let mut serial = IoSerial::new(Vec::<u8>::new());
        assert!(serial.is_present());
        serial.set_present(false);
        assert!(!serial.is_present());
    }

    #[test]
    fn test_full_buffer_is_ignored() {
        let mut storage = [0u8; 4];
        let mut serial = IoSerial::new(&mut storage[..]);
        serial.write_line("too long for the port");
        serial.flush();
        assert_eq!(&storage, b"too ");
    }
}
