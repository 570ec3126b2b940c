//! Output devices the logger writes lines to.
//!
//! Sinks are owned by the platform; the logger only checks whether they are
//! present and writes to them. It never initializes or closes them.

pub mod fake;
mod io;
#[cfg(feature = "std")]
mod stdout;

pub use fake::{FakeSink, Journal, SinkEvent, SinkKind};
pub use io::{IoSerial, LINE_ENDING};
#[cfg(feature = "std")]
pub use stdout::StdoutConsole;

use alloc::boxed::Box;

/// Device that accepts whole lines of text (e.g. a console)
pub trait LineSink {
    /// Whether the device is attached and ready; absent devices are skipped
    fn is_present(&self) -> bool;

    /// Write `line` followed by the device's line terminator
    fn write_line(&mut self, line: &str);
}

/// Line device with buffered output (e.g. a UART)
pub trait SerialSink: LineSink {
    /// Block until buffered output has been transmitted
    fn flush(&mut self);
}

/// Placeholder for a device the board does not have
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSink;

impl LineSink for NoSink {
    fn is_present(&self) -> bool {
        false
    }

    fn write_line(&mut self, _line: &str) {}
}

impl SerialSink for NoSink {
    fn flush(&mut self) {}
}

impl<T: LineSink> LineSink for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(|sink| sink.is_present())
    }

    fn write_line(&mut self, line: &str) {
        if let Some(sink) = self {
            sink.write_line(line);
        }
    }
}

impl<T: SerialSink> SerialSink for Option<T> {
    fn flush(&mut self) {
        if let Some(sink) = self {
            sink.flush();
        }
    }
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }

    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

impl<T: SerialSink + ?Sized> SerialSink for &mut T {
    fn flush(&mut self) {
        (**self).flush();
    }
}

impl<T: LineSink + ?Sized> LineSink for Box<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }

    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

impl<T: SerialSink + ?Sized> SerialSink for Box<T> {
    fn flush(&mut self) {
        (**self).flush();
    }
}
