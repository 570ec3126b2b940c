//! Dual-sink line logger.
//!
//! Formats a message once and writes it as one line to the console, then to
//! the serial port. The serial port is flushed after every line so the
//! message is on the wire before `log` returns; a buffered line can be lost
//! if the board resets.

use crate::fmt::{self, Arg, FormatPrimitive, Printf};
use crate::sink::{LineSink, SerialSink};
use core::fmt::Arguments;

/// Logger writing to a console sink `C` and a serial sink `S`
///
/// Holds no state besides the sinks, and takes no lock: callers sharing one
/// logger between contexts must serialize access themselves (see
/// [`crate::global`]).
#[derive(Debug, Default)]
pub struct Logger<C, S> {
    console: C,
    serial: S,
}

impl<C: LineSink, S: SerialSink> Logger<C, S> {
    pub const fn new(console: C, serial: S) -> Self {
        Self { console, serial }
    }

    /// Format a printf-style template and write it to both sinks
    ///
    /// ```
    /// use fw_log::Logger;
    /// use fw_log::sink::{Journal, SinkKind};
    ///
    /// let journal = Journal::new();
    /// let mut logger = Logger::new(
    ///     journal.sink(SinkKind::Console),
    ///     journal.sink(SinkKind::Serial),
    /// );
    /// logger.log("%d-%d", &[7.into(), 42.into()]);
    /// assert_eq!(journal.lines(SinkKind::Serial), ["7-42"]);
    /// ```
    pub fn log(&mut self, template: &str, args: &[Arg<'_>]) {
        self.vlog(&Printf::new(template, args));
    }

    /// Format Rust format arguments and write them to both sinks
    pub fn log_args(&mut self, args: Arguments<'_>) {
        self.vlog(&args);
    }

    /// Render `primitive` and write the result to both sinks
    pub fn vlog<P: FormatPrimitive + ?Sized>(&mut self, primitive: &P) {
        let line = fmt::vfmt(primitive);
        self.write_line(&line);
    }

    /// Write an already formatted line
    ///
    /// Console first, then serial followed by a flush. Absent sinks are
    /// skipped.
    pub fn write_line(&mut self, line: &str) {
        if self.console.is_present() {
            self.console.write_line(line);
        } else {
            log::trace!("console absent, skipping line");
        }

        if self.serial.is_present() {
            self.serial.write_line(line);
            self.serial.flush();
        } else {
            log::trace!("serial absent, skipping line");
        }
    }

    /// Flush the serial sink if it is present
    pub fn flush(&mut self) {
        if self.serial.is_present() {
            self.serial.flush();
        }
    }
}

impl<C, S> Logger<C, S> {
    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn into_parts(self) -> (C, S) {
        (self.console, self.serial)
    }
}
