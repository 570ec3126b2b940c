//! `log` crate backend.
//!
//! Routes `log::info!` and friends to the process-wide sinks installed with
//! [`crate::global::install`]. Records are written as `[LEVEL] target: message`
//! and are subject to the same 512 byte bound as every other line.

use crate::fmt;
use crate::global;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Logger that routes records to the process-wide sinks
pub struct FacadeLogger;

static FACADE: FacadeLogger = FacadeLogger;

impl Log for FacadeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) || !global::is_installed() {
            return;
        }

        let line = fmt::vfmt(&format_args!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        global::write_line(&line);
    }

    fn flush(&self) {
        global::flush();
    }
}

/// Register the facade logger with `log` and set the maximum level
///
/// Fails if another logger has already been registered.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&FACADE).map(|()| log::set_max_level(level))
}
