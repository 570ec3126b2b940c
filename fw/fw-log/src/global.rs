//! Process-wide logger.
//!
//! Firmware installs its console and serial sinks once at boot; after that
//! [`log`] (and the `logf!` macro) can be called from anywhere.
//!
//! The logger lives in a slot behind a critical-section mutex. A log call
//! holds the critical section only to check the logger out of the slot and to
//! put it back; sink writes and the serial flush run with interrupts enabled.
//! While the logger is checked out, other log calls (e.g. from inside a sink
//! or an interrupt handler) are dropped and [`install`] is refused.

use crate::fmt::{self, Arg, FormatPrimitive, Printf};
use crate::logger::Logger;
use crate::sink::{LineSink, SerialSink};
use alloc::boxed::Box;
use core::cell::Cell;
use core::fmt::Arguments;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Logger with type-erased sinks, as stored by [`install`]
pub type DynLogger = Logger<Box<dyn LineSink + Send>, Box<dyn SerialSink + Send>>;

#[derive(Default)]
enum Slot {
    #[default]
    Vacant,
    Ready(DynLogger),
    /// Checked out by a log call in progress
    InUse,
}

static LOGGER: Mutex<CriticalSectionRawMutex, Cell<Slot>> = Mutex::new(Cell::new(Slot::Vacant));

/// Install the process-wide console and serial sinks
///
/// # Returns
///
/// * `Ok(previous)` - installed; `previous` is the logger it replaced, if any
/// * `Err(logger)` - a log call is using the current logger; nothing changed
///   and the rejected logger is handed back
pub fn install<C, S>(console: C, serial: S) -> Result<Option<DynLogger>, DynLogger>
where
    C: LineSink + Send + 'static,
    S: SerialSink + Send + 'static,
{
    let console: Box<dyn LineSink + Send> = Box::new(console);
    let serial: Box<dyn SerialSink + Send> = Box::new(serial);
    let logger = Logger::new(console, serial);

    LOGGER.lock(|slot| match slot.take() {
        Slot::InUse => {
            slot.set(Slot::InUse);
            Err(logger)
        }
        Slot::Ready(previous) => {
            slot.set(Slot::Ready(logger));
            Ok(Some(previous))
        }
        Slot::Vacant => {
            slot.set(Slot::Ready(logger));
            Ok(None)
        }
    })
}

/// Remove and return the installed logger
///
/// Returns `None` when nothing is installed, or when a log call is using the
/// logger (it stays installed).
pub fn uninstall() -> Option<DynLogger> {
    LOGGER.lock(|slot| match slot.take() {
        Slot::Ready(logger) => Some(logger),
        other => {
            slot.set(other);
            None
        }
    })
}

/// Whether a logger is installed, including one checked out by a log call
pub fn is_installed() -> bool {
    LOGGER.lock(|slot| {
        let current = slot.take();
        let installed = !matches!(current, Slot::Vacant);
        slot.set(current);
        installed
    })
}

/// Run `f` on the installed logger outside the critical section
///
/// Returns `None` when no logger is installed or it is already in use.
pub fn with_logger<R>(f: impl FnOnce(&mut DynLogger) -> R) -> Option<R> {
    let mut checkout = Checkout::take()?;
    checkout.logger.as_mut().map(f)
}

/// Logger checked out of the slot; returned on drop, also during unwinding
struct Checkout {
    logger: Option<DynLogger>,
}

impl Checkout {
    fn take() -> Option<Self> {
        LOGGER.lock(|slot| match slot.take() {
            Slot::Ready(logger) => {
                slot.set(Slot::InUse);
                Some(Checkout {
                    logger: Some(logger),
                })
            }
            other => {
                slot.set(other);
                None
            }
        })
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        if let Some(logger) = self.logger.take() {
            // install and uninstall leave an in-use slot alone
            LOGGER.lock(|slot| slot.set(Slot::Ready(logger)));
        }
    }
}

/// Format a printf-style template and write it to the installed sinks
pub fn log(template: &str, args: &[Arg<'_>]) {
    vlog(&Printf::new(template, args));
}

/// Format Rust format arguments and write them to the installed sinks
pub fn log_args(args: Arguments<'_>) {
    vlog(&args);
}

/// Render `primitive` and write it to the installed sinks
///
/// Rendering happens before the logger is checked out.
pub fn vlog<P: FormatPrimitive + ?Sized>(primitive: &P) {
    if !is_installed() {
        return;
    }

    let line = fmt::vfmt(primitive);
    write_line(&line);
}

/// Write an already formatted line to the installed sinks
pub fn write_line(line: &str) {
    with_logger(|logger| logger.write_line(line));
}

/// Flush the installed serial sink
pub fn flush() {
    with_logger(|logger| logger.flush());
}
