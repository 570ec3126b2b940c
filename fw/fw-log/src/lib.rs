//! Firmware logging library.
//!
//! Provides bounded printf-style formatting and line logging to two output
//! devices (a console and a serial port) for embedded targets:
//! - `fmt`: renders templates into a buffer that grows from 32 up to 512 bytes
//! - `logger`: fans a rendered line out to the console and serial sinks
//! - `global`: process-wide logger behind a critical-section mutex
//! - `facade`: backend for the `log` crate

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod facade;
pub mod fmt;
pub mod global;
pub mod logger;
mod macros;
pub mod sink;

pub use error::RenderError;
pub use fmt::{Arg, FormatPrimitive, Printf, format, format_arguments, vfmt};
pub use logger::Logger;
pub use sink::{LineSink, NoSink, SerialSink};
