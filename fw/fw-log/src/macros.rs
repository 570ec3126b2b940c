//! printf-style formatting and logging macros
//!
//! Arguments go through `Arg::from`, so plain integers, floats, chars,
//! `&str` and `&String` can be passed directly. Templates may be `&str` or
//! `String`.

/// Format a printf-style template into a `String` (at most 511 bytes)
///
/// ```
/// assert_eq!(fw_log::fmt!("%d-%d", 7, 42), "7-42");
/// assert_eq!(fw_log::fmt!("hello"), "hello");
/// ```
#[macro_export]
macro_rules! fmt {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::format(&$template, &[$($crate::fmt::Arg::from($arg)),*])
    };
}

/// Log a printf-style message through the process-wide logger
#[macro_export]
macro_rules! logf {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::global::log(&$template, &[$($crate::fmt::Arg::from($arg)),*])
    };
}

/// Debug-build logging: `logf!` with the `debug` feature, nothing otherwise
///
/// Arguments are not evaluated when the feature is off.
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! dbgf {
    ($($tt:tt)*) => {
        $crate::logf!($($tt)*)
    };
}

/// Debug-build logging: `logf!` with the `debug` feature, nothing otherwise
///
/// Arguments are not evaluated when the feature is off.
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! dbgf {
    ($($tt:tt)*) => {
        ()
    };
}
