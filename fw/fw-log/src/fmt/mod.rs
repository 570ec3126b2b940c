//! Bounded string formatting.
//!
//! Renders a template into a temporary buffer that starts at
//! [`INITIAL_CAPACITY`] bytes and doubles until the output fits or the buffer
//! reaches [`MAX_CAPACITY`]. Output that does not fit in the largest buffer is
//! truncated silently.

mod arg;
mod bounded;
mod printf;

pub use arg::Arg;
pub use bounded::BoundedWriter;
pub use printf::Printf;

use crate::error::RenderError;
use alloc::string::String;
use alloc::vec;
use core::fmt;

/// Size of the first render buffer
pub const INITIAL_CAPACITY: usize = 32;

/// Factor applied to the buffer size after a render that did not fit
pub const GROWTH_FACTOR: usize = 2;

/// Largest render buffer; longer output is truncated to `MAX_CAPACITY - 1` bytes
pub const MAX_CAPACITY: usize = 512;

/// Something that can be rendered into a byte buffer the way `vsnprintf` does
///
/// Implementations write at most `buffer.len() - 1` bytes followed by a NUL
/// terminator and return the number of bytes the complete output needs,
/// whether or not it fit.
pub trait FormatPrimitive {
    /// Render into `buffer`
    ///
    /// # Returns
    ///
    /// * `Ok(n)` - complete output is `n` bytes long (it fit if `n < buffer.len()`)
    /// * `Err(RenderError)` - rendering failed; `buffer` holds whatever was written
    fn render(&self, buffer: &mut [u8]) -> Result<usize, RenderError>;
}

impl<P: FormatPrimitive + ?Sized> FormatPrimitive for &P {
    fn render(&self, buffer: &mut [u8]) -> Result<usize, RenderError> {
        (**self).render(buffer)
    }
}

impl FormatPrimitive for fmt::Arguments<'_> {
    fn render(&self, buffer: &mut [u8]) -> Result<usize, RenderError> {
        use core::fmt::Write;

        let mut writer = BoundedWriter::new(buffer);
        let result = writer.write_fmt(*self);
        let len = writer.finish();
        result.map(|()| len).map_err(RenderError::from)
    }
}

/// Render `primitive` into a string of at most `MAX_CAPACITY - 1` bytes
///
/// Tries buffers of 32, 64, 128, 256 and 512 bytes in turn, stopping at the
/// first one the output fits in. At 512 bytes it stops regardless and returns
/// whatever the buffer holds, even if the primitive reported a failure.
pub fn vfmt<P: FormatPrimitive + ?Sized>(primitive: &P) -> String {
    let mut capacity = INITIAL_CAPACITY;

    loop {
        let mut buffer = vec![0u8; capacity];
        let fits = matches!(primitive.render(&mut buffer), Ok(n) if n < capacity);

        if fits || capacity >= MAX_CAPACITY {
            return terminated_string(&buffer);
        }

        capacity *= GROWTH_FACTOR;
    }
}

/// Format a printf-style template with positional arguments
///
/// ```
/// use fw_log::fmt::{Arg, format};
///
/// assert_eq!(format("%d-%d", &[Arg::from(7), Arg::from(42)]), "7-42");
/// ```
pub fn format(template: &str, args: &[Arg<'_>]) -> String {
    vfmt(&Printf::new(template, args))
}

/// Format Rust format arguments with the same bounds as [`format`]
pub fn format_arguments(args: fmt::Arguments<'_>) -> String {
    vfmt(&args)
}

/// Contents of `buffer` up to the first NUL, dropping any split UTF-8 sequence
fn terminated_string(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    let bytes = &buffer[..end];

    let text = match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    };

    String::from(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    /// Primitive that records every capacity it is offered
    struct Spy<P> {
        inner: P,
        capacities: RefCell<Vec<usize>>,
    }

    impl<P> Spy<P> {
        fn new(inner: P) -> Self {
            Self {
                inner,
                capacities: RefCell::new(Vec::new()),
            }
        }

        fn capacities(&self) -> Vec<usize> {
            self.capacities.borrow().clone()
        }
    }

    impl<P: FormatPrimitive> FormatPrimitive for Spy<P> {
        fn render(&self, buffer: &mut [u8]) -> Result<usize, RenderError> {
            self.capacities.borrow_mut().push(buffer.len());
            self.inner.render(buffer)
        }
    }

    /// Primitive that always fails without writing anything
    struct Broken;

    impl FormatPrimitive for Broken {
        fn render(&self, _buffer: &mut [u8]) -> Result<usize, RenderError> {
            Err(RenderError::Formatter)
        }
    }

    #[test]
    fn test_short_output_single_attempt() {
        let args = [Arg::from(7), Arg::from(42)];
        let spy = Spy::new(Printf::new("%d-%d", &args));

        assert_eq!(vfmt(&spy), "7-42");
        assert_eq!(spy.capacities(), [32]);
    }

    #[test]
    fn test_exactly_capacity_needs_next_buffer() {
        // 32 bytes do not fit in a 32 byte buffer (one byte goes to the terminator)
        let text = "a".repeat(32);
        let spy = Spy::new(Printf::new(&text, &[]));

        assert_eq!(vfmt(&spy), text);
        assert_eq!(spy.capacities(), [32, 64]);
    }

    #[test]
    fn test_medium_output_grows_until_fit() {
        let text = "b".repeat(200);
        let spy = Spy::new(Printf::new(&text, &[]));

        assert_eq!(vfmt(&spy), text);
        assert_eq!(spy.capacities(), [32, 64, 128, 256]);
    }

    #[test]
    fn test_long_output_truncated_at_ceiling() {
        let text = "c".repeat(600);
        let spy = Spy::new(Printf::new(&text, &[]));

        let result = vfmt(&spy);
        assert_eq!(result.len(), MAX_CAPACITY - 1);
        assert!(text.starts_with(&result));
        assert_eq!(spy.capacities(), [32, 64, 128, 256, 512]);
    }

    #[test]
    fn test_failing_primitive_stops_at_ceiling() {
        let spy = Spy::new(Broken);

        assert_eq!(vfmt(&spy), "");
        assert_eq!(spy.capacities(), [32, 64, 128, 256, 512]);
    }

    #[test]
    fn test_truncation_drops_split_utf8() {
        // 'é' is two bytes; 511 bytes of output would end halfway through one
        let text = "é".repeat(300);
        let result = format(&text, &[]);

        assert_eq!(result.len(), 510);
        assert!(result.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_format_arguments() {
        assert_eq!(format_arguments(format_args!("{}-{}", 7, 42)), "7-42");
        assert_eq!(
            format_arguments(format_args!("{:x<600}", "")).len(),
            MAX_CAPACITY - 1
        );
    }

    #[test]
    fn test_terminated_string_stops_at_nul() {
        assert_eq!(terminated_string(b"abc\0def"), "abc");
        assert_eq!(terminated_string(b"abc"), "abc");
        assert_eq!(terminated_string(b""), "");
    }
}
