//! Error types for fw-log

use core::fmt;

/// Failure reported by a rendering primitive
///
/// Never surfaces through the logging API: the formatter treats it the same
/// as output that did not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// A directive needed an argument past the end of the list
    MissingArgument { index: usize },
    /// The argument cannot be rendered by the directive's conversion
    ArgumentMismatch { index: usize, conversion: char },
    /// Conversion character is not supported
    UnknownConversion(char),
    /// Template ended in the middle of a directive
    IncompleteDirective,
    /// A `Display` implementation reported an error
    Formatter,
}

impl From<fmt::Error> for RenderError {
    fn from(_: fmt::Error) -> Self {
        RenderError::Formatter
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingArgument { index } => {
                write!(f, "Missing argument at position {index}")
            }
            RenderError::ArgumentMismatch { index, conversion } => {
                write!(
                    f,
                    "Argument at position {index} does not match conversion '%{conversion}'"
                )
            }
            RenderError::UnknownConversion(c) => write!(f, "Unknown conversion '%{c}'"),
            RenderError::IncompleteDirective => write!(f, "Incomplete directive at end of template"),
            RenderError::Formatter => write!(f, "Formatter error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RenderError {}
