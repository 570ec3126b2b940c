//! printf-style rendering primitive.
//!
//! Directive syntax: `%[flags][width][.precision][length]conversion`
//!
//! - flags: `-` `0` `+` space `#`
//! - width / precision: digits, or `*` to take the value from the next argument
//! - length modifiers (`h`, `l`, `ll`, `z`, ...) are accepted and ignored;
//!   the [`Arg`] variant already carries the type
//! - conversions: `d i u x X o c s f F e E %`
//!
//! Padding and integer zero fill are capped at [`MAX_CAPACITY`] characters per
//! field, which is already more than the largest render buffer can show.

use super::{Arg, BoundedWriter, FormatPrimitive, MAX_CAPACITY};
use crate::error::RenderError;
use alloc::format;
use alloc::string::String;
use core::fmt::{self, Write};

/// Most fill characters (padding or leading zeros) written for one field
const MAX_FILL: usize = MAX_CAPACITY;

/// Largest precision handed to `core::fmt` for floats
///
/// Every `f64` is exact within 1074 fractional digits.
const MAX_FLOAT_PRECISION: usize = 1100;

/// A template bound to its arguments
#[derive(Debug, Clone, Copy)]
pub struct Printf<'a> {
    template: &'a str,
    args: &'a [Arg<'a>],
}

impl<'a> Printf<'a> {
    pub fn new(template: &'a str, args: &'a [Arg<'a>]) -> Self {
        Self { template, args }
    }

    /// Render the whole template to `out`
    ///
    /// Literal text before a failing directive has already been written when
    /// an error is returned.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), RenderError> {
        let mut args = ArgCursor::new(self.args);
        let mut rest = self.template;

        while let Some(pos) = rest.find('%') {
            out.write_str(&rest[..pos])?;
            let (directive, tail) = Directive::parse(&rest[pos + 1..])?;
            directive.render(&mut args, out)?;
            rest = tail;
        }

        out.write_str(rest)?;
        Ok(())
    }
}

impl FormatPrimitive for Printf<'_> {
    fn render(&self, buffer: &mut [u8]) -> Result<usize, RenderError> {
        let mut writer = BoundedWriter::new(buffer);
        let result = self.write_to(&mut writer);
        let len = writer.finish();
        result.map(|()| len)
    }
}

impl fmt::Display for Printf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f).map_err(|_| fmt::Error)
    }
}

/// Hands out arguments in order, remembering their positions for errors
struct ArgCursor<'s, 'a> {
    args: &'s [Arg<'a>],
    next: usize,
}

impl<'s, 'a> ArgCursor<'s, 'a> {
    fn new(args: &'s [Arg<'a>]) -> Self {
        Self { args, next: 0 }
    }

    fn next(&mut self) -> Result<(usize, Arg<'a>), RenderError> {
        let index = self.next;
        let arg = self
            .args
            .get(index)
            .copied()
            .ok_or(RenderError::MissingArgument { index })?;
        self.next += 1;
        Ok((index, arg))
    }

    /// Next argument as a `*` width or precision
    fn next_count(&mut self) -> Result<i64, RenderError> {
        match self.next()? {
            (_, Arg::Int(v)) => Ok(v),
            (_, Arg::Uint(v)) => Ok(i64::try_from(v).unwrap_or(i64::MAX)),
            (index, _) => Err(RenderError::ArgumentMismatch {
                index,
                conversion: '*',
            }),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Count {
    Fixed(usize),
    FromArg,
}

#[derive(Debug, Clone, Copy)]
struct Directive {
    flags: Flags,
    width: Option<Count>,
    precision: Option<Count>,
    conversion: char,
}

impl Directive {
    /// Parse the directive that follows a `%`, returning it and the rest of the template
    fn parse(s: &str) -> Result<(Directive, &str), RenderError> {
        let bytes = s.as_bytes();
        let mut i = 0;
        let mut flags = Flags::default();

        while let Some(&b) = bytes.get(i) {
            match b {
                b'-' => flags.left = true,
                b'0' => flags.zero = true,
                b'+' => flags.plus = true,
                b' ' => flags.space = true,
                b'#' => flags.alt = true,
                _ => break,
            }
            i += 1;
        }

        let width = parse_count(bytes, &mut i);

        let precision = if bytes.get(i) == Some(&b'.') {
            i += 1;
            Some(parse_count(bytes, &mut i).unwrap_or(Count::Fixed(0)))
        } else {
            None
        };

        while let Some(b'h' | b'l' | b'z' | b'j' | b't' | b'L' | b'q') = bytes.get(i) {
            i += 1;
        }

        let conversion = s[i..].chars().next().ok_or(RenderError::IncompleteDirective)?;
        let tail = &s[i + conversion.len_utf8()..];

        Ok((
            Directive {
                flags,
                width,
                precision,
                conversion,
            },
            tail,
        ))
    }

    fn render<W: Write + ?Sized>(
        &self,
        args: &mut ArgCursor<'_, '_>,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let mut flags = self.flags;

        let width = match self.width {
            Some(Count::Fixed(n)) => n,
            Some(Count::FromArg) => {
                let n = args.next_count()?;
                if n < 0 {
                    flags.left = true;
                }
                usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX)
            }
            None => 0,
        };

        let precision = match self.precision {
            Some(Count::Fixed(n)) => Some(n),
            Some(Count::FromArg) => usize::try_from(args.next_count()?).ok(),
            None => None,
        };

        let spec = Spec {
            flags,
            width,
            precision,
            conversion: self.conversion,
        };

        match self.conversion {
            '%' => out.write_char('%')?,
            'd' | 'i' => spec.signed(args, out)?,
            'u' | 'x' | 'X' | 'o' => spec.unsigned(args, out)?,
            'c' => spec.character(args, out)?,
            's' => spec.string(args, out)?,
            'f' | 'F' | 'e' | 'E' => spec.float(args, out)?,
            other => return Err(RenderError::UnknownConversion(other)),
        }

        Ok(())
    }
}

fn parse_count(bytes: &[u8], i: &mut usize) -> Option<Count> {
    if bytes.get(*i) == Some(&b'*') {
        *i += 1;
        return Some(Count::FromArg);
    }

    let start = *i;
    let mut value: usize = 0;
    while let Some(&b) = bytes.get(*i).filter(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add(usize::from(b - b'0'));
        *i += 1;
    }

    (*i > start).then_some(Count::Fixed(value))
}

/// A directive with `*` counts resolved
struct Spec {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

impl Spec {
    fn mismatch(&self, index: usize) -> RenderError {
        RenderError::ArgumentMismatch {
            index,
            conversion: self.conversion,
        }
    }

    fn signed<W: Write + ?Sized>(
        &self,
        args: &mut ArgCursor<'_, '_>,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let value = match args.next()? {
            (_, Arg::Int(v)) => v,
            (_, Arg::Uint(v)) => v as i64,
            (_, Arg::Char(c)) => i64::from(u32::from(c)),
            (index, _) => return Err(self.mismatch(index)),
        };

        let sign = if value < 0 {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        };

        let digits = self.integer_digits(format!("{}", value.unsigned_abs()));
        self.pad(out, sign, &digits, self.precision.is_none())?;
        Ok(())
    }

    fn unsigned<W: Write + ?Sized>(
        &self,
        args: &mut ArgCursor<'_, '_>,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let value = match args.next()? {
            (_, Arg::Uint(v)) => v,
            (_, Arg::Int(v)) => v as u64,
            (_, Arg::Char(c)) => u64::from(u32::from(c)),
            (index, _) => return Err(self.mismatch(index)),
        };

        let mut digits = match self.conversion {
            'x' => format!("{value:x}"),
            'X' => format!("{value:X}"),
            'o' => format!("{value:o}"),
            _ => format!("{value}"),
        };
        digits = self.integer_digits(digits);

        let prefix = match self.conversion {
            'x' if self.flags.alt && value != 0 => "0x",
            'X' if self.flags.alt && value != 0 => "0X",
            _ => "",
        };
        if self.conversion == 'o' && self.flags.alt && !digits.starts_with('0') {
            digits.insert(0, '0');
        }

        self.pad(out, prefix, &digits, self.precision.is_none())?;
        Ok(())
    }

    /// Apply integer precision: minimum digit count, and `0` with precision 0 prints nothing
    fn integer_digits(&self, digits: String) -> String {
        match self.precision {
            Some(0) if digits == "0" => String::new(),
            Some(p) if p > digits.len() => {
                let mut padded = "0".repeat((p - digits.len()).min(MAX_FILL));
                padded.push_str(&digits);
                padded
            }
            _ => digits,
        }
    }

    fn character<W: Write + ?Sized>(
        &self,
        args: &mut ArgCursor<'_, '_>,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let c = match args.next()? {
            (_, Arg::Char(c)) => c,
            (index, Arg::Int(v)) => u32::try_from(v)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| self.mismatch(index))?,
            (index, Arg::Uint(v)) => u32::try_from(v)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| self.mismatch(index))?,
            (index, _) => return Err(self.mismatch(index)),
        };

        let mut encoded = [0u8; 4];
        self.pad(out, "", c.encode_utf8(&mut encoded), false)?;
        Ok(())
    }

    fn string<W: Write + ?Sized>(
        &self,
        args: &mut ArgCursor<'_, '_>,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let mut encoded = [0u8; 4];
        let s: &str = match args.next()? {
            (_, Arg::Str(s)) => s,
            (_, Arg::Char(c)) => c.encode_utf8(&mut encoded),
            (index, _) => return Err(self.mismatch(index)),
        };

        let s = match self.precision {
            Some(p) => s.char_indices().nth(p).map_or(s, |(end, _)| &s[..end]),
            None => s,
        };

        self.pad(out, "", s, false)?;
        Ok(())
    }

    fn float<W: Write + ?Sized>(
        &self,
        args: &mut ArgCursor<'_, '_>,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let value = match args.next()? {
            (_, Arg::Float(v)) => v,
            (_, Arg::Int(v)) => v as f64,
            (_, Arg::Uint(v)) => v as f64,
            (index, _) => return Err(self.mismatch(index)),
        };

        let upper = self.conversion.is_ascii_uppercase();
        let sign = if value.is_sign_negative() && !value.is_nan() {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        };

        if !value.is_finite() {
            let body = match (value.is_nan(), upper) {
                (true, false) => "nan",
                (true, true) => "NAN",
                (false, false) => "inf",
                (false, true) => "INF",
            };
            self.pad(out, sign, body, false)?;
            return Ok(());
        }

        let precision = self.precision.unwrap_or(6).min(MAX_FLOAT_PRECISION);
        let magnitude = value.abs();
        let mut body = match self.conversion {
            'e' | 'E' => exponent(magnitude, precision, upper),
            _ => format!("{magnitude:.precision$}"),
        };
        if self.flags.alt && precision == 0 {
            match body.find(['e', 'E']) {
                Some(pos) => body.insert(pos, '.'),
                None => body.push('.'),
            }
        }

        self.pad(out, sign, &body, true)?;
        Ok(())
    }

    /// Write `prefix` and `body` padded to the field width
    ///
    /// Zero padding goes between prefix and body and only applies when
    /// `zero_allowed` and the field is right-justified.
    fn pad<W: Write + ?Sized>(
        &self,
        out: &mut W,
        prefix: &str,
        body: &str,
        zero_allowed: bool,
    ) -> fmt::Result {
        let len = prefix.chars().count() + body.chars().count();
        let fill = self.width.saturating_sub(len).min(MAX_FILL);

        if self.flags.left {
            out.write_str(prefix)?;
            out.write_str(body)?;
            repeat(out, ' ', fill)
        } else if self.flags.zero && zero_allowed {
            out.write_str(prefix)?;
            repeat(out, '0', fill)?;
            out.write_str(body)
        } else {
            repeat(out, ' ', fill)?;
            out.write_str(prefix)?;
            out.write_str(body)
        }
    }
}

fn repeat<W: Write + ?Sized>(out: &mut W, c: char, count: usize) -> fmt::Result {
    (0..count).try_for_each(|_| out.write_char(c))
}

/// `d.ddde±dd` form with at least two exponent digits
fn exponent(magnitude: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{magnitude:.precision$e}");
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };

    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}
