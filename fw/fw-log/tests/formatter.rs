use std::cell::RefCell;

use fw_log::fmt::{self, Arg, FormatPrimitive, INITIAL_CAPACITY, MAX_CAPACITY, Printf};
use fw_log::RenderError;

/// Wraps a primitive and records the capacity of every attempt
struct Attempts<P> {
    inner: P,
    capacities: RefCell<Vec<usize>>,
}

impl<P: FormatPrimitive> Attempts<P> {
    fn new(inner: P) -> Self {
        Self {
            inner,
            capacities: RefCell::new(Vec::new()),
        }
    }

    fn run(&self) -> (String, Vec<usize>) {
        self.capacities.borrow_mut().clear();
        let result = fmt::vfmt(self);
        (result, self.capacities.borrow().clone())
    }
}

impl<P: FormatPrimitive> FormatPrimitive for Attempts<P> {
    fn render(&self, buffer: &mut [u8]) -> Result<usize, RenderError> {
        self.capacities.borrow_mut().push(buffer.len());
        self.inner.render(buffer)
    }
}

#[test]
fn test_plain_literal_round_trips() {
    assert_eq!(fmt::format("hello", &[]), "hello");
    assert_eq!(fw_log::fmt!("hello"), "hello");
}

#[test]
fn test_two_integers() {
    assert_eq!(fmt::format("%d-%d", &[Arg::from(7), Arg::from(42)]), "7-42");
    assert_eq!(fw_log::fmt!("%d-%d", 7, 42), "7-42");
}

#[test]
fn test_owned_template_and_arguments() {
    let template = String::from("%s has %u items at %.1f");
    let name = String::from("cart");
    assert_eq!(
        fw_log::fmt!(template, &name, 3u8, 2.5),
        "cart has 3 items at 2.5"
    );
}

#[test]
fn test_every_short_length_takes_one_attempt() {
    for len in 0..INITIAL_CAPACITY {
        let text = "s".repeat(len);
        let attempts = Attempts::new(Printf::new(&text, &[]));
        let (result, capacities) = attempts.run();
        assert_eq!(result, text);
        assert_eq!(capacities, [INITIAL_CAPACITY], "length {len}");
    }
}

#[test]
fn test_medium_lengths_grow_until_fit() {
    for len in [32, 63, 64, 100, 255, 256, 500, 511] {
        let text = "m".repeat(len);
        let attempts = Attempts::new(Printf::new(&text, &[]));
        let (result, capacities) = attempts.run();

        assert_eq!(result, text, "length {len}");
        let last = *capacities.last().unwrap();
        assert!(last > len, "length {len} ended at capacity {last}");
        assert!(last / 2 <= len, "length {len} grew past the first fit");
    }
}

#[test]
fn test_capacity_sequence_is_fixed() {
    let text = "L".repeat(2000);
    let attempts = Attempts::new(Printf::new(&text, &[]));
    let (_, capacities) = attempts.run();
    assert_eq!(capacities, [32, 64, 128, 256, 512]);
}

#[test]
fn test_six_hundred_characters_truncate_deterministically() {
    let text = "x".repeat(600);

    let first = fmt::format(&text, &[]);
    let second = fmt::format(&text, &[]);

    assert!(first.len() <= MAX_CAPACITY - 1);
    assert_eq!(first.len(), 511);
    assert_eq!(first, second);
    assert_eq!(first, text[..511]);
}

#[test]
fn test_rendering_failure_never_surfaces() {
    // Missing argument: the primitive fails at every capacity
    let attempts = Attempts::new(Printf::new("value=%d", &[]));
    let (result, capacities) = attempts.run();

    assert_eq!(result, "value=");
    assert_eq!(capacities, [32, 64, 128, 256, 512]);
}

#[test]
fn test_directives_expand_past_first_buffer() {
    let args = [Arg::from("a fairly long sensor name"), Arg::from(-1234567)];
    let result = fmt::format("sensor '%s' reported %d", &args);
    assert_eq!(result, "sensor 'a fairly long sensor name' reported -1234567");
}

#[test]
fn test_native_format_arguments() {
    assert_eq!(fmt::format_arguments(format_args!("{}-{}", 7, 42)), "7-42");

    let long = "n".repeat(700);
    assert_eq!(fmt::format_arguments(format_args!("{long}")).len(), 511);
}

#[test]
fn test_huge_field_counts_stay_bounded() {
    let one = Arg::Int(1);
    let huge = Arg::Int(i64::MAX);

    assert_eq!(fmt::format("%*d", &[huge, one]), " ".repeat(511));
    assert_eq!(fmt::format("%99999999999999999999d", &[one]), " ".repeat(511));
    assert_eq!(fmt::format("%.*d", &[huge, one]), "0".repeat(511));
    assert_eq!(
        fmt::format("id=%-*d", &[huge, Arg::Int(7)]),
        format!("id=7{}", " ".repeat(507))
    );
    assert_eq!(
        fmt::format("%.*f", &[Arg::Int(100_000), Arg::Float(1.0)]),
        format!("1.{}", "0".repeat(509))
    );
    assert_eq!(
        fmt::format("%.*e", &[Arg::Int(100_000), Arg::Float(1.5)]),
        format!("1.5{}", "0".repeat(508))
    );
}
