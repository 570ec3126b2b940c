//! Fake sinks for testing and development
//!
//! Recording sinks that share one [`Journal`], so the order of writes and
//! flushes across the console and serial sinks can be checked after the fact.

use super::{LineSink, SerialSink};
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

/// Which sink an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    Serial,
}

/// Something a fake sink was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Line { sink: SinkKind, line: String },
    Flush { sink: SinkKind },
}

impl SinkEvent {
    pub fn line(sink: SinkKind, line: &str) -> Self {
        SinkEvent::Line {
            sink,
            line: String::from(line),
        }
    }
}

/// Shared, ordered record of sink events
#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Rc<RefCell<Vec<SinkEvent>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A present sink recording into this journal
    pub fn sink(&self, kind: SinkKind) -> FakeSink {
        FakeSink {
            kind,
            present: true,
            journal: self.clone(),
        }
    }

    /// A sink that reports itself absent
    pub fn absent_sink(&self, kind: SinkKind) -> FakeSink {
        FakeSink {
            kind,
            present: false,
            journal: self.clone(),
        }
    }

    /// Every event so far, in order
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.borrow().clone()
    }

    /// Lines written to one sink
    pub fn lines(&self, kind: SinkKind) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Line { sink, line } if *sink == kind => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of flushes of one sink
    pub fn flushes(&self, kind: SinkKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, SinkEvent::Flush { sink } if *sink == kind))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: SinkEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Sink that records into a [`Journal`]
///
/// Records writes even while absent, so a test can tell when an absent sink
/// was written to.
#[derive(Debug, Clone)]
pub struct FakeSink {
    kind: SinkKind,
    present: bool,
    journal: Journal,
}

impl FakeSink {
    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn set_present(&mut self, present: bool) {
        self.present = present;
    }
}

impl LineSink for FakeSink {
    fn is_present(&self) -> bool {
        self.present
    }

    fn write_line(&mut self, line: &str) {
        self.journal.push(SinkEvent::line(self.kind, line));
    }
}

impl SerialSink for FakeSink {
    fn flush(&mut self) {
        self.journal.push(SinkEvent::Flush { sink: self.kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_orders_events_across_sinks() {
        let journal = Journal::new();
        let mut console = journal.sink(SinkKind::Console);
        let mut serial = journal.sink(SinkKind::Serial);

        console.write_line("a");
        serial.write_line("b");
        serial.flush();

        assert_eq!(
            journal.events(),
            [
                SinkEvent::line(SinkKind::Console, "a"),
                SinkEvent::line(SinkKind::Serial, "b"),
                SinkEvent::Flush {
                    sink: SinkKind::Serial
                },
            ]
        );
        assert_eq!(journal.lines(SinkKind::Console), ["a"]);
        assert_eq!(journal.flushes(SinkKind::Console), 0);
        assert_eq!(journal.flushes(SinkKind::Serial), 1);

        journal.clear();
        assert!(journal.is_empty());
    }

    #[test]
    fn test_set_present() {
        let journal = Journal::new();
        let mut sink = journal.absent_sink(SinkKind::Console);
        assert!(!sink.is_present());
        sink.set_present(true);
        assert!(sink.is_present());
        assert_eq!(sink.kind(), SinkKind::Console);
    }
}
