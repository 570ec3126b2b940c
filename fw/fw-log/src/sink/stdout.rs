//! Host console on standard output

use super::LineSink;

/// Console sink for host builds and emulators
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl LineSink for StdoutConsole {
    fn is_present(&self) -> bool {
        true
    }

    fn write_line(&mut self, line: &str) {
        std::println!("{line}");
    }
}
