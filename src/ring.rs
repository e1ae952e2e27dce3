//! LED ring model
//!
//! An ordered, fixed set of output lines. The order defines what "forward"
//! means for the chase.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{LineDriver, LineId};

/// Ring of `N` single-color LEDs, one output line each
pub struct LedRing<D: LineDriver, const N: usize> {
    driver: D,
    lines: [LineId; N],
}

impl<D: LineDriver, const N: usize> LedRing<D, N> {
    /// Create the ring and configure its lines as outputs
    pub fn new(mut driver: D, lines: [LineId; N]) -> Self {
        #[cfg(feature = "esp32-log")]
        println!("[LedRing.new] configuring {} lines: {:?}", N, lines);
        driver.configure_lines(&lines);
        Self { driver, lines }
    }

    /// Drive the line at ring `position`
    ///
    /// Touches exactly one line. Positions come from the cursor and are always
    /// in range.
    pub fn set(&mut self, position: usize, on: bool) {
        self.driver.set_line(self.lines[position], on);
    }

    /// Turn every ring line off
    pub fn clear(&mut self) {
        for line in self.lines {
            self.driver.set_line(line, false);
        }
    }

    /// Number of positions on the ring
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Ring lines in chase order
    pub const fn lines(&self) -> &[LineId; N] {
        &self.lines
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the driver, e.g. to sample the button line
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
