//! Segment display driver trait

use crate::glyph::{digit_to_pattern, SegmentPattern};
use crate::memory::MEMORY_SIZE;

/// Trait for a write-only multi-digit segment display
///
/// Writes only touch the local memory image; nothing reaches the glass
/// until [`SegmentDisplay::refresh`]. None of the operations can fail, the
/// display gives no feedback to fail on.
pub trait SegmentDisplay {
    /// Set the raw pattern at `position`
    ///
    /// Positions past the end are ignored.
    fn set_memory(&mut self, position: usize, pattern: SegmentPattern);

    /// Push the whole memory image to the display
    fn refresh(&mut self);

    /// Number of digit positions
    fn positions(&self) -> usize {
        MEMORY_SIZE
    }

    /// Show digit `d` at `position`; digits above 9 blank the position
    fn write_digit(&mut self, position: usize, d: u8) {
        self.set_memory(position, digit_to_pattern(d));
    }

    /// Show one digit per position, left to right
    fn write_digits(&mut self, digits: &[u8]) {
        for (position, &d) in digits.iter().enumerate().take(self.positions()) {
            self.write_digit(position, d);
        }
    }

    /// Show the same digit in every position
    fn fill_digit(&mut self, d: u8) {
        for position in 0..self.positions() {
            self.write_digit(position, d);
        }
    }
}
