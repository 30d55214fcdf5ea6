//! Display memory image
//!
//! A byte per digit position, in the order the controller's RAM is laid
//! out. A refresh sends the image as two 16-bit little-endian words, so
//! position 0 bit 0 is the first data bit on the wire.

use crate::glyph::{digit_to_pattern, Segment, SegmentPattern, ORIENTATION};

/// Bytes of display memory
pub const MEMORY_SIZE: usize = 4;

/// 16-bit words sent per refresh
pub const WORD_COUNT: usize = MEMORY_SIZE / 2;

/// Local copy of the controller's display RAM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMemory {
    bytes: [u8; MEMORY_SIZE],
}

impl DisplayMemory {
    /// All segments off
    pub const fn new() -> Self {
        Self {
            bytes: [0; MEMORY_SIZE],
        }
    }

    /// Set the pattern at `position`
    ///
    /// Positions past the end are ignored.
    pub fn set(&mut self, position: usize, pattern: SegmentPattern) {
        if let Some(slot) = self.bytes.get_mut(position) {
            *slot = pattern.bits();
        }
    }

    /// Pattern at `position`, blank past the end
    pub fn get(&self, position: usize) -> SegmentPattern {
        self.bytes
            .get(position)
            .map(|&b| SegmentPattern(b))
            .unwrap_or(SegmentPattern::BLANK)
    }

    /// Show digit `d` at `position`
    pub fn set_digit(&mut self, position: usize, d: u8) {
        self.set(position, digit_to_pattern(d));
    }

    /// Light or clear the decimal point at `position`
    ///
    /// Leaves the other segments of the position alone.
    pub fn set_decimal_point(&mut self, position: usize, on: bool) {
        let dp = ORIENTATION.bit(Segment::Dp);
        if let Some(slot) = self.bytes.get_mut(position) {
            if on {
                *slot |= dp;
            } else {
                *slot &= !dp;
            }
        }
    }

    /// Same pattern in every position
    pub fn fill(&mut self, pattern: SegmentPattern) {
        self.bytes = [pattern.bits(); MEMORY_SIZE];
    }

    /// All segments off
    pub fn clear(&mut self) {
        self.fill(SegmentPattern::BLANK);
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }

    /// The image as transmitted: little-endian 16-bit words
    pub fn words(&self) -> [u16; WORD_COUNT] {
        let b = &self.bytes;
        [
            u16::from_le_bytes([b[0], b[1]]),
            u16::from_le_bytes([b[2], b[3]]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_blank() {
        let mem = DisplayMemory::new();
        assert_eq!(mem.as_bytes(), &[0; 4]);
        assert_eq!(mem.words(), [0, 0]);
        assert_eq!(mem, DisplayMemory::default());
    }

    #[test]
    fn test_words_are_little_endian() {
        let mut mem = DisplayMemory::new();
        mem.set(0, SegmentPattern(0x11));
        mem.set(1, SegmentPattern(0x22));
        mem.set(2, SegmentPattern(0x33));
        mem.set(3, SegmentPattern(0x44));

        assert_eq!(mem.words(), [0x2211, 0x4433]);
    }

    #[test]
    fn test_out_of_range_position_ignored() {
        let mut mem = DisplayMemory::new();
        mem.set(4, SegmentPattern(0xFF));
        mem.set_decimal_point(9, true);

        assert_eq!(mem, DisplayMemory::new());
        assert_eq!(mem.get(4), SegmentPattern::BLANK);
    }

    #[test]
    fn test_set_digit_and_fill() {
        let mut mem = DisplayMemory::new();
        mem.set_digit(2, 7);
        assert_eq!(mem.get(2), digit_to_pattern(7));
        assert_eq!(mem.get(0), SegmentPattern::BLANK);

        mem.fill(digit_to_pattern(3));
        for pos in 0..MEMORY_SIZE {
            assert_eq!(mem.get(pos), digit_to_pattern(3));
        }

        mem.clear();
        assert_eq!(mem.words(), [0, 0]);
    }

    #[test]
    fn test_decimal_point_keeps_digit() {
        let mut mem = DisplayMemory::new();
        mem.set_digit(0, 1);

        mem.set_decimal_point(0, true);
        assert_eq!(mem.get(0), digit_to_pattern(1).with_decimal_point());

        mem.set_decimal_point(0, false);
        assert_eq!(mem.get(0), digit_to_pattern(1));
    }
}
