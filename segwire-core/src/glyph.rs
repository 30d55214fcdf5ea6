//! Seven-segment glyphs
//!
//! Each display position is one byte of controller RAM. Which bit lights
//! which segment depends on how the controller's SEG outputs are routed to
//! the glass, and the routing reads differently when the glass is mounted
//! upside-down. Both layouts are fixed; the build picks one with the
//! `rotate-180` feature.
//!
//! Segment naming:
//! ```text
//!    AAA
//!   F   B
//!    GGG
//!   E   C
//!    DDD  DP
//! ```

/// One segment of a digit position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    /// Top horizontal
    A,
    /// Top right vertical
    B,
    /// Bottom right vertical
    C,
    /// Bottom horizontal
    D,
    /// Bottom left vertical
    E,
    /// Top left vertical
    F,
    /// Middle horizontal
    G,
    /// Decimal point
    Dp,
}

/// Mounting orientation of the glass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Upright
    Normal,
    /// Rotated 180°
    Rotated180,
}

impl Orientation {
    /// RAM bit driving `segment` in this orientation
    pub const fn bit(self, segment: Segment) -> u8 {
        let shift = match (self, segment) {
            (Orientation::Normal, Segment::A) => 0,
            (Orientation::Normal, Segment::B) => 4,
            (Orientation::Normal, Segment::C) => 6,
            (Orientation::Normal, Segment::D) => 7,
            (Orientation::Normal, Segment::E) => 2,
            (Orientation::Normal, Segment::F) => 1,
            (Orientation::Rotated180, Segment::A) => 7,
            (Orientation::Rotated180, Segment::B) => 2,
            (Orientation::Rotated180, Segment::C) => 1,
            (Orientation::Rotated180, Segment::D) => 0,
            (Orientation::Rotated180, Segment::E) => 4,
            (Orientation::Rotated180, Segment::F) => 6,
            (_, Segment::G) => 5,
            (_, Segment::Dp) => 3,
        };
        1 << shift
    }
}

/// Orientation selected at build time
#[cfg(not(feature = "rotate-180"))]
pub const ORIENTATION: Orientation = Orientation::Normal;

/// Orientation selected at build time
#[cfg(feature = "rotate-180")]
pub const ORIENTATION: Orientation = Orientation::Rotated180;

/// Raw RAM byte for one digit position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(pub u8);

impl SegmentPattern {
    /// All segments off
    pub const BLANK: Self = Self(0);

    /// Build a pattern from lit segments
    pub const fn from_segments(segments: &[Segment], orientation: Orientation) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < segments.len() {
            bits |= orientation.bit(segments[i]);
            i += 1;
        }
        Self(bits)
    }

    /// Raw byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if a segment is lit
    pub const fn contains(self, segment: Segment, orientation: Orientation) -> bool {
        self.0 & orientation.bit(segment) != 0
    }

    /// Same pattern with the decimal point lit
    pub const fn with_decimal_point(self) -> Self {
        Self(self.0 | ORIENTATION.bit(Segment::Dp))
    }
}

impl core::ops::BitOr for SegmentPattern {
    type Output = SegmentPattern;
    fn bitor(self, rhs: SegmentPattern) -> Self::Output {
        SegmentPattern(self.0 | rhs.0)
    }
}

use Segment::{A, B, C, D, E, F, G};

/// Lit segments for digits 0-9
const DIGITS: [&[Segment]; 10] = [
    &[A, B, C, D, E, F],
    &[B, C],
    &[A, B, D, E, G],
    &[A, B, C, D, G],
    &[B, C, F, G],
    &[A, C, D, F, G],
    &[A, C, D, E, F, G],
    &[A, B, C],
    &[A, B, C, D, E, F, G],
    &[A, B, C, D, F, G],
];

/// Build the ten glyphs for an orientation
pub const fn glyph_table(orientation: Orientation) -> [SegmentPattern; 10] {
    let mut table = [SegmentPattern::BLANK; 10];
    let mut d = 0;
    while d < 10 {
        table[d] = SegmentPattern::from_segments(DIGITS[d], orientation);
        d += 1;
    }
    table
}

static GLYPHS: [SegmentPattern; 10] = glyph_table(ORIENTATION);

/// Pattern for digit `d` in the build's orientation
///
/// Anything outside 0-9 renders blank.
pub fn digit_to_pattern(d: u8) -> SegmentPattern {
    GLYPHS
        .get(d as usize)
        .copied()
        .unwrap_or(SegmentPattern::BLANK)
}
