//! Board-agnostic core logic for the segment LCD
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Segment patterns and the pin-to-segment layouts
//! - The 0-9 glyph table
//! - The display memory image streamed by a refresh
//! - The [`SegmentDisplay`] trait implemented by drivers

#![no_std]
#![deny(unsafe_code)]

pub mod glyph;
pub mod memory;
pub mod traits;

pub use glyph::{digit_to_pattern, Orientation, Segment, SegmentPattern, ORIENTATION};
pub use memory::{DisplayMemory, MEMORY_SIZE, WORD_COUNT};
pub use traits::SegmentDisplay;
