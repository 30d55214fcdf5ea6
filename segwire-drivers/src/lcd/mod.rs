//! Segment LCD controllers

pub mod ht1621;

pub use ht1621::{init_sequence, ChipConfigured, Ht1621, Ht1621Config, LinesConfigured};
