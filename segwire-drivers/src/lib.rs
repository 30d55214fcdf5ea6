//! Hardware driver implementations
//!
//! This crate drives an HT1621-class segment LCD controller over three
//! GPIO lines:
//!
//! - [`bus`] - Chip-select bracketed transactions and the LSB-first
//!   bit-bang encoder
//! - [`lcd`] - Controller driver: commands, initialization, refresh
//! - `sim` - Simulated bus that decodes line activity back into frames
//!   (tests and the `sim` feature only)

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod lcd;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use bus::{GpioBus, Transaction};
pub use lcd::{ChipConfigured, Ht1621, Ht1621Config, LinesConfigured};
pub use segwire_core::SegmentDisplay;
