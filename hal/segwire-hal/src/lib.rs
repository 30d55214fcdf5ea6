//! Segwire Hardware Abstraction Layer
//!
//! This crate defines the two hardware seams the LCD driver needs: a
//! write-only digital output line and a blocking bus-cycle delay. Chip
//! HALs plug in through the `embedded-hal` 1.0 adapters, tests plug in
//! simulated lines.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (segwire-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segwire-drivers (bus, HT1621 driver)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segwire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │   simulated   │
//! │  pins/delays  │       │      bus      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output line
//! - [`delay::BusDelay`] - Bus-cycle pacing

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use delay::{BusDelay, HalDelay, BUS_CYCLE_US};
pub use gpio::{HalPin, OutputPin};
