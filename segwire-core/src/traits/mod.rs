//! Display abstraction traits
//!
//! These traits define the interface between the application logic
//! and the LCD driver.

pub mod display;

pub use display::SegmentDisplay;
