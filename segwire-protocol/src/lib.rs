//! HT1621 3-Wire Protocol
//!
//! This crate defines the bit-level protocol spoken to an HT1621-class
//! segment LCD controller over its CS/WR/DATA lines. It only encodes; the
//! electrical side lives in `segwire-drivers`.
//!
//! # Protocol Overview
//!
//! Every exchange happens inside one chip-select window and starts with a
//! 3-bit mode ID:
//! ```text
//! Command:  ┌──────┬─────────────────┐
//!           │ 100  │ C8 ... C0       │   12 bits
//!           └──────┴─────────────────┘
//! Write:    ┌──────┬─────────┬────────────────────────┐
//!           │ 101  │ A5...A0 │ D0 D1 D2 D3 D0 D1 ...  │
//!           └──────┴─────────┴────────────────────────┘
//! ```
//!
//! The ID, command and address fields are clocked in MSB-first, display
//! data LSB-first. The transmitter always shifts LSB-first, so the
//! MSB-first fields are bit-reversed with [`to_wire_order`] before they go
//! out. All encodings are `const` and checked against literal values.

#![no_std]
#![deny(unsafe_code)]
// Opcodes are grouped the way the datasheet prints them (4-4-1).
#![allow(clippy::unusual_byte_groupings)]

pub mod command;
pub mod wire;
pub mod write;

pub use command::{code, BiasRatio, Command, Commons, Oscillator};
pub use wire::{to_wire_order, AddressWord, CommandWord, DataWord, WireWord};
pub use write::{address_word, WRITE_AT_ZERO};
