//! Display RAM writes
//!
//! A write transaction opens with the `101` write ID and a 6-bit start
//! address, then streams data. The controller bumps its address pointer
//! after every nibble, so one address word is enough for the whole burst.

use crate::wire::{to_wire_order, AddressWord, ADDRESS_BITS, ID_BITS};

/// Mode ID announcing a display RAM write, MSB-first
pub const WRITE_ID: u16 = 0b101;

/// Highest display RAM address (32 nibbles on the HT1621)
pub const MAX_ADDRESS: u8 = 0x1F;

/// Build the 9-bit word that starts a write at `address`
///
/// The address is taken modulo 64; no range check is made against the
/// RAM size.
pub const fn address_word(address: u8) -> AddressWord {
    AddressWord::new(
        to_wire_order(address as u16, ADDRESS_BITS) << ID_BITS | to_wire_order(WRITE_ID, ID_BITS),
    )
}

/// Start of a full-buffer write
pub const WRITE_AT_ZERO: AddressWord = address_word(0);
