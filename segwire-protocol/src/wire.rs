//! Wire words and bit ordering
//!
//! The transmitter shifts every word out least-significant bit first. A
//! [`WireWord`] is a value paired with its fixed bit width, so a call site
//! can never send a partial or oversized field.

/// Width of the mode ID that opens every transaction
pub const ID_BITS: u32 = 3;

/// Width of a command opcode
pub const OPCODE_BITS: u32 = 9;

/// Width of a display RAM address
pub const ADDRESS_BITS: u32 = 6;

/// Width of one display data burst
pub const DATA_BITS: u32 = 16;

/// Reverse the low `bits` bits of an MSB-first field
///
/// Shifting the result out LSB-first reproduces the MSB-first order the
/// controller expects. Bits above `bits` are discarded and `bits` must not
/// exceed 16. The transform is its own inverse.
pub const fn to_wire_order(msb_first: u16, bits: u32) -> u16 {
    let mut wire = 0u16;
    let mut i = 0;
    while i < bits {
        if msb_first & (1 << i) != 0 {
            wire |= 1 << (bits - 1 - i);
        }
        i += 1;
    }
    wire
}

/// A value with a fixed transmit width of `BITS` bits
///
/// `BITS` must be in `1..=16`; other widths fail to compile as soon as a
/// word of that width is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WireWord<const BITS: u32> {
    value: u16,
}

impl<const BITS: u32> WireWord<BITS> {
    const WIDTH_OK: () = assert!(BITS >= 1 && BITS <= 16, "wire words are 1 to 16 bits wide");

    /// Mask with the low `BITS` bits set
    pub const MASK: u16 = if BITS >= 16 {
        u16::MAX
    } else {
        (1 << BITS) - 1
    };

    /// Create a word, discarding bits above `BITS`
    pub const fn new(value: u16) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WIDTH_OK;
        Self {
            value: value & Self::MASK,
        }
    }

    /// The value as it is shifted out, bit 0 first
    pub const fn value(self) -> u16 {
        self.value
    }

    /// Number of bits clocked out for this word
    pub const fn bits(self) -> u32 {
        BITS
    }
}

/// ID + opcode of a configuration command
pub type CommandWord = WireWord<{ ID_BITS + OPCODE_BITS }>;

/// ID + start address of a display RAM write
pub type AddressWord = WireWord<{ ID_BITS + ADDRESS_BITS }>;

/// One 16-bit burst of display RAM data
pub type DataWord = WireWord<DATA_BITS>;
