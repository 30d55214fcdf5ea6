//! Configuration commands
//!
//! Opcodes are written here exactly as the HT1621 datasheet lists them,
//! C8 first, with don't-care bits cleared. [`Command::code`] turns them into
//! the 12-bit word the LSB-first transmitter sends: the `100` command ID
//! followed by the opcode, both bit-reversed.
//!
//! Parameters are not validated beyond their types. A timebase code wider
//! than three bits is masked, not rejected.

use crate::wire::{to_wire_order, CommandWord, ID_BITS, OPCODE_BITS};

/// Mode ID announcing a command, MSB-first
pub const COMMAND_ID: u16 = 0b100;

/// System oscillator source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    /// On-chip 256 kHz RC oscillator
    InternalRc256k,
    /// External 32.768 kHz crystal
    Crystal32k,
    /// External 256 kHz clock source
    External256k,
}

/// Number of common (backplane) lines driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Commons {
    /// COM0-COM1
    Two,
    /// COM0-COM2
    Three,
    /// COM0-COM3
    Four,
}

impl Commons {
    /// The datasheet `ab` selector, MSB-first
    pub const fn selector(self) -> u16 {
        match self {
            Commons::Two => 0b00,
            Commons::Three => 0b01,
            Commons::Four => 0b10,
        }
    }

    /// Parse an `ab` selector; `11` is undefined
    pub const fn from_selector(ab: u16) -> Option<Self> {
        match ab & 0b11 {
            0b00 => Some(Commons::Two),
            0b01 => Some(Commons::Three),
            0b10 => Some(Commons::Four),
            _ => None,
        }
    }
}

/// LCD bias voltage ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BiasRatio {
    /// 1/2 bias
    Half,
    /// 1/3 bias
    Third,
}

impl BiasRatio {
    /// The datasheet `c` selector bit
    pub const fn selector(self) -> u16 {
        match self {
            BiasRatio::Half => 0,
            BiasRatio::Third => 1,
        }
    }
}

/// HT1621 configuration command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// SYS EN: start the system oscillator
    SystemEnable,
    /// LCD OFF: bias generator off
    LcdOff,
    /// LCD ON: bias generator on
    LcdOn,
    /// TIMER EN: enable the time base output
    TimerEnable,
    /// CLR WDT: clear the watchdog timer
    ClearWatchdog,
    /// RC 256K / XTAL 32K / EXT 256K: select the oscillator source
    Oscillator(Oscillator),
    /// BIAS & COM: select bias ratio and commons count
    BiasCommons {
        /// Commons count
        commons: Commons,
        /// Bias ratio
        bias: BiasRatio,
    },
    /// F1..F128: time base / watchdog clock output, 3-bit code
    WatchdogTimebase(u8),
    /// NORMAL: leave test mode
    NormalMode,
    /// TEST: manufacturer test mode
    TestMode,
}

impl Command {
    /// The 9-bit opcode, MSB-first as printed in the datasheet
    pub const fn opcode(self) -> u16 {
        match self {
            Command::SystemEnable => 0b0000_0001_0,
            Command::LcdOff => 0b0000_0010_0,
            Command::LcdOn => 0b0000_0011_0,
            Command::TimerEnable => 0b0000_0110_0,
            Command::ClearWatchdog => 0b0000_1110_0,
            Command::Oscillator(Oscillator::InternalRc256k) => 0b0001_1000_0,
            Command::Oscillator(Oscillator::Crystal32k) => 0b0001_0100_0,
            Command::Oscillator(Oscillator::External256k) => 0b0001_1100_0,
            // 0010 abX cX
            Command::BiasCommons { commons, bias } => {
                0b0010_0000_0 | commons.selector() << 3 | bias.selector() << 1
            }
            // 101X X abc X
            Command::WatchdogTimebase(tt) => 0b1010_0000_0 | ((tt & 0b111) as u16) << 1,
            Command::NormalMode => 0b1110_0011_0,
            Command::TestMode => 0b1110_0000_0,
        }
    }

    /// The 12-bit code in transmit order: reversed ID, then reversed opcode
    pub const fn code(self) -> u16 {
        to_wire_order(self.opcode(), OPCODE_BITS) << ID_BITS
            | to_wire_order(COMMAND_ID, ID_BITS)
    }

    /// The code as a 12-bit wire word
    pub const fn word(self) -> CommandWord {
        CommandWord::new(self.code())
    }

    /// Recover a command from its datasheet opcode
    ///
    /// Don't-care bits are ignored. Returns `None` for opcodes this driver
    /// does not define.
    pub const fn from_opcode(opcode: u16) -> Option<Self> {
        let op = opcode & 0x1FF;

        if op >> 5 == 0b0010 {
            let bias = if op & 0b10 != 0 {
                BiasRatio::Third
            } else {
                BiasRatio::Half
            };
            return match Commons::from_selector(op >> 3) {
                Some(commons) => Some(Command::BiasCommons { commons, bias }),
                None => None,
            };
        }

        if op >> 6 == 0b101 {
            return Some(Command::WatchdogTimebase(((op >> 1) & 0b111) as u8));
        }

        match op & !0b111 {
            0b0001_1000_0 => return Some(Command::Oscillator(Oscillator::InternalRc256k)),
            0b0001_0100_0 => return Some(Command::Oscillator(Oscillator::Crystal32k)),
            0b0001_1100_0 => return Some(Command::Oscillator(Oscillator::External256k)),
            _ => {}
        }

        match op & !0b1 {
            0b0000_0001_0 => Some(Command::SystemEnable),
            0b0000_0010_0 => Some(Command::LcdOff),
            0b0000_0011_0 => Some(Command::LcdOn),
            0b0000_0110_0 => Some(Command::TimerEnable),
            0b0000_1110_0 => Some(Command::ClearWatchdog),
            0b1110_0011_0 => Some(Command::NormalMode),
            0b1110_0000_0 => Some(Command::TestMode),
            _ => None,
        }
    }

    /// Recover a command from a 12-bit wire code
    ///
    /// Returns `None` if the ID is not the command ID or the opcode is
    /// unknown.
    pub const fn from_code(code: u16) -> Option<Self> {
        if to_wire_order(code & 0b111, ID_BITS) != COMMAND_ID {
            return None;
        }
        Self::from_opcode(to_wire_order(code >> ID_BITS, OPCODE_BITS))
    }
}

/// Wire codes of the fixed commands, pinned to their transmitted values
pub mod code {
    use super::{BiasRatio, Command, Commons, Oscillator};

    /// Start the system oscillator
    pub const SYSTEM_ENABLE: u16 = Command::SystemEnable.code();
    /// Bias generator off
    pub const LCD_OFF: u16 = Command::LcdOff.code();
    /// Bias generator on
    pub const LCD_ON: u16 = Command::LcdOn.code();
    /// Time base output on
    pub const TIMER_ENABLE: u16 = Command::TimerEnable.code();
    /// Clear watchdog
    pub const CLEAR_WATCHDOG: u16 = Command::ClearWatchdog.code();
    /// On-chip RC oscillator
    pub const OSC_RC256K: u16 = Command::Oscillator(Oscillator::InternalRc256k).code();
    /// External 32 kHz crystal
    pub const OSC_XTAL32K: u16 = Command::Oscillator(Oscillator::Crystal32k).code();
    /// External 256 kHz clock
    pub const OSC_EXT256K: u16 = Command::Oscillator(Oscillator::External256k).code();
    /// Four commons, 1/2 bias
    pub const BIAS_HALF_4COM: u16 = Command::BiasCommons {
        commons: Commons::Four,
        bias: BiasRatio::Half,
    }
    .code();
    /// Normal mode
    pub const NORMAL_MODE: u16 = Command::NormalMode.code();
    /// Test mode
    pub const TEST_MODE: u16 = Command::TestMode.code();
}
