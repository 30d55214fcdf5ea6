//! Simulated 3-wire bus
//!
//! Stands in for real GPIO in tests. Three [`SimPin`]s and a [`SimDelay`]
//! share one [`BusTrace`], which watches the line levels the way the
//! controller would: a CS falling edge opens a frame, each WR rising edge
//! while CS is low samples DATA into it, and the CS rising edge closes it.
//!
//! Bit timing is checked against the bus cycles counted by [`SimDelay`]:
//! every WR rising edge needs at least one cycle since DATA or WR last
//! moved (setup), and WR must not fall nor DATA move until one cycle after
//! that edge (hold).
//!
//! ```ignore
//! let trace = RefCell::new(BusTrace::new());
//! let lcd = Ht1621::new(sim_bus(&trace), Ht1621Config::default()).initialize();
//! assert_eq!(trace.borrow().frames().len(), 6);
//! ```

use core::cell::RefCell;

use heapless::Vec;
use segwire_core::MEMORY_SIZE;
use segwire_hal::{BusDelay, OutputPin};
use segwire_protocol::wire::{ADDRESS_BITS, DATA_BITS, ID_BITS, OPCODE_BITS};
use segwire_protocol::{Command, WRITE_AT_ZERO};

use crate::bus::GpioBus;

/// Frames kept before the trace reports an overflow
pub const MAX_FRAMES: usize = 64;

/// Bits kept per frame
pub const MAX_FRAME_BITS: usize = 64;

const COMMAND_FRAME_BITS: usize = (ID_BITS + OPCODE_BITS) as usize;
const ADDRESS_FRAME_BITS: usize = (ID_BITS + ADDRESS_BITS) as usize;
const REFRESH_FRAME_BITS: usize = ADDRESS_FRAME_BITS + MEMORY_SIZE * 8;

/// A bus line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Active-low transaction gate
    ChipSelect,
    /// Rising-edge latch clock
    WriteClock,
    /// Serial data
    Data,
}

impl Line {
    const fn index(self) -> usize {
        match self {
            Line::ChipSelect => 0,
            Line::WriteClock => 1,
            Line::Data => 2,
        }
    }
}

/// Bits sampled during one CS-low window, in sample order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bits: u64,
    len: u8,
}

impl Frame {
    /// Number of sampled bits
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if no bits were sampled
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The `i`-th sampled bit
    pub fn bit(&self, i: usize) -> bool {
        i < self.len() && self.bits & (1 << i) != 0
    }

    /// Reassemble `width` bits starting at `offset`, first sample as bit 0
    pub fn field(&self, offset: usize, width: usize) -> u16 {
        if offset >= MAX_FRAME_BITS {
            return 0;
        }
        let mask = if width >= 16 { 0xFFFF } else { (1u64 << width) - 1 };
        ((self.bits >> offset) & mask) as u16
    }

    /// Decode a 12-bit command frame
    pub fn command(&self) -> Option<Command> {
        if self.len() != COMMAND_FRAME_BITS {
            return None;
        }
        Command::from_code(self.field(0, COMMAND_FRAME_BITS))
    }

    /// Decode a full-buffer refresh frame into the memory image it carried
    pub fn refresh_image(&self) -> Option<[u8; MEMORY_SIZE]> {
        if self.len() != REFRESH_FRAME_BITS
            || self.field(0, ADDRESS_FRAME_BITS) != WRITE_AT_ZERO.value()
        {
            return None;
        }
        let lo = self.field(ADDRESS_FRAME_BITS, DATA_BITS as usize).to_le_bytes();
        let hi = self
            .field(ADDRESS_FRAME_BITS + DATA_BITS as usize, DATA_BITS as usize)
            .to_le_bytes();
        Some([lo[0], lo[1], hi[0], hi[1]])
    }

    fn push(&mut self, bit: bool) -> bool {
        if self.len() >= MAX_FRAME_BITS {
            return false;
        }
        if bit {
            self.bits |= 1 << self.len;
        }
        self.len += 1;
        true
    }
}

/// Recorded activity on the simulated bus
pub struct BusTrace {
    levels: [bool; 3],
    driven: [bool; 3],
    open: Option<Frame>,
    frames: Vec<Frame, MAX_FRAMES>,
    cycles: u32,
    stray_clocks: u32,
    glitches: u32,
    setup_violations: u32,
    hold_violations: u32,
    // A bus cycle has passed since DATA or WR last changed
    settled: bool,
    // A bus cycle has passed since the last WR rising edge
    held: bool,
    overflowed: bool,
}

impl Default for BusTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl BusTrace {
    /// Fresh trace; undriven lines read high as if pulled up
    pub const fn new() -> Self {
        Self {
            levels: [true; 3],
            driven: [false; 3],
            open: None,
            frames: Vec::new(),
            cycles: 0,
            stray_clocks: 0,
            glitches: 0,
            setup_violations: 0,
            hold_violations: 0,
            settled: true,
            held: true,
            overflowed: false,
        }
    }

    /// Apply a level change on `line`
    pub fn drive(&mut self, line: Line, high: bool) {
        let idx = line.index();
        let was = self.levels[idx];
        self.levels[idx] = high;
        self.driven[idx] = true;

        match line {
            Line::ChipSelect => {
                if was && !high {
                    self.open = Some(Frame::default());
                } else if !was && high {
                    if let Some(frame) = self.open.take() {
                        if self.frames.push(frame).is_err() {
                            self.overflowed = true;
                        }
                    }
                }
            }
            Line::WriteClock => {
                if !was && high {
                    let data = self.levels[Line::Data.index()];
                    match self.open.as_mut() {
                        Some(frame) => {
                            if !frame.push(data) {
                                self.overflowed = true;
                            }
                            if !self.settled {
                                self.setup_violations += 1;
                            }
                        }
                        None => self.stray_clocks += 1,
                    }
                    self.settled = false;
                    self.held = false;
                } else if was && !high {
                    if self.open.is_some() && !self.held {
                        self.hold_violations += 1;
                    }
                    self.settled = false;
                }
            }
            Line::Data => {
                if was != high {
                    if self.open.is_some() {
                        // DATA must only move while WR is low
                        if self.levels[Line::WriteClock.index()] {
                            self.glitches += 1;
                        }
                        if !self.held {
                            self.hold_violations += 1;
                        }
                    }
                    self.settled = false;
                }
            }
        }
    }

    /// Count one bus cycle
    pub fn delay(&mut self) {
        self.cycles += 1;
        self.settled = true;
        self.held = true;
    }

    /// Current level of `line`
    pub fn level(&self, line: Line) -> bool {
        self.levels[line.index()]
    }

    /// Check if every line has been driven at least once
    pub fn is_configured(&self) -> bool {
        self.driven.iter().all(|&d| d)
    }

    /// Check if CS is currently low
    pub fn in_transaction(&self) -> bool {
        self.open.is_some()
    }

    /// Closed frames, oldest first
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Decoded command frames, oldest first
    ///
    /// Frames that are not 12-bit commands are skipped; unknown commands
    /// yield `None`.
    pub fn commands(&self) -> impl Iterator<Item = Option<Command>> + '_ {
        self.frames
            .iter()
            .filter(|f| f.len() == COMMAND_FRAME_BITS)
            .map(Frame::command)
    }

    /// Bus cycles waited
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// WR rising edges seen while CS was high
    pub fn stray_clocks(&self) -> u32 {
        self.stray_clocks
    }

    /// DATA changes while WR was high inside a transaction
    pub fn glitches(&self) -> u32 {
        self.glitches
    }

    /// WR rising edges inside a transaction with no bus cycle since DATA or
    /// WR last moved
    pub fn setup_violations(&self) -> u32 {
        self.setup_violations
    }

    /// WR falling edges or DATA changes inside a transaction with no bus
    /// cycle since the last WR rising edge
    pub fn hold_violations(&self) -> u32 {
        self.hold_violations
    }

    /// Check if any frame or bit was dropped for lack of space
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Forget recorded frames and counters, keep line levels
    pub fn clear(&mut self) {
        self.frames.clear();
        self.cycles = 0;
        self.stray_clocks = 0;
        self.glitches = 0;
        self.setup_violations = 0;
        self.hold_violations = 0;
        self.overflowed = false;
    }
}

/// A line driven into a shared [`BusTrace`]
pub struct SimPin<'a> {
    line: Line,
    trace: &'a RefCell<BusTrace>,
}

impl<'a> SimPin<'a> {
    /// Create a pin for `line`
    pub fn new(line: Line, trace: &'a RefCell<BusTrace>) -> Self {
        Self { line, trace }
    }

    /// The line this pin drives
    pub fn line(&self) -> Line {
        self.line
    }
}

impl OutputPin for SimPin<'_> {
    fn set_high(&mut self) {
        self.trace.borrow_mut().drive(self.line, true);
    }

    fn set_low(&mut self) {
        self.trace.borrow_mut().drive(self.line, false);
    }
}

/// Zero-time delay that counts bus cycles in a shared [`BusTrace`]
pub struct SimDelay<'a> {
    trace: &'a RefCell<BusTrace>,
}

impl<'a> SimDelay<'a> {
    /// Create a delay recording into `trace`
    pub fn new(trace: &'a RefCell<BusTrace>) -> Self {
        Self { trace }
    }
}

impl BusDelay for SimDelay<'_> {
    fn delay_bus_cycle(&mut self) {
        self.trace.borrow_mut().delay();
    }
}

/// A bus wired entirely to simulated lines
pub type SimBus<'a> = GpioBus<SimPin<'a>, SimPin<'a>, SimPin<'a>, SimDelay<'a>>;

/// Build a configured bus recording into `trace`
pub fn sim_bus(trace: &RefCell<BusTrace>) -> SimBus<'_> {
    GpioBus::new(
        SimPin::new(Line::ChipSelect, trace),
        SimPin::new(Line::WriteClock, trace),
        SimPin::new(Line::Data, trace),
        SimDelay::new(trace),
    )
}
