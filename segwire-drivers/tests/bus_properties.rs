//! Property tests against the simulated bus

use core::cell::RefCell;

use proptest::prelude::*;
use segwire_core::{digit_to_pattern, SegmentDisplay};
use segwire_drivers::sim::{sim_bus, BusTrace};
use segwire_drivers::{Ht1621, Ht1621Config};
use segwire_protocol::{Command, WireWord};

fn sent_bits<const BITS: u32>(value: u16) -> (usize, u16, u32) {
    let trace = RefCell::new(BusTrace::new());
    let mut bus = sim_bus(&trace);

    let mut tx = bus.begin_transaction();
    tx.transmit(WireWord::<BITS>::new(value));
    tx.end();

    let t = trace.borrow();
    let frame = t.frames()[0];
    (frame.len(), frame.field(0, BITS as usize), t.stray_clocks())
}

fn any_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::SystemEnable),
        Just(Command::LcdOff),
        Just(Command::LcdOn),
        Just(Command::TimerEnable),
        Just(Command::ClearWatchdog),
        Just(Command::NormalMode),
        (0u8..8).prop_map(Command::WatchdogTimebase),
    ]
}

proptest! {
    #[test]
    fn transmit_is_lsb_first_with_one_edge_per_bit(value in any::<u16>()) {
        prop_assert_eq!(sent_bits::<3>(value), (3, value & 0x7, 0));
        prop_assert_eq!(sent_bits::<9>(value), (9, value & 0x1FF, 0));
        prop_assert_eq!(sent_bits::<12>(value), (12, value & 0xFFF, 0));
        prop_assert_eq!(sent_bits::<16>(value), (16, value, 0));
    }

    #[test]
    fn every_begin_has_one_end(commands in prop::collection::vec(any_command(), 0..40)) {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = Ht1621::new(sim_bus(&trace), Ht1621Config::default());

        for &command in &commands {
            lcd.send_command(command);
            prop_assert!(!trace.borrow().in_transaction());
        }

        let t = trace.borrow();
        prop_assert_eq!(t.frames().len(), commands.len());
        let decoded: Vec<Command> = t.commands().flatten().collect();
        prop_assert_eq!(decoded, commands);
        prop_assert_eq!(t.glitches(), 0);
        prop_assert_eq!(t.setup_violations(), 0);
        prop_assert_eq!(t.hold_violations(), 0);
    }

    #[test]
    fn refresh_carries_the_memory_image(digits in prop::array::uniform4(0u8..12)) {
        let trace = RefCell::new(BusTrace::new());
        let mut lcd = Ht1621::new(sim_bus(&trace), Ht1621Config::default()).initialize();
        trace.borrow_mut().clear();

        lcd.write_digits(&digits);
        lcd.refresh();

        let expected = digits.map(|d| digit_to_pattern(d).bits());
        let t = trace.borrow();
        prop_assert_eq!(t.frames().len(), 1);
        prop_assert_eq!(t.frames()[0].refresh_image(), Some(expected));
        prop_assert_eq!(t.setup_violations(), 0);
        prop_assert_eq!(t.hold_violations(), 0);
    }
}
