//! Segwire - Segment LCD Counter Firmware
//!
//! Drives an HT1621 segment LCD from three RP2040 GPIOs and counts 0-9 on
//! all four digit positions, one step every half second.
//!
//! Wiring:
//! - GPIO2: CS (active low)
//! - GPIO3: WR (data latched on the rising edge)
//! - GPIO4: DATA

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use segwire_drivers::{GpioBus, Ht1621, Ht1621Config, SegmentDisplay};
use segwire_hal::{HalDelay, HalPin};

/// Time for the controller to come out of reset after power-on
const POWER_ON_SETTLE_MS: u64 = 1;

/// Time each digit stays on the glass
const COUNTER_PERIOD_MS: u64 = 500;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Segwire firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Lines come up idle: CS and WR high, DATA low
    let cs = HalPin::new(Output::new(p.PIN_2, Level::High));
    let wr = HalPin::new(Output::new(p.PIN_3, Level::High));
    let data = HalPin::new(Output::new(p.PIN_4, Level::Low));

    // Bus cycles busy-wait; nothing else runs on this core meanwhile
    let bus = GpioBus::new(cs, wr, data, HalDelay::new(Delay));
    info!("LCD bus configured");

    Timer::after_millis(POWER_ON_SETTLE_MS).await;

    let mut lcd = Ht1621::new(bus, Ht1621Config::default()).initialize();
    info!("LCD initialized");

    let mut digit = 0u8;
    loop {
        lcd.fill_digit(digit);
        lcd.refresh();
        debug!("Showing {}", digit);

        Timer::after_millis(COUNTER_PERIOD_MS).await;

        digit += 1;
        if digit == 10 {
            digit = 0;
        }
    }
}
