//! Control pin setup for STM32
//!
//! All four ISD1820 inputs are plain push-pull outputs that must start low,
//! otherwise the chip begins recording or playing at power-up.

use embassy_stm32::gpio::{Level, Output, Pin, Speed};
use embassy_stm32::Peri;

use isd1820_drivers::Isd1820Pins;

/// Configure the four control pins as low outputs
pub fn control_pins<'d>(
    record: Peri<'d, impl Pin>,
    play_level: Peri<'d, impl Pin>,
    play_edge: Peri<'d, impl Pin>,
    feed_through: Peri<'d, impl Pin>,
) -> Isd1820Pins<Output<'d>> {
    Isd1820Pins::new(
        Output::new(record, Level::Low, Speed::Low),
        Output::new(play_level, Level::Low, Speed::Low),
        Output::new(play_edge, Level::Low, Speed::Low),
        Output::new(feed_through, Level::Low, Speed::Low),
    )
}
