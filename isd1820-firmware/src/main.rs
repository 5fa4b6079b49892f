//! ISD1820 - Voice Recorder Demo Firmware
//!
//! Nucleo-F446RE with an ISD1820 breakout wired as described in
//! `board.toml`. Boots with a blocking record-then-play check, then hands
//! the driver to the TIM7 update interrupt and the user button.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::Pull;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use isd1820_drivers::Isd1820;
use isd1820_hal_stm32::BasicTimer;

#[macro_use]
mod board;
mod button;
mod recorder;

use crate::board::{DEMO_PLAY_MS, DEMO_RECORD_MS, RECORDER_CONFIG, SELF_TEST, TIMER_PRESCALER};
use crate::recorder::Recorder;

bind_interrupts!(struct Irqs {
    EXTI15_10 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI15_10>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ISD1820 firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // Control lines start low so the chip stays idle
    let pins = control_pins!(p);
    let mut isd: Recorder = Isd1820::new(pins, Delay, RECORDER_CONFIG);
    info!(
        "Recorder ready, message limit {} ms",
        RECORDER_CONFIG.record_limit_ms()
    );

    if SELF_TEST {
        info!(
            "Self-test: record {} ms, play {} ms",
            DEMO_RECORD_MS, DEMO_PLAY_MS
        );
        recorder::report("self-test", isd.record_and_play(DEMO_RECORD_MS, DEMO_PLAY_MS));
    }

    let timer = BasicTimer::new(p.TIM7, TIMER_PRESCALER);
    let actual = timer.clock();
    if actual != isd.timer_clock() {
        warn!(
            "TIM7 ticks at {} Hz, board.toml expects {} Hz",
            actual.tick_hz(),
            isd.timer_clock().tick_hz()
        );
    }
    recorder::report("init", isd.init_async(timer));

    recorder::install(isd);
    recorder::enable_expiry_interrupt();

    // Blue user button, external pull-up on the Nucleo
    let button = ExtiInput::new(p.PC13, p.EXTI13, Pull::None, Irqs);
    spawner.spawn(button::button_task(button)).unwrap();

    info!("Short press records or plays, long press plays the whole message");
}
