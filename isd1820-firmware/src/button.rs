//! User button demo
//!
//! A short press alternates between a timed recording and a timed
//! playback, each released by TIM7. A long press plays the whole stored
//! message.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_time::{Duration, Timer};

use crate::board::{DEMO_PLAY_MS, DEMO_RECORD_MS, LONG_PRESS_MS};
use crate::recorder::{self, report};

/// What the next short press starts
#[derive(Clone, Copy, PartialEq, Eq, Format)]
enum Next {
    Record,
    Play,
}

/// Button press task
#[embassy_executor::task]
pub async fn button_task(mut btn: ExtiInput<'static>) {
    info!("Button task started");
    let mut next = Next::Record;

    loop {
        // Nucleo user button is active low
        btn.wait_for_falling_edge().await;

        // Debounce
        Timer::after(Duration::from_millis(20)).await;

        if btn.is_low() {
            let release = embassy_time::with_timeout(
                Duration::from_millis(LONG_PRESS_MS),
                btn.wait_for_rising_edge(),
            )
            .await;

            match release {
                Ok(()) => next = short_press(next),
                Err(_) => {
                    long_press().await;
                    btn.wait_for_rising_edge().await;
                }
            }

            // Debounce after release
            Timer::after(Duration::from_millis(50)).await;
        }
    }
}

/// Arm the next timed operation, returning the one after it
fn short_press(next: Next) -> Next {
    let result = recorder::with_recorder(|isd| match next {
        Next::Record => isd.record_async_ms(DEMO_RECORD_MS),
        Next::Play => isd.play_async_ms(DEMO_PLAY_MS),
    });

    match result {
        Some(result) => {
            match next {
                Next::Record => info!("Recording for {} ms", DEMO_RECORD_MS),
                Next::Play => info!("Playing for {} ms", DEMO_PLAY_MS),
            }
            report("short press", result);
            match next {
                Next::Record => Next::Play,
                Next::Play => Next::Record,
            }
        }
        None => {
            warn!("Recorder not installed, {} ignored", next);
            next
        }
    }
}

/// Pulse P-E with the driver taken out of the shared slot
async fn long_press() {
    let Some(mut isd) = recorder::take_idle() else {
        warn!("Recorder busy, long press ignored");
        return;
    };

    info!("Playing the whole message");
    report("long press", isd.play_complete_for().await);
    recorder::install(isd);
}
