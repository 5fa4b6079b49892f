//! Recorder shared between the button task and the TIM7 interrupt
//!
//! The thread side arms a timed operation under the lock; the TIM7 update
//! interrupt takes the same lock to release the line.

use core::cell::RefCell;
use core::convert::Infallible;

use defmt::*;
use embassy_stm32::gpio::Output;
use embassy_stm32::interrupt;
use embassy_stm32::peripherals::TIM7;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;

use isd1820_drivers::{Error, Isd1820, TimerExpiry};
use isd1820_hal_stm32::BasicTimer;

/// Driver as wired on this board
pub type Recorder = Isd1820<Output<'static>, Delay, BasicTimer<'static, TIM7>>;

/// Driver result with the board's infallible pins
pub type RecorderResult = Result<(), Error<Infallible>>;

/// Empty until `main` has run the self-test and bound the timer
static RECORDER: Mutex<CriticalSectionRawMutex, RefCell<Option<Recorder>>> =
    Mutex::new(RefCell::new(None));

/// Hand the driver over to the shared slot
pub fn install(recorder: Recorder) {
    RECORDER.lock(|cell| {
        cell.replace(Some(recorder));
    });
}

/// Run `f` on the shared driver inside a critical section
///
/// Returns `None` while the slot is empty.
pub fn with_recorder<R>(f: impl FnOnce(&mut Recorder) -> R) -> Option<R> {
    RECORDER.lock(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Take the driver out of the shared slot
///
/// Only done while idle, so no expiry can be missed.
pub fn take_idle() -> Option<Recorder> {
    RECORDER.lock(|cell| {
        let mut slot = cell.borrow_mut();
        let idle = slot
            .as_ref()
            .is_some_and(|recorder| recorder.status().is_idle());
        if idle {
            slot.take()
        } else {
            None
        }
    })
}

/// Log a failed driver call
pub fn report(what: &str, result: RecorderResult) {
    match result {
        Ok(()) => {}
        Err(Error::TimerUnbound) => error!("{}: no countdown timer bound", what),
        Err(Error::Pin(never)) => match never {},
    }
}

/// Unmask the TIM7 update interrupt in the NVIC
pub fn enable_expiry_interrupt() {
    use embassy_stm32::interrupt::InterruptExt;

    interrupt::TIM7.unpend();
    // SAFETY: the handler below only touches state behind RECORDER
    unsafe { interrupt::TIM7.enable() };
}

#[interrupt]
fn TIM7() {
    with_recorder(|recorder| report("TIM7", recorder.on_timer_expired()));
}
