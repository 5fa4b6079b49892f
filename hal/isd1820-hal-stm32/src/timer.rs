//! Countdown timer for STM32
//!
//! Wraps the embassy low-level timer and drives the core timer registers
//! directly, so any timer instance (basic timers TIM6/TIM7 included) can
//! release the recorder lines from its update interrupt.

use embassy_stm32::timer::low_level::Timer;
use embassy_stm32::timer::CoreInstance;
use embassy_stm32::Peri;

use isd1820_hal::{CountdownTimer, TimerClock};

/// Core timer registers are 16 bits wide
const MAX_COUNT: u32 = u16::MAX as u32;

/// Update-interrupt countdown timer on a core timer instance
pub struct BasicTimer<'d, T: CoreInstance> {
    inner: Timer<'d, T>,
}

impl<'d, T: CoreInstance> BasicTimer<'d, T> {
    /// Create a stopped timer with the given prescaler
    ///
    /// The prescaler is latched with a software update event; the update
    /// flag it raises is cleared before returning.
    pub fn new(tim: Peri<'d, T>, prescaler: u16) -> Self {
        let inner = Timer::new(tim);
        inner.stop();
        inner.enable_update_interrupt(false);

        let regs = inner.regs_core();
        regs.psc().write_value(prescaler);
        regs.egr().write(|w| w.set_ug(true));
        inner.clear_update_interrupt();

        Self { inner }
    }

    /// Clock actually feeding this timer
    ///
    /// Compare with the configured clock to catch a `board.toml` that
    /// does not match the RCC setup.
    pub fn clock(&self) -> TimerClock {
        let kernel_clock_hz = self.inner.get_clock_frequency().0;
        let prescaler = self.inner.regs_core().psc().read() as u32;
        TimerClock::new(kernel_clock_hz, prescaler)
    }
}

impl<'d, T: CoreInstance> CountdownTimer for BasicTimer<'d, T> {
    fn clear_update_flag(&mut self) {
        self.inner.clear_update_interrupt();
    }

    fn set_reload(&mut self, ticks: u32) {
        let arr = ticks.min(MAX_COUNT) as u16;
        self.inner.regs_core().arr().write(|w| w.set_arr(arr));
    }

    fn reload(&self) -> u32 {
        self.inner.regs_core().arr().read().arr() as u32
    }

    fn set_counter(&mut self, value: u32) {
        let cnt = value.min(MAX_COUNT) as u16;
        self.inner.regs_core().cnt().write(|w| w.set_cnt(cnt));
    }

    fn counter(&self) -> u32 {
        self.inner.regs_core().cnt().read().cnt() as u32
    }

    fn start_interrupt(&mut self) {
        self.inner.enable_update_interrupt(true);
        self.inner.start();
    }

    fn stop_interrupt(&mut self) {
        self.inner.stop();
        self.inner.enable_update_interrupt(false);
    }

    fn is_running(&self) -> bool {
        self.inner.regs_core().cr1().read().cen()
    }
}
