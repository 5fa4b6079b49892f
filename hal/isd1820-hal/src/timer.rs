//! Countdown timer abstractions
//!
//! `embedded-hal` 1.0 has no timer trait, so the recorder driver gets its
//! own. The shape follows a basic MCU update timer: a reload register, a
//! running counter, a start/stop bit and an update (expiry) interrupt.

/// Hardware countdown timer with an expiry interrupt
///
/// The timer counts from its running counter up to the reload value and
/// raises its update interrupt when it gets there. The interrupt vector is
/// owned by the platform; it is expected to call back into the driver.
///
/// Implementations should handle the register access for the specific chip.
pub trait CountdownTimer {
    /// Clear a pending update (expiry) flag
    ///
    /// Called before re-arming so a stale flag does not fire the interrupt
    /// as soon as it is enabled.
    fn clear_update_flag(&mut self);

    /// Program the reload (period) register, in raw timer ticks
    fn set_reload(&mut self, ticks: u32);

    /// Read back the reload register
    fn reload(&self) -> u32;

    /// Set the running counter
    fn set_counter(&mut self, value: u32);

    /// Read the running counter
    fn counter(&self) -> u32;

    /// Start counting with the update interrupt enabled
    fn start_interrupt(&mut self);

    /// Stop counting and disable the update interrupt
    fn stop_interrupt(&mut self);

    /// Check if the timer is currently counting
    fn is_running(&self) -> bool;
}

/// Clock feeding a countdown timer
///
/// Converts between wall-clock milliseconds and raw timer ticks:
///
/// ```text
/// tick_hz = kernel_clock_hz / (prescaler + 1)
/// ticks   = ms * tick_hz / 1000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerClock {
    /// Timer kernel clock in Hz (APB timer clock on STM32)
    pub kernel_clock_hz: u32,
    /// Prescaler register value (divides by `prescaler + 1`)
    pub prescaler: u32,
}

impl Default for TimerClock {
    /// 16 MHz HSI with a 1 kHz tick
    fn default() -> Self {
        Self::new(16_000_000, 15_999)
    }
}

impl TimerClock {
    /// Create a new timer clock
    pub const fn new(kernel_clock_hz: u32, prescaler: u32) -> Self {
        Self {
            kernel_clock_hz,
            prescaler,
        }
    }

    /// Tick frequency after the prescaler
    pub fn tick_hz(&self) -> u32 {
        let div = self.prescaler as u64 + 1;
        (self.kernel_clock_hz as u64 / div) as u32
    }

    /// Number of ticks covering `ms` milliseconds
    ///
    /// Saturates at `u32::MAX`.
    pub fn ticks_from_ms(&self, ms: u32) -> u32 {
        let div = (self.prescaler as u64 + 1) * 1000;
        let ticks = ms as u64 * self.kernel_clock_hz as u64 / div;
        ticks.min(u32::MAX as u64) as u32
    }

    /// Duration of `ticks` ticks in milliseconds (rounded down)
    ///
    /// Saturates at `u32::MAX`, which is also returned for a clock of 0 Hz.
    pub fn ms_from_ticks(&self, ticks: u32) -> u32 {
        if self.kernel_clock_hz == 0 {
            return u32::MAX;
        }
        // Exceeds u64 once the prescaler passes ~4.3 million
        let num = ticks as u128 * (self.prescaler as u128 + 1) * 1000;
        let ms = num / self.kernel_clock_hz as u128;
        ms.min(u32::MAX as u128) as u32
    }

    /// Reload value whose update event lands `ms` milliseconds after start
    ///
    /// The update event fires when the counter wraps, one tick after it
    /// reaches the reload value, so this is one tick short of
    /// [`ticks_from_ms`](Self::ticks_from_ms). A reload of 0 stalls the
    /// counter, so the result is at least 1.
    pub fn reload_for_ms(&self, ms: u32) -> u32 {
        self.ticks_from_ms(ms).saturating_sub(1).max(1)
    }
}
