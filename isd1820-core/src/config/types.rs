//! Recorder configuration types
//!
//! Timing parameters of the ISD1820 and the clock of the countdown timer
//! used for asynchronous operations. The firmware bakes these in at build
//! time from `board.toml`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gap between the end of a recording and the start of playback (ms)
pub const DEFAULT_SETTLE_MS: u32 = 100;

/// Length of the P-E pulse that triggers full playback (ms)
pub const DEFAULT_PULSE_MS: u32 = 100;

/// ROSC fitted on the common breakout boards (ohms)
pub const DEFAULT_ROSC_OHMS: u32 = 100_000;

/// Countdown timer clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimerClockConfig {
    /// Timer kernel clock in Hz
    pub kernel_clock_hz: u32,
    /// Prescaler register value (divides by `prescaler + 1`)
    pub prescaler: u32,
}

impl Default for TimerClockConfig {
    fn default() -> Self {
        // 16 MHz HSI, 1 kHz tick
        Self {
            kernel_clock_hz: 16_000_000,
            prescaler: 15_999,
        }
    }
}

/// ISD1820 recorder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Isd1820Config {
    /// Pause between record and play in `record_and_play` (ms)
    pub settle_ms: u32,
    /// P-E pulse length in `play_complete` (ms)
    pub pulse_ms: u32,
    /// Oscillator resistor on the module (ohms); sets the record limit
    pub rosc_ohms: u32,
    /// Clock of the countdown timer
    pub timer: TimerClockConfig,
}

impl Default for Isd1820Config {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE_MS,
            pulse_ms: DEFAULT_PULSE_MS,
            rosc_ohms: DEFAULT_ROSC_OHMS,
            timer: TimerClockConfig::default(),
        }
    }
}

impl Isd1820Config {
    /// Longest message the chip can hold with the fitted ROSC (ms)
    ///
    /// The datasheet gives 10 s at 100 kΩ and scales linearly
    /// (8 s at 80 kΩ, 20 s at 200 kΩ).
    pub fn record_limit_ms(&self) -> u32 {
        self.rosc_ohms / 10
    }
}
