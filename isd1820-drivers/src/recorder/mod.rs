//! ISD1820 recorder driver
//!
//! The driver is split by how long a call holds the calling context:
//!
//! - `driver`: line control and blocking timed helpers
//! - `awaitable`: the timed helpers on an async delay
//! - `timed`: timer-driven operations that return immediately

mod awaitable;
mod driver;
mod pins;
mod timed;

#[cfg(test)]
pub(crate) mod mock;

pub use driver::Isd1820;
pub use pins::Isd1820Pins;

pub use isd1820_core::traits::{TimerExpiry, VoiceRecorder};

/// Errors that can occur with recorder operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A control pin reported an error
    Pin(E),
    /// Timed operation requested before a countdown timer was bound
    TimerUnbound,
}
