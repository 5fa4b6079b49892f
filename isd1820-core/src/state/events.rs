//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Timed recording armed
    StartRecord,
    /// Timed level playback armed
    StartPlay,
    /// Countdown timer update interrupt fired
    TimerExpired,
    /// All lines forced low
    Reset,
}
