//! Voice recorder traits
//!
//! This module defines the control surface of a level-driven voice
//! recorder chip:
//! - Direct line control ([`VoiceRecorder`])
//! - Expiry callback for timer-driven operations ([`TimerExpiry`])

/// Direct control of the recorder lines
///
/// Each method sets one line to a fixed level and returns immediately.
/// The chip keeps recording or playing for as long as the line is held.
pub trait VoiceRecorder {
    /// Error reported by the underlying pins
    type Error;

    /// Drive REC high; the chip records until REC goes low or memory is full
    ///
    /// Recording takes precedence over playback on the chip.
    fn start_recording(&mut self) -> Result<(), Self::Error>;

    /// Drive REC low
    fn stop_recording(&mut self) -> Result<(), Self::Error>;

    /// Drive P-L high; the chip plays until P-L goes low or the message ends
    fn start_playing(&mut self) -> Result<(), Self::Error>;

    /// Drive P-L low
    fn stop_playing(&mut self) -> Result<(), Self::Error>;

    /// Drive FT high, routing the microphone straight to the speaker
    fn enable_feed_through(&mut self) -> Result<(), Self::Error>;

    /// Drive FT low
    fn disable_feed_through(&mut self) -> Result<(), Self::Error>;
}

/// Capability invoked by the platform when the countdown timer expires
///
/// The platform's interrupt glue holds the driver through this single
/// method and calls it from the timer's update interrupt.
pub trait TimerExpiry {
    /// Error reported while releasing the lines
    type Error;

    /// Release the line armed by the last timed operation and stop the timer
    fn on_timer_expired(&mut self) -> Result<(), Self::Error>;
}
