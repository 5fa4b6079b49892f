//! Timed helpers on an async delay
//!
//! Same line sequence and timing as the blocking helpers, but the wait
//! yields to the executor instead of spinning, so other tasks keep running
//! while a line is held.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use isd1820_core::Signal;

use super::{Error, Isd1820};

impl<P, D, T> Isd1820<P, D, T>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Record for `ms` milliseconds, yielding while REC is held
    pub async fn record_for(&mut self, ms: u32) -> Result<(), Error<P::Error>> {
        self.check_record_limit(ms);
        self.hold_for(Signal::Record, ms).await
    }

    /// Play for `ms` milliseconds, yielding while P-L is held
    pub async fn play_for(&mut self, ms: u32) -> Result<(), Error<P::Error>> {
        self.hold_for(Signal::PlayLevel, ms).await
    }

    /// Record, wait the settle gap, then play
    pub async fn record_and_play_for(
        &mut self,
        rec_ms: u32,
        play_ms: u32,
    ) -> Result<(), Error<P::Error>> {
        self.record_for(rec_ms).await?;
        self.delay.delay_ms(self.config.settle_ms).await;
        self.play_for(play_ms).await
    }

    /// Pulse P-E to play the whole stored message
    pub async fn play_complete_for(&mut self) -> Result<(), Error<P::Error>> {
        self.hold_for(Signal::PlayEdge, self.config.pulse_ms).await
    }

    async fn hold_for(&mut self, signal: Signal, ms: u32) -> Result<(), Error<P::Error>> {
        self.drive(signal, true)?;
        self.delay.delay_ms(ms).await;
        self.drive(signal, false)
    }
}
