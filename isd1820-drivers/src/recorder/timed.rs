//! Timer-driven record and play
//!
//! A timed start drives the line high, arms the countdown timer and
//! returns at once. The line is released only when the timer's update
//! interrupt calls [`TimerExpiry::on_timer_expired`]; nothing polls for
//! elapsed time.
//!
//! Record and play share the one timer. Starting either while the other
//! is in flight releases the old line straight away and re-arms the timer
//! for the new operation, so the expiry handler always knows which single
//! line it has to release.
//!
//! ```ignore
//! recorder.init_async(timer)?;
//! recorder.record_async_ms(5_000)?;
//!
//! // In the timer update interrupt:
//! recorder.on_timer_expired()?;
//! ```

use embedded_hal::digital::OutputPin;

use isd1820_core::state::Event;
use isd1820_core::traits::TimerExpiry;
use isd1820_core::Signal;
use isd1820_hal::CountdownTimer;

use super::{Error, Isd1820};

impl<P, D, T> Isd1820<P, D, T>
where
    P: OutputPin,
    T: CountdownTimer,
{
    /// Bind the countdown timer shared by timed record and play
    pub fn set_timer(&mut self, timer: T) {
        self.timer = Some(timer);
    }

    /// Bind `timer` and force every line low
    pub fn init_async(&mut self, timer: T) -> Result<(), Error<P::Error>> {
        self.set_timer(timer);
        self.reset_pins()
    }

    /// Force all four lines low and forget any timed operation
    ///
    /// The timer keeps counting; a later expiry finds nothing to release.
    pub fn reset_pins(&mut self) -> Result<(), Error<P::Error>> {
        for signal in Signal::ALL {
            self.drive(signal, false)?;
        }
        self.status.state = self.status.state.transition(Event::Reset);
        Ok(())
    }

    /// Record until the timer has counted `ticks` ticks
    ///
    /// Ticks are raw timer counts; see [`TimerClock`](isd1820_hal::TimerClock)
    /// or [`record_async_ms`](Self::record_async_ms) for wall-clock time.
    pub fn record_async(&mut self, ticks: u32) -> Result<(), Error<P::Error>> {
        self.check_record_limit(self.clock.ms_from_ticks(ticks));
        self.start_timed(Event::StartRecord, ticks)
    }

    /// Play until the timer has counted `ticks` ticks
    pub fn play_async(&mut self, ticks: u32) -> Result<(), Error<P::Error>> {
        self.start_timed(Event::StartPlay, ticks)
    }

    /// Record for `ms` milliseconds at the configured timer clock
    ///
    /// Programs [`TimerClock::reload_for_ms`](isd1820_hal::TimerClock::reload_for_ms),
    /// so durations under two ticks round up to the shortest countdown.
    pub fn record_async_ms(&mut self, ms: u32) -> Result<(), Error<P::Error>> {
        self.check_record_limit(ms);
        self.start_timed(Event::StartRecord, self.clock.reload_for_ms(ms))
    }

    /// Play for `ms` milliseconds at the configured timer clock
    pub fn play_async_ms(&mut self, ms: u32) -> Result<(), Error<P::Error>> {
        self.start_timed(Event::StartPlay, self.clock.reload_for_ms(ms))
    }

    fn start_timed(&mut self, event: Event, ticks: u32) -> Result<(), Error<P::Error>> {
        if self.timer.is_none() {
            return Err(Error::TimerUnbound);
        }

        let previous = self.status.state;
        let next = previous.transition(event);
        let line = match next.active_signal() {
            Some(line) => line,
            None => return Ok(()),
        };

        if let Some(old) = previous.active_signal().filter(|&old| old != line) {
            #[cfg(feature = "defmt")]
            defmt::warn!("ISD1820: {} preempted by {}", previous, next);
            self.drive(old, false)?;
        }

        let mut armed = ticks;
        if let Some(timer) = self.timer.as_mut() {
            timer.clear_update_flag();
            timer.set_reload(ticks);
            timer.set_counter(0);
            timer.start_interrupt();
            // Narrow reload registers cap the value
            armed = timer.reload();
        }
        self.status.state = next;
        self.status.reload_ticks = armed;

        #[cfg(feature = "defmt")]
        if armed != ticks {
            defmt::warn!("ISD1820: {} ticks capped to {} by the timer", ticks, armed);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("ISD1820: {} armed for {} ticks", next, armed);

        self.drive(line, true)
    }
}

impl<P, D, T> TimerExpiry for Isd1820<P, D, T>
where
    P: OutputPin,
    T: CountdownTimer,
{
    type Error = Error<P::Error>;

    fn on_timer_expired(&mut self) -> Result<(), Self::Error> {
        let finished = self.status.state;
        let released = match finished.active_signal() {
            Some(line) => self.drive(line, false),
            None => Ok(()),
        };
        self.status.state = finished.transition(Event::TimerExpired);

        if let Some(timer) = self.timer.as_mut() {
            timer.stop_interrupt();
            timer.set_counter(0);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ISD1820: {} expired", finished);

        released
    }
}
