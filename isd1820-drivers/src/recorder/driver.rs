//! ISD1820 driver: line control and blocking timed helpers
//!
//! # Usage
//!
//! ```ignore
//! let pins = Isd1820Pins::new(rec, play_l, play_e, ft);
//! let mut recorder = Isd1820::new(pins, delay, Isd1820Config::default());
//!
//! // Occupies the caller for 3 s + settle + 3 s
//! recorder.record_and_play(3_000, 3_000)?;
//! ```
//!
//! The blocking helpers hold the calling context for the full duration
//! through `DelayNs`; nothing else runs on that context meanwhile.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use isd1820_core::config::Isd1820Config;
use isd1820_core::state::AsyncStatus;
use isd1820_core::traits::VoiceRecorder;
use isd1820_core::{Signal, SignalLevels};
use isd1820_hal::TimerClock;

use super::{Error, Isd1820Pins};

/// ISD1820 voice recorder driver
///
/// Owns the four control pins, a millisecond delay and, once bound, the
/// countdown timer used by the timed operations.
pub struct Isd1820<P, D, T> {
    pub(super) pins: Isd1820Pins<P>,
    /// Last level written to each line
    pub(super) levels: SignalLevels,
    pub(super) delay: D,
    pub(super) timer: Option<T>,
    pub(super) status: AsyncStatus,
    pub(super) config: Isd1820Config,
    pub(super) clock: TimerClock,
}

impl<P, D, T> Isd1820<P, D, T>
where
    P: OutputPin,
{
    /// Create a new driver without a countdown timer
    ///
    /// Timed operations return [`Error::TimerUnbound`] until
    /// [`set_timer`](Self::set_timer) or [`init_async`](Self::init_async)
    /// binds one.
    pub fn new(pins: Isd1820Pins<P>, delay: D, config: Isd1820Config) -> Self {
        Self {
            pins,
            levels: SignalLevels::LOW,
            delay,
            timer: None,
            status: AsyncStatus::default(),
            clock: TimerClock::new(config.timer.kernel_clock_hz, config.timer.prescaler),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Isd1820Config {
        &self.config
    }

    /// Clock used to convert milliseconds to timer ticks
    pub fn timer_clock(&self) -> TimerClock {
        self.clock
    }

    /// Last level written to each line
    pub fn levels(&self) -> SignalLevels {
        self.levels
    }

    /// Status of the timed operations
    pub fn status(&self) -> AsyncStatus {
        self.status
    }

    /// The bound countdown timer, if any
    pub fn timer(&self) -> Option<&T> {
        self.timer.as_ref()
    }

    /// Give back the pins, delay and timer
    pub fn release(self) -> (Isd1820Pins<P>, D, Option<T>) {
        (self.pins, self.delay, self.timer)
    }

    /// Drive one line and remember its level
    pub(super) fn drive(&mut self, signal: Signal, high: bool) -> Result<(), Error<P::Error>> {
        let pin = self.pins.pin_mut(signal);
        if high {
            pin.set_high().map_err(Error::Pin)?;
        } else {
            pin.set_low().map_err(Error::Pin)?;
        }
        self.levels.set(signal, high);
        Ok(())
    }

    /// Warn when a recording would outlast the chip's memory
    pub(super) fn check_record_limit(&self, ms: u32) {
        let limit = self.config.record_limit_ms();
        if ms > limit {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "ISD1820: {}ms recording exceeds {}ms limit, chip stops early",
                ms,
                limit
            );
        }
    }
}

impl<P, D, T> Isd1820<P, D, T>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Record for `ms` milliseconds, blocking the caller meanwhile
    ///
    /// The chip stops on its own once memory is full (10 s with a
    /// 100 kΩ ROSC); longer requests only log a warning.
    pub fn record(&mut self, ms: u32) -> Result<(), Error<P::Error>> {
        self.check_record_limit(ms);
        self.hold(Signal::Record, ms)
    }

    /// Play for `ms` milliseconds, blocking the caller meanwhile
    ///
    /// Playback ends early if the stored message is shorter.
    pub fn play(&mut self, ms: u32) -> Result<(), Error<P::Error>> {
        self.hold(Signal::PlayLevel, ms)
    }

    /// Record for `rec_ms`, wait the settle gap, then play for `play_ms`
    ///
    /// Blocks for `rec_ms + settle_ms + play_ms` in total.
    pub fn record_and_play(&mut self, rec_ms: u32, play_ms: u32) -> Result<(), Error<P::Error>> {
        self.record(rec_ms)?;
        self.delay.delay_ms(self.config.settle_ms);
        self.play(play_ms)
    }

    /// Pulse P-E to play the whole stored message
    ///
    /// Returns after the pulse; the chip keeps playing to the end.
    pub fn play_complete(&mut self) -> Result<(), Error<P::Error>> {
        self.hold(Signal::PlayEdge, self.config.pulse_ms)
    }

    fn hold(&mut self, signal: Signal, ms: u32) -> Result<(), Error<P::Error>> {
        self.drive(signal, true)?;
        self.delay.delay_ms(ms);
        self.drive(signal, false)
    }
}

impl<P, D, T> VoiceRecorder for Isd1820<P, D, T>
where
    P: OutputPin,
{
    type Error = Error<P::Error>;

    fn start_recording(&mut self) -> Result<(), Self::Error> {
        self.drive(Signal::Record, true)
    }

    fn stop_recording(&mut self) -> Result<(), Self::Error> {
        self.drive(Signal::Record, false)
    }

    fn start_playing(&mut self) -> Result<(), Self::Error> {
        self.drive(Signal::PlayLevel, true)
    }

    fn stop_playing(&mut self) -> Result<(), Self::Error> {
        self.drive(Signal::PlayLevel, false)
    }

    fn enable_feed_through(&mut self) -> Result<(), Self::Error> {
        self.drive(Signal::FeedThrough, true)
    }

    fn disable_feed_through(&mut self) -> Result<(), Self::Error> {
        self.drive(Signal::FeedThrough, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::mock::{recorder, MockTimer};
    use embedded_hal::digital::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_starts_with_all_lines_low() {
        let (rec, trace) = recorder(Isd1820Config::default());
        assert!(rec.levels().all_low());
        assert!(rec.status().is_idle());
        assert!(rec.timer().is_none());
        // Construction does not touch the pins
        assert!(trace.borrow().writes.is_empty());
    }

    #[test]
    fn test_level_control() {
        let (mut rec, trace) = recorder(Isd1820Config::default());

        rec.start_recording().unwrap();
        assert!(rec.levels().get(Signal::Record));
        rec.stop_recording().unwrap();
        assert!(!rec.levels().get(Signal::Record));

        rec.start_playing().unwrap();
        assert!(rec.levels().get(Signal::PlayLevel));
        rec.stop_playing().unwrap();

        rec.enable_feed_through().unwrap();
        assert!(rec.levels().get(Signal::FeedThrough));
        rec.disable_feed_through().unwrap();

        assert!(rec.levels().all_low());
        let trace = trace.borrow();
        assert_eq!(trace.writes.len(), 6);
        // Level control never waits
        assert_eq!(trace.total_delay_ms(), 0);
        // And never touches P-E
        assert!(trace.writes_to(Signal::PlayEdge).is_empty());
    }

    #[test]
    fn test_level_control_leaves_async_status_alone() {
        let (mut rec, _trace) = recorder(Isd1820Config::default());
        rec.start_recording().unwrap();
        rec.start_playing().unwrap();
        assert!(rec.status().is_idle());
    }

    #[test]
    fn test_record_holds_rec_for_duration() {
        let (mut rec, trace) = recorder(Isd1820Config::default());
        rec.record(3_000).unwrap();

        let trace = trace.borrow();
        assert_eq!(trace.pulses_ms(Signal::Record), [(0, 3_000)]);
        assert_eq!(trace.total_delay_ms(), 3_000);
        assert!(trace.writes_to(Signal::PlayLevel).is_empty());
        assert!(rec.levels().all_low());
    }

    #[test]
    fn test_record_beyond_limit_still_runs() {
        let (mut rec, trace) = recorder(Isd1820Config::default());
        rec.record(15_000).unwrap();
        assert_eq!(trace.borrow().pulses_ms(Signal::Record), [(0, 15_000)]);
    }

    #[test]
    fn test_play_holds_play_level() {
        let (mut rec, trace) = recorder(Isd1820Config::default());
        rec.play(1_200).unwrap();

        let trace = trace.borrow();
        assert_eq!(trace.pulses_ms(Signal::PlayLevel), [(0, 1_200)]);
        assert!(trace.writes_to(Signal::PlayEdge).is_empty());
    }

    #[test]
    fn test_play_complete_pulses_play_edge() {
        let (mut rec, trace) = recorder(Isd1820Config::default());
        rec.play_complete().unwrap();

        let trace = trace.borrow();
        assert_eq!(trace.pulses_ms(Signal::PlayEdge), [(0, 100)]);
        assert!(trace.writes_to(Signal::PlayLevel).is_empty());
    }

    #[test]
    fn test_play_complete_uses_configured_pulse() {
        let config = Isd1820Config {
            pulse_ms: 20,
            ..Isd1820Config::default()
        };
        let (mut rec, trace) = recorder(config);
        rec.play_complete().unwrap();
        assert_eq!(trace.borrow().pulses_ms(Signal::PlayEdge), [(0, 20)]);
    }

    #[test]
    fn test_record_and_play_sequence() {
        let (mut rec, trace) = recorder(Isd1820Config::default());
        rec.record_and_play(2_000, 1_500).unwrap();

        let trace = trace.borrow();
        assert_eq!(trace.pulses_ms(Signal::Record), [(0, 2_000)]);
        assert_eq!(trace.pulses_ms(Signal::PlayLevel), [(2_100, 3_600)]);
        assert_eq!(trace.total_delay_ms(), 3_600);
    }

    #[test]
    fn test_pin_error_is_reported() {
        let (mut rec, trace) = recorder(Isd1820Config::default());
        rec.pins.record.fail = true;

        assert_eq!(rec.record(500), Err(Error::Pin(ErrorKind::Other)));
        // Failed before waiting
        assert_eq!(trace.borrow().total_delay_ms(), 0);
        assert!(!rec.levels().get(Signal::Record));
    }

    #[test]
    fn test_release_returns_parts() {
        let (mut rec, _trace) = recorder(Isd1820Config::default());
        rec.set_timer(MockTimer::default());
        rec.start_recording().unwrap();

        let (pins, _delay, timer) = rec.release();
        assert!(pins.record.high);
        assert!(timer.is_some());
    }

    #[test]
    fn test_pin_transactions() {
        use embedded_hal_mock::eh1::delay::NoopDelay;
        use embedded_hal_mock::eh1::digital::{
            Mock as PinMock, State as PinState, Transaction as PinTransaction,
        };

        let pulse = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let pins = Isd1820Pins::new(
            PinMock::new(&pulse),
            PinMock::new(&pulse),
            PinMock::new(&[]),
            PinMock::new(&[]),
        );
        let mut rec: Isd1820<_, _, MockTimer> =
            Isd1820::new(pins, NoopDelay::new(), Isd1820Config::default());

        rec.record_and_play(100, 100).unwrap();

        let (mut pins, _, _) = rec.release();
        pins.record.done();
        pins.play_level.done();
        pins.play_edge.done();
        pins.feed_through.done();
    }

    proptest! {
        #[test]
        fn record_is_high_exactly_for_duration(ms in 0u32..60_000) {
            let (mut rec, trace) = recorder(Isd1820Config::default());
            rec.record(ms).unwrap();

            let trace = trace.borrow();
            prop_assert_eq!(trace.pulses_ms(Signal::Record), [(0, ms as u64)]);
            prop_assert_eq!(trace.total_delay_ms(), ms as u64);
            prop_assert!(rec.levels().all_low());
        }

        #[test]
        fn record_and_play_total_duration(
            rec_ms in 0u32..20_000,
            play_ms in 0u32..20_000,
            settle_ms in 0u32..1_000,
        ) {
            let config = Isd1820Config { settle_ms, ..Isd1820Config::default() };
            let (mut rec, trace) = recorder(config);
            rec.record_and_play(rec_ms, play_ms).unwrap();

            let trace = trace.borrow();
            let (r, p, s) = (rec_ms as u64, play_ms as u64, settle_ms as u64);
            prop_assert_eq!(trace.total_delay_ms(), r + s + p);
            prop_assert_eq!(trace.pulses_ms(Signal::Record), [(0, r)]);
            prop_assert_eq!(trace.pulses_ms(Signal::PlayLevel), [(r + s, r + s + p)]);
        }
    }
}
