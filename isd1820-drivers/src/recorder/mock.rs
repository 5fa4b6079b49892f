//! Mock pins, delay and timer for testing
//!
//! Pins and delay share one trace so tests can check what each line was
//! doing at every point of simulated time.

extern crate std;

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use isd1820_core::config::Isd1820Config;
use isd1820_core::Signal;
use isd1820_hal::CountdownTimer;

use super::{Isd1820, Isd1820Pins};

/// One recorded pin write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub signal: Signal,
    pub high: bool,
    /// Simulated time of the write (ns)
    pub at_ns: u64,
}

#[derive(Debug, Default)]
pub struct Trace {
    pub now_ns: u64,
    pub writes: Vec<Write>,
    pub delays_ns: Vec<u64>,
}

impl Trace {
    /// Writes to one signal
    pub fn writes_to(&self, signal: Signal) -> Vec<Write> {
        self.writes
            .iter()
            .copied()
            .filter(|w| w.signal == signal)
            .collect()
    }

    /// (rise, fall) times of every high pulse on a signal, in ms
    pub fn pulses_ms(&self, signal: Signal) -> Vec<(u64, u64)> {
        let mut pulses = Vec::new();
        let mut rise = None;
        for w in self.writes_to(signal) {
            match (w.high, rise) {
                (true, None) => rise = Some(w.at_ns),
                (false, Some(start)) => {
                    pulses.push((start / 1_000_000, w.at_ns / 1_000_000));
                    rise = None;
                }
                _ => {}
            }
        }
        pulses
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.delays_ns.iter().sum::<u64>() / 1_000_000
    }
}

pub type SharedTrace = Rc<RefCell<Trace>>;

/// Mock GPIO pin that logs into the shared trace
pub struct MockPin {
    signal: Signal,
    trace: SharedTrace,
    pub high: bool,
    pub fail: bool,
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }
}

impl MockPin {
    fn write(&mut self, high: bool) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.high = high;
        let mut trace = self.trace.borrow_mut();
        let at_ns = trace.now_ns;
        trace.writes.push(Write {
            signal: self.signal,
            high,
            at_ns,
        });
        Ok(())
    }
}

/// Mock delay that advances simulated time
pub struct MockDelay {
    trace: SharedTrace,
}

impl MockDelay {
    fn advance(&mut self, ns: u64) {
        let mut trace = self.trace.borrow_mut();
        trace.now_ns += ns;
        trace.delays_ns.push(ns);
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(ns as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms as u64 * 1_000_000);
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance(ns as u64);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(ms as u64 * 1_000_000);
    }
}

/// Mock countdown timer
#[derive(Debug, Default)]
pub struct MockTimer {
    pub reload: u32,
    pub counter: u32,
    pub running: bool,
    pub interrupt_enabled: bool,
    pub flag_clears: u32,
    /// Widest reload the register holds; `None` for 32 bits
    pub max_reload: Option<u32>,
}

impl CountdownTimer for MockTimer {
    fn clear_update_flag(&mut self) {
        self.flag_clears += 1;
    }

    fn set_reload(&mut self, ticks: u32) {
        self.reload = self.max_reload.map_or(ticks, |max| ticks.min(max));
    }

    fn reload(&self) -> u32 {
        self.reload
    }

    fn set_counter(&mut self, value: u32) {
        self.counter = value;
    }

    fn counter(&self) -> u32 {
        self.counter
    }

    fn start_interrupt(&mut self) {
        self.interrupt_enabled = true;
        self.running = true;
    }

    fn stop_interrupt(&mut self) {
        self.interrupt_enabled = false;
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

impl MockTimer {
    /// Let the timer count for a while
    pub fn tick(&mut self, ticks: u32) {
        if self.running {
            self.counter = self.counter.saturating_add(ticks).min(self.reload);
        }
    }
}

pub type MockRecorder = Isd1820<MockPin, MockDelay, MockTimer>;

/// Build a recorder on mocks; returns the shared trace alongside
pub fn recorder(config: Isd1820Config) -> (MockRecorder, SharedTrace) {
    let trace: SharedTrace = Rc::new(RefCell::new(Trace::default()));
    let pin = |signal| MockPin {
        signal,
        trace: trace.clone(),
        high: false,
        fail: false,
    };
    let pins = Isd1820Pins::new(
        pin(Signal::Record),
        pin(Signal::PlayLevel),
        pin(Signal::PlayEdge),
        pin(Signal::FeedThrough),
    );
    let delay = MockDelay {
        trace: trace.clone(),
    };
    (Isd1820::new(pins, delay, config), trace)
}

/// Recorder on mocks with a timer already bound
pub fn timed_recorder() -> (MockRecorder, SharedTrace) {
    let (mut recorder, trace) = recorder(Isd1820Config::default());
    recorder.set_timer(MockTimer::default());
    (recorder, trace)
}
