//! Control pin bundle
//!
//! The board decides which GPIO drives which line; the driver only sees
//! the four output pins, so owning them here is the pin binding.

use embedded_hal::digital::OutputPin;
use isd1820_core::Signal;

/// The four output pins wired to the ISD1820
///
/// Pins should be created driven low (e.g. `Output::new(pin, Level::Low)`
/// with embassy) since the driver starts out assuming every line is low.
#[derive(Debug)]
pub struct Isd1820Pins<P> {
    /// REC
    pub record: P,
    /// P-L
    pub play_level: P,
    /// P-E
    pub play_edge: P,
    /// FT
    pub feed_through: P,
}

impl<P: OutputPin> Isd1820Pins<P> {
    /// Bundle the four control pins
    pub fn new(record: P, play_level: P, play_edge: P, feed_through: P) -> Self {
        Self {
            record,
            play_level,
            play_edge,
            feed_through,
        }
    }

    /// Pin driving a signal
    pub(crate) fn pin_mut(&mut self, signal: Signal) -> &mut P {
        match signal {
            Signal::Record => &mut self.record,
            Signal::PlayLevel => &mut self.play_level,
            Signal::PlayEdge => &mut self.play_edge,
            Signal::FeedThrough => &mut self.feed_through,
        }
    }
}
