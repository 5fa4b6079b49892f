//! ISD1820 control signals
//!
//! The module exposes four digital inputs that the MCU drives:
//!
//! | Signal        | Chip pin | Behavior while HIGH                         |
//! |---------------|----------|---------------------------------------------|
//! | `Record`      | REC      | Records into EEPROM until LOW or full       |
//! | `PlayLevel`   | P-L      | Plays the message while held                |
//! | `PlayEdge`    | P-E      | A pulse plays the whole message             |
//! | `FeedThrough` | FT       | Microphone drives the speaker directly      |

/// Logical control signal of the ISD1820
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// REC: record while high
    Record,
    /// P-L: level-triggered playback
    PlayLevel,
    /// P-E: edge-triggered playback
    PlayEdge,
    /// FT: feed-through
    FeedThrough,
}

impl Signal {
    /// All signals, in pin-table order
    pub const ALL: [Signal; 4] = [
        Signal::Record,
        Signal::PlayLevel,
        Signal::PlayEdge,
        Signal::FeedThrough,
    ];

    /// Silkscreen label of the pin on the module
    pub const fn label(self) -> &'static str {
        match self {
            Signal::Record => "REC",
            Signal::PlayLevel => "P-L",
            Signal::PlayEdge => "P-E",
            Signal::FeedThrough => "FT",
        }
    }

    const fn index(self) -> usize {
        match self {
            Signal::Record => 0,
            Signal::PlayLevel => 1,
            Signal::PlayEdge => 2,
            Signal::FeedThrough => 3,
        }
    }
}

/// Last level written to each control line (true = high)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalLevels {
    levels: [bool; 4],
}

impl SignalLevels {
    /// All lines low
    pub const LOW: Self = Self { levels: [false; 4] };

    /// Level of one line
    pub fn get(&self, signal: Signal) -> bool {
        self.levels[signal.index()]
    }

    /// Record a new level for one line
    pub fn set(&mut self, signal: Signal, high: bool) {
        self.levels[signal.index()] = high;
    }

    /// Check if every line is low
    pub fn all_low(&self) -> bool {
        self.levels.iter().all(|high| !high)
    }
}
