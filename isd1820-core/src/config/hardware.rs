//! Hardware configuration types
//!
//! These types describe which GPIO drives each ISD1820 control line.
//! The binding is fixed at build time; the firmware build script parses
//! it from `board.toml` and the driver only ever sees pin objects.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::signal::Signal;

/// Highest GPIO port letter accepted in pin strings
pub const MAX_PORT: char = 'H';

/// Pins per GPIO port
pub const PINS_PER_PORT: u8 = 16;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin string is not of the form `PA0`..`PH15`
    InvalidPin,
    /// The same GPIO is bound to two signals; carries the second one
    DuplicatePin(Signal),
}

/// GPIO identifier in STM32 port notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO port letter ('A'..='H')
    pub port: char,
    /// Pin number within the port (0-15)
    pub pin: u8,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(port: char, pin: u8) -> Self {
        Self { port, pin }
    }
}

/// Formats as the embassy peripheral name, e.g. `PA8`
impl fmt::Display for PinConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port, self.pin)
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "PA0" -> Port A, Pin 0
/// - "pb12" -> Port B, Pin 12 (case-insensitive)
pub fn parse_pin_string(s: &str) -> Result<PinConfig, ConfigError> {
    let s = s.trim();
    let mut chars = s.chars();

    match chars.next() {
        Some('P') | Some('p') => {}
        _ => return Err(ConfigError::InvalidPin),
    }

    let port = chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .ok_or(ConfigError::InvalidPin)?;
    if !('A'..=MAX_PORT).contains(&port) {
        return Err(ConfigError::InvalidPin);
    }

    let pin_str = chars.as_str();
    if pin_str.is_empty() || pin_str.len() > 2 || !pin_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidPin);
    }
    let pin: u8 = pin_str.parse().map_err(|_| ConfigError::InvalidPin)?;
    if pin >= PINS_PER_PORT {
        return Err(ConfigError::InvalidPin);
    }

    Ok(PinConfig { port, pin })
}

#[cfg(feature = "serde")]
impl Serialize for PinConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PinConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PinVisitor;

        impl serde::de::Visitor<'_> for PinVisitor {
            type Value = PinConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a pin name such as \"PA8\"")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<PinConfig, E> {
                parse_pin_string(v).map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(PinVisitor)
    }
}

/// Mapping from each control signal to its GPIO
///
/// Defaults to the Nucleo-F446RE Arduino header wiring
/// (REC=D7, P-L=D6, P-E=D5, FT=D4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinBinding {
    /// REC pin
    pub record: PinConfig,
    /// P-L pin
    pub play_level: PinConfig,
    /// P-E pin
    pub play_edge: PinConfig,
    /// FT pin
    pub feed_through: PinConfig,
}

impl Default for PinBinding {
    fn default() -> Self {
        Self {
            record: PinConfig::new('A', 8),
            play_level: PinConfig::new('B', 10),
            play_edge: PinConfig::new('B', 4),
            feed_through: PinConfig::new('B', 5),
        }
    }
}

impl PinBinding {
    /// GPIO bound to a signal
    pub fn get(&self, signal: Signal) -> PinConfig {
        match signal {
            Signal::Record => self.record,
            Signal::PlayLevel => self.play_level,
            Signal::PlayEdge => self.play_edge,
            Signal::FeedThrough => self.feed_through,
        }
    }

    /// Check that no GPIO is bound twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, &signal) in Signal::ALL.iter().enumerate() {
            let pin = self.get(signal);
            if Signal::ALL[..i].iter().any(|&prev| self.get(prev) == pin) {
                return Err(ConfigError::DuplicatePin(signal));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin_string() {
        assert_eq!(parse_pin_string("PA0"), Ok(PinConfig::new('A', 0)));
        assert_eq!(parse_pin_string("PB15"), Ok(PinConfig::new('B', 15)));
        assert_eq!(parse_pin_string(" pc13 "), Ok(PinConfig::new('C', 13)));
        assert_eq!(parse_pin_string("PH1"), Ok(PinConfig::new('H', 1)));
    }

    #[test]
    fn test_parse_pin_string_rejects_malformed() {
        assert_eq!(parse_pin_string(""), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin_string("P"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin_string("PA"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin_string("PA16"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin_string("PI0"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin_string("PA+1"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin_string("PA100"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin_string("gpio11"), Err(ConfigError::InvalidPin));
    }

    #[test]
    fn test_display_round_trip() {
        extern crate std;
        use std::string::ToString;

        let pin = PinConfig::new('B', 10);
        assert_eq!(pin.to_string(), "PB10");
        assert_eq!(parse_pin_string(&pin.to_string()), Ok(pin));
    }

    #[test]
    fn test_default_binding_is_valid() {
        let binding = PinBinding::default();
        assert_eq!(binding.validate(), Ok(()));
        assert_eq!(binding.get(Signal::Record), PinConfig::new('A', 8));
        assert_eq!(binding.get(Signal::FeedThrough), PinConfig::new('B', 5));
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let binding = PinBinding {
            feed_through: PinConfig::new('A', 8),
            ..PinBinding::default()
        };
        assert_eq!(
            binding.validate(),
            Err(ConfigError::DuplicatePin(Signal::FeedThrough))
        );
    }

    mod props {
        extern crate std;

        use super::*;
        use proptest::prelude::*;
        use std::string::ToString;

        proptest! {
            #[test]
            fn every_valid_pin_round_trips(port in b'A'..=b'H', pin in 0u8..PINS_PER_PORT) {
                let config = PinConfig::new(port as char, pin);
                let text = config.to_string();
                prop_assert_eq!(parse_pin_string(&text), Ok(config));
                prop_assert_eq!(parse_pin_string(&text.to_lowercase()), Ok(config));
            }

            #[test]
            fn out_of_range_pins_rejected(port in b'A'..=b'H', pin in PINS_PER_PORT..100) {
                let text = std::format!("P{}{}", port as char, pin);
                prop_assert_eq!(parse_pin_string(&text), Err(ConfigError::InvalidPin));
            }

            #[test]
            fn parse_never_panics(text in "\\PC{0,8}") {
                let _ = parse_pin_string(&text);
            }

            #[test]
            fn binding_on_distinct_pins_is_valid(pins in proptest::sample::subsequence(
                (0u8..PINS_PER_PORT).collect::<std::vec::Vec<_>>(),
                4,
            )) {
                let binding = PinBinding {
                    record: PinConfig::new('A', pins[0]),
                    play_level: PinConfig::new('A', pins[1]),
                    play_edge: PinConfig::new('A', pins[2]),
                    feed_through: PinConfig::new('A', pins[3]),
                };
                prop_assert_eq!(binding.validate(), Ok(()));

                let clashing = PinBinding { play_edge: binding.record, ..binding };
                prop_assert_eq!(
                    clashing.validate(),
                    Err(ConfigError::DuplicatePin(Signal::PlayEdge))
                );
            }
        }
    }
}
