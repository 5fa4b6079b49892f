//! Board constants generated from `board.toml`
//!
//! Also defines `control_pins!`, which takes the pins named in
//! `[pins]` out of the peripheral set.

use isd1820_core::config::{Isd1820Config, TimerClockConfig};

include!(concat!(env!("OUT_DIR"), "/board.rs"));
