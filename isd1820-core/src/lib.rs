//! Board-agnostic core logic for the ISD1820 recorder driver
//!
//! This crate contains everything that does not depend on a specific
//! pin, delay or timer implementation:
//!
//! - The four logical control signals and their levels
//! - Pin binding and recorder configuration types
//! - The asynchronous record/play state machine
//! - Recorder traits implemented by the driver crate

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod signal;
pub mod state;
pub mod traits;

pub use signal::{Signal, SignalLevels};
