//! Hardware driver implementations
//!
//! This crate provides the ISD1820 voice recorder driver on top of the
//! traits defined in `embedded-hal`, `isd1820-hal` and `isd1820-core`:
//!
//! - Direct line control (record, play, feed-through)
//! - Blocking timed helpers (record, play, record-then-play, full playback)
//! - Awaitable versions of the timed helpers for async executors
//! - Timer-driven record/play released from the timer interrupt

#![no_std]
#![deny(unsafe_code)]

pub mod recorder;

pub use recorder::{Error, Isd1820, Isd1820Pins, TimerExpiry, VoiceRecorder};
