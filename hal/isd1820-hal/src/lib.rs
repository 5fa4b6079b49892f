//! ISD1820 Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the recorder
//! driver needs beyond what `embedded-hal` already covers. Chip-specific
//! HALs (STM32 via embassy, etc.) implement them so the same driver code
//! runs on different hardware platforms.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (isd1820-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  isd1820-drivers (recorder driver)      │
//! └─────────────────────────────────────────┘
//!          │                     │
//!          ▼                     ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │  embedded-hal   │   │  isd1820-hal    │
//! │  (pins, delay)  │   │  (this crate)   │
//! └─────────────────┘   └─────────────────┘
//!                                │
//!                                ▼
//!                       ┌─────────────────┐
//!                       │ isd1820-hal-    │
//!                       │    stm32        │
//!                       └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`timer::CountdownTimer`] - Hardware countdown timer with expiry interrupt

#![no_std]
#![deny(unsafe_code)]

pub mod timer;

// Re-export key items at crate root for convenience
pub use timer::{CountdownTimer, TimerClock};
