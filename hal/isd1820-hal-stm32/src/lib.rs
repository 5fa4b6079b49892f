//! STM32-specific HAL for the ISD1820 recorder driver
//!
//! This crate provides STM32 implementations of the `isd1820-hal` traits
//! on top of embassy-stm32. It supports various STM32F4 chips including:
//!
//! - STM32F446RE (Nucleo-F446RE)
//! - STM32F401RE (Nucleo-F401RE)
//!
//! # Features
//!
//! - `stm32f446re` - Enable support for STM32F446RE
//! - `stm32f401re` - Enable support for STM32F401RE
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware builds the control pins with [`pins::control_pins`] and
//! hands a [`timer::BasicTimer`] to the driver. The timer's interrupt
//! vector stays with the firmware, which calls back into the driver.

#![no_std]
#![deny(unsafe_code)]

pub mod pins;
pub mod timer;

pub use timer::BasicTimer;
