//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the recorder driver.

pub mod recorder;

pub use recorder::{TimerExpiry, VoiceRecorder};
