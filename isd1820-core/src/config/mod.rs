//! Configuration types
//!
//! Board-agnostic configuration structures, baked in at build time.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
