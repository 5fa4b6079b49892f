//! State machine for timed record/play
//!
//! Tracks which line, if any, is held high by the shared countdown timer.

pub mod events;
pub mod machine;
pub mod status;

pub use events::Event;
pub use machine::AsyncState;
pub use status::AsyncStatus;
