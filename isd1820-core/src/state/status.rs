//! Snapshot of the asynchronous operation status

use super::machine::AsyncState;

/// Status of the timed record/play machinery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AsyncStatus {
    /// Operation in flight
    pub state: AsyncState,
    /// Reload value programmed by the last timed start (ticks)
    pub reload_ticks: u32,
}

impl AsyncStatus {
    /// Check if a timed recording is in flight
    pub fn is_recording(&self) -> bool {
        self.state == AsyncState::Recording
    }

    /// Check if a timed playback is in flight
    pub fn is_playing(&self) -> bool {
        self.state == AsyncState::Playing
    }

    /// Check if the timer is free
    pub fn is_idle(&self) -> bool {
        self.state == AsyncState::Idle
    }
}
