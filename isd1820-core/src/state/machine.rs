//! Asynchronous operation state machine
//!
//! Record and play share one countdown timer, so at most one timed
//! operation can be in flight. The state names it explicitly instead of
//! keeping a flag per signal, which lets the expiry handler clear exactly
//! the line it armed.

use super::events::Event;
use crate::signal::Signal;

/// Timed operation currently driving a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AsyncState {
    /// No timed operation; the timer is free
    #[default]
    Idle,
    /// REC held high until the timer expires
    Recording,
    /// P-L held high until the timer expires
    Playing,
}

impl AsyncState {
    /// Line held high by the in-flight operation
    pub fn active_signal(&self) -> Option<Signal> {
        match self {
            AsyncState::Idle => None,
            AsyncState::Recording => Some(Signal::Record),
            AsyncState::Playing => Some(Signal::PlayLevel),
        }
    }

    /// Check if a timed operation is in flight
    pub fn is_active(&self) -> bool {
        !matches!(self, AsyncState::Idle)
    }

    /// Process an event and return the next state
    ///
    /// A start event from an active state moves straight to the new
    /// operation; the caller is responsible for releasing the old line.
    pub fn transition(self, event: Event) -> Self {
        match event {
            Event::StartRecord => AsyncState::Recording,
            Event::StartPlay => AsyncState::Playing,
            Event::TimerExpired | Event::Reset => AsyncState::Idle,
        }
    }
}
