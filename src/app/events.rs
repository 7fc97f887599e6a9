//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — the production build logs them to
//! serial, tests collect them for assertions.

use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries the initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A `SET_TIMER` command was accepted.
    TimerConfigured { minutes: u16 },

    /// A `SUBTRACT` command was applied to the running countdown.
    TimerReduced { by: u16, remaining: u16 },

    /// A `TIME_UPDATE:` push went out to the peer.
    StatusPushed { remaining: u16 },
}
