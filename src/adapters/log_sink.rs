//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).  The
//! tagged single-line format keeps grepping a field session's serial
//! capture painless.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={state:?}");
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {from:?} -> {to:?}");
            }
            AppEvent::TimerConfigured { minutes } => {
                info!("TIMER | base={minutes} min");
            }
            AppEvent::TimerReduced { by, remaining } => {
                warn!("TIMER | -{by} min -> {remaining} remaining");
            }
            AppEvent::StatusPushed { remaining } => {
                info!("PUSH  | TIME_UPDATE:{remaining}");
            }
        }
    }
}
