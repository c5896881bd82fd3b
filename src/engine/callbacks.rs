//! Callback contracts of the engine.
//!
//! Callback failure is an explicit value, never an unwound panic the engine
//! has to intercept: gates and observers return `Result`, and the engine's
//! "log and continue" policy is an ordinary branch on that result.

use crate::core::{SystemEvent, SystemState};
use chrono::Local;
use thiserror::Error;

/// Failure reported by a gate or state-change callback.
///
/// Carries a human-readable reason that ends up in the log line.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    /// Create a callback failure with the given reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Per-event hook that may veto a transition before it commits.
///
/// `Ok(true)` allows the transition, `Ok(false)` rejects it, `Err(_)` is a
/// gate fault; rejection and fault both abort the transition with the state
/// unchanged. At most one gate per event; registering a new one replaces the
/// old one.
pub type EventGate = Box<dyn FnMut(SystemEvent) -> Result<bool, CallbackError> + Send>;

/// Single observer notified after every committed transition with
/// `(old, new)`, including no-op resets.
///
/// An `Err` from the observer is logged but neither rolls back the already
/// committed transition nor fails the triggering call.
pub type StateChangeCallback =
    Box<dyn FnMut(SystemState, SystemState) -> Result<(), CallbackError> + Send>;

/// Destination for engine log lines.
///
/// The engine hands the sink fully formatted lines; replacing the sink is the
/// only logging configuration there is.
pub type LogSink = Box<dyn Fn(&str) + Send>;

/// The default sink: writes each line to stdout.
pub fn console_sink() -> LogSink {
    Box::new(|line| println!("[fsm] {line}"))
}

/// Prefix a message with a local `HH:MM:SS.mmm` timestamp.
pub(crate) fn stamp(message: &str) -> String {
    format!("[{}] {message}", Local::now().format("%H:%M:%S%.3f"))
}
