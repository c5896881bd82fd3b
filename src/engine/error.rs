//! Engine error taxonomy.

use crate::core::{SystemEvent, SystemState};
use thiserror::Error;

/// Why a mutating engine operation failed.
///
/// None of these are fatal: the engine remains usable after every failure,
/// and every failure is also logged through the active sink with the state
/// and event names involved.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FsmError {
    /// The transition table has no edge for `(state, event)`; the state is
    /// unchanged.
    #[error("event {event} is not accepted in state {state}")]
    EventNotAccepted {
        state: SystemState,
        event: SystemEvent,
    },

    /// The gate registered for the event returned `Ok(false)`; the state is
    /// unchanged.
    #[error("gate rejected event {event}")]
    GateRejected { event: SystemEvent },

    /// The gate registered for the event failed; the state is unchanged.
    #[error("gate for event {event} faulted: {reason}")]
    GateFault { event: SystemEvent, reason: String },

    /// `wait_for_state` was called on the unsynchronized engine, which has
    /// no way to observe concurrent state changes.
    #[error("waiting for a state requires the synchronized engine")]
    WaitUnsynchronized,

    /// The wait timed out before the target state was reached.
    #[error("timed out waiting for state {target}")]
    WaitTimeout { target: SystemState },

    /// The engine shut down while a wait was pending.
    #[error("engine stopped before reaching state {target}")]
    EngineStopped { target: SystemState },
}
