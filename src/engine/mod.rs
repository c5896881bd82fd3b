//! The imperative shell around the pure core.
//!
//! Two concrete engines implement the same operation surface:
//!
//! - [`LocalFsm`] performs no locking and is `!Sync`; the caller owns
//!   serialization, which makes it safe for single-threaded use only — the
//!   type system enforces exactly that.
//! - [`SharedFsm`] guards every operation with one exclusive lock and backs
//!   [`Fsm::wait_for_state`] with a condition variable tied to that lock.
//!
//! The mode is chosen at construction; there is no runtime toggle.

mod callbacks;
mod core;
mod error;
mod local;
mod shared;

pub use callbacks::{console_sink, CallbackError, EventGate, LogSink, StateChangeCallback};
pub use error::FsmError;
pub use local::LocalFsm;
pub use shared::SharedFsm;

use crate::core::{SystemEvent, SystemState, TransitionHistory};
use std::time::Duration;

/// The operation surface of the engine.
///
/// The engine is a passive object: it has no threads of its own and only
/// reacts to the callers that drive it with events.
///
/// # Re-entrancy
///
/// Callbacks (gates, the state-change observer, the log sink) run while the
/// engine's exclusive region is held — for [`SharedFsm`] that is a
/// non-reentrant lock, for [`LocalFsm`] an active `RefCell` borrow. A
/// callback must therefore never call back into the same engine instance;
/// doing so deadlocks or panics. This is a contract of the design, not a
/// recoverable condition.
pub trait Fsm {
    /// Reset state to [`SystemState::Idle`], mark the engine running and
    /// zero the auxiliary bookkeeping. Always succeeds.
    fn initialize(&self) -> Result<(), FsmError>;

    /// (Re)activate the engine without a full reset of bookkeeping: marks it
    /// running and forces [`SystemState::Idle`].
    fn start(&self);

    /// Unconditionally force [`SystemState::Idle`] and fire the state-change
    /// notification, even when the prior state already was `Idle`.
    fn reset(&self);

    /// Mark the engine stopped and wake every blocked waiter. Does not alter
    /// the current state. Idempotent.
    fn shutdown(&self);

    /// Request a stop through the normal transition path by raising
    /// [`SystemEvent::StopRequest`]; subject to table validation like any
    /// other event.
    fn stop(&self) -> Result<(), FsmError> {
        self.trigger_event(SystemEvent::StopRequest)
    }

    /// Attempt a table-driven transition. See [`FsmError`] for the ways this
    /// can fail; the state is unchanged on every failure.
    fn trigger_event(&self, event: SystemEvent) -> Result<(), FsmError>;

    /// Like [`Fsm::trigger_event`], with auxiliary context data. The data is
    /// accepted for forward compatibility and carries no behavior yet.
    fn trigger_event_with_data(&self, event: SystemEvent, data: &str) -> Result<(), FsmError>;

    /// Pure query: true iff the table has an edge for
    /// `(current_state, event)`. Never mutates state or invokes callbacks.
    fn can_transition(&self, event: SystemEvent) -> bool;

    /// The current lifecycle state.
    fn current_state(&self) -> SystemState;

    /// Display name of the current state.
    fn current_state_name(&self) -> &'static str {
        self.current_state().name()
    }

    /// The state before the last committed transition or reset.
    fn previous_state(&self) -> SystemState;

    /// Equality check against the current state.
    fn is_in_state(&self, state: SystemState) -> bool {
        self.current_state() == state
    }

    /// Whether the engine is between `initialize`/`start` and `shutdown`.
    fn is_running(&self) -> bool;

    /// Block until the engine reaches `target`, stops running, or `timeout`
    /// elapses. `None` (or a zero duration) waits indefinitely.
    ///
    /// Returns immediately with success when already in `target`, and
    /// immediately with [`FsmError::WaitUnsynchronized`] on the
    /// unsynchronized engine.
    fn wait_for_state(
        &self,
        target: SystemState,
        timeout: Option<Duration>,
    ) -> Result<(), FsmError>;

    /// Replace the single state-change observer.
    fn set_state_change_callback(&self, callback: StateChangeCallback);

    /// Replace the gate for exactly `event`; other events are unaffected.
    fn set_event_gate(&self, event: SystemEvent, gate: EventGate);

    /// Replace the log sink. The default writes timestamped lines to stdout.
    fn set_log_sink(&self, sink: LogSink);

    /// Snapshot of every committed transition and reset so far.
    fn history(&self) -> TransitionHistory;
}

/// Build an engine for the requested mode: `thread_safe == false` yields a
/// [`LocalFsm`], `true` a [`SharedFsm`].
pub fn new_engine(thread_safe: bool) -> Box<dyn Fsm> {
    if thread_safe {
        Box::new(SharedFsm::new())
    } else {
        Box::new(LocalFsm::new())
    }
}
