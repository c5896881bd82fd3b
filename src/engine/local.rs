//! The unsynchronized engine.

use crate::core::{SystemEvent, SystemState, TransitionHistory, TransitionTable};
use crate::engine::callbacks::{console_sink, EventGate, LogSink, StateChangeCallback};
use crate::engine::core::EngineCore;
use crate::engine::error::FsmError;
use crate::engine::Fsm;
use std::cell::RefCell;
use std::time::Duration;

/// Engine for single-threaded callers: no locking is performed.
///
/// The `RefCell` inside makes this type `!Sync`, so sharing it across
/// threads is a compile error rather than a data race — the caller
/// serializes all access by construction. [`Fsm::wait_for_state`] is
/// meaningless here and fails immediately; use [`SharedFsm`] when threads
/// need to coordinate on states.
///
/// # Example
///
/// ```rust
/// use motionfsm::{Fsm, LocalFsm, SystemEvent, SystemState};
///
/// let fsm = LocalFsm::new();
/// fsm.initialize().unwrap();
/// fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
/// assert!(fsm.is_in_state(SystemState::SubsystemStarting));
/// ```
///
/// [`SharedFsm`]: crate::engine::SharedFsm
pub struct LocalFsm {
    core: RefCell<EngineCore>,
}

impl LocalFsm {
    /// Engine over the normative motion pipeline table.
    pub fn new() -> Self {
        Self::with_table(TransitionTable::motion_pipeline())
    }

    /// Engine over a custom table.
    pub fn with_table(table: TransitionTable) -> Self {
        Self {
            core: RefCell::new(EngineCore::new(table, console_sink())),
        }
    }
}

impl Default for LocalFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl Fsm for LocalFsm {
    fn initialize(&self) -> Result<(), FsmError> {
        self.core.borrow_mut().initialize();
        Ok(())
    }

    fn start(&self) {
        self.core.borrow_mut().start();
    }

    fn reset(&self) {
        self.core.borrow_mut().reset();
    }

    fn shutdown(&self) {
        self.core.borrow_mut().request_shutdown();
    }

    fn trigger_event(&self, event: SystemEvent) -> Result<(), FsmError> {
        self.core.borrow_mut().trigger(event, None)
    }

    fn trigger_event_with_data(&self, event: SystemEvent, data: &str) -> Result<(), FsmError> {
        self.core.borrow_mut().trigger(event, Some(data))
    }

    fn can_transition(&self, event: SystemEvent) -> bool {
        self.core.borrow().can_transition(event)
    }

    fn current_state(&self) -> SystemState {
        self.core.borrow().current_state()
    }

    fn previous_state(&self) -> SystemState {
        self.core.borrow().previous_state()
    }

    fn is_running(&self) -> bool {
        self.core.borrow().is_running()
    }

    fn wait_for_state(
        &self,
        target: SystemState,
        _timeout: Option<Duration>,
    ) -> Result<(), FsmError> {
        let core = self.core.borrow();
        core.log(&format!(
            "cannot wait for state {target}: waiting requires the synchronized engine",
        ));
        Err(FsmError::WaitUnsynchronized)
    }

    fn set_state_change_callback(&self, callback: StateChangeCallback) {
        self.core.borrow_mut().set_state_change_callback(callback);
    }

    fn set_event_gate(&self, event: SystemEvent, gate: EventGate) {
        self.core.borrow_mut().set_event_gate(event, gate);
    }

    fn set_log_sink(&self, sink: LogSink) {
        self.core.borrow_mut().set_log_sink(sink);
    }

    fn history(&self) -> TransitionHistory {
        self.core.borrow().history()
    }
}
