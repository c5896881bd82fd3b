//! Mode-independent engine internals.
//!
//! `EngineCore` implements the transition semantics once; the two public
//! front-ends ([`LocalFsm`] and [`SharedFsm`]) only differ in how they guard
//! access to it and in whether waiting is possible.
//!
//! [`LocalFsm`]: crate::engine::LocalFsm
//! [`SharedFsm`]: crate::engine::SharedFsm

use crate::core::{
    SystemEvent, SystemState, TransitionHistory, TransitionRecord, TransitionTable,
};
use crate::engine::callbacks::{stamp, EventGate, LogSink, StateChangeCallback};
use crate::engine::error::FsmError;

/// Bookkeeping reserved for trajectory restore: once `ObstacleCleared` gets
/// wired into the table, the executor is expected to stash the interrupted
/// trajectory here and resume it from `progress`.
///
/// Zeroed at `initialize`, read nowhere yet.
// TODO: feed these fields from the executor when trajectory resume lands.
#[allow(dead_code)]
#[derive(Clone, Debug, Default)]
struct TrajectoryContext {
    has_original: bool,
    original_data: String,
    progress: usize,
}

/// The engine state and semantics, independent of the synchronization mode.
pub(crate) struct EngineCore {
    table: TransitionTable,
    current: SystemState,
    previous: SystemState,
    running: bool,
    history: TransitionHistory,
    state_change: Option<StateChangeCallback>,
    // Gate registry, dense like the table: one slot per event ordinal.
    gates: [Option<EventGate>; SystemEvent::COUNT],
    sink: LogSink,
    // Written at initialize, read nowhere yet; see TrajectoryContext.
    #[allow(dead_code)]
    trajectory: TrajectoryContext,
}

impl EngineCore {
    pub(crate) fn new(table: TransitionTable, sink: LogSink) -> Self {
        Self {
            table,
            current: SystemState::Idle,
            previous: SystemState::Idle,
            running: false,
            history: TransitionHistory::new(),
            state_change: None,
            gates: std::array::from_fn(|_| None),
            sink,
            trajectory: TrajectoryContext::default(),
        }
    }

    /// Reset state to `Idle`, mark the engine running and zero the
    /// trajectory bookkeeping. Always succeeds.
    pub(crate) fn initialize(&mut self) {
        self.current = SystemState::Idle;
        self.previous = SystemState::Idle;
        self.running = true;
        self.trajectory = TrajectoryContext::default();
        self.log("engine initialized");
    }

    /// (Re)activate the engine: mark running and force `Idle`, leaving the
    /// previous-state bookkeeping alone.
    pub(crate) fn start(&mut self) {
        self.log("engine started");
        self.running = true;
        self.current = SystemState::Idle;
    }

    /// Force `Idle` from whatever the current state is and notify observers,
    /// even when the prior state already was `Idle`.
    pub(crate) fn reset(&mut self) {
        self.log("engine reset");
        let old = self.current;
        self.previous = old;
        self.current = SystemState::Idle;
        self.history.record(TransitionRecord::forced(old, self.current));
        self.notify_state_change(old, self.current);
    }

    /// Mark the engine stopped. Leaves `current` untouched; idempotent.
    /// Waking blocked waiters is the synchronized front-end's job.
    pub(crate) fn request_shutdown(&mut self) {
        self.log("engine shutting down");
        self.running = false;
    }

    /// Attempt a table-driven transition. The sole mechanism for progressing
    /// the machine; `data` is carried for forward compatibility and not
    /// interpreted.
    pub(crate) fn trigger(
        &mut self,
        event: SystemEvent,
        _data: Option<&str>,
    ) -> Result<(), FsmError> {
        let from = self.current;
        let Some(target) = self.table.target(from, event) else {
            self.log(&format!("event {event} not accepted in state {from}"));
            return Err(FsmError::EventNotAccepted { state: from, event });
        };

        let verdict = match self.gates[event.index()].as_mut() {
            Some(gate) => gate(event),
            None => Ok(true),
        };
        match verdict {
            Ok(true) => {}
            Ok(false) => {
                self.log(&format!("gate rejected event {event} in state {from}"));
                return Err(FsmError::GateRejected { event });
            }
            Err(fault) => {
                self.log(&format!("gate for event {event} faulted: {fault}"));
                return Err(FsmError::GateFault {
                    event,
                    reason: fault.to_string(),
                });
            }
        }

        // The table is immutable and the caller holds the engine's exclusive
        // region, so the edge looked up above cannot have changed.
        debug_assert_eq!(self.table.target(from, event), Some(target));

        self.previous = from;
        self.current = target;
        self.log(&format!("transition: {from} -> {target} on {event}"));
        self.history
            .record(TransitionRecord::driven(from, target, event));
        self.notify_state_change(from, target);
        Ok(())
    }

    /// Pure query: does the table accept `event` from the current state?
    pub(crate) fn can_transition(&self, event: SystemEvent) -> bool {
        self.table.accepts(self.current, event)
    }

    pub(crate) fn current_state(&self) -> SystemState {
        self.current
    }

    pub(crate) fn previous_state(&self) -> SystemState {
        self.previous
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn history(&self) -> TransitionHistory {
        self.history.clone()
    }

    pub(crate) fn set_state_change_callback(&mut self, callback: StateChangeCallback) {
        self.state_change = Some(callback);
        self.log("state change callback registered");
    }

    pub(crate) fn set_event_gate(&mut self, event: SystemEvent, gate: EventGate) {
        self.gates[event.index()] = Some(gate);
        self.log(&format!("gate registered for event {event}"));
    }

    pub(crate) fn set_log_sink(&mut self, sink: LogSink) {
        self.sink = sink;
    }

    /// Write a timestamped line to the active sink.
    pub(crate) fn log(&self, message: &str) {
        (self.sink)(&stamp(message));
    }

    /// Invoke the state-change observer, if any. An observer failure is
    /// logged and otherwise ignored: the transition has already committed.
    fn notify_state_change(&mut self, old: SystemState, new: SystemState) {
        let outcome = match self.state_change.as_mut() {
            Some(callback) => callback(old, new),
            None => Ok(()),
        };
        if let Err(reason) = outcome {
            self.log(&format!("state change callback failed: {reason}"));
        }
    }
}
