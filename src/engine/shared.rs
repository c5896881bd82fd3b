//! The lock-guarded engine.

use crate::core::{SystemEvent, SystemState, TransitionHistory, TransitionTable};
use crate::engine::callbacks::{console_sink, EventGate, LogSink, StateChangeCallback};
use crate::engine::core::EngineCore;
use crate::engine::error::FsmError;
use crate::engine::Fsm;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Engine for multi-threaded callers.
///
/// Every operation acquires one exclusive lock for its whole duration,
/// including gate and state-change callback invocation — see the
/// re-entrancy contract on [`Fsm`]. Every committed transition, every
/// [`Fsm::reset`] and every [`Fsm::shutdown`] broadcasts to all threads
/// blocked in [`Fsm::wait_for_state`], since they may be waiting for
/// different targets.
///
/// # Example
///
/// ```rust
/// use motionfsm::{Fsm, SharedFsm, SystemEvent, SystemState};
/// use std::sync::Arc;
///
/// let fsm = Arc::new(SharedFsm::new());
/// fsm.initialize().unwrap();
///
/// let waiter = {
///     let fsm = Arc::clone(&fsm);
///     std::thread::spawn(move || fsm.wait_for_state(SystemState::SubsystemStarting, None))
/// };
///
/// fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
/// waiter.join().unwrap().unwrap();
/// ```
pub struct SharedFsm {
    core: Mutex<EngineCore>,
    waiters: Condvar,
}

impl SharedFsm {
    /// Engine over the normative motion pipeline table.
    pub fn new() -> Self {
        Self::with_table(TransitionTable::motion_pipeline())
    }

    /// Engine over a custom table.
    pub fn with_table(table: TransitionTable) -> Self {
        Self {
            core: Mutex::new(EngineCore::new(table, console_sink())),
            waiters: Condvar::new(),
        }
    }

    // A panicking callback poisons the lock; the engine state itself is
    // plain data and remains valid, so recover the guard instead of
    // propagating the poison to every later caller.
    fn lock(&self) -> MutexGuard<'_, EngineCore> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl Fsm for SharedFsm {
    fn initialize(&self) -> Result<(), FsmError> {
        self.lock().initialize();
        Ok(())
    }

    fn start(&self) {
        self.lock().start();
    }

    fn reset(&self) {
        self.lock().reset();
        self.waiters.notify_all();
    }

    fn shutdown(&self) {
        self.lock().request_shutdown();
        self.waiters.notify_all();
    }

    fn trigger_event(&self, event: SystemEvent) -> Result<(), FsmError> {
        let result = self.lock().trigger(event, None);
        if result.is_ok() {
            self.waiters.notify_all();
        }
        result
    }

    fn trigger_event_with_data(&self, event: SystemEvent, data: &str) -> Result<(), FsmError> {
        let result = self.lock().trigger(event, Some(data));
        if result.is_ok() {
            self.waiters.notify_all();
        }
        result
    }

    fn can_transition(&self, event: SystemEvent) -> bool {
        self.lock().can_transition(event)
    }

    fn current_state(&self) -> SystemState {
        self.lock().current_state()
    }

    fn previous_state(&self) -> SystemState {
        self.lock().previous_state()
    }

    fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    fn wait_for_state(
        &self,
        target: SystemState,
        timeout: Option<Duration>,
    ) -> Result<(), FsmError> {
        let guard = self.lock();
        if guard.current_state() == target {
            return Ok(());
        }

        let pending = |core: &mut EngineCore| core.current_state() != target && core.is_running();

        match timeout {
            Some(limit) if !limit.is_zero() => {
                let (guard, wait) = self
                    .waiters
                    .wait_timeout_while(guard, limit, pending)
                    .unwrap_or_else(PoisonError::into_inner);
                if guard.current_state() == target {
                    Ok(())
                } else if wait.timed_out() {
                    guard.log(&format!("timed out waiting for state {target}"));
                    Err(FsmError::WaitTimeout { target })
                } else {
                    guard.log(&format!("engine stopped while waiting for state {target}"));
                    Err(FsmError::EngineStopped { target })
                }
            }
            _ => {
                let guard = self
                    .waiters
                    .wait_while(guard, pending)
                    .unwrap_or_else(PoisonError::into_inner);
                if guard.current_state() == target {
                    Ok(())
                } else {
                    guard.log(&format!("engine stopped while waiting for state {target}"));
                    Err(FsmError::EngineStopped { target })
                }
            }
        }
    }

    fn set_state_change_callback(&self, callback: StateChangeCallback) {
        self.lock().set_state_change_callback(callback);
    }

    fn set_event_gate(&self, event: SystemEvent, gate: EventGate) {
        self.lock().set_event_gate(event, gate);
    }

    fn set_log_sink(&self, sink: LogSink) {
        self.lock().set_log_sink(sink);
    }

    fn history(&self) -> TransitionHistory {
        self.lock().history()
    }
}
