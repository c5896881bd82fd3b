//! Motionfsm: a table-driven state machine engine for robotic motion
//! pipelines.
//!
//! The engine coordinates the lifecycle of a motion pipeline — subsystem
//! bring-up, planning, execution, obstacle handling and error recovery — as
//! a fixed transition table over closed state and event sets. External
//! actors (subsystem monitors, planners, executors, obstacle sensors) drive
//! it with events; observers register callbacks and can block on a target
//! state.
//!
//! # Core Concepts
//!
//! - **States and events**: closed, ordinal-indexed enums ([`SystemState`],
//!   [`SystemEvent`])
//! - **Transition table**: immutable dense `(state, event) -> state` lookup;
//!   an absent entry means the event is rejected in that state
//! - **Gates**: per-event callbacks that may veto a transition before it
//!   commits
//! - **Operating modes**: an unsynchronized engine for single-threaded
//!   callers and a lock-guarded one whose [`Fsm::wait_for_state`] parks the
//!   calling thread on a condition variable
//!
//! # Example
//!
//! ```rust
//! use motionfsm::{Fsm, LocalFsm, SystemEvent, SystemState};
//!
//! let fsm = LocalFsm::new();
//! fsm.initialize().unwrap();
//!
//! fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
//! fsm.trigger_event(SystemEvent::SubsystemReady).unwrap();
//! assert_eq!(fsm.current_state(), SystemState::Planning);
//!
//! // Planning cannot complete an execution that never started.
//! assert!(fsm.trigger_event(SystemEvent::ExecutionComplete).is_err());
//! assert_eq!(fsm.current_state(), SystemState::Planning);
//! ```

pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Edge, SystemEvent, SystemState, TransitionHistory, TransitionRecord, TransitionTable,
};
pub use crate::engine::{
    console_sink, new_engine, CallbackError, EventGate, Fsm, FsmError, LocalFsm, LogSink,
    SharedFsm, StateChangeCallback,
};
