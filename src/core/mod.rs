//! Pure data model of the motion pipeline.
//!
//! This module contains the side-effect-free core of the engine:
//! - The closed state and event sets
//! - The immutable, dense transition table
//! - Transition history records
//!
//! Everything here is plain data; the imperative shell lives in
//! [`crate::engine`].

mod event;
mod history;
mod state;
mod table;

pub use event::SystemEvent;
pub use history::{TransitionHistory, TransitionRecord};
pub use state::SystemState;
pub use table::{Edge, TransitionTable};
