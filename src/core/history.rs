//! Transition history tracking.
//!
//! The engine appends a record for every committed transition and for every
//! forced reset, so a supervisor can reconstruct what the pipeline did and
//! when without attaching a debugger.

use super::event::SystemEvent;
use super::state::SystemState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed state change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from.
    pub from: SystemState,
    /// The state being transitioned to.
    pub to: SystemState,
    /// The event that caused the change, or `None` for a forced reset.
    pub event: Option<SystemEvent>,
    /// When the change committed.
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Record a table-driven transition.
    pub fn driven(from: SystemState, to: SystemState, event: SystemEvent) -> Self {
        Self {
            from,
            to,
            event: Some(event),
            timestamp: Utc::now(),
        }
    }

    /// Record a forced reset (no event goes through the table).
    pub fn forced(from: SystemState, to: SystemState) -> Self {
        Self {
            from,
            to,
            event: None,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of committed state changes.
///
/// # Example
///
/// ```rust
/// use motionfsm::{SystemEvent, SystemState, TransitionHistory, TransitionRecord};
///
/// let mut history = TransitionHistory::new();
/// history.record(TransitionRecord::driven(
///     SystemState::Idle,
///     SystemState::SubsystemStarting,
///     SystemEvent::StartSubsystem,
/// ));
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(
///     history.path(),
///     vec![SystemState::Idle, SystemState::SubsystemStarting],
/// );
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: Vec<TransitionRecord>,
}

impl TransitionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Number of recorded state changes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The sequence of states traversed: the first record's `from`, then the
    /// `to` of each record. Empty when no record exists.
    pub fn path(&self) -> Vec<SystemState> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Elapsed time between the first and last record, or `None` if the
    /// history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
