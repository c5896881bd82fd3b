//! The immutable transition table.
//!
//! The table is a dense two-dimensional lookup indexed by the ordinals of the
//! closed state and event sets. Every state has a row by construction, so
//! "unknown state" can never surface at lookup time; the only question a
//! lookup answers is whether the event has an edge from that state.

use super::event::SystemEvent;
use super::state::SystemState;

/// An edge of the transition graph: `(from, event, to)`.
pub type Edge = (SystemState, SystemEvent, SystemState);

/// The normative edge set of the motion pipeline.
///
/// `ObstacleCleared` deliberately has no edge from any state.
const MOTION_PIPELINE_EDGES: &[Edge] = &[
    (
        SystemState::Idle,
        SystemEvent::StartSubsystem,
        SystemState::SubsystemStarting,
    ),
    (SystemState::Idle, SystemEvent::ResetRequest, SystemState::Idle),
    (SystemState::Idle, SystemEvent::ErrorOccurred, SystemState::Error),
    (
        SystemState::SubsystemStarting,
        SystemEvent::SubsystemReady,
        SystemState::Planning,
    ),
    (
        SystemState::SubsystemStarting,
        SystemEvent::SubsystemFailed,
        SystemState::Error,
    ),
    (
        SystemState::SubsystemStarting,
        SystemEvent::ErrorOccurred,
        SystemState::Error,
    ),
    (
        SystemState::SubsystemStarting,
        SystemEvent::StopRequest,
        SystemState::Idle,
    ),
    (
        SystemState::Planning,
        SystemEvent::PlanningSuccess,
        SystemState::Executing,
    ),
    (
        SystemState::Planning,
        SystemEvent::PlanningFailed,
        SystemState::Error,
    ),
    (
        SystemState::Planning,
        SystemEvent::ErrorOccurred,
        SystemState::Error,
    ),
    (
        SystemState::Planning,
        SystemEvent::ObstacleAppeared,
        SystemState::ObstacleDetected,
    ),
    (SystemState::Planning, SystemEvent::StopRequest, SystemState::Idle),
    (
        SystemState::Executing,
        SystemEvent::ExecutionComplete,
        SystemState::Idle,
    ),
    (
        SystemState::Executing,
        SystemEvent::ObstacleAppeared,
        SystemState::ObstacleDetected,
    ),
    (
        SystemState::Executing,
        SystemEvent::StopRequest,
        SystemState::Idle,
    ),
    (
        SystemState::Executing,
        SystemEvent::ErrorOccurred,
        SystemState::Error,
    ),
    (
        SystemState::ObstacleDetected,
        SystemEvent::StartPlanning,
        SystemState::Planning,
    ),
    (
        SystemState::ObstacleDetected,
        SystemEvent::StopRequest,
        SystemState::Idle,
    ),
    (
        SystemState::ObstacleDetected,
        SystemEvent::ErrorOccurred,
        SystemState::Error,
    ),
    (SystemState::Error, SystemEvent::ResetRequest, SystemState::Idle),
    (SystemState::Error, SystemEvent::StopRequest, SystemState::Idle),
];

/// Immutable mapping from `(state, event)` to a target state.
///
/// Built once at construction and never mutated afterward. Absence of an
/// entry means the event is not accepted in that state; there is no wildcard
/// or default edge.
///
/// # Example
///
/// ```rust
/// use motionfsm::{SystemEvent, SystemState, TransitionTable};
///
/// let table = TransitionTable::motion_pipeline();
/// assert_eq!(
///     table.target(SystemState::Idle, SystemEvent::StartSubsystem),
///     Some(SystemState::SubsystemStarting),
/// );
/// assert!(!table.accepts(SystemState::Idle, SystemEvent::PlanningSuccess));
/// ```
#[derive(Clone, Debug)]
pub struct TransitionTable {
    targets: [[Option<SystemState>; SystemEvent::COUNT]; SystemState::COUNT],
}

impl TransitionTable {
    /// Build a table from an explicit edge list.
    ///
    /// A later duplicate of the same `(from, event)` pair overrides the
    /// earlier edge.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut targets = [[None; SystemEvent::COUNT]; SystemState::COUNT];
        for &(from, event, to) in edges {
            targets[from.index()][event.index()] = Some(to);
        }
        Self { targets }
    }

    /// The normative motion pipeline table.
    pub fn motion_pipeline() -> Self {
        Self::from_edges(MOTION_PIPELINE_EDGES)
    }

    /// Target state of `(from, event)`, or `None` if the event is not
    /// accepted in that state.
    pub fn target(&self, from: SystemState, event: SystemEvent) -> Option<SystemState> {
        self.targets[from.index()][event.index()]
    }

    /// Check if `(from, event)` has an edge.
    pub fn accepts(&self, from: SystemState, event: SystemEvent) -> bool {
        self.target(from, event).is_some()
    }

    /// Iterate over every defined edge in `(state, event)` ordinal order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        SystemState::ALL.iter().flat_map(move |&from| {
            SystemEvent::ALL.iter().filter_map(move |&event| {
                self.target(from, event).map(|to| (from, event, to))
            })
        })
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::motion_pipeline()
    }
}
