//! External stimuli that drive the motion pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External stimulus fed to the engine by subsystem monitors, planners,
/// executors and obstacle sensors.
///
/// The set is closed and ordinal-indexed, like [`SystemState`]. Whether an
/// event is accepted depends entirely on the transition table: an event with
/// no edge from the current state is rejected without a state change.
///
/// `ObstacleCleared` is declared but has no edge anywhere in the default
/// table; triggering it always fails.
///
/// [`SystemState`]: crate::SystemState
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SystemEvent {
    /// Begin bringing up the motion-planning subsystem.
    StartSubsystem,
    /// The subsystem finished starting and is ready to plan.
    SubsystemReady,
    /// The subsystem failed to start.
    SubsystemFailed,
    /// Ask for a (re)plan, typically after an obstacle.
    StartPlanning,
    /// Planning produced a trajectory.
    PlanningSuccess,
    /// Planning failed.
    PlanningFailed,
    /// Trajectory execution finished.
    ExecutionComplete,
    /// An obstacle entered the workspace.
    ObstacleAppeared,
    /// The obstacle left the workspace.
    ObstacleCleared,
    /// Operator or supervisor requested a stop.
    StopRequest,
    /// Something failed outside the tabulated failure events.
    ErrorOccurred,
    /// Operator or supervisor requested a reset.
    ResetRequest,
}

impl SystemEvent {
    /// Number of events; column count of the dense transition table.
    pub const COUNT: usize = 12;

    /// Every event, in ordinal order.
    pub const ALL: [SystemEvent; Self::COUNT] = [
        SystemEvent::StartSubsystem,
        SystemEvent::SubsystemReady,
        SystemEvent::SubsystemFailed,
        SystemEvent::StartPlanning,
        SystemEvent::PlanningSuccess,
        SystemEvent::PlanningFailed,
        SystemEvent::ExecutionComplete,
        SystemEvent::ObstacleAppeared,
        SystemEvent::ObstacleCleared,
        SystemEvent::StopRequest,
        SystemEvent::ErrorOccurred,
        SystemEvent::ResetRequest,
    ];

    /// Stable display name, unique per variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartSubsystem => "START_SUBSYSTEM",
            Self::SubsystemReady => "SUBSYSTEM_READY",
            Self::SubsystemFailed => "SUBSYSTEM_FAILED",
            Self::StartPlanning => "START_PLANNING",
            Self::PlanningSuccess => "PLANNING_SUCCESS",
            Self::PlanningFailed => "PLANNING_FAILED",
            Self::ExecutionComplete => "EXECUTION_COMPLETE",
            Self::ObstacleAppeared => "OBSTACLE_APPEARED",
            Self::ObstacleCleared => "OBSTACLE_CLEARED",
            Self::StopRequest => "STOP_REQUEST",
            Self::ErrorOccurred => "ERROR_OCCURRED",
            Self::ResetRequest => "RESET_REQUEST",
        }
    }

    /// Dense ordinal used to index the transition table and gate registry.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`SystemEvent::index`]. Out-of-range ordinals yield `None`.
    pub fn from_index(index: usize) -> Option<SystemEvent> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for SystemEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
