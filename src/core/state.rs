//! Lifecycle states of the motion pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of the motion pipeline.
///
/// The set is closed: every state the engine can ever be in is a variant
/// here, and the transition table is indexed by [`SystemState::index`].
///
/// # Example
///
/// ```rust
/// use motionfsm::SystemState;
///
/// assert_eq!(SystemState::Planning.name(), "PLANNING");
/// assert_eq!(SystemState::from_index(0), Some(SystemState::Idle));
/// assert_eq!(SystemState::from_index(99), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SystemState {
    /// At rest; the pipeline is not doing anything.
    Idle,
    /// The motion-planning subsystem is being brought up.
    SubsystemStarting,
    /// A motion plan is being computed.
    Planning,
    /// A planned trajectory is being executed.
    Executing,
    /// An obstacle interrupted planning or execution.
    ObstacleDetected,
    /// A failure occurred; only reset or stop leave this state.
    Error,
}

impl SystemState {
    /// Number of states; row count of the dense transition table.
    pub const COUNT: usize = 6;

    /// Every state, in ordinal order.
    pub const ALL: [SystemState; Self::COUNT] = [
        SystemState::Idle,
        SystemState::SubsystemStarting,
        SystemState::Planning,
        SystemState::Executing,
        SystemState::ObstacleDetected,
        SystemState::Error,
    ];

    /// Stable display name, unique per variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::SubsystemStarting => "SUBSYSTEM_STARTING",
            Self::Planning => "PLANNING",
            Self::Executing => "EXECUTING",
            Self::ObstacleDetected => "OBSTACLE_DETECTED",
            Self::Error => "ERROR",
        }
    }

    /// Dense ordinal used to index the transition table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`SystemState::index`]. Out-of-range ordinals yield `None`.
    pub fn from_index(index: usize) -> Option<SystemState> {
        Self::ALL.get(index).copied()
    }

    /// Check if this is the failure state.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
