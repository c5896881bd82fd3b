//! Property-based tests for the transition engine.
//!
//! These tests use proptest to verify, across arbitrary `(state, event)`
//! pairs, that the engine behaves exactly like its table: defined pairs
//! commit to the tabulated target, undefined pairs fail without a state
//! change.

use motionfsm::{
    CallbackError, Fsm, FsmError, LocalFsm, SystemEvent, SystemState, TransitionTable,
};
use proptest::prelude::*;

/// Canonical event path that drives a freshly initialized engine from Idle
/// into `state`. Every state is reachable through the normative table.
fn path_to(state: SystemState) -> &'static [SystemEvent] {
    match state {
        SystemState::Idle => &[],
        SystemState::SubsystemStarting => &[SystemEvent::StartSubsystem],
        SystemState::Planning => &[SystemEvent::StartSubsystem, SystemEvent::SubsystemReady],
        SystemState::Executing => &[
            SystemEvent::StartSubsystem,
            SystemEvent::SubsystemReady,
            SystemEvent::PlanningSuccess,
        ],
        SystemState::ObstacleDetected => &[
            SystemEvent::StartSubsystem,
            SystemEvent::SubsystemReady,
            SystemEvent::ObstacleAppeared,
        ],
        SystemState::Error => &[SystemEvent::ErrorOccurred],
    }
}

fn engine_in(state: SystemState) -> LocalFsm {
    let fsm = LocalFsm::new();
    fsm.set_log_sink(Box::new(|_| {}));
    fsm.initialize().unwrap();
    for &event in path_to(state) {
        fsm.trigger_event(event).unwrap();
    }
    assert_eq!(fsm.current_state(), state);
    fsm
}

prop_compose! {
    fn arbitrary_state()(index in 0..SystemState::COUNT) -> SystemState {
        SystemState::from_index(index).unwrap()
    }
}

prop_compose! {
    fn arbitrary_event()(index in 0..SystemEvent::COUNT) -> SystemEvent {
        SystemEvent::from_index(index).unwrap()
    }
}

proptest! {
    #[test]
    fn trigger_agrees_with_the_table(
        state in arbitrary_state(),
        event in arbitrary_event(),
    ) {
        let table = TransitionTable::motion_pipeline();
        let fsm = engine_in(state);

        match table.target(state, event) {
            Some(target) => {
                prop_assert!(fsm.trigger_event(event).is_ok());
                prop_assert_eq!(fsm.current_state(), target);
                prop_assert_eq!(fsm.previous_state(), state);
            }
            None => {
                let err = fsm.trigger_event(event).unwrap_err();
                prop_assert_eq!(err, FsmError::EventNotAccepted { state, event });
                prop_assert_eq!(fsm.current_state(), state);
            }
        }
    }

    #[test]
    fn can_transition_is_a_pure_table_query(
        state in arbitrary_state(),
        event in arbitrary_event(),
    ) {
        let table = TransitionTable::motion_pipeline();
        let fsm = engine_in(state);

        prop_assert_eq!(fsm.can_transition(event), table.accepts(state, event));
        prop_assert_eq!(fsm.current_state(), state);
    }

    #[test]
    fn committed_transitions_notify_exactly_once(
        state in arbitrary_state(),
        event in arbitrary_event(),
    ) {
        let table = TransitionTable::motion_pipeline();
        let fsm = engine_in(state);

        let (tx, rx) = std::sync::mpsc::channel();
        fsm.set_state_change_callback(Box::new(move |old, new| {
            tx.send((old, new)).map_err(|e| CallbackError::new(e.to_string()))
        }));

        let result = fsm.trigger_event(event);
        let notifications: Vec<_> = rx.try_iter().collect();

        match table.target(state, event) {
            Some(target) => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(notifications, vec![(state, target)]);
            }
            None => {
                prop_assert!(result.is_err());
                prop_assert!(notifications.is_empty());
            }
        }
    }

    #[test]
    fn rejection_and_fault_are_externally_identical(
        state in arbitrary_state(),
        event in arbitrary_event(),
    ) {
        let rejected = engine_in(state);
        rejected.set_event_gate(event, Box::new(|_| Ok(false)));
        let rejected_result = rejected.trigger_event(event);

        let faulted = engine_in(state);
        faulted.set_event_gate(
            event,
            Box::new(|_| Err(CallbackError::new("sensor fault"))),
        );
        let faulted_result = faulted.trigger_event(event);

        // Both must fail whenever the gate is consulted, and neither may
        // move the state.
        prop_assert_eq!(rejected_result.is_err(), faulted_result.is_err());
        prop_assert_eq!(rejected.current_state(), state);
        prop_assert_eq!(faulted.current_state(), state);
    }

    #[test]
    fn obstacle_cleared_never_commits(state in arbitrary_state()) {
        let fsm = engine_in(state);
        prop_assert!(fsm.trigger_event(SystemEvent::ObstacleCleared).is_err());
        prop_assert_eq!(fsm.current_state(), state);
    }

    #[test]
    fn reset_always_lands_in_idle_and_notifies(state in arbitrary_state()) {
        let fsm = engine_in(state);
        let (tx, rx) = std::sync::mpsc::channel();
        fsm.set_state_change_callback(Box::new(move |old, new| {
            tx.send((old, new)).map_err(|e| CallbackError::new(e.to_string()))
        }));

        fsm.reset();

        prop_assert_eq!(fsm.current_state(), SystemState::Idle);
        prop_assert_eq!(fsm.previous_state(), state);
        let notifications: Vec<_> = rx.try_iter().collect();
        prop_assert_eq!(notifications, vec![(state, SystemState::Idle)]);
    }
}
