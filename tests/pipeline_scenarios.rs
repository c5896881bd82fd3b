//! End-to-end scenarios driving the engine through the motion pipeline the
//! way the surrounding system would: subsystem bring-up, planning,
//! execution, obstacle handling and recovery.

use motionfsm::{new_engine, Fsm, FsmError, SharedFsm, SystemEvent, SystemState};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn quiet_engine(thread_safe: bool) -> Box<dyn Fsm> {
    let fsm = new_engine(thread_safe);
    fsm.set_log_sink(Box::new(|_| {}));
    fsm
}

#[test]
fn nominal_pipeline_with_an_obstacle_stop() {
    let fsm = quiet_engine(false);

    fsm.initialize().unwrap();
    assert_eq!(fsm.current_state(), SystemState::Idle);

    fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
    assert_eq!(fsm.current_state(), SystemState::SubsystemStarting);

    fsm.trigger_event(SystemEvent::SubsystemReady).unwrap();
    assert_eq!(fsm.current_state(), SystemState::Planning);

    fsm.trigger_event(SystemEvent::ObstacleAppeared).unwrap();
    assert_eq!(fsm.current_state(), SystemState::ObstacleDetected);

    fsm.trigger_event(SystemEvent::StopRequest).unwrap();
    assert_eq!(fsm.current_state(), SystemState::Idle);

    assert_eq!(
        fsm.history().path(),
        vec![
            SystemState::Idle,
            SystemState::SubsystemStarting,
            SystemState::Planning,
            SystemState::ObstacleDetected,
            SystemState::Idle,
        ],
    );
}

#[test]
fn planning_failure_recovers_through_reset() {
    let fsm = quiet_engine(false);
    fsm.initialize().unwrap();

    fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
    fsm.trigger_event(SystemEvent::SubsystemReady).unwrap();
    assert_eq!(fsm.current_state(), SystemState::Planning);

    fsm.trigger_event(SystemEvent::PlanningFailed).unwrap();
    assert_eq!(fsm.current_state(), SystemState::Error);

    fsm.trigger_event(SystemEvent::ResetRequest).unwrap();
    assert_eq!(fsm.current_state(), SystemState::Idle);
    assert_eq!(fsm.previous_state(), SystemState::Error);
}

#[test]
fn full_plan_execute_cycle_returns_to_idle() {
    let fsm = quiet_engine(false);
    fsm.initialize().unwrap();

    fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
    fsm.trigger_event(SystemEvent::SubsystemReady).unwrap();
    fsm.trigger_event(SystemEvent::PlanningSuccess).unwrap();
    assert_eq!(fsm.current_state(), SystemState::Executing);

    fsm.trigger_event(SystemEvent::ExecutionComplete).unwrap();
    assert_eq!(fsm.current_state(), SystemState::Idle);
}

#[test]
fn obstacle_during_execution_replans() {
    let fsm = quiet_engine(false);
    fsm.initialize().unwrap();

    fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
    fsm.trigger_event(SystemEvent::SubsystemReady).unwrap();
    fsm.trigger_event(SystemEvent::PlanningSuccess).unwrap();
    fsm.trigger_event(SystemEvent::ObstacleAppeared).unwrap();
    assert_eq!(fsm.current_state(), SystemState::ObstacleDetected);

    // Clearing the obstacle is declared but wired to nothing; the
    // supervisor replans instead.
    let err = fsm.trigger_event(SystemEvent::ObstacleCleared).unwrap_err();
    assert_eq!(
        err,
        FsmError::EventNotAccepted {
            state: SystemState::ObstacleDetected,
            event: SystemEvent::ObstacleCleared,
        },
    );

    fsm.trigger_event(SystemEvent::StartPlanning).unwrap();
    assert_eq!(fsm.current_state(), SystemState::Planning);
}

#[test]
fn obstacle_cleared_is_rejected_from_idle() {
    let fsm = quiet_engine(false);
    fsm.initialize().unwrap();

    assert!(fsm.trigger_event(SystemEvent::ObstacleCleared).is_err());
    assert_eq!(fsm.current_state(), SystemState::Idle);
}

#[test]
fn the_factory_selects_the_waiting_capability() {
    let local = quiet_engine(false);
    local.initialize().unwrap();
    assert_eq!(
        local.wait_for_state(SystemState::Idle, None).unwrap_err(),
        FsmError::WaitUnsynchronized,
    );

    let shared = quiet_engine(true);
    shared.initialize().unwrap();
    shared.wait_for_state(SystemState::Idle, None).unwrap();
}

#[test]
fn waiting_supervisor_observes_the_pipeline_reaching_execution() {
    let fsm = Arc::new(SharedFsm::new());
    fsm.set_log_sink(Box::new(|_| {}));
    fsm.initialize().unwrap();

    let supervisor = {
        let fsm = Arc::clone(&fsm);
        std::thread::spawn(move || {
            fsm.wait_for_state(SystemState::Executing, Some(Duration::from_secs(5)))
        })
    };

    fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
    fsm.trigger_event(SystemEvent::SubsystemReady).unwrap();
    fsm.trigger_event(SystemEvent::PlanningSuccess).unwrap();

    supervisor.join().unwrap().unwrap();
}

#[test]
fn immediate_wait_success_is_bounded_in_time() {
    let fsm = SharedFsm::new();
    fsm.set_log_sink(Box::new(|_| {}));
    fsm.initialize().unwrap();

    let begin = Instant::now();
    fsm.wait_for_state(SystemState::Idle, Some(Duration::ZERO))
        .unwrap();
    assert!(begin.elapsed() < Duration::from_millis(100));
}
