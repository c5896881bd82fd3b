//! Motion Pipeline Walkthrough
//!
//! Drives the engine through a full pipeline cycle the way the surrounding
//! robot system would: bring up the planning subsystem, plan, hit an
//! obstacle, replan, execute, and shut down — with a supervisor thread
//! blocked until execution starts.
//!
//! Run with: cargo run --example motion_pipeline

use motionfsm::{CallbackError, Fsm, SharedFsm, SystemEvent, SystemState};
use std::sync::Arc;
use std::time::Duration;

fn main() {
    let fsm = Arc::new(SharedFsm::new());

    fsm.set_state_change_callback(Box::new(|old, new| {
        println!("  observer: {old} -> {new}");
        Ok(())
    }));

    // Veto subsystem start until the (pretend) controller answers.
    let mut probes = 0;
    fsm.set_event_gate(
        SystemEvent::StartSubsystem,
        Box::new(move |_| {
            probes += 1;
            if probes < 2 {
                Err(CallbackError::new("controller not answering yet"))
            } else {
                Ok(true)
            }
        }),
    );

    fsm.initialize().expect("initialize cannot fail");
    println!("initialized in state {}", fsm.current_state_name());

    let supervisor = {
        let fsm = Arc::clone(&fsm);
        std::thread::spawn(move || {
            match fsm.wait_for_state(SystemState::Executing, Some(Duration::from_secs(5))) {
                Ok(()) => println!("  supervisor: pipeline is executing"),
                Err(err) => println!("  supervisor: gave up ({err})"),
            }
        })
    };

    // First attempt is vetoed by the gate; the pipeline stays Idle.
    if let Err(err) = fsm.trigger_event(SystemEvent::StartSubsystem) {
        println!("start attempt rejected: {err}");
    }

    fsm.trigger_event(SystemEvent::StartSubsystem).unwrap();
    fsm.trigger_event(SystemEvent::SubsystemReady).unwrap();

    // An obstacle interrupts planning; replan and execute.
    fsm.trigger_event(SystemEvent::ObstacleAppeared).unwrap();
    fsm.trigger_event(SystemEvent::StartPlanning).unwrap();
    fsm.trigger_event(SystemEvent::PlanningSuccess).unwrap();
    supervisor.join().unwrap();

    fsm.trigger_event(SystemEvent::ExecutionComplete).unwrap();
    println!("pipeline back in state {}", fsm.current_state_name());

    println!("\ntraversed states:");
    for state in fsm.history().path() {
        println!("  {state}");
    }

    fsm.shutdown();
}
