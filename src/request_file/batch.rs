use log::{info, warn};
use std::io::Write;

use crate::elevator_manager::manager::ElevatorManager;
use crate::error::{ElevatorError, ElevatorResult};
use crate::local_elevator::fsm::elevatorfsm::ElevatorSnapshot;
use crate::local_elevator::fsm::floor_request::FloorRequest;
use crate::network::protocol;
use crate::util::config::Config;
use crate::util::constants as setting;

#[derive(Clone, Debug, PartialEq)]
pub struct BatchSummary {
    pub ticks: u64,
    pub drained: bool,
    pub elevators: Vec<ElevatorSnapshot>,
}

/// Queues `requests` on the first configured car and ticks without pausing
/// until every car is idle, writing the usual five-line frames to `out`.
pub fn run<W: Write>(config: &Config, requests: Vec<FloorRequest>, out: &mut W) -> ElevatorResult<BatchSummary> {
    run_with_limit(config, requests, out, setting::BATCH_TICK_LIMIT)
}

pub fn run_with_limit<W: Write>(
    config: &Config,
    requests: Vec<FloorRequest>,
    out: &mut W,
    tick_limit: u64,
) -> ElevatorResult<BatchSummary> {
    let mut manager = ElevatorManager::from_config(config)?;
    let id = config
        .elevator_ids
        .first()
        .ok_or_else(|| ElevatorError::InvalidConfig("no elevator to queue requests on".to_string()))?;
    let queued = requests.len();
    for request in requests {
        manager.queue_request(id, request)?;
    }
    info!("Queued {} request(s) on {}", queued, id);

    let mut ticks = 0;
    while manager.has_pending_work() && ticks < tick_limit {
        for snapshot in manager.tick()? {
            for frame in protocol::encode_snapshot(&snapshot).iter() {
                writeln!(out, "{}", frame)?;
            }
        }
        ticks += 1;
    }
    out.flush()?;

    let drained = !manager.has_pending_work();
    if !drained {
        warn!("Stopped after {} ticks with requests still pending", ticks);
    }
    let mut elevators = Vec::new();
    for id in manager.ids() {
        elevators.push(manager.get(&id)?.snapshot());
    }
    Ok(BatchSummary {
        ticks,
        drained,
        elevators,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::local_elevator::fsm::elevatorfsm::MovementStatus;

    #[test]
    fn it_runs_until_all_requests_are_served() {
        let mut out = Vec::new();
        let summary = run(&Config::default(), vec![FloorRequest::new(1, 4)], &mut out).unwrap();

        assert!(summary.drained);
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.elevators[0].floor, 4);
        assert_eq!(summary.elevators[0].status, MovementStatus::Stopped);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 5 * 5);
    }

    #[test]
    fn it_waits_for_release_step() {
        let mut out = Vec::new();
        let summary = run(&Config::default(), vec![FloorRequest::new(5, 1)], &mut out).unwrap();

        // Steps 1 to 4 only wait; step 5 admits and stops at floor 1.
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.elevators[0].step, 6);
    }

    #[test]
    fn it_stops_at_tick_limit() {
        let mut out = Vec::new();
        let summary =
            run_with_limit(&Config::default(), vec![FloorRequest::new(100, 3)], &mut out, 10).unwrap();
        assert!(!summary.drained);
        assert_eq!(summary.ticks, 10);
    }

    #[test]
    fn it_rejects_requests_outside_the_building() {
        let mut out = Vec::new();
        let result = run(&Config::default(), vec![FloorRequest::with_boarding(1, 2, 30)], &mut out);
        assert!(matches!(result, Err(ElevatorError::InvalidFloor { .. })));
    }
}
