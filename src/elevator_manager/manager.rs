use log::{debug, info};
use std::collections::BTreeMap;

use crate::error::{ElevatorError, ElevatorResult};
use crate::local_elevator::fsm::elevatorfsm::{Elevator, ElevatorSnapshot};
use crate::local_elevator::fsm::floor_request::{Floor, FloorRequest};
use crate::util::config::Config;

/// Owns every car of one simulation session, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct ElevatorManager {
    elevators: BTreeMap<String, Elevator>,
}

impl ElevatorManager {
    pub fn new() -> ElevatorManager {
        ElevatorManager {
            elevators: BTreeMap::new(),
        }
    }

    /// One car per configured id, all at rest on the start floor.
    pub fn from_config(config: &Config) -> ElevatorResult<ElevatorManager> {
        let mut manager = ElevatorManager::new();
        for id in config.elevator_ids.iter() {
            manager.add(Elevator::new(
                id.clone(),
                config.min_floor,
                config.max_floor,
                config.start_floor,
            )?)?;
        }
        info!("Created elevator(s): {:?}", manager.ids());
        Ok(manager)
    }

    pub fn add(&mut self, elevator: Elevator) -> ElevatorResult<()> {
        let id = elevator.get_id().to_string();
        if self.elevators.contains_key(&id) {
            return Err(ElevatorError::InvalidConfig(format!("duplicate elevator id '{}'", id)));
        }
        self.elevators.insert(id, elevator);
        Ok(())
    }

    pub fn get(&self, id: &str) -> ElevatorResult<&Elevator> {
        self.elevators.get(id).ok_or_else(|| unknown(id))
    }

    pub fn get_mut(&mut self, id: &str) -> ElevatorResult<&mut Elevator> {
        self.elevators.get_mut(id).ok_or_else(|| unknown(id))
    }

    pub fn ids(&self) -> Vec<String> {
        self.elevators.keys().cloned().collect()
    }

    pub fn register_request(&mut self, id: &str, floor: Floor) -> ElevatorResult<()> {
        self.get_mut(id)?.register_request(floor)
    }

    pub fn queue_request(&mut self, id: &str, request: FloorRequest) -> ElevatorResult<()> {
        self.get_mut(id)?.queue_request(request)
    }

    pub fn has_pending_work(&self) -> bool {
        self.elevators.values().any(Elevator::has_pending_work)
    }

    /// Advances every car with pending work by one tick and returns their new
    /// state. Idle cars are skipped and keep their step.
    pub fn tick(&mut self) -> ElevatorResult<Vec<ElevatorSnapshot>> {
        let mut changed = Vec::new();
        for elevator in self.elevators.values_mut() {
            if !elevator.has_pending_work() {
                continue;
            }
            elevator.update()?;
            debug!("\n{}", elevator.render_shaft());
            changed.push(elevator.snapshot());
        }
        Ok(changed)
    }
}

fn unknown(id: &str) -> ElevatorError {
    ElevatorError::UnknownElevator { id: id.to_string() }
}
