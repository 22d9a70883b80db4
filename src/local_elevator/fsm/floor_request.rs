use serde;

use crate::error::{ElevatorError, ElevatorResult};
use crate::local_elevator::fsm::elevatorfsm::Momentum;

pub type Floor = i32;
pub type Step = u64;

/// A request that becomes visible to the scheduler at `release_step`.
///
/// Requests read from a single-floor record have no `boarding_floor`; their
/// direction is judged against wherever the car is when they are admitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FloorRequest {
    release_step: Step,
    boarding_floor: Option<Floor>,
    target_floor: Floor,
}

impl FloorRequest {
    pub fn new(release_step: Step, target_floor: Floor) -> FloorRequest {
        FloorRequest {
            release_step,
            boarding_floor: None,
            target_floor,
        }
    }

    pub fn with_boarding(release_step: Step, boarding_floor: Floor, target_floor: Floor) -> FloorRequest {
        FloorRequest {
            release_step,
            boarding_floor: Some(boarding_floor),
            target_floor,
        }
    }

    pub fn is_released(&self, step: Step) -> bool {
        self.release_step <= step
    }

    /// Direction the passenger wants to travel. `current_floor` stands in for
    /// the boarding floor when the request has none.
    pub fn direction(&self, current_floor: Floor) -> Momentum {
        let origin = self.boarding_floor.unwrap_or(current_floor);
        if self.target_floor > origin {
            Momentum::Up
        } else {
            Momentum::Down
        }
    }

    /// Floors that must be stopped at once the request is admitted.
    pub fn floors(&self) -> impl Iterator<Item = Floor> {
        self.boarding_floor.into_iter().chain(std::iter::once(self.target_floor))
    }

    pub fn validate(&self, min_floor: Floor, max_floor: Floor) -> ElevatorResult<()> {
        for floor in self.floors() {
            check_floor(floor, min_floor, max_floor)?;
        }
        Ok(())
    }
}

pub fn check_floor(floor: Floor, min_floor: Floor, max_floor: Floor) -> ElevatorResult<()> {
    if floor < min_floor || floor > max_floor {
        return Err(ElevatorError::InvalidFloor {
            floor,
            min: min_floor,
            max: max_floor,
        });
    }
    Ok(())
}
