use log::debug;
use serde;

use crate::error::ElevatorResult;
use crate::local_elevator::fsm::admission::RequestAdmission;
use crate::local_elevator::fsm::direction_decider;
use crate::local_elevator::fsm::floor_request::{check_floor, Floor, FloorRequest, Step};
use crate::local_elevator::fsm::watch_list::WatchList;

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, Hash)]
pub enum MovementStatus {
    MovingDown,
    MovingUp,
    Stopped,
}

impl MovementStatus {
    /// Wire code: 0 down, 1 up, 2 stopped.
    pub fn code(self) -> u8 {
        match self {
            MovementStatus::MovingDown => 0,
            MovementStatus::MovingUp => 1,
            MovementStatus::Stopped => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<MovementStatus> {
        match code {
            0 => Some(MovementStatus::MovingDown),
            1 => Some(MovementStatus::MovingUp),
            2 => Some(MovementStatus::Stopped),
            _ => None,
        }
    }

    pub fn momentum(self) -> Option<Momentum> {
        match self {
            MovementStatus::MovingDown => Some(Momentum::Down),
            MovementStatus::MovingUp => Some(Momentum::Up),
            MovementStatus::Stopped => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            MovementStatus::MovingDown => 'D',
            MovementStatus::MovingUp => 'U',
            MovementStatus::Stopped => 'E',
        }
    }
}

/// Last sweep direction the car chose. Never "stopped".
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, Hash)]
pub enum Momentum {
    Down,
    Up,
}

impl Momentum {
    /// Wire code: 0 down, 1 up.
    pub fn code(self) -> u8 {
        match self {
            Momentum::Down => 0,
            Momentum::Up => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Momentum> {
        match code {
            0 => Some(Momentum::Down),
            1 => Some(Momentum::Up),
            _ => None,
        }
    }

    pub fn status(self) -> MovementStatus {
        match self {
            Momentum::Down => MovementStatus::MovingDown,
            Momentum::Up => MovementStatus::MovingUp,
        }
    }
}

/// State of one car as it is reported to clients after a tick.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ElevatorSnapshot {
    pub id: String,
    pub step: Step,
    pub floor: Floor,
    pub momentum: Momentum,
    pub watch_list: u128,
    pub status: MovementStatus,
}

/// A single car scheduled with a SCAN sweep.
/// * `floor` current floor, always within `[min_floor, max_floor]`
/// * `status` movement during the last tick
/// * `momentum` last sweep direction, kept through stops
/// * `watch_list` floors the car must stop at
/// * `admission` requests not yet merged into `watch_list`
#[derive(Clone, Debug)]
pub struct Elevator {
    id: String,
    min_floor: Floor,
    max_floor: Floor,
    floor: Floor,
    status: MovementStatus,
    momentum: Momentum,
    watch_list: WatchList,
    step: Step,
    admission: RequestAdmission,
}

impl Elevator {
    /// A car at rest on `start_floor`, heading up.
    pub fn new(id: impl Into<String>, min_floor: Floor, max_floor: Floor, start_floor: Floor) -> ElevatorResult<Elevator> {
        check_floor(start_floor, min_floor, max_floor)?;
        Ok(Elevator {
            id: id.into(),
            min_floor,
            max_floor,
            floor: start_floor,
            status: MovementStatus::Stopped,
            momentum: Momentum::Up,
            watch_list: WatchList::new(min_floor, max_floor),
            step: 1,
            admission: RequestAdmission::new(),
        })
    }

    /// Puts the car in motion, e.g. to resume a sweep already in progress.
    #[cfg(test)]
    pub fn with_motion(mut self, status: MovementStatus, momentum: Momentum) -> Elevator {
        self.status = status;
        self.momentum = status.momentum().unwrap_or(momentum);
        self
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }
    pub fn get_floor(&self) -> Floor {
        self.floor
    }
    pub fn get_status(&self) -> MovementStatus {
        self.status
    }
    pub fn get_momentum(&self) -> Momentum {
        self.momentum
    }
    pub fn get_step(&self) -> Step {
        self.step
    }
    pub fn get_watch_list(&self) -> &WatchList {
        &self.watch_list
    }
    #[cfg(test)]
    pub fn get_admission(&self) -> &RequestAdmission {
        &self.admission
    }

    /// Marks `floor` as a stop. Takes effect on the next tick.
    pub fn register_request(&mut self, floor: Floor) -> ElevatorResult<()> {
        self.watch_list.set_active(floor)
    }

    /// Queues a deferred request for admission on a later tick.
    pub fn queue_request(&mut self, request: FloorRequest) -> ElevatorResult<()> {
        request.validate(self.min_floor, self.max_floor)?;
        self.admission.push(request);
        Ok(())
    }

    pub fn has_pending_work(&self) -> bool {
        !self.watch_list.is_empty() || !self.admission.is_empty()
    }

    /// Advances the car by one tick.
    pub fn update(&mut self) -> ElevatorResult<()> {
        let previous_status = self.status;
        self.admission
            .admit(self.step, self.floor, self.momentum, &mut self.watch_list)?;
        self.status = self.next_status();
        if let Some(momentum) = self.status.momentum() {
            self.momentum = momentum;
        }
        if previous_status == self.status {
            self.floor = self.next_floor();
        }
        self.step += 1;
        debug!(
            "{} step={} floor={} status={:?} momentum={:?} watch_list={:?}",
            self.id,
            self.step,
            self.floor,
            self.status,
            self.momentum,
            self.watch_list.iter().collect::<Vec<_>>()
        );
        Ok(())
    }

    /// Status for this tick. A change of status always passes through one
    /// stopped tick first; starting from rest adopts the new direction directly.
    fn next_status(&mut self) -> MovementStatus {
        let mut next_status = self.status;
        if !self.watch_list.is_empty() {
            self.momentum = direction_decider::choose_direction(self.momentum, self.floor, &self.watch_list);
            next_status = self.momentum.status();
            if direction_decider::should_stop(self.floor, &self.watch_list) {
                next_status = MovementStatus::Stopped;
            }
        }
        self.watch_list.clear_floor(self.floor);

        if self.status != next_status && self.status != MovementStatus::Stopped {
            return MovementStatus::Stopped;
        }
        next_status
    }

    fn next_floor(&self) -> Floor {
        let next_floor = match self.status {
            MovementStatus::MovingUp => self.floor + 1,
            MovementStatus::MovingDown => self.floor - 1,
            MovementStatus::Stopped => self.floor,
        };
        next_floor.clamp(self.min_floor, self.max_floor)
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id: self.id.clone(),
            step: self.step,
            floor: self.floor,
            momentum: self.momentum,
            watch_list: self.watch_list.to_mask(),
            status: self.status,
        }
    }

    /// One row per floor, top floor first, with the car marked on its floor.
    pub fn render_shaft(&self) -> String {
        let symbol = self.status.symbol();
        let mut rows = Vec::new();
        for floor in (self.min_floor..=self.max_floor).rev() {
            if floor == self.floor {
                rows.push(format!("{: >2}F | {}", floor, symbol));
            } else {
                rows.push(format!("{: >2}F |", floor));
            }
        }
        rows.join("\n")
    }
}
