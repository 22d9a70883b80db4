//! Set of floors a car has committed to stop at.
use serde;
use std::collections::BTreeSet;

use crate::error::ElevatorResult;
use crate::local_elevator::fsm::floor_request::{check_floor, Floor};

/// Widest floor span the outbound `WATCH_LIST` mask can carry.
pub const MASK_WIDTH: i64 = 128;

/// Ordered set of watched floors for one car.
///
/// # Example
/// ```rust
/// use elevator::local_elevator::fsm::watch_list::WatchList;
/// let mut watch_list = WatchList::new(1, 10);
/// watch_list.set_active(5).unwrap();
/// assert!(watch_list.order_above(3));
/// assert_eq!(watch_list.to_mask(), 0b10000);
/// ```
#[derive(PartialEq, Clone, Debug, serde::Serialize, serde::Deserialize, Hash)]
pub struct WatchList {
    min_floor: Floor,
    max_floor: Floor,
    floors: BTreeSet<Floor>,
}

impl WatchList {
    pub fn new(min_floor: Floor, max_floor: Floor) -> WatchList {
        WatchList {
            min_floor,
            max_floor,
            floors: BTreeSet::new(),
        }
    }

    /// Marks `floor` as a required stop.
    pub fn set_active(&mut self, floor: Floor) -> ElevatorResult<()> {
        check_floor(floor, self.min_floor, self.max_floor)?;
        self.floors.insert(floor);
        Ok(())
    }

    /// Clears the stop at `floor`. Returns whether it was watched.
    pub fn clear_floor(&mut self, floor: Floor) -> bool {
        self.floors.remove(&floor)
    }

    pub fn is_active(&self, floor: Floor) -> bool {
        self.floors.contains(&floor)
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Any watched floor strictly above `floor`.
    pub fn order_above(&self, floor: Floor) -> bool {
        self.floors.range(floor.saturating_add(1)..).next().is_some()
    }

    /// Nearest watched floor at or below `floor`.
    pub fn highest_at_or_below(&self, floor: Floor) -> Option<Floor> {
        self.floors.range(..=floor).next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Floor> + '_ {
        self.floors.iter().copied()
    }

    /// Wire encoding: bit `floor - min_floor` set for every watched floor.
    pub fn to_mask(&self) -> u128 {
        self.floors
            .iter()
            .map(|&floor| (floor - self.min_floor) as u32)
            .filter(|&bit| bit < MASK_WIDTH as u32)
            .fold(0, |mask, bit| mask | (1u128 << bit))
    }
}
