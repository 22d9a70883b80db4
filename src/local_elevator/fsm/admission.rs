//! Deferred requests waiting to join a car's watch list.
use log::debug;
use std::collections::VecDeque;

use crate::error::ElevatorResult;
use crate::local_elevator::fsm::elevatorfsm::Momentum;
use crate::local_elevator::fsm::floor_request::{Floor, FloorRequest, Step};
use crate::local_elevator::fsm::watch_list::WatchList;

/// Holds requests that are not yet visible to the scheduler.
///
/// A request is admitted once its release step has been reached and it
/// travels the way the car is already sweeping. An empty watch list lets the
/// car take any direction, so anything released is admitted then.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestAdmission {
    pending: VecDeque<FloorRequest>,
}

impl RequestAdmission {
    pub fn new() -> RequestAdmission {
        RequestAdmission {
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, request: FloorRequest) {
        self.pending.push_back(request);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Merges every admissible request into `watch_list`, in queue order.
    /// Returns the requests that were admitted.
    pub fn admit(
        &mut self,
        step: Step,
        floor: Floor,
        momentum: Momentum,
        watch_list: &mut WatchList,
    ) -> ElevatorResult<Vec<FloorRequest>> {
        let mut admitted = Vec::new();
        let mut kept = VecDeque::with_capacity(self.pending.len());

        for request in self.pending.drain(..) {
            let fits_sweep = watch_list.is_empty() || request.direction(floor) == momentum;
            if request.is_released(step) && fits_sweep {
                for stop in request.floors() {
                    watch_list.set_active(stop)?;
                }
                debug!("Admitted {:?} at step {}", request, step);
                admitted.push(request);
            } else {
                kept.push_back(request);
            }
        }
        self.pending = kept;
        Ok(admitted)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_holds_requests_until_release_step() {
        let mut admission = RequestAdmission::new();
        let mut watch_list = WatchList::new(1, 10);
        admission.push(FloorRequest::with_boarding(3, 2, 6));

        let admitted = admission.admit(2, 1, Momentum::Up, &mut watch_list).unwrap();
        assert!(admitted.is_empty());
        assert_eq!(admission.len(), 1);

        let admitted = admission.admit(3, 1, Momentum::Up, &mut watch_list).unwrap();
        assert_eq!(admitted.len(), 1);
        assert!(admission.is_empty());
        assert!(watch_list.is_active(2) && watch_list.is_active(6));
    }

    #[test]
    fn it_defers_requests_against_the_sweep() {
        let mut admission = RequestAdmission::new();
        let mut watch_list = WatchList::new(1, 10);
        watch_list.set_active(9).unwrap();
        admission.push(FloorRequest::with_boarding(0, 6, 2));

        let admitted = admission.admit(5, 4, Momentum::Up, &mut watch_list).unwrap();
        assert!(admitted.is_empty());
        assert!(!watch_list.is_active(6));

        let admitted = admission.admit(6, 4, Momentum::Down, &mut watch_list).unwrap();
        assert_eq!(admitted, vec![FloorRequest::with_boarding(0, 6, 2)]);
    }

    #[test]
    fn it_admits_any_direction_into_empty_watch_list() {
        let mut admission = RequestAdmission::new();
        let mut watch_list = WatchList::new(1, 10);
        admission.push(FloorRequest::with_boarding(0, 6, 2));

        let admitted = admission.admit(1, 1, Momentum::Up, &mut watch_list).unwrap();
        assert_eq!(admitted.len(), 1);
        assert!(watch_list.is_active(6) && watch_list.is_active(2));
    }

    #[test]
    fn it_keeps_queue_order_for_deferred_requests() {
        let mut admission = RequestAdmission::new();
        let mut watch_list = WatchList::new(1, 10);
        watch_list.set_active(10).unwrap();
        admission.push(FloorRequest::with_boarding(0, 8, 1));
        admission.push(FloorRequest::with_boarding(0, 2, 5));
        admission.push(FloorRequest::with_boarding(0, 9, 3));

        admission.admit(1, 1, Momentum::Up, &mut watch_list).unwrap();
        let left: Vec<FloorRequest> = admission.pending.iter().copied().collect();
        assert_eq!(
            left,
            vec![FloorRequest::with_boarding(0, 8, 1), FloorRequest::with_boarding(0, 9, 3)]
        );
    }
}
