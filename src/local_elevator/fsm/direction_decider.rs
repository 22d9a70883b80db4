use crate::local_elevator::fsm::elevatorfsm::Momentum;
use crate::local_elevator::fsm::floor_request::Floor;
use crate::local_elevator::fsm::watch_list::WatchList;

/// Sweep direction for the next tick. Only meaningful with a non-empty watch list.
///
/// Going down, the car keeps going down while the nearest watched floor at or
/// below it lies strictly below, which also means the current floor is not
/// watched. Going up, it keeps going up while anything is watched above.
pub fn choose_direction(momentum: Momentum, floor: Floor, watch_list: &WatchList) -> Momentum {
    match momentum {
        Momentum::Down => {
            match watch_list.highest_at_or_below(floor) {
                Some(nearest) if nearest < floor => Momentum::Down,
                _ => Momentum::Up,
            }
        }
        Momentum::Up => {
            if watch_list.order_above(floor) {
                Momentum::Up
            } else {
                Momentum::Down
            }
        }
    }
}

pub fn should_stop(floor: Floor, watch_list: &WatchList) -> bool {
    watch_list.is_active(floor)
}

#[cfg(test)]
mod test {
    use super::*;

    fn watch_list_with(floors: &[Floor]) -> WatchList {
        let mut watch_list = WatchList::new(1, 10);
        for &floor in floors {
            watch_list.set_active(floor).unwrap();
        }
        watch_list
    }

    #[test]
    fn it_keeps_going_up_while_orders_above() {
        let watch_list = watch_list_with(&[3, 8]);
        assert_eq!(choose_direction(Momentum::Up, 5, &watch_list), Momentum::Up);
    }

    #[test]
    fn it_turns_down_when_nothing_above() {
        let watch_list = watch_list_with(&[3]);
        assert_eq!(choose_direction(Momentum::Up, 5, &watch_list), Momentum::Down);
    }

    #[test]
    fn it_keeps_going_down_while_orders_below() {
        let watch_list = watch_list_with(&[2, 9]);
        assert_eq!(choose_direction(Momentum::Down, 5, &watch_list), Momentum::Down);
    }

    #[test]
    fn it_turns_up_when_nothing_below() {
        let watch_list = watch_list_with(&[9]);
        assert_eq!(choose_direction(Momentum::Down, 5, &watch_list), Momentum::Up);
    }

    #[test]
    fn it_turns_up_when_current_floor_watched_going_down() {
        let watch_list = watch_list_with(&[2, 5]);
        assert_eq!(choose_direction(Momentum::Down, 5, &watch_list), Momentum::Up);
    }

    #[test]
    fn it_stops_only_at_watched_floor() {
        let watch_list = watch_list_with(&[4]);
        assert!(should_stop(4, &watch_list));
        assert!(!should_stop(5, &watch_list));
    }
}
