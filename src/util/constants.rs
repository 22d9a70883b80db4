use crate::local_elevator::fsm::floor_request::Floor;

pub const BIND_ADDR: &str = "127.0.0.1:5678";
pub const INPUT_PATH: &str = "./input.txt";
pub const ELEVATOR_ID: &str = "ELEVATOR0";

pub const MIN_FLOOR: Floor = 1;
pub const MAX_FLOOR: Floor = 10;

pub const TICK_INTERVAL_MS: u64 = 1000;
pub const IDLE_POLL_MS: u64 = 100;

/// Upper bound on ticks in batch mode, for queues that never drain.
pub const BATCH_TICK_LIMIT: u64 = 100_000;
