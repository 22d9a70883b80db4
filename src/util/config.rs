use serde;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{ElevatorError, ElevatorResult};
use crate::local_elevator::fsm::floor_request::Floor;
use crate::local_elevator::fsm::watch_list::MASK_WIDTH;
use crate::util::constants as setting;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Serve,
    Batch,
}

/// Runtime settings. Every field has a default, so a config file only needs
/// the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_addr: String,
    pub min_floor: Floor,
    pub max_floor: Floor,
    pub start_floor: Floor,
    pub elevator_ids: Vec<String>,
    pub tick_interval_ms: u64,
    pub idle_poll_ms: u64,
    pub input_path: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            bind_addr: setting::BIND_ADDR.to_string(),
            min_floor: setting::MIN_FLOOR,
            max_floor: setting::MAX_FLOOR,
            start_floor: setting::MIN_FLOOR,
            elevator_ids: vec![setting::ELEVATOR_ID.to_string()],
            tick_interval_ms: setting::TICK_INTERVAL_MS,
            idle_poll_ms: setting::IDLE_POLL_MS,
            input_path: setting::INPUT_PATH.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> ElevatorResult<Config> {
        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Builds the run mode and config from command line arguments, without
    /// the program name. `--config` is read first, other flags override it.
    pub fn from_args(args: &[String]) -> ElevatorResult<(Mode, Config)> {
        let mode = match args.first().map(String::as_str) {
            None => Mode::Serve,
            Some(flag) if flag.starts_with("--") => Mode::Serve,
            Some("serve") => Mode::Serve,
            Some("batch") => Mode::Batch,
            Some(other) => {
                return Err(ElevatorError::InvalidConfig(format!("unknown mode '{}'", other)));
            }
        };

        let mut config = match flag_value(args, "--config") {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(bind) = flag_value(args, "--bind") {
            config.bind_addr = bind.to_string();
        }
        if let Some(input) = flag_value(args, "--input") {
            config.input_path = input.to_string();
        }
        if let Some(tick_ms) = flag_value(args, "--tick-ms") {
            config.tick_interval_ms = parse_flag("--tick-ms", tick_ms)?;
        }
        let mut range_moved = false;
        if let Some(min_floor) = flag_value(args, "--min-floor") {
            config.min_floor = parse_flag("--min-floor", min_floor)?;
            range_moved = true;
        }
        if let Some(max_floor) = flag_value(args, "--max-floor") {
            config.max_floor = parse_flag("--max-floor", max_floor)?;
            range_moved = true;
        }
        match flag_value(args, "--start-floor") {
            Some(start_floor) => config.start_floor = parse_flag("--start-floor", start_floor)?,
            // The start floor follows a range moved on the command line.
            None if range_moved && config.min_floor <= config.max_floor => {
                config.start_floor = config.start_floor.max(config.min_floor).min(config.max_floor);
            }
            None => {}
        }

        config.validate()?;
        Ok((mode, config))
    }

    pub fn validate(&self) -> ElevatorResult<()> {
        if self.min_floor > self.max_floor {
            return Err(invalid("min_floor is above max_floor"));
        }
        if i64::from(self.max_floor) - i64::from(self.min_floor) >= MASK_WIDTH {
            return Err(invalid("floor span does not fit the watch list mask"));
        }
        if self.start_floor < self.min_floor || self.start_floor > self.max_floor {
            return Err(invalid("start_floor is outside the floor range"));
        }
        if self.elevator_ids.is_empty() {
            return Err(invalid("at least one elevator id is required"));
        }
        let mut seen = HashSet::new();
        for id in self.elevator_ids.iter() {
            if id.is_empty() || id.contains(':') {
                return Err(invalid(&format!("elevator id '{}' is empty or contains ':'", id)));
            }
            if !seen.insert(id) {
                return Err(invalid(&format!("duplicate elevator id '{}'", id)));
            }
        }
        if self.tick_interval_ms == 0 || self.idle_poll_ms == 0 {
            return Err(invalid("tick and idle intervals must be non-zero"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_flag<T: std::str::FromStr>(flag: &str, value: &str) -> ElevatorResult<T> {
    value
        .parse()
        .map_err(|_| invalid(&format!("{} expects a number, got '{}'", flag, value)))
}

fn invalid(reason: &str) -> ElevatorError {
    ElevatorError::InvalidConfig(reason.to_string())
}
