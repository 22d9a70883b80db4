//! Text framing between a client and the simulation.
//!
//! Inbound: one request per message, `<elevatorId>:<requestKind>:<floor>`.
//! Outbound: five lines per changed car per tick, one message each:
//! ```text
//! STEP:<id>:<step>
//! FLOOR:<id>:<floor>
//! MOMENTUM:<id>:<0|1>
//! WATCH_LIST:<id>:<mask>
//! STATUS:<id>:<0|1|2>
//! ```
use crate::error::{ElevatorError, ElevatorResult};
use crate::local_elevator::fsm::elevatorfsm::{ElevatorSnapshot, Momentum, MovementStatus};
use crate::local_elevator::fsm::floor_request::Floor;

const FIELDS: [&str; 5] = ["STEP", "FLOOR", "MOMENTUM", "WATCH_LIST", "STATUS"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundRequest {
    pub elevator_id: String,
    /// Carried for the client's benefit; scheduling does not branch on it.
    pub kind: String,
    pub floor: Floor,
}

pub fn parse_request(line: &str) -> ElevatorResult<InboundRequest> {
    let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() != 3 {
        return Err(malformed(line, format!("expected 3 fields, got {}", fields.len())));
    }
    let floor = fields[2]
        .trim()
        .parse::<Floor>()
        .map_err(|e| malformed(line, format!("floor: {}", e)))?;
    Ok(InboundRequest {
        elevator_id: fields[0].to_string(),
        kind: fields[1].to_string(),
        floor,
    })
}

pub fn encode_snapshot(snapshot: &ElevatorSnapshot) -> [String; 5] {
    let id = &snapshot.id;
    [
        format!("STEP:{}:{}", id, snapshot.step),
        format!("FLOOR:{}:{}", id, snapshot.floor),
        format!("MOMENTUM:{}:{}", id, snapshot.momentum.code()),
        format!("WATCH_LIST:{}:{}", id, snapshot.watch_list),
        format!("STATUS:{}:{}", id, snapshot.status.code()),
    ]
}

/// Reads back one car's five outbound lines, in emission order.
pub fn decode_snapshot<S: AsRef<str>>(lines: &[S]) -> ElevatorResult<ElevatorSnapshot> {
    let lines: Vec<&str> = lines.iter().map(|line| line.as_ref()).collect();
    if lines.len() != FIELDS.len() {
        return Err(malformed(
            &lines.join("\n"),
            format!("expected {} lines, got {}", FIELDS.len(), lines.len()),
        ));
    }

    let mut id: Option<&str> = None;
    let mut values = Vec::with_capacity(FIELDS.len());
    for (&line, expected) in lines.iter().zip(FIELDS.iter()) {
        let fields: Vec<&str> = line.splitn(3, ':').collect();
        if fields.len() != 3 || fields[0] != *expected {
            return Err(malformed(line, format!("expected a {} line", expected)));
        }
        match id {
            Some(seen) if seen != fields[1] => {
                return Err(malformed(line, format!("id differs from '{}'", seen)));
            }
            _ => id = Some(fields[1]),
        }
        values.push((line, fields[2]));
    }

    let step = parse_value(values[0])?;
    let floor = parse_value(values[1])?;
    let momentum_code: u8 = parse_value(values[2])?;
    let watch_list = parse_value(values[3])?;
    let status_code: u8 = parse_value(values[4])?;

    Ok(ElevatorSnapshot {
        id: id.unwrap_or_default().to_string(),
        step,
        floor,
        momentum: Momentum::from_code(momentum_code)
            .ok_or_else(|| malformed(values[2].0, "unknown momentum code".to_string()))?,
        watch_list,
        status: MovementStatus::from_code(status_code)
            .ok_or_else(|| malformed(values[4].0, "unknown status code".to_string()))?,
    })
}

fn parse_value<T>((line, raw): (&str, &str)) -> ElevatorResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| malformed(line, e.to_string()))
}

fn malformed(line: &str, reason: String) -> ElevatorError {
    ElevatorError::MalformedMessage {
        line: line.to_string(),
        reason,
    }
}
