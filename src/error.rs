use thiserror::Error;

use crate::local_elevator::fsm::floor_request::Floor;

#[derive(Error, Debug)]
pub enum ElevatorError {
    #[error("Floor {floor} is outside [{min}, {max}]")]
    InvalidFloor { floor: Floor, min: Floor, max: Floor },

    #[error("Elevator '{id}' not found")]
    UnknownElevator { id: String },

    #[error("Malformed message {line:?}: {reason}")]
    MalformedMessage { line: String, reason: String },

    #[error("Malformed record on line {line_no} ({line:?}): {reason}")]
    MalformedRecord {
        line_no: usize,
        line: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket handshake failed: {0}")]
    Handshake(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ElevatorResult<T> = Result<T, ElevatorError>;
