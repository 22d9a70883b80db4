//! One connected client.
//!
//! The client speaks WebSocket: every inbound text message is one request and
//! every outbound line is sent as its own text message. A reader thread
//! forwards requests over a channel. The session thread is the only owner of
//! the ElevatorManager: every request queued before a tick deadline is applied
//! before that tick runs.
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::thread::spawn;
use std::time::Duration;
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};

use crate::elevator_manager::manager::ElevatorManager;
use crate::error::{ElevatorError, ElevatorResult};
use crate::network::protocol;
use crate::network::sock;
use crate::timer::tick_timer::TickTimer;
use crate::util::config::Config;

/// What the reader thread hands the session: a request line, or the error
/// that stopped the reader.
pub type Received = ElevatorResult<String>;

/// Outbound side of a session. Each line is delivered as one message.
pub trait LineSink {
    fn send_line(&mut self, line: &str) -> ElevatorResult<()>;
    fn flush(&mut self) -> ElevatorResult<()>;
}

impl<S: Read + Write> LineSink for WebSocket<S> {
    fn send_line(&mut self, line: &str) -> ElevatorResult<()> {
        Ok(self.write(Message::Text(line.to_string()))?)
    }

    fn flush(&mut self) -> ElevatorResult<()> {
        Ok(WebSocket::flush(self)?)
    }
}

/// Serves `stream` until the client disconnects or the session fails.
pub fn serve_client(stream: TcpStream, config: &Config) -> ElevatorResult<()> {
    sock::configure_stream(&stream)?;
    let peer = stream.peer_addr()?;

    let mut socket = match tungstenite::accept(stream.try_clone()?) {
        Ok(socket) => socket,
        Err(e) => {
            warn!("Rejected {}: {}", peer, e);
            return Err(ElevatorError::Handshake(e.to_string()));
        }
    };
    info!("Session opened for {}", peer);

    let manager = ElevatorManager::from_config(config)?;
    let (line_tx, line_rx) = cbc::unbounded::<Received>();
    let reader = {
        let incoming = WebSocket::from_raw_socket(stream.try_clone()?, Role::Server, None);
        spawn(move || read_messages(incoming, line_tx))
    };

    let result = run_session(manager, line_rx, &mut socket, config.tick_interval(), config.idle_poll());

    // Unblocks the reader if the session ended on our side.
    let _ = socket.close(None);
    let _ = WebSocket::flush(&mut socket);
    let _ = stream.shutdown(Shutdown::Both);
    let _ = reader.join();

    match &result {
        Ok(()) => info!("Session closed for {}", peer),
        Err(e) => warn!("Session for {} ended: {}", peer, e),
    }
    result
}

fn read_messages(mut socket: WebSocket<TcpStream>, line_tx: cbc::Sender<Received>) {
    loop {
        let received = match socket.read() {
            Ok(Message::Text(line)) => Ok(line),
            Ok(Message::Binary(data)) => Err(ElevatorError::MalformedMessage {
                line: String::from_utf8_lossy(&data).into_owned(),
                reason: "binary message".to_string(),
            }),
            Ok(Message::Close(_))
            | Err(tungstenite::Error::ConnectionClosed)
            | Err(tungstenite::Error::AlreadyClosed)
            | Err(tungstenite::Error::Protocol(tungstenite::error::ProtocolError::ResetWithoutClosingHandshake)) => {
                debug!("Client disconnected");
                return;
            }
            Ok(_) => continue,
            Err(e) => Err(e.into()),
        };
        let failed = received.is_err();
        if line_tx.send(received).is_err() || failed {
            return;
        }
    }
}

/// Owns `manager` for the lifetime of the session. Returns `Ok` once the
/// line channel disconnects; a bad request, a failed receive or a failed
/// send ends it with an error.
pub fn run_session<S: LineSink>(
    mut manager: ElevatorManager,
    line_rx: cbc::Receiver<Received>,
    out: &mut S,
    tick_interval: Duration,
    idle_poll: Duration,
) -> ElevatorResult<()> {
    let mut timer = TickTimer::new(idle_poll);

    loop {
        cbc::select! {
            recv(line_rx) -> received => {
                match received {
                    Ok(line) => apply_line(&mut manager, &line?)?,
                    Err(_) => return Ok(()),
                }
            },
            recv(cbc::at(timer.deadline())) -> _ => {
                for line in line_rx.try_iter() {
                    apply_line(&mut manager, &line?)?;
                }
                if manager.has_pending_work() {
                    for snapshot in manager.tick()? {
                        for frame in protocol::encode_snapshot(&snapshot).iter() {
                            out.send_line(frame)?;
                        }
                    }
                    out.flush()?;
                    timer.start(tick_interval);
                } else {
                    timer.start(idle_poll);
                }
            },
        }
    }
}

fn apply_line(manager: &mut ElevatorManager, line: &str) -> ElevatorResult<()> {
    let request = protocol::parse_request(line)?;
    debug!("{} {} {}", request.elevator_id, request.kind, request.floor);
    manager.register_request(&request.elevator_id, request.floor)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::local_elevator::fsm::elevatorfsm::{ElevatorSnapshot, MovementStatus};
    use std::thread::sleep;

    const TICK: Duration = Duration::from_millis(2);

    impl LineSink for Vec<String> {
        fn send_line(&mut self, line: &str) -> ElevatorResult<()> {
            self.push(line.to_string());
            Ok(())
        }

        fn flush(&mut self) -> ElevatorResult<()> {
            Ok(())
        }
    }

    fn start_session(line_rx: cbc::Receiver<Received>) -> std::thread::JoinHandle<(ElevatorResult<()>, Vec<String>)> {
        spawn(move || {
            let manager = ElevatorManager::from_config(&Config::default()).unwrap();
            let mut out = Vec::new();
            let result = run_session(manager, line_rx, &mut out, TICK, TICK);
            (result, out)
        })
    }

    fn snapshots(out: &[String]) -> Vec<ElevatorSnapshot> {
        out.chunks(5)
            .map(|frame| protocol::decode_snapshot(frame).unwrap())
            .collect()
    }

    #[test]
    fn it_streams_ticks_until_request_is_served() {
        let (line_tx, line_rx) = cbc::unbounded::<Received>();
        let session = start_session(line_rx);
        line_tx.send(Ok("ELEVATOR0:CALL:3".to_string())).unwrap();
        sleep(Duration::from_millis(200));
        drop(line_tx);

        let (result, out) = session.join().unwrap();
        assert!(result.is_ok());
        let frames = snapshots(&out);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].step, 2);
        let last = frames.last().unwrap();
        assert_eq!((last.status, last.floor, last.watch_list), (MovementStatus::Stopped, 3, 0));
    }

    #[test]
    fn it_emits_nothing_while_idle() {
        let (line_tx, line_rx) = cbc::unbounded::<Received>();
        let session = start_session(line_rx);
        sleep(Duration::from_millis(20));
        drop(line_tx);

        let (result, out) = session.join().unwrap();
        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn it_ends_on_unknown_elevator() {
        let (line_tx, line_rx) = cbc::unbounded::<Received>();
        let session = start_session(line_rx);
        line_tx.send(Ok("ELEVATOR9:CALL:3".to_string())).unwrap();

        let (result, _) = session.join().unwrap();
        assert!(matches!(result, Err(ElevatorError::UnknownElevator { .. })));
    }

    #[test]
    fn it_ends_on_malformed_line() {
        let (line_tx, line_rx) = cbc::unbounded::<Received>();
        let session = start_session(line_rx);
        line_tx.send(Ok("ELEVATOR0:3".to_string())).unwrap();

        let (result, _) = session.join().unwrap();
        assert!(matches!(result, Err(ElevatorError::MalformedMessage { .. })));
    }

    #[test]
    fn it_ends_on_invalid_floor() {
        let (line_tx, line_rx) = cbc::unbounded::<Received>();
        let session = start_session(line_rx);
        line_tx.send(Ok("ELEVATOR0:CALL:42".to_string())).unwrap();

        let (result, _) = session.join().unwrap();
        assert!(matches!(result, Err(ElevatorError::InvalidFloor { .. })));
    }

    #[test]
    fn it_reports_a_failed_receive_as_an_error() {
        let (line_tx, line_rx) = cbc::unbounded::<Received>();
        let session = start_session(line_rx);
        line_tx.send(Ok("ELEVATOR0:CALL:3".to_string())).unwrap();
        line_tx.send(Err(tungstenite::Error::Utf8.into())).unwrap();
        drop(line_tx);

        let (result, _) = session.join().unwrap();
        assert!(matches!(result, Err(ElevatorError::WebSocket(tungstenite::Error::Utf8))));
    }
}
