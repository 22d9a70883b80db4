use log::{info, warn};
use std::net::{SocketAddr, TcpListener};
use std::thread::spawn;

use crate::error::ElevatorResult;
use crate::network::{session, sock};
use crate::util::config::Config;

/// Accepts clients and runs each on its own session thread. Sessions share
/// nothing; each one builds its own set of elevators.
pub struct Server {
    listener: TcpListener,
    config: Config,
}

impl Server {
    pub fn bind(config: Config) -> ElevatorResult<Server> {
        let listener = sock::new_listener(&config.bind_addr)?;
        Ok(Server { listener, config })
    }

    pub fn local_addr(&self) -> ElevatorResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn run(&self) -> ElevatorResult<()> {
        info!("Listening on {}", self.local_addr()?);
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let config = self.config.clone();
                    // Errors are logged by the session itself.
                    spawn(move || session::serve_client(stream, &config));
                }
                Err(e) => warn!("Failed to accept connection: {}", e),
            }
        }
        Ok(())
    }
}
