use std::io;
use std::net;
use socket2::{Socket, Domain, Type, Protocol};

use crate::error::{ElevatorError, ElevatorResult};

const BACKLOG: i32 = 128;

/// TCP listener on `bind_addr` that can rebind right after a restart.
pub fn new_listener(bind_addr: &str) -> ElevatorResult<net::TcpListener> {
    let addr = net::ToSocketAddrs::to_socket_addrs(bind_addr)?
        .next()
        .ok_or_else(|| ElevatorError::InvalidConfig(format!("cannot resolve '{}'", bind_addr)))?;
    let domain = if addr.is_ipv6() { Domain::ipv6() } else { Domain::ipv4() };

    let sock = Socket::new(domain, Type::stream(), Some(Protocol::tcp()))?;
    sock.set_reuse_address(true)?;
    sock.bind(&addr.into())?;
    sock.listen(BACKLOG)?;
    Ok(sock.into_tcp_listener())
}

/// Low-latency stream for the small per-tick frames.
pub fn configure_stream(stream: &net::TcpStream) -> io::Result<()> {
    stream.set_nodelay(true)
}
