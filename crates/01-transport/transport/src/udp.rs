use std::net::{SocketAddr, UdpSocket};

use log::{info, trace};

use crate::{Transport, TransportError, TransportResult};

/// Largest payload an IPv4 UDP datagram can carry.
pub const MAX_DATAGRAM_LEN: usize = 65_507;

/// UDP sender bound to an ephemeral local port.
///
/// The socket is created once and shared by every send; each payload is one
/// datagram with no framing.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds to `0.0.0.0:0` (any interface, OS-chosen port).
    pub fn bind_any() -> TransportResult<Self> {
        Self::bind(SocketAddr::from(([0, 0, 0, 0], 0)))
    }

    /// Binds the sending socket to `local`.
    pub fn bind(local: SocketAddr) -> TransportResult<Self> {
        let socket = UdpSocket::bind(local)?;
        socket.set_nonblocking(false)?;
        info!("udp transport bound to {}", socket.local_addr()?);
        Ok(Self { socket })
    }

    /// Address the sending socket is bound to.
    pub fn local_addr(&self) -> TransportResult<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

impl Transport for UdpTransport {
    fn send(&self, payload: &[u8], host: &str, port: u16) -> TransportResult<()> {
        if payload.len() > MAX_DATAGRAM_LEN {
            return Err(TransportError::Oversize {
                len: payload.len(),
                max: MAX_DATAGRAM_LEN,
            });
        }
        let sent = self.socket.send_to(payload, (host, port))?;
        if sent != payload.len() {
            return Err(TransportError::Truncated {
                sent,
                expected: payload.len(),
            });
        }
        trace!("sent {sent} bytes to {host}:{port}");
        Ok(())
    }
}
