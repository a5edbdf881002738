//! TCP connection setup
//!
//! Socket tuning and deadlines are applied with socket2 before the session
//! starts; the greeting is then read by [`NntpClient::from_stream`].

use super::NntpClient;
use crate::config::ServerConfig;
use crate::error::{NntpError, Result};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, warn};

/// Receive buffer requested from the OS (1MB)
const RECV_BUFFER_SIZE: usize = 1024 * 1024;

impl NntpClient<TcpStream> {
    /// Connect to an NNTP server over plain TCP
    ///
    /// Every resolved address is tried in turn with
    /// [`ServerConfig::connect_timeout`]. The socket gets TCP_NODELAY and
    /// the configured read/write deadlines, so a stalled server surfaces as
    /// [`NntpError::Transport`] instead of blocking forever.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Transport`] - resolution or connection failed
    /// - [`NntpError::Protocol`] - the server greeting was not 200/201
    pub fn connect(config: &ServerConfig) -> Result<Self> {
        debug!("Connecting to NNTP server {}:{}", config.host, config.port);

        let addrs: Vec<SocketAddr> = config
            .address()
            .to_socket_addrs()
            .map_err(|e| {
                NntpError::Transport(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Failed to resolve address: {}", e),
                ))
            })?
            .collect();

        let mut last_error = None;
        for addr in addrs {
            match open_socket(addr, config) {
                Ok(stream) => {
                    debug!("Connected to {}", addr);
                    let client = Self::from_stream(stream)?;
                    return Ok(client.with_max_compressed_block_size(config.max_compressed_block_size));
                }
                Err(e) => {
                    debug!("Connection to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        Err(NntpError::Transport(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "No address resolved")
        })))
    }
}

fn open_socket(addr: SocketAddr, config: &ServerConfig) -> io::Result<TcpStream> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Request/response traffic: don't hold back small command writes
    socket.set_nodelay(true)?;

    if let Err(e) = socket.set_recv_buffer_size(RECV_BUFFER_SIZE) {
        warn!(
            "Failed to set receive buffer size to {} bytes: {}",
            RECV_BUFFER_SIZE, e
        );
    }

    socket.connect_timeout(&SockAddr::from(addr), config.connect_timeout)?;
    socket.set_read_timeout(deadline(config.read_timeout))?;
    socket.set_write_timeout(deadline(config.write_timeout))?;

    Ok(socket.into())
}

/// Zero means "no deadline"; the OS rejects a zero timeout
fn deadline(timeout: Duration) -> Option<Duration> {
    (!timeout.is_zero()).then_some(timeout)
}
