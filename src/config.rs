//! NNTP server configuration

use crate::framing::DEFAULT_MAX_COMPRESSED_BLOCK_SIZE;
use std::time::Duration;

/// Default timeout for establishing the TCP connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default per-read and per-write deadline once connected
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(60);

/// NNTP server configuration
///
/// Contains the information needed to reach an NNTP server and the limits
/// applied while reading its responses.
///
/// # Example
///
/// ```
/// use nntp_overview::ServerConfig;
/// use std::time::Duration;
///
/// // Recommended: use the constructor methods
/// let config = ServerConfig::plain("news.example.com")
///     .with_read_timeout(Duration::from_secs(10));
/// assert_eq!(config.port, 119);
///
/// // Or construct manually
/// let config = ServerConfig {
///     host: "news.example.com".to_string(),
///     port: 119,
///     connect_timeout: Duration::from_secs(5),
///     read_timeout: Duration::from_secs(30),
///     write_timeout: Duration::from_secs(30),
///     max_compressed_block_size: 16 * 1024 * 1024,
/// };
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerConfig {
    /// Server hostname (e.g., "news.example.com")
    pub host: String,

    /// Server port (typically 119)
    #[cfg_attr(feature = "serde", serde(default = "default_port"))]
    pub port: u16,

    /// Maximum time to wait for the TCP handshake
    #[cfg_attr(feature = "serde", serde(default = "default_connect_timeout"))]
    pub connect_timeout: Duration,

    /// Deadline for each blocking read on the socket
    ///
    /// Expiry surfaces as [`NntpError::Transport`](crate::NntpError::Transport)
    /// and leaves the client unusable.
    #[cfg_attr(feature = "serde", serde(default = "default_io_timeout"))]
    pub read_timeout: Duration,

    /// Deadline for each blocking write on the socket
    #[cfg_attr(feature = "serde", serde(default = "default_io_timeout"))]
    pub write_timeout: Duration,

    /// Upper bound on a buffered compressed response, in bytes
    ///
    /// A server that never sends the envelope terminator would otherwise
    /// make the client buffer without limit.
    #[cfg_attr(feature = "serde", serde(default = "default_max_compressed_block_size"))]
    pub max_compressed_block_size: usize,
}

#[cfg(feature = "serde")]
fn default_port() -> u16 {
    119
}

#[cfg(feature = "serde")]
fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

#[cfg(feature = "serde")]
fn default_io_timeout() -> Duration {
    DEFAULT_IO_TIMEOUT
}

#[cfg(feature = "serde")]
fn default_max_compressed_block_size() -> usize {
    DEFAULT_MAX_COMPRESSED_BLOCK_SIZE
}

impl ServerConfig {
    /// Create a new server configuration with default timeouts and limits
    ///
    /// # Arguments
    ///
    /// * `host` - Server hostname
    /// * `port` - Server port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_IO_TIMEOUT,
            write_timeout: DEFAULT_IO_TIMEOUT,
            max_compressed_block_size: DEFAULT_MAX_COMPRESSED_BLOCK_SIZE,
        }
    }

    /// Create a configuration for a plain connection on the standard port (119)
    pub fn plain(host: impl Into<String>) -> Self {
        Self::new(host, 119)
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-read deadline
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the per-write deadline
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Set the compressed response size limit
    pub fn with_max_compressed_block_size(mut self, bytes: usize) -> Self {
        self.max_compressed_block_size = bytes;
        self
    }

    /// `host:port` string suitable for address resolution
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
