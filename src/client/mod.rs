//! Blocking NNTP client session
//!
//! The client owns one connection, issues commands, and hands multi-line
//! bodies to the framing layer. Bodies are streamed: the caller pulls lines
//! or overview records one at a time straight off the socket.

mod body;
mod compression;
mod connection;
mod io;
mod overview;
mod server;

pub use body::ResponseBody;
pub use overview::OverviewRecords;

use crate::capabilities::Capabilities;
use crate::error::{NntpError, Result};
use crate::framing::DEFAULT_MAX_COMPRESSED_BLOCK_SIZE;
use crate::overview::OverviewSchema;
use crate::response::codes;
use std::io::{BufReader, Read, Write};
use std::net::TcpStream;
use tracing::debug;

/// BufReader capacity for overview downloads (64KB)
const BUFREADER_CAPACITY: usize = 64 * 1024;

/// Blocking NNTP client over any `Read + Write` byte stream
///
/// # Example
///
/// ```no_run
/// use nntp_overview::{NntpClient, ServerConfig};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServerConfig::plain("news.example.com");
/// let mut client = NntpClient::connect(&config)?;
///
/// // Headers compression, if the server offers it
/// client.enable_compression()?;
///
/// client.group("alt.test")?;
/// for record in client.xover("1-100")? {
///     match record {
///         Ok(record) => println!("{} {}", record.article_number, record.subject),
///         Err(e) if e.is_record_error() => eprintln!("skipping: {e}"),
///         Err(e) => return Err(e.into()),
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct NntpClient<S: Read + Write = TcpStream> {
    /// Buffered stream (both reader and writer)
    stream: BufReader<S>,
    /// Cap on a single compressed response body
    max_compressed_block_size: usize,
    /// Cached CAPABILITIES response
    capabilities: Option<Capabilities>,
    /// Cached LIST OVERVIEW.FMT result
    overview_schema: Option<OverviewSchema>,
    /// Whether XFEATURE COMPRESS GZIP was accepted
    compression_enabled: bool,
    /// Total compressed bytes received (only when compression enabled)
    bytes_compressed: u64,
    /// Total decompressed bytes (original size)
    bytes_decompressed: u64,
    /// Whether this connection is broken (out of sync or received garbage)
    is_broken: bool,
}

impl<S: Read + Write> NntpClient<S> {
    /// Start a session on an already-connected stream
    ///
    /// Reads the server greeting, which must be 200 or 201.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Transport`] - the stream failed or closed
    /// - [`NntpError::InvalidResponse`] - the greeting is not a status line
    /// - [`NntpError::Protocol`] - the server refused service (e.g. 400, 502)
    pub fn from_stream(stream: S) -> Result<Self> {
        let mut client = Self {
            stream: BufReader::with_capacity(BUFREADER_CAPACITY, stream),
            max_compressed_block_size: DEFAULT_MAX_COMPRESSED_BLOCK_SIZE,
            capabilities: None,
            overview_schema: None,
            compression_enabled: false,
            bytes_compressed: 0,
            bytes_decompressed: 0,
            is_broken: false,
        };

        let greeting = client.read_response()?;
        debug!("Server greeting: {} {}", greeting.code, greeting.message);

        match greeting.code {
            codes::READY_POSTING_ALLOWED | codes::READY_NO_POSTING => Ok(client),
            _ => Err(greeting.into_error()),
        }
    }

    /// Limit the size of buffered compressed responses
    pub fn with_max_compressed_block_size(mut self, bytes: usize) -> Self {
        self.max_compressed_block_size = bytes;
        self
    }

    /// Check if this connection is broken and should be discarded
    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    /// Mark this connection as broken
    fn mark_broken(&mut self) {
        self.is_broken = true;
    }

    /// Fail fast on a connection that can no longer be trusted
    fn ensure_usable(&self) -> Result<()> {
        if self.is_broken {
            return Err(NntpError::ProtocolViolation(
                "connection is out of sync with the server".to_string(),
            ));
        }
        Ok(())
    }

    /// Shared access to the underlying stream
    pub fn get_ref(&self) -> &S {
        self.stream.get_ref()
    }

    /// Give back the underlying stream, dropping any buffered input
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}

impl<S: Read + Write> std::fmt::Debug for NntpClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NntpClient")
            .field("compression_enabled", &self.compression_enabled)
            .field("overview_schema", &self.overview_schema)
            .field("is_broken", &self.is_broken)
            .finish_non_exhaustive()
    }
}
