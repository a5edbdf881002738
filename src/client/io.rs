//! Low-level I/O for the client session
//!
//! - Command transmission with logging
//! - Status line parsing
//! - Opening multi-line bodies on the plain or compressed path

use super::NntpClient;
use super::body::ResponseBody;
use crate::error::{NntpError, Result};
use crate::framing::DecompressedStream;
use crate::response::NntpResponse;
use std::io::{self, BufRead, Read, Write};
use tracing::{debug, trace};

const STATUS_LINE_CAPACITY: usize = 512;

impl<S: Read + Write> NntpClient<S> {
    /// Send a command to the server
    pub(super) fn send_command(&mut self, command: &str) -> Result<()> {
        self.ensure_usable()?;
        trace!("Sending command: {}", command.trim());
        let sent = self
            .stream
            .get_mut()
            .write_all(command.as_bytes())
            .and_then(|()| self.stream.get_mut().flush());
        if let Err(e) = sent {
            self.mark_broken();
            return Err(NntpError::Transport(e));
        }
        Ok(())
    }

    /// Read a single status line
    pub(super) fn read_response(&mut self) -> Result<NntpResponse> {
        let result = self.read_status_line();
        // Anything but a clean status line leaves the stream position unknown
        if result.is_err() {
            self.mark_broken();
        }
        result
    }

    fn read_status_line(&mut self) -> Result<NntpResponse> {
        let mut line_bytes = Vec::with_capacity(STATUS_LINE_CAPACITY);
        let n = self
            .stream
            .read_until(b'\n', &mut line_bytes)
            .map_err(NntpError::Transport)?;

        if n == 0 {
            return Err(NntpError::Transport(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed while waiting for a status line",
            )));
        }

        // Convert to string with lossy UTF-8 conversion
        let line = String::from_utf8_lossy(&line_bytes);
        let line = line.trim_end_matches(['\r', '\n']);
        trace!("Received: {}", line);

        NntpResponse::parse(line)
    }

    /// Send a command and read its status line
    pub(super) fn command(&mut self, command: &str) -> Result<NntpResponse> {
        self.send_command(command)?;
        self.read_response()
    }

    /// Send a command that answers with a multi-line body on `expected`
    ///
    /// Any other status is returned as [`NntpError::Protocol`]; no body
    /// follows it, so the connection stays usable.
    pub fn multiline(&mut self, command: &str, expected: u16) -> Result<ResponseBody<'_, S>> {
        let response = self.command(command)?;
        if response.code != expected {
            debug!(
                "{} rejected: {} {}",
                command.trim(),
                response.code,
                response.message
            );
            return Err(response.into_error());
        }
        self.open_body(&response)
    }

    /// Position a body reader after a status line that announced one
    ///
    /// A `[COMPRESS=GZIP]` status is read on the binary envelope path, the
    /// rest as dot-stuffed text.
    pub(super) fn open_body(&mut self, response: &NntpResponse) -> Result<ResponseBody<'_, S>> {
        if !response.is_compressed() {
            return Ok(ResponseBody::plain(
                &mut self.stream,
                &mut self.is_broken,
            ));
        }

        if !self.compression_enabled {
            debug!("Server sent a compressed body without XFEATURE COMPRESS GZIP");
        }

        let stream = match DecompressedStream::open(&mut self.stream, self.max_compressed_block_size)
        {
            Ok(stream) => stream,
            Err(e) => {
                // A partially read envelope cannot be skipped reliably
                self.mark_broken();
                return Err(e);
            }
        };
        trace!("Read {} compressed bytes", stream.compressed_len());
        self.bytes_compressed += stream.compressed_len() as u64;

        Ok(ResponseBody::compressed(stream, &mut self.bytes_decompressed))
    }

    /// Read a whole multi-line body into memory
    ///
    /// For short listings such as CAPABILITIES or LIST OVERVIEW.FMT.
    pub(super) fn collect_lines(&mut self, command: &str, expected: u16) -> Result<Vec<String>> {
        self.multiline(command, expected)?.collect()
    }
}
