//! Headers compression (XFEATURE COMPRESS GZIP)
//!
//! Once enabled, the server may send any multi-line response as a zlib
//! envelope and flags it with `[COMPRESS=GZIP]` in the status line. Which
//! responses get compressed is the server's choice; the client decides per
//! response in [`open_body`](NntpClient::open_body).

use super::NntpClient;
use crate::Result;
use crate::commands;
use std::io::{Read, Write};
use tracing::debug;

impl<S: Read + Write> NntpClient<S> {
    /// Ask the server to compress multi-line responses
    ///
    /// Returns `true` if the server accepted (290 or any other 2xx),
    /// `false` if it refused. Refusal is not an error: responses simply
    /// keep arriving as plain text.
    ///
    /// # Errors
    ///
    /// Only transport and status line failures.
    pub fn enable_compression(&mut self) -> Result<bool> {
        if self.compression_enabled {
            return Ok(true);
        }

        debug!("Attempting XFEATURE COMPRESS GZIP");
        let response = self.command(commands::xfeature_compress_gzip())?;

        if response.is_success() {
            self.compression_enabled = true;
            debug!("XFEATURE COMPRESS GZIP enabled (headers-only compression)");
            return Ok(true);
        }

        debug!(
            "XFEATURE COMPRESS GZIP not supported (code {}), continuing without compression",
            response.code
        );
        Ok(false)
    }

    /// Check if compression is enabled
    pub fn is_compression_enabled(&self) -> bool {
        self.compression_enabled
    }

    /// Get bandwidth statistics (compressed vs decompressed bytes)
    ///
    /// Returns `(bytes_compressed, bytes_decompressed)` over all compressed
    /// responses read so far. Decompressed bytes are counted when a body is
    /// dropped.
    pub fn get_bandwidth_stats(&self) -> (u64, u64) {
        (self.bytes_compressed, self.bytes_decompressed)
    }
}
