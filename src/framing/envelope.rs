//! Compressed response envelopes (XFEATURE COMPRESS GZIP)
//!
//! Once headers compression is active, the body of a compressed multi-line
//! response arrives as one zlib stream followed by a literal, uncompressed
//! `.\r\n`. The payload is opaque binary, so the end is found with a
//! [`TerminatorScanner`] over raw reads instead of line parsing, and no
//! dot-unstuffing is ever applied to it.

use super::scanner::TerminatorScanner;
use crate::error::{InflateFailure, NntpError, Result};
use flate2::bufread::ZlibDecoder;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use tracing::trace;

/// Suffix the server appends after the compressed payload
pub const ENVELOPE_TERMINATOR: &[u8; 3] = b".\r\n";

/// Default cap on a single compressed block (64 MB)
pub const DEFAULT_MAX_COMPRESSED_BLOCK_SIZE: usize = 64 * 1024 * 1024;

const READ_CHUNK_SIZE: usize = 32 * 1024;
const INITIAL_BLOCK_CAPACITY: usize = 32 * 1024;

/// Read raw bytes up to and excluding the envelope terminator
///
/// Chunks are read as they come; the terminator may straddle any number of
/// reads. Returns the compressed payload with the terminator removed.
///
/// # Errors
///
/// - [`NntpError::Transport`] - the source failed or hit end-of-stream
///   before the terminator was seen
/// - [`NntpError::ProtocolViolation`] - the payload grew beyond `max_size`
pub fn read_envelope<R: Read + ?Sized>(source: &mut R, max_size: usize) -> Result<Vec<u8>> {
    let mut scanner = TerminatorScanner::<3>::new();
    let mut block = Vec::with_capacity(INITIAL_BLOCK_CAPACITY);
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];

    loop {
        let n = match source.read(&mut chunk) {
            Ok(0) => {
                return Err(NntpError::Transport(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed before end of compressed block",
                )));
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(NntpError::Transport(e)),
        };

        let data = &chunk[..n];
        scanner.write(data);
        block.extend_from_slice(data);

        if scanner.matches(ENVELOPE_TERMINATOR) {
            // The terminator may have been split over earlier chunks, so trim
            // the accumulated block rather than the last read.
            block.truncate(block.len() - ENVELOPE_TERMINATOR.len());
            trace!("Read compressed block of {} bytes", block.len());
            return Ok(block);
        }

        if block.len() > max_size {
            return Err(NntpError::ProtocolViolation(format!(
                "Compressed block exceeds maximum size of {} bytes",
                max_size
            )));
        }
    }
}

/// Decompressed view over one buffered compressed block
///
/// Implements [`BufRead`], so it plugs straight into a
/// [`LineFramer`](super::LineFramer). Corruption found while inflating is
/// reported as [`NntpError::Decompression`] once converted.
pub struct DecompressedStream {
    inner: BufReader<ZlibDecoder<Cursor<Vec<u8>>>>,
}

impl std::fmt::Debug for DecompressedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecompressedStream")
            .field("compressed_len", &self.compressed_len())
            .field("total_in", &self.total_in())
            .field("total_out", &self.total_out())
            .finish()
    }
}

impl DecompressedStream {
    /// Read an envelope from `source` and open it for decompression
    pub fn open<R: Read + ?Sized>(source: &mut R, max_size: usize) -> Result<Self> {
        let block = read_envelope(source, max_size)?;
        Self::from_compressed(block)
    }

    /// Wrap an already-buffered zlib block
    ///
    /// The two-byte zlib header is checked up front; the rest of the stream
    /// is validated lazily as it is read.
    pub fn from_compressed(block: Vec<u8>) -> Result<Self> {
        check_zlib_header(&block)?;
        Ok(Self {
            inner: BufReader::new(ZlibDecoder::new(Cursor::new(block))),
        })
    }

    /// Size of the compressed payload (terminator excluded)
    pub fn compressed_len(&self) -> usize {
        self.inner.get_ref().get_ref().get_ref().len()
    }

    /// Compressed bytes consumed so far
    pub fn total_in(&self) -> u64 {
        self.inner.get_ref().total_in()
    }

    /// Decompressed bytes produced so far
    pub fn total_out(&self) -> u64 {
        self.inner.get_ref().total_out()
    }
}

fn check_zlib_header(block: &[u8]) -> Result<()> {
    let [cmf, flg, ..] = block else {
        return Err(NntpError::Decompression(format!(
            "compressed block too short ({} bytes)",
            block.len()
        )));
    };
    if cmf & 0x0f != 8 {
        return Err(NntpError::Decompression(format!(
            "unsupported compression method {} (expected deflate)",
            cmf & 0x0f
        )));
    }
    if ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 != 0 {
        return Err(NntpError::Decompression("invalid zlib header checksum".to_string()));
    }
    if flg & 0x20 != 0 {
        return Err(NntpError::Decompression("preset dictionaries are not supported".to_string()));
    }
    Ok(())
}

fn inflate_error(err: io::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, InflateFailure(err.to_string()))
}

impl Read for DecompressedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).map_err(inflate_error)
    }
}

impl BufRead for DecompressedStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf().map_err(inflate_error)
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}
