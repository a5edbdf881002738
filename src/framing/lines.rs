//! Multi-line response framing (RFC 3977 Section 3.1.1)
//!
//! A multi-line block is a sequence of CRLF-terminated lines ended by a line
//! holding a single `.`. Data lines that begin with `.` are sent with an
//! extra leading dot ("dot-stuffing") which the receiver removes.

use crate::error::{NntpError, Result};
use std::io::{self, BufRead, Read};
use std::iter::FusedIterator;
use tracing::trace;

/// Content of the line that ends a multi-line block
pub const TERMINATOR_LINE: &[u8] = b".";

/// Longest line accepted, line ending excluded
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

const LINE_CAPACITY: usize = 512;

/// How a [`LineFramer`] interprets the lines it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FramerOptions {
    /// Remove one leading dot from lines starting with `..`
    pub stuffed: bool,
    /// The source is already delimited, such as a decompressed envelope
    ///
    /// End-of-stream is then a clean end of the response, and after a
    /// terminator line the rest of the source is read so a damaged stream
    /// trailer is still reported. On a live connection end-of-stream before
    /// the terminator line means the response was truncated.
    pub eof_is_end: bool,
}

impl FramerOptions {
    /// Plain text responses read straight off the connection
    pub const fn text() -> Self {
        Self {
            stuffed: true,
            eof_is_end: false,
        }
    }

    /// Lines inside a decompressed envelope
    ///
    /// A bare `.` line still ends the block, but lines are trusted and never
    /// unstuffed.
    pub const fn compressed() -> Self {
        Self {
            stuffed: false,
            eof_is_end: true,
        }
    }
}

impl Default for FramerOptions {
    fn default() -> Self {
        Self::text()
    }
}

/// Reads the lines of one multi-line response from a [`BufRead`] source
///
/// Only one line is buffered at a time. Once the terminator has been seen
/// (or the response failed) the framer is spent, and any further read is a
/// [`NntpError::ProtocolViolation`].
///
/// # Example
///
/// ```
/// use nntp_overview::framing::{FramerOptions, LineFramer};
///
/// let wire = b"first\r\n..dotted\r\n.\r\n";
/// let mut framer = LineFramer::new(&wire[..], FramerOptions::text());
/// assert_eq!(framer.next_line().unwrap().as_deref(), Some("first"));
/// assert_eq!(framer.next_line().unwrap().as_deref(), Some(".dotted"));
/// assert_eq!(framer.next_line().unwrap(), None);
/// assert!(framer.next_line().is_err());
/// ```
#[derive(Debug)]
pub struct LineFramer<R> {
    source: R,
    options: FramerOptions,
    line: Vec<u8>,
    lines_read: usize,
    finished: bool,
}

impl<R: BufRead> LineFramer<R> {
    /// Create a framer over `source`
    pub fn new(source: R, options: FramerOptions) -> Self {
        Self {
            source,
            options,
            line: Vec::with_capacity(LINE_CAPACITY),
            lines_read: 0,
            finished: false,
        }
    }

    /// Read the next data line, or `None` at the end of the response
    ///
    /// # Errors
    ///
    /// - [`NntpError::ProtocolViolation`] - the response already ended, or a
    ///   line is longer than [`MAX_LINE_LENGTH`]
    /// - [`NntpError::UnexpectedEndOfResponse`] - end-of-stream before the
    ///   terminator line or mid-line (unless [`FramerOptions::eof_is_end`]
    ///   is set)
    /// - [`NntpError::Transport`] / [`NntpError::Decompression`] - the
    ///   source failed
    pub fn next_line(&mut self) -> Result<Option<String>> {
        if self.finished {
            return Err(NntpError::ProtocolViolation(
                "read past the end of a multi-line response".to_string(),
            ));
        }

        self.line.clear();
        let limit = MAX_LINE_LENGTH as u64 + 1;
        let n = match (&mut self.source).take(limit).read_until(b'\n', &mut self.line) {
            Ok(n) => n,
            Err(e) => {
                self.finished = true;
                return Err(e.into());
            }
        };

        if n == 0 {
            self.finished = true;
            if self.options.eof_is_end {
                trace!("Response source exhausted after {} lines", self.lines_read);
                return Ok(None);
            }
            return Err(NntpError::UnexpectedEndOfResponse);
        }

        if !self.line.ends_with(b"\n") {
            if self.line.len() > MAX_LINE_LENGTH {
                self.finished = true;
                return Err(NntpError::ProtocolViolation(format!(
                    "response line exceeds {MAX_LINE_LENGTH} bytes"
                )));
            }
            // Unterminated final line
            if !self.options.eof_is_end {
                self.finished = true;
                return Err(NntpError::UnexpectedEndOfResponse);
            }
        }

        let mut content = strip_line_ending(&self.line);
        if content == TERMINATOR_LINE {
            self.finished = true;
            if self.options.eof_is_end {
                self.consume_remainder()?;
            }
            trace!("Multi-line response complete after {} lines", self.lines_read);
            return Ok(None);
        }
        if self.options.stuffed && content.starts_with(b"..") {
            content = &content[1..];
        }

        self.lines_read += 1;
        Ok(Some(String::from_utf8_lossy(content).into_owned()))
    }

    fn consume_remainder(&mut self) -> Result<()> {
        let skipped = io::copy(&mut self.source, &mut io::sink())?;
        if skipped > 0 {
            trace!("Discarded {} bytes after the terminator line", skipped);
        }
        Ok(())
    }

    /// Read and discard the rest of the response
    ///
    /// Returns the number of lines skipped. Used to bring a connection back
    /// in step after the caller stopped reading early.
    pub fn drain(&mut self) -> Result<usize> {
        let mut skipped = 0;
        while !self.finished {
            if self.next_line()?.is_some() {
                skipped += 1;
            }
        }
        Ok(skipped)
    }

    /// Whether the response has ended (cleanly or not)
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Data lines delivered so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Options this framer was created with
    pub fn options(&self) -> FramerOptions {
        self.options
    }

    /// Turn the framer into a one-pass iterator of lines
    pub fn into_lines(self) -> ResponseLines<R> {
        ResponseLines { framer: self }
    }

    /// Shared access to the underlying source
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Recover the underlying source
    pub fn into_inner(self) -> R {
        self.source
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Iterator over the lines of one multi-line response
///
/// Yields `Err` at most once; after the terminator or an error it returns
/// `None` forever.
#[derive(Debug)]
pub struct ResponseLines<R> {
    framer: LineFramer<R>,
}

impl<R: BufRead> ResponseLines<R> {
    /// Read and discard whatever is left of the response
    pub fn drain(&mut self) -> Result<usize> {
        self.framer.drain()
    }

    /// Whether the response has ended
    pub fn is_finished(&self) -> bool {
        self.framer.is_finished()
    }
}

impl<R: BufRead> Iterator for ResponseLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.framer.is_finished() {
            return None;
        }
        self.framer.next_line().transpose()
    }
}

impl<R: BufRead> FusedIterator for ResponseLines<R> {}
