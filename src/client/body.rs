//! Streaming access to one multi-line response body

use crate::error::Result;
use crate::framing::{DecompressedStream, FramerOptions, LineFramer};
use std::io::{BufReader, Read, Write};
use std::iter::FusedIterator;
use tracing::{trace, warn};

enum Source<'a, S: Read + Write> {
    /// Dot-stuffed text read straight off the connection
    Plain {
        framer: LineFramer<&'a mut BufReader<S>>,
        is_broken: &'a mut bool,
    },
    /// Lines of an envelope that has already been read off the connection
    Compressed {
        framer: LineFramer<DecompressedStream>,
        bytes_decompressed: &'a mut u64,
    },
}

/// Lines of one multi-line response, pulled on demand
///
/// Borrows the client for as long as it lives, so no other command can be
/// issued in the middle of a response. Dropping a plain-text body before
/// its end leaves unread lines on the wire, and the client is marked
/// broken. Compressed bodies are buffered whole and can be dropped freely.
pub struct ResponseBody<'a, S: Read + Write> {
    source: Source<'a, S>,
}

impl<'a, S: Read + Write> ResponseBody<'a, S> {
    pub(super) fn plain(stream: &'a mut BufReader<S>, is_broken: &'a mut bool) -> Self {
        Self {
            source: Source::Plain {
                framer: LineFramer::new(stream, FramerOptions::text()),
                is_broken,
            },
        }
    }

    pub(super) fn compressed(stream: DecompressedStream, bytes_decompressed: &'a mut u64) -> Self {
        Self {
            source: Source::Compressed {
                framer: LineFramer::new(stream, FramerOptions::compressed()),
                bytes_decompressed,
            },
        }
    }

    /// Read the next line, or `None` once the body has ended
    ///
    /// Errors are the ones of [`LineFramer::next_line`]. A failure on the
    /// plain path also marks the client broken.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        match &mut self.source {
            Source::Plain { framer, is_broken } => {
                let result = framer.next_line();
                if result.is_err() {
                    **is_broken = true;
                }
                result
            }
            Source::Compressed { framer, .. } => framer.next_line(),
        }
    }

    /// Read and discard the rest of the body
    ///
    /// Returns the number of lines skipped. Call this instead of dropping
    /// a partly read plain body to keep the connection usable.
    pub fn drain(&mut self) -> Result<usize> {
        let mut skipped = 0;
        while !self.is_finished() {
            if self.next_line()?.is_some() {
                skipped += 1;
            }
        }
        Ok(skipped)
    }

    /// Whether the body has ended (cleanly or not)
    pub fn is_finished(&self) -> bool {
        match &self.source {
            Source::Plain { framer, .. } => framer.is_finished(),
            Source::Compressed { framer, .. } => framer.is_finished(),
        }
    }

    /// Whether this body arrived as a compressed envelope
    pub fn is_compressed(&self) -> bool {
        matches!(self.source, Source::Compressed { .. })
    }

    /// Data lines delivered so far
    pub fn lines_read(&self) -> usize {
        match &self.source {
            Source::Plain { framer, .. } => framer.lines_read(),
            Source::Compressed { framer, .. } => framer.lines_read(),
        }
    }
}

impl<S: Read + Write> Iterator for ResponseBody<'_, S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }
        self.next_line().transpose()
    }
}

impl<S: Read + Write> FusedIterator for ResponseBody<'_, S> {}

impl<S: Read + Write> Drop for ResponseBody<'_, S> {
    fn drop(&mut self) {
        match &mut self.source {
            Source::Plain { framer, is_broken } => {
                if !framer.is_finished() {
                    warn!(
                        "Response dropped after {} lines, connection out of sync",
                        framer.lines_read()
                    );
                    **is_broken = true;
                }
            }
            Source::Compressed {
                framer,
                bytes_decompressed,
            } => {
                let inflated = framer.get_ref().total_out();
                trace!("Decompressed to {} bytes", inflated);
                **bytes_decompressed += inflated;
            }
        }
    }
}
