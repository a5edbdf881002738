//! Response framing: terminator detection, compressed envelopes, and
//! dot-terminated line reading
//!
//! Text responses and compressed envelopes are delimited differently and go
//! through separate paths. Text lines need dot-unstuffing; the compressed
//! envelope is opaque binary ended by a fixed suffix and is never read as
//! text until it has been inflated.

mod envelope;
mod lines;
mod scanner;

pub use envelope::{
    read_envelope, DecompressedStream, DEFAULT_MAX_COMPRESSED_BLOCK_SIZE, ENVELOPE_TERMINATOR,
};
pub use lines::{FramerOptions, LineFramer, MAX_LINE_LENGTH, ResponseLines, TERMINATOR_LINE};
pub use scanner::TerminatorScanner;
