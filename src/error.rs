//! NNTP error types

use crate::overview::OverviewField;
use thiserror::Error;

/// Errors raised while reading and decoding NNTP responses
#[derive(Error, Debug)]
pub enum NntpError {
    /// The underlying byte source failed, timed out, or ended early
    #[error("Transport error: {0}")]
    Transport(std::io::Error),

    /// A compressed response body is not a valid zlib stream
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// A framing invariant was broken, usually by the caller
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// The stream ended before the `.` terminator line
    #[error("Unexpected end of multi-line response")]
    UnexpectedEndOfResponse,

    /// The article number of an overview line is not an unsigned integer
    #[error("Malformed article number: {0:?}")]
    MalformedIdentifier(String),

    /// An overview field failed its typed conversion
    #[error("Invalid {field} value at position {position}: {value:?}")]
    FieldParseError {
        /// Schema tag of the offending field
        field: OverviewField,
        /// 1-based position of the field after the article number
        position: usize,
        /// Raw field text
        value: String,
    },

    /// A date string could not be interpreted
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Invalid status line from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// NNTP protocol error with response code
    #[error("NNTP error {code}: {message}")]
    Protocol {
        /// NNTP response code (e.g., 411, 423, 503)
        code: u16,
        /// Error message from server
        message: String,
    },
}

impl NntpError {
    /// True for `UnexpectedEndOfResponse`, the "truncated" outcome of a read
    pub fn is_truncation(&self) -> bool {
        matches!(self, NntpError::UnexpectedEndOfResponse)
    }

    /// True for errors scoped to a single overview record
    ///
    /// The framing state is untouched by these, so the caller may keep
    /// reading the remaining lines of the response.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            NntpError::MalformedIdentifier(_) | NntpError::FieldParseError { .. }
        )
    }
}

/// Marker carried inside `io::Error` by the decompressing stream
///
/// Line reads only see `io::Error`, so this lets the conversion below tell
/// a corrupt zlib body apart from a failing socket.
#[derive(Error, Debug)]
#[error("{0}")]
pub(crate) struct InflateFailure(pub(crate) String);

impl From<std::io::Error> for NntpError {
    fn from(err: std::io::Error) -> Self {
        match err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<InflateFailure>())
        {
            Some(failure) => NntpError::Decompression(failure.0.clone()),
            None => NntpError::Transport(err),
        }
    }
}

/// Result type alias using NntpError
pub type Result<T> = std::result::Result<T, NntpError>;
