//! NNTP status lines and status codes

use crate::error::{NntpError, Result};

/// Marker XFEATURE COMPRESS GZIP servers put in the status of a compressed response
pub const COMPRESS_GZIP_MARKER: &str = "[COMPRESS=GZIP]";

/// Status line of an NNTP response
///
/// Multi-line bodies are not stored here; they are streamed through a
/// [`LineFramer`](crate::framing::LineFramer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NntpResponse {
    /// 3-digit NNTP response code
    pub code: u16,
    /// Status message from server
    pub message: String,
}

impl NntpResponse {
    /// Parse a status line such as `224 Overview information follows`
    ///
    /// The line ending must already be removed.
    pub fn parse(line: &str) -> Result<Self> {
        // Check minimum length and that first 3 chars are ASCII digits
        let bytes = line.as_bytes();
        if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
            return Err(NntpError::InvalidResponse(line.chars().take(100).collect()));
        }
        if bytes.len() > 3 && bytes[3] != b' ' {
            return Err(NntpError::InvalidResponse(line.chars().take(100).collect()));
        }

        // Safe to slice since we verified ASCII
        let code = line[0..3]
            .parse::<u16>()
            .map_err(|_| NntpError::InvalidResponse(line.chars().take(100).collect()))?;

        let message = if line.len() > 4 {
            line[4..].to_string()
        } else {
            String::new()
        };

        Ok(Self { code, message })
    }

    /// Check if response indicates success (2xx)
    pub fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Check if response indicates continuation (3xx)
    pub fn is_continuation(&self) -> bool {
        self.code >= 300 && self.code < 400
    }

    /// Check if response indicates error (4xx or 5xx)
    pub fn is_error(&self) -> bool {
        self.code >= 400
    }

    /// Whether the body that follows is a compressed envelope
    pub fn is_compressed(&self) -> bool {
        self.message.contains(COMPRESS_GZIP_MARKER)
    }

    /// Turn an unexpected status into a [`NntpError::Protocol`]
    pub fn into_error(self) -> NntpError {
        NntpError::Protocol {
            code: self.code,
            message: self.message,
        }
    }
}

/// NNTP response codes used by this crate (RFC 3977)
pub mod codes {
    // 1xx - Informational
    /// Capability list follows (RFC 3977 Section 5.2)
    pub const CAPABILITY_LIST: u16 = 101;

    // 2xx - Success
    /// Server ready, posting allowed
    pub const READY_POSTING_ALLOWED: u16 = 200;
    /// Server ready, no posting
    pub const READY_NO_POSTING: u16 = 201;
    /// Closing connection
    pub const CLOSING_CONNECTION: u16 = 205;
    /// Group selected
    pub const GROUP_SELECTED: u16 = 211;
    /// List information follows (RFC 3977 Section 7.6)
    pub const LIST_INFORMATION_FOLLOWS: u16 = 215;
    /// Overview information follows
    pub const OVERVIEW_INFO_FOLLOWS: u16 = 224;
    /// XFEATURE enabled (headers compression active)
    pub const XFEATURE_ENABLED: u16 = 290;

    // 4xx - Temporary errors
    /// Service temporarily unavailable
    pub const SERVICE_UNAVAILABLE: u16 = 400;
    /// No such newsgroup
    pub const NO_SUCH_GROUP: u16 = 411;
    /// No newsgroup selected
    pub const NO_GROUP_SELECTED: u16 = 412;
    /// No current article
    pub const NO_CURRENT_ARTICLE: u16 = 420;
    /// No article with that number
    pub const NO_SUCH_ARTICLE_NUMBER: u16 = 423;

    // 5xx - Permanent errors
    /// Command not recognized
    pub const COMMAND_NOT_RECOGNIZED: u16 = 500;
    /// Command syntax error
    pub const COMMAND_SYNTAX_ERROR: u16 = 501;
    /// Access denied / command unavailable
    pub const ACCESS_DENIED: u16 = 502;
    /// Feature not supported / optional functionality absent (RFC 3977)
    pub const FEATURE_NOT_SUPPORTED: u16 = 503;
}
