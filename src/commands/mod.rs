//! NNTP command builders
//!
//! Every builder returns the full command line including the trailing CRLF.

mod group;
mod over;

pub use group::{GroupInfo, group, parse_group_response};
pub use over::{list_overview_fmt, over, xover};

/// Build CAPABILITIES command (RFC 3977 §5.2)
///
/// Requests the list of capabilities supported by the server.
/// Response is multi-line, starting with 101.
pub fn capabilities() -> &'static str {
    "CAPABILITIES\r\n"
}

/// Build XFEATURE COMPRESS GZIP command
///
/// Enables headers-only compression. Multi-line responses flagged with
/// `[COMPRESS=GZIP]` then arrive as a zlib block followed by `.\r\n`.
pub fn xfeature_compress_gzip() -> &'static str {
    "XFEATURE COMPRESS GZIP\r\n"
}

/// Build QUIT command
pub fn quit() -> &'static str {
    "QUIT\r\n"
}

/// Format an article range argument (RFC 3977 §3.1)
///
/// `None` as the end gives an open range (`100-`), meaning "to the last
/// article".
pub fn range(start: u64, end: Option<u64>) -> String {
    match end {
        Some(end) if end == start => start.to_string(),
        Some(end) => format!("{}-{}", start, end),
        None => format!("{}-", start),
    }
}
