//! OVER/XOVER and LIST OVERVIEW.FMT commands

/// Build XOVER command for fetching article overview data
pub fn xover(range: &str) -> String {
    format!("XOVER {}\r\n", range)
}

/// Build OVER command (RFC 3977 §8.3)
///
/// Retrieves overview data (same as XOVER but RFC 3977 standard name).
pub fn over(range: &str) -> String {
    format!("OVER {}\r\n", range)
}

/// Build LIST OVERVIEW.FMT command (RFC 3977 §8.4)
///
/// Lists the format of overview data.
pub fn list_overview_fmt() -> &'static str {
    "LIST OVERVIEW.FMT\r\n"
}
