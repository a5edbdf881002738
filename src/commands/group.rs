//! Group selection (RFC 3977 §6.1.1)
//!
//! OVER with a range needs a selected group, so GROUP is the one
//! navigation command this crate drives.

use crate::error::{NntpError, Result};
use crate::response::{NntpResponse, codes};

/// Build GROUP command
pub fn group(newsgroup: &str) -> String {
    format!("GROUP {}\r\n", newsgroup)
}

/// Group summary returned by the GROUP command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    /// Estimated number of articles in the group
    pub count: u64,
    /// Number of the first article
    pub first: u64,
    /// Number of the last article
    pub last: u64,
    /// Group name as echoed by the server
    pub name: String,
}

/// Parse GROUP response to extract article count and range
///
/// Response format: "211 count first last group-name"
pub fn parse_group_response(response: NntpResponse) -> Result<GroupInfo> {
    if response.code != codes::GROUP_SELECTED {
        return Err(response.into_error());
    }

    let mut parts = response.message.split_whitespace();
    let mut number = || {
        parts
            .next()
            .and_then(|part| part.parse::<u64>().ok())
            .ok_or_else(|| NntpError::InvalidResponse(response.message.clone()))
    };

    let count = number()?;
    let first = number()?;
    let last = number()?;
    let name = parts.next().unwrap_or_default().to_string();

    Ok(GroupInfo {
        count,
        first,
        last,
        name,
    })
}
