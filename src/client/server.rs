//! Session-level commands
//!
//! - RFC 3977 §5.2 (CAPABILITIES), §5.4 (QUIT), §6.1.1 (GROUP)

use super::NntpClient;
use crate::capabilities::Capabilities;
use crate::commands::{self, GroupInfo};
use crate::error::Result;
use crate::response::codes;
use std::io::{Read, Write};
use tracing::debug;

impl<S: Read + Write> NntpClient<S> {
    /// Request server capabilities (RFC 3977 Section 5.2)
    ///
    /// The list is fetched once per session and cached.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - the server
    ///   does not answer 101
    pub fn capabilities(&mut self) -> Result<&Capabilities> {
        let caps = match self.capabilities.take() {
            Some(caps) => caps,
            None => {
                debug!("Requesting server capabilities");
                let lines = self.collect_lines(commands::capabilities(), codes::CAPABILITY_LIST)?;
                let caps = Capabilities::parse(&lines);
                debug!("Received {} capabilities", caps.lines().len());
                caps
            }
        };
        Ok(self.capabilities.insert(caps))
    }

    /// Select a newsgroup (RFC 3977 Section 6.1.1)
    ///
    /// # Errors
    ///
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - e.g. 411 for
    ///   an unknown group
    /// - [`NntpError::InvalidResponse`](crate::NntpError::InvalidResponse) -
    ///   the 211 line does not carry the article range
    pub fn group(&mut self, newsgroup: &str) -> Result<GroupInfo> {
        debug!("Selecting group {}", newsgroup);
        let response = self.command(&commands::group(newsgroup))?;
        commands::parse_group_response(response)
    }

    /// End the session (RFC 3977 Section 5.4)
    ///
    /// Consumes the client; the stream is closed when it is dropped.
    pub fn quit(mut self) -> Result<()> {
        let response = self.command(commands::quit())?;
        if response.code != codes::CLOSING_CONNECTION {
            debug!("Unexpected QUIT response: {} {}", response.code, response.message);
        }
        Ok(())
    }
}
