//! Overview retrieval (RFC 3977 §8.3 OVER, §8.4 LIST OVERVIEW.FMT)

use super::NntpClient;
use super::body::ResponseBody;
use crate::commands;
use crate::error::Result;
use crate::overview::{OverviewRecord, OverviewSchema, parse_overview_line};
use crate::response::codes;
use std::io::{Read, Write};
use std::iter::FusedIterator;
use tracing::{debug, warn};

impl<S: Read + Write> NntpClient<S> {
    /// Column layout of this server's overview data
    ///
    /// Negotiated with LIST OVERVIEW.FMT on first use and cached for the
    /// session. A server that rejects the command is assumed to use the
    /// RFC 3977 layout.
    ///
    /// # Errors
    ///
    /// Transport and framing failures while reading the listing. A refusal
    /// status is not an error.
    pub fn overview_format(&mut self) -> Result<&OverviewSchema> {
        let schema = match self.overview_schema.take() {
            Some(schema) => schema,
            None => self.negotiate_overview_format()?,
        };
        Ok(self.overview_schema.insert(schema))
    }

    /// Drop the cached layout and ask the server again
    pub fn renegotiate_overview_format(&mut self) -> Result<&OverviewSchema> {
        self.overview_schema = None;
        self.overview_format()
    }

    /// Use a known layout instead of negotiating one
    pub fn set_overview_format(&mut self, schema: OverviewSchema) {
        self.overview_schema = Some(schema);
    }

    fn negotiate_overview_format(&mut self) -> Result<OverviewSchema> {
        debug!("Requesting overview format");
        let response = self.command(commands::list_overview_fmt())?;

        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            warn!(
                "LIST OVERVIEW.FMT refused ({} {}), assuming RFC 3977 layout",
                response.code, response.message
            );
            return Ok(OverviewSchema::rfc3977_default());
        }

        let lines = self
            .open_body(&response)?
            .collect::<Result<Vec<String>>>()?;
        let schema = OverviewSchema::negotiate(&lines);
        debug!(
            "Retrieved {} overview format fields ({} recognized)",
            schema.len(),
            schema.recognized().count()
        );
        Ok(schema)
    }

    /// Fetch overview records with OVER (RFC 3977 Section 8.3)
    ///
    /// `range` is an article number, `first-`, or `first-last`; see
    /// [`commands::range`](crate::commands::range). The overview layout is
    /// negotiated first if needed.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - e.g. 412 (no
    ///   group selected) or 423 (empty range); the connection stays usable
    /// - anything [`overview_format`](Self::overview_format) returns
    pub fn over(&mut self, range: &str) -> Result<OverviewRecords<'_, S>> {
        self.overview(&commands::over(range))
    }

    /// Fetch overview records with the pre-RFC 3977 XOVER command
    pub fn xover(&mut self, range: &str) -> Result<OverviewRecords<'_, S>> {
        self.overview(&commands::xover(range))
    }

    fn overview(&mut self, command: &str) -> Result<OverviewRecords<'_, S>> {
        let schema = self.overview_format()?.clone();
        let body = self.multiline(command, codes::OVERVIEW_INFO_FOLLOWS)?;
        Ok(OverviewRecords { body, schema })
    }
}

/// Overview records of one OVER/XOVER response, decoded as they are read
///
/// A record that fails to decode is yielded as `Err` with
/// [`is_record_error`](crate::NntpError::is_record_error) set, and iteration
/// may continue with the next line. Any other error ends the response.
/// Dropping the iterator early has the same effect as dropping a
/// [`ResponseBody`].
pub struct OverviewRecords<'a, S: Read + Write> {
    body: ResponseBody<'a, S>,
    schema: OverviewSchema,
}

impl<S: Read + Write> OverviewRecords<'_, S> {
    /// Layout the records are decoded with
    pub fn schema(&self) -> &OverviewSchema {
        &self.schema
    }

    /// Skip the remaining lines without decoding them
    pub fn drain(&mut self) -> Result<usize> {
        self.body.drain()
    }

    /// Whether the response has ended
    pub fn is_finished(&self) -> bool {
        self.body.is_finished()
    }

    /// Whether the response arrived compressed
    pub fn is_compressed(&self) -> bool {
        self.body.is_compressed()
    }
}

impl<S: Read + Write> Iterator for OverviewRecords<'_, S> {
    type Item = Result<OverviewRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.body.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        Some(parse_overview_line(&line, &self.schema))
    }
}

impl<S: Read + Write> FusedIterator for OverviewRecords<'_, S> {}
