//! Overview line decoding (OVER/XOVER, RFC 3977 Section 8.3)

use super::schema::{OverviewField, OverviewSchema};
use crate::date::parse_date;
use crate::error::{NntpError, Result};
use chrono::{DateTime, Utc};

/// Per-article summary decoded from one overview line
///
/// Fields the schema does not carry, and fields sent empty, keep their
/// default value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverviewRecord {
    /// Article number within the newsgroup
    pub article_number: u64,
    /// Article subject line
    pub subject: String,
    /// Article author (From header)
    pub from: String,
    /// Posting date, if present and parseable
    pub date: Option<DateTime<Utc>>,
    /// Unique message ID
    pub message_id: String,
    /// References to parent articles (for threading)
    pub references: String,
    /// Article size in bytes
    pub bytes: u64,
    /// Number of lines in the article
    pub lines: u64,
    /// Full Xref header, including the `Xref:` name
    pub xref: String,
}

impl OverviewRecord {
    /// Message IDs listed in the References field, oldest first
    pub fn reference_ids(&self) -> impl Iterator<Item = &str> {
        self.references.split_whitespace()
    }

    /// Apply one column value according to its schema tag
    fn set(&mut self, field: OverviewField, position: usize, value: &str) -> Result<()> {
        let invalid = || NntpError::FieldParseError {
            field,
            position,
            value: value.to_string(),
        };

        match field {
            OverviewField::Subject => self.subject = value.to_string(),
            OverviewField::From => self.from = value.to_string(),
            OverviewField::MessageId => self.message_id = value.to_string(),
            OverviewField::References => self.references = value.to_string(),
            OverviewField::XrefFull => self.xref = value.to_string(),
            OverviewField::Date => {
                self.date = if value.trim().is_empty() {
                    None
                } else {
                    Some(parse_date(value).map_err(|_| invalid())?)
                };
            }
            OverviewField::Bytes => self.bytes = parse_count(value).ok_or_else(invalid)?,
            OverviewField::Lines => self.lines = parse_count(value).ok_or_else(invalid)?,
            OverviewField::Unrecognized => {}
        }
        Ok(())
    }
}

/// Empty means "not provided" and yields zero
fn parse_count(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        Some(0)
    } else {
        value.parse().ok()
    }
}

/// Parse one overview line using the negotiated schema
///
/// Values are applied in column order, so a field repeated in the schema
/// ends up with its last value. Extra values beyond the schema, or schema
/// columns missing from the line, are ignored.
///
/// # Example
///
/// ```
/// use nntp_overview::{parse_overview_line, OverviewSchema};
///
/// let schema = OverviewSchema::rfc3977_default();
/// let record = parse_overview_line("42\tHello\tme@example.com", &schema).unwrap();
/// assert_eq!(record.article_number, 42);
/// assert_eq!(record.subject, "Hello");
/// assert_eq!(record.bytes, 0);
/// ```
///
/// # Errors
///
/// - [`NntpError::MalformedIdentifier`] - the article number is not an
///   unsigned integer
/// - [`NntpError::FieldParseError`] - a non-empty numeric or date value
///   could not be parsed; the whole record is rejected
pub fn parse_overview_line(line: &str, schema: &OverviewSchema) -> Result<OverviewRecord> {
    let mut values = line.split('\t');
    let number = values.next().unwrap_or_default();

    let mut record = OverviewRecord {
        article_number: number
            .trim()
            .parse()
            .map_err(|_| NntpError::MalformedIdentifier(number.to_string()))?,
        ..OverviewRecord::default()
    };

    for (index, (&field, value)) in schema.fields().iter().zip(values).enumerate() {
        record.set(field, index + 1, value)?;
    }

    Ok(record)
}
