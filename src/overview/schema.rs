//! Overview format negotiation (LIST OVERVIEW.FMT, RFC 3977 Section 8.4)
//!
//! The server announces, one per line, which field each tab-separated
//! column of its OVER/XOVER output holds. The first seven are fixed by the
//! RFC, but servers may reorder legacy formats or append extension headers,
//! so the layout is learned per session rather than hard-coded.

use std::fmt;

/// Overview column kinds this crate knows how to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverviewField {
    /// `Subject:` header
    Subject,
    /// `From:` header
    From,
    /// `Date:` header
    Date,
    /// `Message-ID:` header
    MessageId,
    /// `References:` header
    References,
    /// `:bytes` metadata (article size in octets)
    Bytes,
    /// `:lines` metadata (body line count)
    Lines,
    /// `Xref:full`, the Xref header including its name
    XrefFull,
    /// Any column the client does not understand; its values are skipped
    Unrecognized,
}

/// Announcement spellings accepted for each field
///
/// Older servers use `Bytes:`/`Lines:` (or no colon) where RFC 3977 has
/// the `:bytes`/`:lines` metadata names.
const FORMAT_NAMES: &[(&str, OverviewField)] = &[
    ("Subject:", OverviewField::Subject),
    ("From:", OverviewField::From),
    ("Date:", OverviewField::Date),
    ("Message-ID:", OverviewField::MessageId),
    ("References:", OverviewField::References),
    (":bytes", OverviewField::Bytes),
    ("Bytes:", OverviewField::Bytes),
    ("Bytes", OverviewField::Bytes),
    (":lines", OverviewField::Lines),
    ("Lines:", OverviewField::Lines),
    ("Lines", OverviewField::Lines),
    ("Xref:full", OverviewField::XrefFull),
];

impl OverviewField {
    /// Map one LIST OVERVIEW.FMT line to a field
    ///
    /// Matching is on the whole token, ignoring ASCII case and surrounding
    /// whitespace. Anything else is [`OverviewField::Unrecognized`].
    pub fn from_format_line(line: &str) -> Self {
        let token = line.trim();
        FORMAT_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|&(_, field)| field)
            .unwrap_or(OverviewField::Unrecognized)
    }

    /// Canonical RFC 3977 name, as a server would announce it
    pub fn format_name(self) -> Option<&'static str> {
        match self {
            OverviewField::Subject => Some("Subject:"),
            OverviewField::From => Some("From:"),
            OverviewField::Date => Some("Date:"),
            OverviewField::MessageId => Some("Message-ID:"),
            OverviewField::References => Some("References:"),
            OverviewField::Bytes => Some(":bytes"),
            OverviewField::Lines => Some(":lines"),
            OverviewField::XrefFull => Some("Xref:full"),
            OverviewField::Unrecognized => None,
        }
    }

    /// Short lowercase label used in messages
    pub fn as_str(self) -> &'static str {
        match self {
            OverviewField::Subject => "subject",
            OverviewField::From => "from",
            OverviewField::Date => "date",
            OverviewField::MessageId => "message-id",
            OverviewField::References => "references",
            OverviewField::Bytes => "bytes",
            OverviewField::Lines => "lines",
            OverviewField::XrefFull => "xref",
            OverviewField::Unrecognized => "unrecognized",
        }
    }

    /// Whether values in this column are decoded
    pub fn is_recognized(self) -> bool {
        self != OverviewField::Unrecognized
    }
}

impl fmt::Display for OverviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Negotiated column order of a server's overview output
///
/// Position `i` (0-based) describes the value after the `i + 1`th tab of an
/// overview line, i.e. the article number is not part of the schema.
/// Unrecognized announcements keep their slot so that later columns stay
/// aligned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverviewSchema {
    fields: Vec<OverviewField>,
}

impl OverviewSchema {
    /// Build a schema from the lines of a LIST OVERVIEW.FMT response
    ///
    /// # Example
    ///
    /// ```
    /// use nntp_overview::{OverviewField, OverviewSchema};
    ///
    /// let schema = OverviewSchema::negotiate(["Subject:", "X-Extension:", ":bytes"]);
    /// assert_eq!(
    ///     schema.fields(),
    ///     &[OverviewField::Subject, OverviewField::Unrecognized, OverviewField::Bytes]
    /// );
    /// assert_eq!(schema.recognized().count(), 2);
    /// ```
    pub fn negotiate<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| OverviewField::from_format_line(line.as_ref()))
            .collect()
    }

    /// The RFC 3977 mandatory layout followed by `Xref:full`
    ///
    /// For servers that reject LIST OVERVIEW.FMT.
    pub fn rfc3977_default() -> Self {
        Self {
            fields: vec![
                OverviewField::Subject,
                OverviewField::From,
                OverviewField::Date,
                OverviewField::MessageId,
                OverviewField::References,
                OverviewField::Bytes,
                OverviewField::Lines,
                OverviewField::XrefFull,
            ],
        }
    }

    /// All columns in order, including unrecognized ones
    pub fn fields(&self) -> &[OverviewField] {
        &self.fields
    }

    /// Number of columns after the article number
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the server announced no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at 1-based `position` (position 0 is the article number)
    pub fn field_at(&self, position: usize) -> Option<OverviewField> {
        position
            .checked_sub(1)
            .and_then(|index| self.fields.get(index))
            .copied()
    }

    /// Recognized fields with their 1-based positions
    pub fn recognized(&self) -> impl Iterator<Item = (usize, OverviewField)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_recognized())
            .map(|(index, &field)| (index + 1, field))
    }

    /// Whether the schema contains `field` at least once
    pub fn contains(&self, field: OverviewField) -> bool {
        self.fields.contains(&field)
    }
}

impl FromIterator<OverviewField> for OverviewSchema {
    fn from_iter<T: IntoIterator<Item = OverviewField>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<OverviewField>> for OverviewSchema {
    fn from(fields: Vec<OverviewField>) -> Self {
        Self { fields }
    }
}
