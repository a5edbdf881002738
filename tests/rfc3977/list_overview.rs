//! RFC 3977 Section 8.4 - LIST OVERVIEW.FMT Command Tests
//!
//! Reference: https://datatracker.ietf.org/doc/html/rfc3977#section-8.4
//!
//! Tests for the LIST OVERVIEW.FMT command and schema negotiation.

use nntp_overview::framing::{FramerOptions, LineFramer};
use nntp_overview::{OverviewField, OverviewSchema, commands};

#[test]
fn test_list_overview_fmt_command_format() {
    let cmd = commands::list_overview_fmt();
    assert_eq!(cmd, "LIST OVERVIEW.FMT\r\n");
    assert_eq!(cmd.matches("\r\n").count(), 1);
}

#[test]
fn test_rfc3977_example_response() {
    // Example from RFC 3977 §8.4.2
    let wire = b"Subject:\r\nFrom:\r\nDate:\r\nMessage-ID:\r\nReferences:\r\n:bytes\r\n:lines\r\n.\r\n";
    let lines: Vec<String> = LineFramer::new(&wire[..], FramerOptions::text())
        .into_lines()
        .collect::<Result<_, _>>()
        .unwrap();
    let schema = OverviewSchema::negotiate(&lines);

    assert_eq!(schema.len(), 7);
    assert_eq!(schema.field_at(1), Some(OverviewField::Subject));
    assert_eq!(schema.field_at(6), Some(OverviewField::Bytes));
    assert_eq!(schema.field_at(7), Some(OverviewField::Lines));
    assert!(!schema.contains(OverviewField::XrefFull));
}

#[test]
fn test_legacy_response_with_xref() {
    // Example from RFC 3977 §8.4.2 (pre-RFC servers)
    let schema = OverviewSchema::negotiate([
        "Subject:",
        "From:",
        "Date:",
        "Message-ID:",
        "References:",
        "Bytes:",
        "Lines:",
        "Xref:full",
    ]);
    assert_eq!(schema, OverviewSchema::rfc3977_default());
}

#[test]
fn test_extension_headers_are_placeholders() {
    let schema = OverviewSchema::negotiate([
        "Subject:",
        "From:",
        "Date:",
        "Message-ID:",
        "References:",
        ":bytes",
        ":lines",
        "Distribution:full",
        "Xref:full",
    ]);
    assert_eq!(schema.len(), 9);
    assert_eq!(schema.field_at(8), Some(OverviewField::Unrecognized));
    assert_eq!(schema.field_at(9), Some(OverviewField::XrefFull));
    assert_eq!(schema.recognized().count(), 8);
}

#[test]
fn test_field_display_names() {
    assert_eq!(OverviewField::MessageId.to_string(), "message-id");
    assert_eq!(OverviewField::Bytes.format_name(), Some(":bytes"));
}
