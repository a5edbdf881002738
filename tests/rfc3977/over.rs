//! RFC 3977 Section 8.3 - OVER Command Tests
//!
//! Reference: https://datatracker.ietf.org/doc/html/rfc3977#section-8.3
//!
//! Tests for OVER/XOVER command building and overview line decoding.

use chrono::{Datelike, Timelike};
use nntp_overview::{
    NntpError, OverviewField, OverviewRecord, OverviewSchema, commands, parse_overview_line,
};

const REFERENCE_LINE: &str = "12345\tHello World\tuser@example.com\tThu, 03 Jan 19 18:58:44 UTC\t<abc@example>\t\t1024\t20\tXref: full";

#[test]
fn test_over_command_format() {
    assert_eq!(commands::over("3000-3002"), "OVER 3000-3002\r\n");
    assert_eq!(commands::xover("3000-"), "XOVER 3000-\r\n");
    assert_eq!(commands::over(&commands::range(3000, None)), "OVER 3000-\r\n");
}

#[test]
fn test_reference_line() {
    let record = parse_overview_line(REFERENCE_LINE, &OverviewSchema::rfc3977_default()).unwrap();

    assert_eq!(record.article_number, 12345);
    assert_eq!(record.subject, "Hello World");
    assert_eq!(record.from, "user@example.com");
    assert_eq!(record.message_id, "<abc@example>");
    assert_eq!(record.bytes, 1024);
    assert_eq!(record.lines, 20);
    assert_eq!(record.xref, "Xref: full");

    let date = record.date.expect("date populated");
    assert_eq!((date.year(), date.month(), date.day()), (2019, 1, 3));
    assert_eq!((date.hour(), date.minute(), date.second()), (18, 58, 44));
}

#[test]
fn test_rfc3977_example_line() {
    // Example from RFC 3977 §8.3.2
    let line = "3000234\tI am just a test article\t\"Demo User\" <nobody@example.com>\t6 Oct 1998 04:38:40 -0500\t<45223423@example.com>\t<45454@example.net>\t1234\t17\tXref: news.example.com misc.test:3000363";
    let record = parse_overview_line(line, &OverviewSchema::rfc3977_default()).unwrap();

    assert_eq!(record.article_number, 3_000_234);
    assert_eq!(record.from, "\"Demo User\" <nobody@example.com>");
    assert_eq!(record.references, "<45454@example.net>");
    assert_eq!(record.reference_ids().collect::<Vec<_>>(), vec!["<45454@example.net>"]);
    assert_eq!(record.xref, "Xref: news.example.com misc.test:3000363");

    let date = record.date.unwrap();
    assert_eq!((date.day(), date.hour()), (6, 9));
}

#[test]
fn test_shorter_schema_ignores_extra_fields() {
    let schema = OverviewSchema::negotiate(["Subject:", "From:"]);
    let record = parse_overview_line(REFERENCE_LINE, &schema).unwrap();

    assert_eq!(
        record,
        OverviewRecord {
            article_number: 12345,
            subject: "Hello World".to_string(),
            from: "user@example.com".to_string(),
            ..OverviewRecord::default()
        }
    );
}

#[test]
fn test_non_numeric_identifier_leaves_schema_intact() {
    let schema = OverviewSchema::rfc3977_default();
    let err = parse_overview_line("x12\tsubject", &schema).unwrap_err();

    assert!(matches!(err, NntpError::MalformedIdentifier(ref id) if id == "x12"));
    assert!(err.is_record_error());
    assert_eq!(schema, OverviewSchema::rfc3977_default());
    // The same schema keeps working for the next line
    assert!(parse_overview_line(REFERENCE_LINE, &schema).is_ok());
}

#[test]
fn test_field_error_reports_position() {
    let err = parse_overview_line("1\ts\tf\t\t<m>\t\t10\tmany", &OverviewSchema::rfc3977_default())
        .unwrap_err();
    match err {
        NntpError::FieldParseError {
            field,
            position,
            value,
        } => {
            assert_eq!(field, OverviewField::Lines);
            assert_eq!(position, 7);
            assert_eq!(value, "many");
        }
        other => panic!("expected FieldParseError, got {other:?}"),
    }
}

#[test]
fn test_metadata_fields_may_be_empty() {
    // RFC 3977 §8.3.2: an absent header gives an empty field
    let record = parse_overview_line("7\t\t\t\t\t\t\t\t", &OverviewSchema::rfc3977_default()).unwrap();
    assert_eq!(record.article_number, 7);
    assert_eq!(record.date, None);
    assert_eq!(record.bytes, 0);
    assert_eq!(record.lines, 0);
}
