//! RFC 3977 Section 3.1.1 - Multi-line Response and Byte-Stuffing Tests
//!
//! These tests verify compliance with NNTP multi-line response requirements:
//! - Multi-line blocks are terminated by ".\r\n"
//! - Lines starting with "." are dot-stuffed (prepend another ".")
//! - When receiving, the stuffed dot is removed

use nntp_overview::NntpError;
use nntp_overview::framing::{FramerOptions, LineFramer};
use std::io::{self, BufReader, Read};

fn read_all(wire: &[u8], options: FramerOptions) -> Result<Vec<String>, NntpError> {
    LineFramer::new(wire, options).into_lines().collect()
}

/// Hands out one byte per read to split lines at every position
struct OneByte<'a>(&'a [u8]);

impl Read for OneByte<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.0.split_first(), buf.is_empty()) {
            (Some((&byte, rest)), false) => {
                buf[0] = byte;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

// Byte-Stuffing Tests (RFC 3977 §3.1.1)

#[test]
fn test_dot_stuffing_double_dot_becomes_single() {
    let lines = read_all(b"..\r\n..Hello\r\n...\r\n.\r\n", FramerOptions::text()).unwrap();
    assert_eq!(lines, vec![".", ".Hello", ".."]);
}

#[test]
fn test_dot_stuffing_preserves_non_dot_lines() {
    let lines = read_all(b"Hello World\r\n\r\nmid.dot.\r\n.\r\n", FramerOptions::text()).unwrap();
    assert_eq!(lines, vec!["Hello World", "", "mid.dot."]);
}

#[test]
fn test_unstuffed_source_keeps_dots() {
    let options = FramerOptions {
        stuffed: false,
        eof_is_end: false,
    };
    let lines = read_all(b"..x\r\n.\r\n", options).unwrap();
    assert_eq!(lines, vec!["..x"]);
}

// Terminator Tests

#[test]
fn test_terminator_ends_response() {
    let wire = b"one\r\n.\r\n211 next response\r\n";
    let mut framer = LineFramer::new(&wire[..], FramerOptions::text());
    assert_eq!(framer.next_line().unwrap().as_deref(), Some("one"));
    assert_eq!(framer.next_line().unwrap(), None);
    assert!(framer.is_finished());

    // The next response is left untouched on the wire
    let mut rest = String::new();
    framer.into_inner().read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "211 next response\r\n");
}

#[test]
fn test_empty_response() {
    let lines = read_all(b".\r\n", FramerOptions::text()).unwrap();
    assert!(lines.is_empty());
}

#[test]
fn test_bare_lf_line_endings_tolerated() {
    let lines = read_all(b"one\ntwo\n.\n", FramerOptions::text()).unwrap();
    assert_eq!(lines, vec!["one", "two"]);
}

#[test]
fn test_dot_with_trailing_text_is_not_terminator() {
    let lines = read_all(b". \r\n.x\r\n.\r\n", FramerOptions::text()).unwrap();
    assert_eq!(lines, vec![". ", ".x"]);
}

#[test]
fn test_fragmented_reads() {
    let wire = b"first line\r\n..second\r\nthird\r\n.\r\n";
    let source = BufReader::with_capacity(1, OneByte(wire));
    let lines: Vec<String> = LineFramer::new(source, FramerOptions::text())
        .into_lines()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(lines, vec!["first line", ".second", "third"]);
}

// Truncation Tests

#[test]
fn test_eof_before_terminator_is_truncation() {
    let err = read_all(b"one\r\ntwo\r\n", FramerOptions::text()).unwrap_err();
    assert!(matches!(err, NntpError::UnexpectedEndOfResponse));
}

#[test]
fn test_eof_mid_line_is_truncation() {
    let err = read_all(b"one\r\ntw", FramerOptions::text()).unwrap_err();
    assert!(err.is_truncation());
}

#[test]
fn test_terminator_without_crlf_is_truncation() {
    let err = read_all(b"one\r\n.", FramerOptions::text()).unwrap_err();
    assert!(matches!(err, NntpError::UnexpectedEndOfResponse));
}

#[test]
fn test_eof_accepted_when_source_is_delimited() {
    let lines = read_all(b"one\r\ntwo\r\n", FramerOptions::compressed()).unwrap();
    assert_eq!(lines, vec!["one", "two"]);
}

#[test]
fn test_read_after_end_is_protocol_violation() {
    let mut framer = LineFramer::new(&b".\r\n"[..], FramerOptions::text());
    assert_eq!(framer.next_line().unwrap(), None);
    assert!(matches!(
        framer.next_line(),
        Err(NntpError::ProtocolViolation(_))
    ));
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let lines = read_all(b"caf\xe9\r\n.\r\n", FramerOptions::text()).unwrap();
    assert_eq!(lines, vec!["caf\u{fffd}"]);
}
