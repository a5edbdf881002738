//! RFC 3977 Section 3.2 - Response Code Tests
//!
//! Status lines are a three-digit code, a space, and optional text.

use nntp_overview::{COMPRESS_GZIP_MARKER, NntpError, NntpResponse, codes};

#[test]
fn test_parse_overview_status() {
    let response = NntpResponse::parse("224 Overview information follows").unwrap();
    assert_eq!(response.code, codes::OVERVIEW_INFO_FOLLOWS);
    assert!(response.is_success());
    assert!(!response.is_compressed());
}

#[test]
fn test_parse_compressed_status() {
    let line = format!("224 Overview information follows {COMPRESS_GZIP_MARKER}");
    let response = NntpResponse::parse(&line).unwrap();
    assert!(response.is_compressed());
}

#[test]
fn test_response_classes() {
    let ok = NntpResponse::parse("211 1 1 1 misc.test").unwrap();
    let more = NntpResponse::parse("340 send article").unwrap();
    let temp = NntpResponse::parse("412 No newsgroup selected").unwrap();
    let perm = NntpResponse::parse("503 program fault").unwrap();

    assert!(ok.is_success() && !ok.is_error());
    assert!(more.is_continuation());
    assert!(temp.is_error());
    assert!(perm.is_error());
}

#[test]
fn test_invalid_status_lines() {
    for line in ["", "OK", "22", "22a text", "2245 text"] {
        assert!(
            matches!(NntpResponse::parse(line), Err(NntpError::InvalidResponse(_))),
            "{line:?} should be rejected"
        );
    }
}

#[test]
fn test_error_conversion_keeps_code() {
    let err = NntpResponse::parse("423 No article with that number")
        .unwrap()
        .into_error();
    assert_eq!(err.to_string(), "NNTP error 423: No article with that number");
}

#[test]
fn test_code_constants() {
    assert_eq!(codes::CAPABILITY_LIST, 101);
    assert_eq!(codes::LIST_INFORMATION_FOLLOWS, 215);
    assert_eq!(codes::OVERVIEW_INFO_FOLLOWS, 224);
    assert_eq!(codes::XFEATURE_ENABLED, 290);
    assert_eq!(codes::NO_GROUP_SELECTED, 412);
    assert_eq!(codes::NO_SUCH_ARTICLE_NUMBER, 423);
}
