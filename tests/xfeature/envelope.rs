//! Envelope reading and inflation, independent of the client

use flate2::Compression;
use flate2::write::ZlibEncoder;
use nntp_overview::framing::{
    DecompressedStream, ENVELOPE_TERMINATOR, FramerOptions, LineFramer, TerminatorScanner,
    read_envelope,
};
use nntp_overview::{NntpError, OverviewSchema, parse_overview_line};
use std::io::{self, Read, Write};

fn compress(text: &str) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn wire(text: &str) -> Vec<u8> {
    let mut out = compress(text);
    out.extend_from_slice(ENVELOPE_TERMINATOR);
    out
}

/// Replays a payload in fixed-size reads
struct Chunked {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl Chunked {
    fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk,
        }
    }
}

impl Read for Chunked {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let end = (self.pos + self.chunk.min(buf.len())).min(self.data.len());
        let n = end - self.pos;
        buf[..n].copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(n)
    }
}

/// Delivers everything before `split` in one read, then the rest
struct Split {
    data: Vec<u8>,
    split: usize,
    pos: usize,
}

impl Read for Split {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let end = if self.pos < self.split {
            self.split
        } else {
            self.data.len()
        };
        let n = (end - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

const OVERVIEW: &str = "1\tFirst\ta@x\t\t<1@x>\t\t10\t1\r\n\
                        2\t.leading dot\tb@x\t\t<2@x>\t<1@x>\t20\t2\r\n\
                        .\r\n";

#[test]
fn test_round_trip_for_every_chunk_size() {
    let payload = compress(OVERVIEW);
    for chunk in 1..=8 {
        let mut source = Chunked::new(wire(OVERVIEW), chunk);
        let block = read_envelope(&mut source, usize::MAX).unwrap();
        assert_eq!(block, payload, "chunk size {chunk}");
    }
}

#[test]
fn test_terminator_split_across_reads() {
    // The final read boundary falls inside ".\r\n"
    let data = wire(OVERVIEW);
    let payload_len = data.len() - 3;
    for split in [payload_len + 1, payload_len + 2] {
        let mut source = Split {
            data: data.clone(),
            split,
            pos: 0,
        };
        let block = read_envelope(&mut source, usize::MAX).unwrap();
        assert_eq!(block.len(), payload_len, "split at {split}");
    }
}

#[test]
fn test_decompressed_lines_feed_the_parser() {
    let mut source = Chunked::new(wire(OVERVIEW), 5);
    let stream = DecompressedStream::open(&mut source, usize::MAX).unwrap();
    let schema = OverviewSchema::rfc3977_default();

    let records: Vec<_> = LineFramer::new(stream, FramerOptions::compressed())
        .into_lines()
        .map(|line| parse_overview_line(&line.unwrap(), &schema).unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    // Compressed bodies are not dot-stuffed
    assert_eq!(records[1].subject, ".leading dot");
    assert_eq!(records[1].references, "<1@x>");
}

#[test]
fn test_connection_closed_inside_envelope() {
    let mut data = wire(OVERVIEW);
    data.truncate(data.len() - 2);
    let mut source = Chunked::new(data, 16);
    let err = read_envelope(&mut source, usize::MAX).unwrap_err();
    assert!(matches!(err, NntpError::Transport(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
}

#[test]
fn test_oversized_envelope_rejected() {
    let big: String = (0..2_000).map(|i| format!("{i}\tsubject {i}\r\n")).collect();
    let mut source = Chunked::new(wire(&big), 64);
    let err = read_envelope(&mut source, 128).unwrap_err();
    assert!(matches!(err, NntpError::ProtocolViolation(_)));
}

#[test]
fn test_garbage_payload_is_decompression_error() {
    let mut source = Chunked::new(b"this is not zlib.\r\n".to_vec(), 4);
    let err = DecompressedStream::open(&mut source, usize::MAX).unwrap_err();
    assert!(matches!(err, NntpError::Decompression(_)));
}

#[test]
fn test_scanner_matches_regardless_of_chunking() {
    let data = b"abc.\r\n";
    for chunk in 1..=data.len() {
        let mut scanner = TerminatorScanner::<3>::new();
        for piece in data.chunks(chunk) {
            scanner.write(piece);
        }
        assert!(scanner.matches(b".\r\n"), "chunk {chunk}");
    }
}
