#![doc = include_str!("../README.md")]

mod capabilities;
mod client;
/// NNTP command builders and response parsers
pub mod commands;
mod config;
/// Lenient article date parsing
pub mod date;
mod error;
/// Multi-line response framing and compressed envelopes
pub mod framing;
/// Overview schema negotiation and record decoding
pub mod overview;
mod response;

pub use capabilities::Capabilities;
pub use client::{NntpClient, OverviewRecords, ResponseBody};
pub use commands::GroupInfo;
pub use config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_IO_TIMEOUT, ServerConfig};
pub use date::parse_date;
pub use error::{NntpError, Result};
pub use overview::{OverviewField, OverviewRecord, OverviewSchema, parse_overview_line};
pub use response::{COMPRESS_GZIP_MARKER, NntpResponse, codes};
