//! Basic overview download
//!
//! Run with: cargo run --example basic
//!
//! Environment: NNTP_HOST, NNTP_PORT, NNTP_GROUP

use nntp_overview::{NntpClient, ServerConfig, commands};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let host = std::env::var("NNTP_HOST").unwrap_or_else(|_| "news.example.com".to_string());
    let port = std::env::var("NNTP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(119);
    let newsgroup = std::env::var("NNTP_GROUP").unwrap_or_else(|_| "alt.test".to_string());

    let config = ServerConfig::new(host, port).with_read_timeout(Duration::from_secs(30));
    println!("Connecting to {}...", config.address());

    let mut client = NntpClient::connect(&config)?;

    if client.capabilities()?.supports_xfeature_gzip() {
        let enabled = client.enable_compression()?;
        println!("Headers compression: {}", enabled);
    }

    let schema = client.overview_format()?;
    println!("Overview format: {} fields", schema.len());
    for (position, field) in schema.recognized() {
        println!("  {:>2}: {}", position, field);
    }

    let info = client.group(&newsgroup)?;
    println!(
        "{}: {} articles ({}-{})",
        info.name, info.count, info.first, info.last
    );

    // Last 20 articles
    let first = info.last.saturating_sub(19).max(info.first);
    let mut skipped = 0;
    for record in client.over(&commands::range(first, Some(info.last)))? {
        match record {
            Ok(record) => println!(
                "{:>8} {:>6}B  {}",
                record.article_number, record.bytes, record.subject
            ),
            Err(e) if e.is_record_error() => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }
    if skipped > 0 {
        println!("({} malformed records skipped)", skipped);
    }

    let (compressed, decompressed) = client.get_bandwidth_stats();
    if compressed > 0 {
        println!("Received {} compressed bytes for {} bytes of overview", compressed, decompressed);
    }

    client.quit()?;
    Ok(())
}
