//! NNTP capabilities (RFC 3977 Section 5.2)
//!
//! Used to decide which overview command to issue and whether headers
//! compression can be requested.

use std::collections::HashMap;

/// Capabilities advertised by an NNTP server
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Capability label (uppercased) to its arguments
    /// Example: "LIST" -> ["ACTIVE", "OVERVIEW.FMT"]
    entries: HashMap<String, Vec<String>>,
    /// Raw lines in the order the server sent them
    lines: Vec<String>,
}

impl Capabilities {
    /// Parse capabilities from CAPABILITIES response lines
    ///
    /// # Format
    /// Each line is: `LABEL [arg1 arg2 ...]`
    ///
    /// ```text
    /// VERSION 2
    /// READER
    /// OVER MSGID
    /// LIST ACTIVE OVERVIEW.FMT
    /// XFEATURE-COMPRESS GZIP TERMINATOR
    /// ```
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut entries = HashMap::new();

        for line in lines {
            let mut parts = line.as_ref().split_whitespace();
            let Some(label) = parts.next() else {
                continue;
            };
            entries.insert(label.to_uppercase(), parts.map(str::to_string).collect());
        }

        Self {
            entries,
            lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
        }
    }

    /// Check if a capability label is advertised
    #[must_use]
    pub fn has(&self, capability: &str) -> bool {
        self.entries.contains_key(&capability.to_uppercase())
    }

    /// Arguments of a capability, `None` if not advertised
    #[must_use]
    pub fn get_args(&self, capability: &str) -> Option<&[String]> {
        self.entries
            .get(&capability.to_uppercase())
            .map(Vec::as_slice)
    }

    /// Check if a capability is advertised with a specific argument
    pub fn has_arg(&self, capability: &str, arg: &str) -> bool {
        self.get_args(capability)
            .is_some_and(|args| args.iter().any(|a| a.eq_ignore_ascii_case(arg)))
    }

    /// Lines exactly as received
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the server implements OVER (RFC 3977 §8.3)
    pub fn supports_over(&self) -> bool {
        self.has("OVER")
    }

    /// Whether LIST OVERVIEW.FMT may be used to negotiate the schema
    ///
    /// RFC 3977 ties OVERVIEW.FMT to the OVER capability; servers that
    /// list their LIST variants explicitly are honoured as well.
    pub fn supports_overview_fmt(&self) -> bool {
        self.supports_over() || self.has_arg("LIST", "OVERVIEW.FMT")
    }

    /// Whether XFEATURE COMPRESS GZIP headers compression is advertised
    pub fn supports_xfeature_gzip(&self) -> bool {
        self.has_arg("XFEATURE-COMPRESS", "GZIP")
    }
}
