//! Sliding-window terminator detection
//!
//! Network reads split data at arbitrary offsets, so a terminator such as
//! `.\r\n` may arrive as `.` in one read and `\r\n` in the next. The scanner
//! keeps the last `K` bytes it has seen and compares them against the
//! terminator, which makes the outcome independent of read boundaries.

/// Fixed-capacity window over the most recently written `K` bytes
///
/// Backed by a plain array and a write cursor; writing never allocates.
///
/// # Example
///
/// ```
/// use nntp_overview::framing::TerminatorScanner;
///
/// let mut scanner = TerminatorScanner::<3>::new();
/// scanner.write(b"compressed.");
/// assert!(!scanner.matches(b".\r\n"));
/// scanner.write(b"\r\n");
/// assert!(scanner.matches(b".\r\n"));
/// ```
#[derive(Debug, Clone)]
pub struct TerminatorScanner<const K: usize> {
    window: [u8; K],
    /// Slot the next byte goes into; once full, also the oldest byte
    cursor: usize,
    used: usize,
}

impl<const K: usize> TerminatorScanner<K> {
    /// Create an empty scanner
    pub fn new() -> Self {
        const { assert!(K > 0, "terminator window must hold at least one byte") };
        Self {
            window: [0; K],
            cursor: 0,
            used: 0,
        }
    }

    /// Window capacity, i.e. the terminator length
    pub const fn capacity(&self) -> usize {
        K
    }

    /// Number of bytes currently retained (at most `K`)
    pub fn len(&self) -> usize {
        self.used
    }

    /// True until the first byte is written
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Append bytes, keeping only the most recent `K`
    pub fn write(&mut self, bytes: &[u8]) {
        // Only the tail can survive in the window.
        let tail = &bytes[bytes.len().saturating_sub(K)..];
        for &byte in tail {
            self.window[self.cursor] = byte;
            self.cursor = (self.cursor + 1) % K;
        }
        self.used = (self.used + tail.len()).min(K);
    }

    /// Whether the retained bytes, oldest first, equal `terminator` exactly
    ///
    /// Never matches before `K` bytes have been written or when
    /// `terminator.len() != K`.
    pub fn matches(&self, terminator: &[u8]) -> bool {
        if self.used != K || terminator.len() != K {
            return false;
        }
        terminator
            .iter()
            .enumerate()
            .all(|(i, &byte)| self.window[(self.cursor + i) % K] == byte)
    }

    /// Forget everything written so far
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.used = 0;
    }
}

impl<const K: usize> Default for TerminatorScanner<K> {
    fn default() -> Self {
        Self::new()
    }
}
