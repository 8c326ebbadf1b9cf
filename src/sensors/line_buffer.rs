// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Byte-to-line assembly for streaming transports

use tracing::warn;

use super::decode_line;

/// Longest unterminated tail kept while waiting for `\n`
pub const MAX_LINE_LEN: usize = 4096;

/// Accumulates raw bytes and hands out complete lines only.
///
/// A partial line stays buffered until its terminator arrives. An unterminated tail
/// longer than the limit (wrong baud rate, binary noise) is discarded.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    pending: Vec<u8>,
    max_len: usize,
    discarded: u64,
}

impl LineBuffer {
    /// Buffer that drops unterminated tails longer than `max_len` bytes
    pub fn new(max_len: usize) -> Self {
        Self {
            pending: Vec::new(),
            max_len: max_len.max(1),
            discarded: 0,
        }
    }

    /// Append freshly read bytes. Returns how many bytes were discarded, if any.
    pub fn push(&mut self, bytes: &[u8]) -> usize {
        self.pending.extend_from_slice(bytes);

        let tail_start = self
            .pending
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let tail_len = self.pending.len() - tail_start;
        if tail_len <= self.max_len {
            return 0;
        }

        warn!(
            "Dropping {} bytes with no line terminator (limit {})",
            tail_len, self.max_len
        );
        self.pending.truncate(tail_start);
        self.discarded += tail_len as u64;
        tail_len
    }

    /// Whether a complete line is buffered
    pub fn has_line(&self) -> bool {
        self.pending.contains(&b'\n')
    }

    /// Next complete line without its terminator
    pub fn take_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=end).collect();
        Some(decode_line(&line))
    }

    /// Bytes currently buffered
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total bytes thrown away by the overflow rule
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Drop everything buffered; returns the byte count dropped
    pub fn clear(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(MAX_LINE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_split_across_reads() {
        let mut buf = LineBuffer::default();
        buf.push(b"Normal,X:1,Y:");
        assert!(!buf.has_line());
        assert_eq!(buf.take_line(), None);

        buf.push(b"2,Z:3,MAG:4\nTrem");
        assert_eq!(buf.take_line().as_deref(), Some("Normal,X:1,Y:2,Z:3,MAG:4"));
        assert_eq!(buf.take_line(), None);
        assert_eq!(buf.len(), 4);

        buf.push(b"or\n");
        assert_eq!(buf.take_line().as_deref(), Some("Tremor"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_crlf_terminator() {
        let mut buf = LineBuffer::default();
        buf.push(b"Earthquake\r\nTremor\r");
        assert_eq!(buf.take_line().as_deref(), Some("Earthquake"));
        // the CR alone does not end a line
        assert_eq!(buf.take_line(), None);
        buf.push(b"\n");
        assert_eq!(buf.take_line().as_deref(), Some("Tremor"));
    }

    #[test]
    fn test_no_newline_stays_buffered() {
        let mut buf = LineBuffer::default();
        assert_eq!(buf.push(b"Normal,X:1"), 0);
        assert!(!buf.has_line());
        assert_eq!(buf.take_line(), None);
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.clear(), 10);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_overflow_drops_unterminated_tail() {
        let mut buf = LineBuffer::new(8);
        assert_eq!(buf.push(b"Tremor\n0123"), 0);
        assert_eq!(buf.push(b"45678"), 9);
        assert_eq!(buf.discarded(), 9);

        // complete lines before the runaway tail survive
        assert_eq!(buf.take_line().as_deref(), Some("Tremor"));
        assert!(buf.is_empty());

        // assembly resumes cleanly afterwards
        buf.push(b"Earthquake\n");
        assert_eq!(buf.take_line().as_deref(), Some("Earthquake"));
    }

    #[test]
    fn test_overflow_without_any_newline() {
        let mut buf = LineBuffer::new(16);
        let noise = vec![0xAAu8; 64];
        assert_eq!(buf.push(&noise), 64);
        assert!(buf.is_empty());
        assert_eq!(buf.discarded(), 64);
    }
}
