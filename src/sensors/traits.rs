// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Transport traits and common types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportStatus {
    /// Not yet opened or lost
    Disconnected,
    /// Open and readable
    Connected,
    /// Finite source has no more lines
    Exhausted,
    /// Last operation failed
    Error,
    /// Closed by the caller
    Closed,
}

/// Failures surfaced by a transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// Read or open failure
    #[error("I/O error on {port}: {source}")]
    Io {
        /// Port or file name
        port: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serial driver failure
    #[cfg(feature = "serial")]
    #[error("serial port {port}: {source}")]
    Serial {
        /// Port or file name
        port: String,
        /// Underlying driver error
        #[source]
        source: serialport::Error,
    },

    /// Read attempted after close
    #[error("transport {0} is closed")]
    Closed(String),
}

/// Line-oriented, non-blocking source of device output
pub trait Transport: Send {
    /// Human-readable name (port path, file name, ...)
    fn name(&self) -> &str;

    /// Current status
    fn status(&self) -> TransportStatus;

    /// Whether a read attempt is worthwhile right now. Must not block.
    fn has_data(&mut self) -> Result<bool, TransportError>;

    /// Next complete line without its terminator, or `None` if no complete line is buffered.
    /// Bytes that are not valid UTF-8 are dropped.
    fn read_line(&mut self) -> Result<Option<String>, TransportError>;

    /// Release the device; later reads see no data
    fn close(&mut self) -> Result<(), TransportError>;
}

/// Decode raw line bytes, dropping invalid UTF-8 and the line terminator.
pub fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect::<String>()
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_terminator() {
        assert_eq!(decode_line(b"Normal,X:1\r\n"), "Normal,X:1");
        assert_eq!(decode_line(b"Tremor\n"), "Tremor");
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        assert_eq!(decode_line(b"Nor\xffmal\xfe,X:1\n"), "Normal,X:1");
    }
}
