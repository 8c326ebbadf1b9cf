// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Replays a captured device log as if it were arriving from the sensor

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use super::{decode_line, Transport, TransportError, TransportStatus};

/// Line source backed by any buffered reader
pub struct ReplayTransport<R: BufRead + Send> {
    name: String,
    reader: R,
    status: TransportStatus,
    lines_read: u64,
}

impl ReplayTransport<BufReader<File>> {
    /// Open a capture file
    pub fn open(path: &Path) -> Result<Self, TransportError> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|source| TransportError::Io {
            port: name.clone(),
            source,
        })?;
        info!("Replaying capture from {}", name);
        Ok(Self::new(&name, BufReader::new(file)))
    }
}

impl<R: BufRead + Send> ReplayTransport<R> {
    /// Replay lines from any buffered reader
    pub fn new(name: &str, reader: R) -> Self {
        Self {
            name: name.to_string(),
            reader,
            status: TransportStatus::Connected,
            lines_read: 0,
        }
    }

    /// Lines returned so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    fn io_error(&self, source: std::io::Error) -> TransportError {
        TransportError::Io {
            port: self.name.clone(),
            source,
        }
    }
}

impl<R: BufRead + Send> Transport for ReplayTransport<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> TransportStatus {
        self.status
    }

    fn has_data(&mut self) -> Result<bool, TransportError> {
        if self.status != TransportStatus::Connected {
            return Ok(false);
        }
        let at_eof = match self.reader.fill_buf() {
            Ok(buf) => buf.is_empty(),
            Err(e) => {
                self.status = TransportStatus::Error;
                return Err(self.io_error(e));
            }
        };

        if at_eof {
            debug!("Replay {} exhausted after {} lines", self.name, self.lines_read);
            self.status = TransportStatus::Exhausted;
        }
        Ok(!at_eof)
    }

    fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        match self.status {
            TransportStatus::Closed => return Err(TransportError::Closed(self.name.clone())),
            TransportStatus::Connected => {}
            _ => return Ok(None),
        }

        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf).map_err(|e| {
            self.status = TransportStatus::Error;
            self.io_error(e)
        })?;

        if n == 0 {
            self.status = TransportStatus::Exhausted;
            return Ok(None);
        }

        self.lines_read += 1;
        Ok(Some(decode_line(&buf)))
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.status = TransportStatus::Closed;
        Ok(())
    }
}
