// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Serial seismometer link

use std::io::{ErrorKind, Read};
use std::time::Duration;
use tracing::{info, warn};

use super::{LineBuffer, Transport, TransportError, TransportStatus};
use crate::config::SerialConfig;

const READ_CHUNK: usize = 1024;

/// Device attached over a serial port, e.g. an Arduino streaming accelerometer lines
pub struct SerialTransport {
    name: String,
    port: Option<Box<dyn serialport::SerialPort>>,
    status: TransportStatus,
    lines: LineBuffer,
}

impl SerialTransport {
    /// Open `port_name` at the configured baud rate
    pub fn open(config: &SerialConfig, port_name: &str) -> Result<Self, TransportError> {
        let port = serialport::new(port_name, config.baud_rate)
            .timeout(Duration::from_millis(config.timeout_ms))
            .open()
            .map_err(|source| TransportError::Serial {
                port: port_name.to_string(),
                source,
            })?;

        info!("Opened serial port {} at {} baud", port_name, config.baud_rate);

        Ok(Self {
            name: port_name.to_string(),
            port: Some(port),
            status: TransportStatus::Connected,
            lines: LineBuffer::default(),
        })
    }

    /// Move whatever the driver has buffered into the line buffer without blocking.
    fn fill_buffer(&mut self) -> Result<(), TransportError> {
        let Some(port) = self.port.as_mut() else {
            return Err(TransportError::Closed(self.name.clone()));
        };

        let available = port.bytes_to_read().map_err(|source| TransportError::Serial {
            port: self.name.clone(),
            source,
        })? as usize;

        if available == 0 {
            return Ok(());
        }

        let mut chunk = vec![0u8; available.min(READ_CHUNK)];
        match port.read(&mut chunk) {
            Ok(n) => {
                self.lines.push(&chunk[..n]);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(()),
            Err(source) => Err(TransportError::Io {
                port: self.name.clone(),
                source,
            }),
        }
    }
}

impl Transport for SerialTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> TransportStatus {
        self.status
    }

    fn has_data(&mut self) -> Result<bool, TransportError> {
        if self.lines.has_line() {
            return Ok(true);
        }
        let Some(port) = self.port.as_ref() else {
            return Ok(false);
        };
        match port.bytes_to_read() {
            Ok(n) => Ok(n > 0),
            Err(source) => {
                self.status = TransportStatus::Error;
                Err(TransportError::Serial {
                    port: self.name.clone(),
                    source,
                })
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        if let Some(line) = self.lines.take_line() {
            return Ok(Some(line));
        }

        if let Err(e) = self.fill_buffer() {
            self.status = TransportStatus::Error;
            return Err(e);
        }

        Ok(self.lines.take_line())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        if self.port.take().is_some() {
            info!("Closed serial port {}", self.name);
        }
        let dropped = self.lines.clear();
        if dropped > 0 {
            warn!("Discarding {} bytes of incomplete line on {}", dropped, self.name);
        }
        self.status = TransportStatus::Closed;
        Ok(())
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Names of the serial ports present on this machine
pub fn list_ports() -> Result<Vec<String>, TransportError> {
    let ports = serialport::available_ports().map_err(|source| TransportError::Serial {
        port: "*".to_string(),
        source,
    })?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
