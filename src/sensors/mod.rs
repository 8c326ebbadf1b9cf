//! Sensor module - line transports for the seismometer

mod traits;
mod line_buffer;
mod replay;
mod simulator;
#[cfg(feature = "serial")]
mod serial;

pub use traits::{decode_line, Transport, TransportError, TransportStatus};
pub use line_buffer::{LineBuffer, MAX_LINE_LEN};
pub use replay::ReplayTransport;
pub use simulator::DeviceSimulator;
#[cfg(feature = "serial")]
pub use serial::{list_ports, SerialTransport};
