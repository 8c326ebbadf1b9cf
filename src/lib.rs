// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! QuakeWatch - live monitor for a serial seismometer
//!
//! Reads accelerometer lines from a device, classifies each one (reading, tremor alert,
//! earthquake alert, or malformed), keeps a rolling window of samples and a timed alert,
//! and draws the magnitude as a live strip chart.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐  line   ┌────────────┐ ParsedEvent ┌───────────────────┐
//! │ Transport │───────→ │ parse_line │───────────→ │ SessionController │
//! │ (serial,  │         └────────────┘             │  RollingSeries    │
//! │  replay,  │                                    │  AlertState       │
//! │  sim)     │                                    └─────────┬─────────┘
//! └───────────┘                                              │ snapshot
//!       ↑                     ┌────────┐                     ↓
//!       └──── poll / tick ─── │ Engine │             ┌───────────────┐
//!                             └────────┘             │ UI / headless │
//!                                                    └───────────────┘
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod sensors;
pub mod detection;
pub mod config;

#[cfg(feature = "gui")]
pub mod ui;

// Re-exports for convenience
pub use config::Config;
pub use core::{Engine, RollingSeries, Sample, SessionController, SessionSnapshot, AlertState};
pub use detection::{parse_line, AlertKind, ParseError, ParsedEvent};
pub use sensors::{Transport, TransportError, TransportStatus};

/// QuakeWatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// QuakeWatch name
pub const NAME: &str = "QuakeWatch";
