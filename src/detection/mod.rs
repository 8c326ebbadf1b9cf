// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Detection module - classifies raw device lines into typed events

mod parser;

pub use parser::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert categories reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Minor shaking
    Tremor,
    /// Strong shaking
    Earthquake,
}

impl AlertKind {
    /// Banner text shown while the alert is active
    pub fn headline(&self) -> &'static str {
        match self {
            AlertKind::Tremor => "TREMOR DETECTED!",
            AlertKind::Earthquake => "EARTHQUAKE DETECTED!",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Tremor => f.write_str("tremor"),
            AlertKind::Earthquake => f.write_str("earthquake"),
        }
    }
}

/// Value fields of a normal reading, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    /// X-axis value
    X,
    /// Y-axis value
    Y,
    /// Z-axis value
    Z,
    /// Device-computed magnitude
    Magnitude,
}

impl Field {
    /// Wire order of the value fields
    pub const ORDER: [Field; 4] = [Field::X, Field::Y, Field::Z, Field::Magnitude];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::X => f.write_str("x"),
            Field::Y => f.write_str("y"),
            Field::Z => f.write_str("z"),
            Field::Magnitude => f.write_str("magnitude"),
        }
    }
}

/// Classified device line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEvent {
    /// Normal acceleration reading with device-computed magnitude
    Reading {
        /// X-axis acceleration
        x: i32,
        /// Y-axis acceleration
        y: i32,
        /// Z-axis acceleration
        z: i32,
        /// Device-computed magnitude
        magnitude: i32,
    },
    /// Line containing `Tremor`
    TremorAlert,
    /// Line containing `Earthquake`
    EarthquakeAlert,
    /// Malformed or unrecognized line; never applied to session state
    ParseError(ParseError),
}

impl ParsedEvent {
    /// Alert carried by this event, if any
    pub fn alert_kind(&self) -> Option<AlertKind> {
        match self {
            ParsedEvent::TremorAlert => Some(AlertKind::Tremor),
            ParsedEvent::EarthquakeAlert => Some(AlertKind::Earthquake),
            _ => None,
        }
    }

    /// True for lines that failed to parse
    pub fn is_error(&self) -> bool {
        matches!(self, ParsedEvent::ParseError(_))
    }
}
