// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Session controller - applies parsed lines to the rolling series and alert state

use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::{AlertState, RollingSeries, Sample, Timestamp, DEFAULT_ALERT_DURATION, DEFAULT_CAPACITY};
use crate::config::SessionConfig;
use crate::detection::{parse_line, AlertKind, ParsedEvent};

/// Diagnostic counters for one session
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    /// Wall-clock session start
    pub started_at: DateTime<Utc>,
    /// Lines handed to the parser
    pub lines_received: u64,
    /// Readings appended to the series
    pub readings_accepted: u64,
    /// Lines rejected by the parser
    pub parse_errors: u64,
    /// Tremor lines seen
    pub tremor_alerts: u64,
    /// Earthquake lines seen
    pub earthquake_alerts: u64,
    /// Alerts cleared by expiry
    pub alerts_expired: u64,
    /// Most recent parse failure
    pub last_error: Option<String>,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            lines_received: 0,
            readings_accepted: 0,
            parse_errors: 0,
            tremor_alerts: 0,
            earthquake_alerts: 0,
            alerts_expired: 0,
            last_error: None,
        }
    }
}

/// Read-only view handed to the renderer each redraw
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Oldest first
    pub series: Vec<Sample>,
    /// Active alert, if any
    pub alert: Option<AlertKind>,
    /// Newest sample
    pub last: Option<Sample>,
    /// Diagnostic counters
    pub stats: SessionStats,
}

/// Owns all per-session state; one instance per connected device
pub struct SessionController {
    series: RollingSeries,
    alert: AlertState,
    alert_duration: Duration,
    next_sequence: u64,
    stats: SessionStats,
}

impl SessionController {
    /// Empty session with the given window size and alert duration
    pub fn new(capacity: usize, alert_duration: Duration) -> Self {
        Self {
            series: RollingSeries::new(capacity),
            alert: AlertState::new(),
            alert_duration,
            next_sequence: 0,
            stats: SessionStats::default(),
        }
    }

    /// Session sized from configuration
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.capacity, config.alert_duration())
    }

    /// Classify one raw line and apply it. Parse failures are logged and leave state untouched.
    pub fn on_line(&mut self, raw: &str, now: Timestamp) {
        trace!("Serial line: {:?}", raw);
        self.stats.lines_received += 1;

        match parse_line(raw) {
            ParsedEvent::Reading { x, y, z, magnitude } => {
                let sample = Sample {
                    sequence: self.next_sequence,
                    x,
                    y,
                    z,
                    magnitude,
                };
                self.next_sequence += 1;
                self.series.append(sample);
                self.stats.readings_accepted += 1;
                debug!("Sample {}: x={} y={} z={} mag={}", sample.sequence, x, y, z, magnitude);
            }
            ParsedEvent::TremorAlert => {
                self.raise(AlertKind::Tremor, now);
                self.stats.tremor_alerts += 1;
            }
            ParsedEvent::EarthquakeAlert => {
                self.raise(AlertKind::Earthquake, now);
                self.stats.earthquake_alerts += 1;
            }
            ParsedEvent::ParseError(e) => {
                warn!("Error parsing serial data: {} (line: {:?})", e, raw);
                self.stats.parse_errors += 1;
                self.stats.last_error = Some(e.to_string());
            }
        }
    }

    fn raise(&mut self, kind: AlertKind, now: Timestamp) {
        warn!("{}", kind.headline());
        self.alert.raise_alert(kind, now, self.alert_duration);
    }

    /// Expire a stale alert; call once per poll cycle even when no line arrived.
    pub fn tick(&mut self, now: Timestamp) {
        if let Some(kind) = self.alert.tick(now) {
            info!("{} alert cleared", kind);
            self.stats.alerts_expired += 1;
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            series: self.series.snapshot(),
            alert: self.alert.current(),
            last: self.series.last(),
            stats: self.stats.clone(),
        }
    }

    /// Rolling window
    pub fn series(&self) -> &RollingSeries {
        &self.series
    }

    /// Active alert kind
    pub fn alert(&self) -> Option<AlertKind> {
        self.alert.current()
    }

    /// Alert with its expiry
    pub fn alert_state(&self) -> &AlertState {
        &self.alert
    }

    /// Diagnostic counters
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// How long each alert stays active
    pub fn alert_duration(&self) -> Duration {
        self.alert_duration
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_ALERT_DURATION)
    }
}
