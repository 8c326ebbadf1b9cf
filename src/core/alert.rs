// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Transient alert state with explicit, caller-driven expiry

use std::time::Duration;
use serde::{Deserialize, Serialize};

use super::Timestamp;
use crate::detection::AlertKind;

/// How long an alert stays up after the last alert line
pub const DEFAULT_ALERT_DURATION: Duration = Duration::from_secs(5);

/// The alert currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAlert {
    /// What the device reported
    pub kind: AlertKind,
    /// Session time after which the alert clears
    pub expires_at: Timestamp,
}

/// At most one active alert. A kind without an expiry (or the reverse) is unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertState {
    active: Option<ActiveAlert>,
}

impl AlertState {
    /// No alert active
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is active, kind and expiry both.
    pub fn raise_alert(&mut self, kind: AlertKind, now: Timestamp, duration: Duration) {
        self.active = Some(ActiveAlert {
            kind,
            expires_at: now.saturating_add(duration),
        });
    }

    /// Clear the alert once `now` is strictly past its expiry. Returns the cleared kind.
    pub fn tick(&mut self, now: Timestamp) -> Option<AlertKind> {
        match self.active {
            Some(alert) if now > alert.expires_at => {
                self.active = None;
                Some(alert.kind)
            }
            _ => None,
        }
    }

    /// Current kind; does not check expiry
    pub fn current(&self) -> Option<AlertKind> {
        self.active.map(|a| a.kind)
    }

    /// Expiry of the active alert
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.active.map(|a| a.expires_at)
    }

    /// Active alert with its expiry
    pub fn active(&self) -> Option<ActiveAlert> {
        self.active
    }

    /// True while an alert is shown
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_initially_clear() {
        let state = AlertState::new();
        assert_eq!(state.current(), None);
        assert_eq!(state.expires_at(), None);
    }

    #[test]
    fn test_raise_sets_kind_and_expiry() {
        let mut state = AlertState::new();
        state.raise_alert(AlertKind::Tremor, secs(10), secs(5));
        assert_eq!(state.current(), Some(AlertKind::Tremor));
        assert_eq!(state.expires_at(), Some(secs(15)));
    }

    #[test]
    fn test_alert_overwrite() {
        let mut state = AlertState::new();
        state.raise_alert(AlertKind::Tremor, secs(0), secs(5));
        state.raise_alert(AlertKind::Earthquake, secs(1), secs(5));
        assert_eq!(state.current(), Some(AlertKind::Earthquake));
        assert_eq!(state.expires_at(), Some(secs(6)));

        state.raise_alert(AlertKind::Tremor, secs(2), secs(5));
        assert_eq!(state.current(), Some(AlertKind::Tremor));
        assert_eq!(state.expires_at(), Some(secs(7)));
    }

    #[test]
    fn test_expiry_is_idempotent() {
        let mut state = AlertState::new();
        state.raise_alert(AlertKind::Tremor, secs(0), secs(5));

        assert_eq!(state.tick(secs(4)), None);
        assert_eq!(state.current(), Some(AlertKind::Tremor));

        assert_eq!(state.tick(secs(6)), Some(AlertKind::Tremor));
        assert_eq!(state.current(), None);
        assert_eq!(state.expires_at(), None);

        assert_eq!(state.tick(secs(6)), None);
        assert_eq!(state.tick(secs(100)), None);
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_expiry_is_strict() {
        let mut state = AlertState::new();
        state.raise_alert(AlertKind::Earthquake, secs(0), secs(5));
        state.tick(secs(5));
        assert_eq!(state.current(), Some(AlertKind::Earthquake));
        state.tick(secs(5) + Duration::from_millis(1));
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_current_does_not_expire() {
        let mut state = AlertState::new();
        state.raise_alert(AlertKind::Tremor, secs(0), secs(1));
        // no tick: still reported
        assert_eq!(state.current(), Some(AlertKind::Tremor));
    }

    #[test]
    fn test_saturating_expiry() {
        let mut state = AlertState::new();
        state.raise_alert(AlertKind::Tremor, Duration::MAX, secs(5));
        assert_eq!(state.expires_at(), Some(Duration::MAX));
        assert_eq!(state.tick(Duration::MAX), None);
    }
}
