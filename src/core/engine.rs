// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Poll loop - moves lines from a transport into the session

use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use super::{SessionController, SessionSnapshot, Timestamp};
use crate::config::SessionConfig;
use crate::sensors::{Transport, TransportError, TransportStatus};

const STATUS_LOG_INTERVAL: Duration = Duration::from_secs(10);

/// Owns the session and its transport; single caller, no locking
pub struct Engine {
    session: SessionController,
    transport: Box<dyn Transport>,
    poll_interval: Duration,
    max_lines_per_poll: usize,
    start_time: Instant,
}

impl Engine {
    /// Start a session on `transport`; the session clock starts now
    pub fn new(config: &SessionConfig, transport: Box<dyn Transport>) -> Self {
        info!("Session started on {} (window {} samples)", transport.name(), config.capacity);
        Self {
            session: SessionController::from_config(config),
            transport,
            poll_interval: config.poll_interval(),
            max_lines_per_poll: config.max_lines_per_poll.max(1),
            start_time: Instant::now(),
        }
    }

    /// Time since the session started
    pub fn elapsed(&self) -> Timestamp {
        self.start_time.elapsed()
    }

    /// One poll cycle at the current time
    pub fn poll(&mut self) -> Result<usize, TransportError> {
        let now = self.elapsed();
        self.poll_at(now)
    }

    /// Feed the lines currently available, then expire alerts. Returns lines fed.
    /// Alerts expire even when the transport fails.
    pub fn poll_at(&mut self, now: Timestamp) -> Result<usize, TransportError> {
        let result = self.drain(now);
        self.session.tick(now);
        result
    }

    fn drain(&mut self, now: Timestamp) -> Result<usize, TransportError> {
        let mut fed = 0;

        if self.transport.has_data()? {
            while fed < self.max_lines_per_poll {
                match self.transport.read_line()? {
                    Some(line) => {
                        self.session.on_line(&line, now);
                        fed += 1;
                    }
                    None => break,
                }
                if !self.transport.has_data()? {
                    break;
                }
            }
        }

        Ok(fed)
    }

    /// Expire alerts without touching the transport
    pub fn tick(&mut self) {
        let now = self.elapsed();
        self.session.tick(now);
    }

    /// Copy of the session state for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Underlying session
    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Name of the line source
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Current status of the line source
    pub fn transport_status(&self) -> TransportStatus {
        self.transport.status()
    }

    /// Configured poll period
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Headless loop: poll on a fixed interval until shutdown or the transport runs dry.
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) -> Result<(), TransportError> {
        info!("Starting poll loop every {:?}...", self.poll_interval);

        let mut poll_interval = interval(self.poll_interval);
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_status = Instant::now();

        loop {
            tokio::select! {
                _ = poll_interval.tick() => {
                    if let Err(e) = self.poll() {
                        error!("Transport {} failed: {}", self.transport.name(), e);
                        return Err(e);
                    }

                    if self.transport.status() == TransportStatus::Exhausted {
                        info!("Transport {} has no more data", self.transport.name());
                        break;
                    }

                    if last_status.elapsed() >= STATUS_LOG_INTERVAL {
                        self.log_status();
                        last_status = Instant::now();
                    }
                }
                _ = shutdown.recv() => {
                    info!("Poll loop shutting down...");
                    break;
                }
            }
        }

        self.log_status();
        Ok(())
    }

    fn log_status(&self) {
        let stats = self.session.stats();
        info!(
            "lines={} samples={} parse_errors={} tremors={} earthquakes={} alert={:?}",
            stats.lines_received,
            stats.readings_accepted,
            stats.parse_errors,
            stats.tremor_alerts,
            stats.earthquake_alerts,
            self.session.alert(),
        );
    }

    /// Close the transport; the session stays readable.
    pub fn close(&mut self) -> Result<(), TransportError> {
        if let Err(e) = self.transport.close() {
            warn!("Error closing {}: {}", self.transport.name(), e);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::AlertKind;
    use crate::sensors::ReplayTransport;
    use std::io::Cursor;

    fn engine(data: &str, max_lines_per_poll: usize) -> Engine {
        let config = SessionConfig {
            max_lines_per_poll,
            ..SessionConfig::default()
        };
        let transport = ReplayTransport::new("test", Cursor::new(data.as_bytes().to_vec()));
        Engine::new(&config, Box::new(transport))
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_poll_feeds_lines_and_ticks() {
        let mut engine = engine("Normal,X:1,Y:2,Z:3,MAG:4\nTremor\nbad line\n", 32);

        assert_eq!(engine.poll_at(secs(0)).unwrap(), 3);
        let snap = engine.snapshot();
        assert_eq!(snap.series.len(), 1);
        assert_eq!(snap.alert, Some(AlertKind::Tremor));
        assert_eq!(snap.stats.parse_errors, 1);

        // quiet period: nothing left to read, alert still expires
        assert_eq!(engine.poll_at(secs(6)).unwrap(), 0);
        assert_eq!(engine.snapshot().alert, None);
        assert_eq!(engine.transport_status(), TransportStatus::Exhausted);
    }

    #[test]
    fn test_poll_respects_line_budget() {
        let data: String = (0..10).map(|i| format!("Normal,X:{i},Y:0,Z:0,MAG:{i}\n")).collect();
        let mut engine = engine(&data, 4);

        assert_eq!(engine.poll_at(secs(0)).unwrap(), 4);
        assert_eq!(engine.poll_at(secs(0)).unwrap(), 4);
        assert_eq!(engine.poll_at(secs(0)).unwrap(), 2);
        assert_eq!(engine.poll_at(secs(0)).unwrap(), 0);

        let seqs: Vec<u64> = engine.snapshot().series.iter().map(|s| s.sequence).collect();
        assert_eq!(seqs, (0..10).collect::<Vec<u64>>());
    }

    /// Delivers its lines, then fails every `has_data` call like an unplugged device
    struct FailingTransport {
        lines: Vec<String>,
    }

    impl Transport for FailingTransport {
        fn name(&self) -> &str {
            "failing"
        }

        fn status(&self) -> TransportStatus {
            if self.lines.is_empty() {
                TransportStatus::Error
            } else {
                TransportStatus::Connected
            }
        }

        fn has_data(&mut self) -> Result<bool, TransportError> {
            if self.lines.is_empty() {
                Err(TransportError::Io {
                    port: "failing".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "unplugged"),
                })
            } else {
                Ok(true)
            }
        }

        fn read_line(&mut self) -> Result<Option<String>, TransportError> {
            Ok(self.lines.pop())
        }

        fn close(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[test]
    fn test_alert_expires_after_transport_failure() {
        let transport = FailingTransport {
            lines: vec!["Earthquake".to_string()],
        };
        let mut engine = Engine::new(&SessionConfig::default(), Box::new(transport));

        // the line is fed, then the follow-up has_data fails
        assert!(engine.poll_at(secs(0)).is_err());
        assert_eq!(engine.snapshot().alert, Some(AlertKind::Earthquake));

        assert!(engine.poll_at(secs(3)).is_err());
        assert_eq!(engine.snapshot().alert, Some(AlertKind::Earthquake));

        assert!(engine.poll_at(secs(60)).is_err());
        assert_eq!(engine.snapshot().alert, None);
        assert_eq!(engine.session().stats().alerts_expired, 1);
    }

    #[test]
    fn test_close_stops_reading() {
        let mut engine = engine("Tremor\n", 32);
        engine.close().unwrap();
        assert_eq!(engine.transport_status(), TransportStatus::Closed);
        assert_eq!(engine.poll_at(secs(0)).unwrap(), 0);
        assert_eq!(engine.session().alert(), None);
    }

    #[tokio::test]
    async fn test_run_stops_when_replay_exhausted() {
        let mut engine = engine("Normal,X:1,Y:1,Z:1,MAG:2\nEarthquake\n", 32);
        let (_tx, rx) = broadcast::channel(1);

        engine.run(rx).await.unwrap();

        let snap = engine.snapshot();
        assert_eq!(snap.series.len(), 1);
        assert_eq!(snap.stats.earthquake_alerts, 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let config = SessionConfig::default();
        let sim = crate::sensors::DeviceSimulator::new(&crate::config::SimulatorConfig {
            interval_ms: 1,
            seed: Some(11),
            ..Default::default()
        });
        let mut engine = Engine::new(&config, Box::new(sim));
        let (tx, rx) = broadcast::channel(1);

        tx.send(()).unwrap();
        engine.run(rx).await.unwrap();
    }
}
