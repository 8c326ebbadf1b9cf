// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Simulated seismometer for demo mode and bench testing

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use rand::prelude::*;
use rand_distr::StandardNormal;
use tracing::debug;

use super::{Transport, TransportError, TransportStatus};
use crate::config::SimulatorConfig;

/// Emits device-format lines at a fixed pace
pub struct DeviceSimulator {
    name: String,
    status: TransportStatus,
    rng: StdRng,
    noise_std: f64,
    interval: Duration,
    last_emit: Option<Instant>,
    queued: VecDeque<String>,

    tremor_probability: f64,
    earthquake_probability: f64,
    garbage_probability: f64,

    // Simulation state
    step: u64,
    shaking: u32,
}

impl DeviceSimulator {
    /// Simulator seeded from config, or from entropy when no seed is set
    pub fn new(config: &SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            name: "simulator".to_string(),
            status: TransportStatus::Connected,
            rng,
            // resting noise of a cheap MEMS accelerometer, in raw counts
            noise_std: 1.5,
            interval: Duration::from_millis(config.interval_ms),
            last_emit: None,
            queued: VecDeque::new(),
            tremor_probability: config.tremor_probability,
            earthquake_probability: config.earthquake_probability,
            garbage_probability: config.garbage_probability,
            step: 0,
            shaking: 0,
        }
    }

    /// Produce the next line the device would print
    pub fn next_line(&mut self) -> String {
        self.step += 1;

        if self.rng.gen::<f64>() < self.garbage_probability {
            return "Normal,X:--,Y:??".to_string();
        }

        let roll = self.rng.gen::<f64>();
        if roll < self.earthquake_probability {
            self.shaking = 40;
            return "Earthquake detected!".to_string();
        }
        if roll < self.earthquake_probability + self.tremor_probability {
            self.shaking = self.shaking.max(15);
            return "Tremor detected!".to_string();
        }

        let gain = if self.shaking > 0 {
            self.shaking -= 1;
            6.0
        } else {
            1.0
        };

        let x = self.axis(gain);
        let y = self.axis(gain);
        let z = self.axis(gain);
        let magnitude = (((x * x + y * y + z * z) as f64).sqrt()).round() as i32;

        format!("Normal,X:{},Y:{},Z:{},MAG:{}", x, y, z, magnitude)
    }

    fn axis(&mut self, gain: f64) -> i32 {
        let v: f64 = self.rng.sample(StandardNormal);
        (v * self.noise_std * gain).round() as i32
    }

    /// Lines produced so far
    pub fn lines_emitted(&self) -> u64 {
        self.step
    }

    fn due(&self, now: Instant) -> bool {
        match self.last_emit {
            None => true,
            Some(t) => now.duration_since(t) >= self.interval,
        }
    }
}

impl Transport for DeviceSimulator {
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
        let now = Instant::now();
        if self.queued.is_empty() && self.due(now) {
            let line = self.next_line();
            debug!("Simulated line: {}", line);
            self.queued.push_back(line);
            self.last_emit = Some(now);
        }
        Ok(!self.queued.is_empty())
    }

    fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        if self.status == TransportStatus::Closed {
            return Err(TransportError::Closed(self.name.clone()));
        }
        Ok(self.queued.pop_front())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.queued.clear();
        self.status = TransportStatus::Closed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{parse_line, ParsedEvent};

    fn config(seed: u64) -> SimulatorConfig {
        SimulatorConfig {
            interval_ms: 0,
            tremor_probability: 0.05,
            earthquake_probability: 0.02,
            garbage_probability: 0.05,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_seeded_simulator_is_reproducible() {
        let mut a = DeviceSimulator::new(&config(7));
        let mut b = DeviceSimulator::new(&config(7));
        for _ in 0..50 {
            assert_eq!(a.next_line(), b.next_line());
        }
    }

    #[test]
    fn test_quiet_simulator_emits_only_readings() {
        let mut sim = DeviceSimulator::new(&SimulatorConfig {
            tremor_probability: 0.0,
            earthquake_probability: 0.0,
            garbage_probability: 0.0,
            ..config(1)
        });
        for _ in 0..200 {
            let line = sim.next_line();
            assert!(
                matches!(parse_line(&line), ParsedEvent::Reading { .. }),
                "unexpected line {line}"
            );
        }
        assert_eq!(sim.lines_emitted(), 200);
    }

    #[test]
    fn test_transport_paces_lines() {
        let mut sim = DeviceSimulator::new(&SimulatorConfig {
            interval_ms: 60_000,
            ..config(3)
        });
        assert!(sim.has_data().unwrap());
        assert!(sim.read_line().unwrap().is_some());
        // next line is not due for a minute
        assert!(!sim.has_data().unwrap());
        assert_eq!(sim.read_line().unwrap(), None);
    }

    #[test]
    fn test_close_stops_output() {
        let mut sim = DeviceSimulator::new(&config(5));
        sim.close().unwrap();
        assert_eq!(sim.status(), TransportStatus::Closed);
        assert!(!sim.has_data().unwrap());
        assert!(sim.read_line().is_err());
    }
}
