// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Configuration module

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Log level
    pub log_level: String,

    /// Use the simulated device when no port is given
    pub demo_mode: bool,

    /// Serial link configuration
    pub serial: SerialConfig,

    /// Session (rolling window and alerts) configuration
    pub session: SessionConfig,

    /// Simulated device configuration
    pub simulator: SimulatorConfig,

    /// GUI configuration
    pub gui: GuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "QuakeWatch".to_string(),
            log_level: "info".to_string(),
            demo_mode: false,
            serial: SerialConfig::default(),
            session: SessionConfig::default(),
            simulator: SimulatorConfig::default(),
            gui: GuiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Reject values the session or renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.session.capacity == 0 {
            bail!("session.capacity must be at least 1");
        }
        if self.session.poll_interval_ms == 0 {
            bail!("session.poll_interval_ms must be positive");
        }
        if self.session.max_lines_per_poll == 0 {
            bail!("session.max_lines_per_poll must be at least 1");
        }
        if Duration::try_from_secs_f64(self.session.alert_duration_secs).is_err() {
            bail!(
                "session.alert_duration_secs must be a non-negative, representable number of seconds, got {}",
                self.session.alert_duration_secs
            );
        }
        if self.serial.baud_rate == 0 {
            bail!("serial.baud_rate must be positive");
        }
        if self.gui.y_min >= self.gui.y_max {
            bail!("gui.y_min ({}) must be below gui.y_max ({})", self.gui.y_min, self.gui.y_max);
        }
        for (name, p) in [
            ("tremor_probability", self.simulator.tremor_probability),
            ("earthquake_probability", self.simulator.earthquake_probability),
            ("garbage_probability", self.simulator.garbage_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("simulator.{} must be within [0, 1], got {}", name, p);
            }
        }
        Ok(())
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("quakewatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Serial link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyACM0` or `COM8`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    /// Baud rate
    pub baud_rate: u32,

    /// Driver read timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: 9600,
            timeout_ms: 1000,
        }
    }
}

/// Rolling window and alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Samples kept in the rolling window
    pub capacity: usize,

    /// Seconds an alert stays active
    pub alert_duration_secs: f64,

    /// Poll/redraw period in milliseconds
    pub poll_interval_ms: u64,

    /// Upper bound on lines consumed per poll
    pub max_lines_per_poll: usize,
}

impl SessionConfig {
    /// Alert duration as a `Duration`; validated configs always convert
    pub fn alert_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.alert_duration_secs)
            .unwrap_or(crate::core::DEFAULT_ALERT_DURATION)
    }

    /// Poll period as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: crate::core::DEFAULT_CAPACITY,
            alert_duration_secs: crate::core::DEFAULT_ALERT_DURATION.as_secs_f64(),
            poll_interval_ms: 100,
            max_lines_per_poll: 32,
        }
    }
}

/// Simulated device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Milliseconds between emitted lines
    pub interval_ms: u64,

    /// Chance per line of a tremor alert
    pub tremor_probability: f64,

    /// Chance per line of an earthquake alert
    pub earthquake_probability: f64,

    /// Chance per line of a corrupted line
    pub garbage_probability: f64,

    /// Fixed RNG seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            tremor_probability: 0.01,
            earthquake_probability: 0.003,
            garbage_probability: 0.01,
            seed: None,
        }
    }
}

/// GUI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Enable VSync
    pub vsync: bool,

    /// Theme
    pub theme: Theme,

    /// Lower bound of the chart's y axis
    pub y_min: f64,

    /// Upper bound of the chart's y axis
    pub y_max: f64,

    /// Plot X/Y/Z alongside magnitude
    pub show_axes: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            vsync: true,
            theme: Theme::Light,
            y_min: -30.0,
            y_max: 30.0,
            show_axes: false,
        }
    }
}

/// UI color theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    /// Dark visuals
    Dark,
    /// White chart on a light background
    Light,
    /// Follow the platform default
    System,
}
