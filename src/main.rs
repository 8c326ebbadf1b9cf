// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! QuakeWatch - live monitor for a serial seismometer
//!
//! Reads `Normal,X:..,Y:..,Z:..,MAG:..` / `Tremor` / `Earthquake` lines from the device and
//! shows the magnitude as a live strip chart with a timed alert banner.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::sync::broadcast;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use quakewatch::config::Config;
use quakewatch::core::Engine;
use quakewatch::sensors::{DeviceSimulator, ReplayTransport, Transport};
use quakewatch::VERSION;

/// QuakeWatch - live monitor for a serial seismometer
#[derive(Parser, Debug)]
#[command(name = "quakewatch")]
#[command(version = VERSION)]
#[command(about = "Real-time earthquake visualization from a serial accelerometer")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port (e.g. /dev/ttyACM0, COM8)
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Replay a captured device log instead of reading a port
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Use the simulated device
    #[arg(long)]
    demo: bool,

    /// Run without the GUI
    #[arg(long)]
    headless: bool,

    /// Print the final snapshot as JSON (headless mode)
    #[arg(long)]
    json: bool,

    /// List serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging (every raw line)
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::from_str(&config.log_level).unwrap_or(Level::INFO)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("QuakeWatch v{}", VERSION);
    info!("Configuration loaded from {:?}", config_path);

    if args.list_ports {
        return list_ports();
    }

    // Override with command line args
    if args.demo {
        config.demo_mode = true;
    }
    if let Some(port) = args.port.clone() {
        config.serial.port = Some(port);
    }
    if let Some(baud) = args.baud {
        config.serial.baud_rate = baud;
    }
    config.validate()?;

    let transport = open_transport(&args, &config)?;
    let engine = Engine::new(&config.session, transport);

    if args.headless {
        info!("Starting in headless mode...");
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(run_headless(engine, args.json))?;
    } else {
        #[cfg(feature = "gui")]
        {
            info!("Starting strip chart...");
            quakewatch::ui::run_gui(config, engine)?;
        }

        #[cfg(not(feature = "gui"))]
        {
            drop(engine);
            bail!("GUI feature not enabled. Build with --features gui or use --headless");
        }
    }

    Ok(())
}

/// Pick the line source: replay file, then serial port, then the simulator.
fn open_transport(args: &Args, config: &Config) -> Result<Box<dyn Transport>> {
    if let Some(path) = &args.replay {
        return Ok(Box::new(ReplayTransport::open(path)?));
    }

    if let Some(port) = &config.serial.port {
        return open_serial(config, port);
    }

    if config.demo_mode {
        info!("Demo mode: using simulated seismometer");
        return Ok(Box::new(DeviceSimulator::new(&config.simulator)));
    }

    bail!("No input selected. Pass --port <PORT>, --replay <FILE> or --demo")
}

#[cfg(feature = "serial")]
fn open_serial(config: &Config, port: &str) -> Result<Box<dyn Transport>> {
    let transport = quakewatch::sensors::SerialTransport::open(&config.serial, port)?;
    Ok(Box::new(transport))
}

#[cfg(not(feature = "serial"))]
fn open_serial(_config: &Config, port: &str) -> Result<Box<dyn Transport>> {
    bail!("Cannot open {}: serial feature not enabled. Build with --features serial", port)
}

#[cfg(feature = "serial")]
fn list_ports() -> Result<()> {
    let ports = quakewatch::sensors::list_ports()?;
    if ports.is_empty() {
        warn!("No serial ports found");
    }
    for port in ports {
        println!("{}", port);
    }
    Ok(())
}

#[cfg(not(feature = "serial"))]
fn list_ports() -> Result<()> {
    warn!("Serial support not compiled in");
    bail!("serial feature not enabled. Build with --features serial")
}

/// Run the poll loop without a window until Ctrl+C or end of input
async fn run_headless(mut engine: Engine, print_json: bool) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, cleaning up...");
            let _ = shutdown_tx.send(());
        }
    });

    info!("Press Ctrl+C to stop");
    let result = engine.run(shutdown_rx).await;

    if let Err(e) = engine.close() {
        warn!("Error closing transport: {}", e);
    }

    if print_json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }

    result?;
    info!("QuakeWatch shutdown complete");
    Ok(())
}
