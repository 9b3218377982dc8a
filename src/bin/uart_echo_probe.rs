use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{debug, error, info, warn};

use bram_rom_tools::config::ToolConfig;
use bram_rom_tools::error::ProbeError;
use bram_rom_tools::logging;
use bram_rom_tools::probe::{hex_dump, initial_payload, Probe};

/// Sends a long text to a UART-attached FPGA and answers everything it echoes back.
#[derive(Parser)]
#[command(name = "uart-echo-probe", version, about)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serial port, e.g. COM9 or /dev/ttyUSB0
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Read timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Maximum bytes read per event
    #[arg(long)]
    read_limit: Option<usize>,

    /// Stop after this many events instead of running until interrupted
    #[arg(long)]
    max_events: Option<u64>,

    /// Write the effective config as JSON and continue
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut config = ToolConfig::load_or_default(cli.config.as_deref()).context("loading config")?;
    if let Some(port) = cli.port {
        config.probe.port = port;
    }
    if let Some(baud) = cli.baud {
        config.probe.baud_rate = baud;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.probe.timeout_ms = timeout_ms;
    }
    if let Some(read_limit) = cli.read_limit {
        config.probe.read_limit = read_limit;
    }
    config.validate()?;
    if let Some(path) = &cli.write_config {
        config
            .save(path)
            .with_context(|| format!("writing config to {}", path.display()))?;
    }

    let probe_config = config.probe;
    println!("UART echo probe");
    println!("---------------");
    println!(
        "{} @ {} baud, 8N1, timeout {} ms",
        probe_config.port, probe_config.baud_rate, probe_config.timeout_ms
    );

    let port = probe_config
        .open()
        .with_context(|| format!("opening {}", probe_config.port))?;
    let mut probe = Probe::new(port, &probe_config);
    probe.start(initial_payload()).context("sending initial payload")?;

    loop {
        if let Some(max) = cli.max_events {
            if probe.events() >= max {
                info!(events = probe.events(), "event limit reached");
                return Ok(());
            }
        }

        match probe.next_event() {
            Ok(received) => {
                println!("[{}] the text is", Local::now().format("%H:%M:%S%.3f"));
                println!("{:?}", received.text);
            }
            Err(ProbeError::Timeout) => debug!("no data within timeout"),
            Err(ProbeError::Decode { bytes }) => {
                warn!(len = bytes.len(), bytes = %hex_dump(&bytes), "received non-text bytes");
            }
            Err(e) => {
                error!(error = %e, "serial link failed");
                return Err(e).context("serial probe stopped");
            }
        }
    }
}
