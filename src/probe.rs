use std::io::{self, Read, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::error::ProbeError;

pub const DEFAULT_PORT: &str = "COM9";
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_READ_LIMIT: usize = 60;

pub const PROBE_PAYLOAD: &str =
    "This is a test text to demostrate that the UART works without issue at 115200";

static INITIAL_PAYLOAD: &str = include_str!("../assets/lorem_payload.txt");

pub fn initial_payload() -> &'static [u8] {
    INITIAL_PAYLOAD.as_bytes()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub port: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
    pub read_limit: usize,
    pub probe_payload: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            read_limit: DEFAULT_READ_LIMIT,
            probe_payload: PROBE_PAYLOAD.to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// 8N1, no flow control.
    pub fn open(&self) -> serialport::Result<Box<dyn SerialPort>> {
        serialport::new(&self.port, self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.timeout())
            .open()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Setup,
    Poll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    pub bytes: Vec<u8>,
    pub text: String,
}

pub struct Probe<L> {
    link: L,
    probe_payload: Vec<u8>,
    read_limit: usize,
    state: ProbeState,
    events: u64,
}

impl<L: Read + Write> Probe<L> {
    pub fn new(link: L, config: &ProbeConfig) -> Self {
        Probe {
            link,
            probe_payload: config.probe_payload.as_bytes().to_vec(),
            read_limit: config.read_limit.max(1),
            state: ProbeState::Setup,
            events: 0,
        }
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// Number of availability events answered so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    pub fn get_ref(&self) -> &L {
        &self.link
    }

    pub fn into_inner(self) -> L {
        self.link
    }

    /// Sends the initial payload and enters the poll state. Only the first call writes.
    pub fn start(&mut self, payload: &[u8]) -> Result<(), ProbeError> {
        if self.state == ProbeState::Poll {
            return Ok(());
        }
        self.link.write_all(payload).map_err(ProbeError::Device)?;
        self.link.flush().map_err(ProbeError::Device)?;
        info!(bytes = payload.len(), "initial payload sent");
        self.state = ProbeState::Poll;
        Ok(())
    }

    /// Blocks until inbound data arrives, answers it with the probe payload,
    /// then reads up to the line limit.
    pub fn next_event(&mut self) -> Result<Received, ProbeError> {
        if self.state == ProbeState::Setup {
            return Err(ProbeError::NotStarted);
        }

        let first = self.read_first()?;

        self.link.write_all(&self.probe_payload).map_err(ProbeError::Device)?;
        self.link.flush().map_err(ProbeError::Device)?;
        self.events += 1;
        debug!(event = self.events, "probe payload sent");

        let mut line = vec![first];
        let mut byte = [0u8; 1];
        while line.len() < self.read_limit && line.last() != Some(&b'\n') {
            match self.link.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => line.push(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if is_timeout(&e) => break,
                Err(e) => return Err(ProbeError::Device(e)),
            }
        }

        decode(line)
    }

    fn read_first(&mut self) -> Result<u8, ProbeError> {
        let mut byte = [0u8; 1];
        loop {
            match self.link.read(&mut byte) {
                Ok(0) => {
                    return Err(ProbeError::Device(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "serial link closed",
                    )))
                }
                Ok(_) => return Ok(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

fn is_printable(b: u8) -> bool {
    b.is_ascii_graphic() || matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

pub fn decode(bytes: Vec<u8>) -> Result<Received, ProbeError> {
    if !bytes.iter().all(|&b| is_printable(b)) {
        return Err(ProbeError::Decode { bytes });
    }
    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok(Received { bytes, text })
}

pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
