use std::io;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("sample count must be positive")]
    EmptyTable,

    #[error("amplitude at sample {index} is not finite")]
    NotFinite { index: usize },

    #[error("sample {index} quantizes to {value}, outside the signed 16-bit range")]
    Overflow { index: usize, value: i64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("line {line}: invalid hex token {token:?}")]
    BadToken { line: usize, token: String },

    #[error("line {line}: invalid address {address:?}")]
    BadAddress { line: usize, address: String },

    #[error("line {line}: expected address {expected}, found {found}")]
    AddressGap {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("initial payload has not been sent")]
    NotStarted,

    #[error("no inbound data within the read timeout")]
    Timeout,

    #[error("received {} bytes that are not printable ascii", .bytes.len())]
    Decode { bytes: Vec<u8> },

    #[error("serial device error: {0}")]
    Device(#[source] io::Error),
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ProbeError::Timeout,
            _ => ProbeError::Device(err),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
