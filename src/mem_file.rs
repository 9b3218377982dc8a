use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::DecodeError;
use crate::fixed_point::{from_hex, to_hex};
use crate::sine_table::SineTable;

pub const DEFAULT_OUTPUT: &str = "MyFile.txt";
pub const DEFAULT_INSTANCE: &str = "/ram_tb/dpram1/mem";

pub const HEADER_BANNER: &str =
    "// memory data file (do not edit the following line - required for mem load use)";
pub const HEADER_FORMAT: &str =
    "// format=mti addressradix=d dataradix=d version=1.0 wordsperline=1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemFormat {
    Modelsim { instance: String },
    Vivado,
}

impl MemFormat {
    pub fn modelsim() -> Self {
        MemFormat::Modelsim {
            instance: DEFAULT_INSTANCE.to_string(),
        }
    }

    pub fn header_lines(&self) -> Vec<String> {
        match self {
            MemFormat::Modelsim { instance } => vec![
                HEADER_BANNER.to_string(),
                format!("// instance={}", instance),
                HEADER_FORMAT.to_string(),
            ],
            MemFormat::Vivado => Vec::new(),
        }
    }
}

pub fn is_header_safe(instance: &str) -> bool {
    instance.chars().all(|c| !c.is_whitespace() && !c.is_control())
}

pub fn write_mem<W: Write>(table: &SineTable, format: &MemFormat, mut out: W) -> io::Result<()> {
    if let MemFormat::Modelsim { instance } = format {
        if !is_header_safe(instance) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("instance {:?} would break the header", instance),
            ));
        }
    }

    for line in format.header_lines() {
        writeln!(out, "{}", line)?;
    }

    for sample in table.samples() {
        match format {
            MemFormat::Modelsim { .. } => writeln!(out, "{}: {}", sample.index, to_hex(sample.word))?,
            MemFormat::Vivado => writeln!(out, "{}", to_hex(sample.word))?,
        }
    }
    out.flush()
}

pub fn write_mem_file<P: AsRef<Path>>(table: &SineTable, format: &MemFormat, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    write_mem(table, format, BufWriter::new(file))
}

/// Parses a file produced by [`write_mem`] back into words.
///
/// `//` lines are skipped. ModelSim addresses must run 0, 1, 2, ...
pub fn read_mem(text: &str, format: &MemFormat) -> Result<Vec<i16>, DecodeError> {
    let mut words = Vec::new();

    for (n, raw) in text.lines().enumerate() {
        let line_no = n + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let token = match format {
            MemFormat::Modelsim { .. } => {
                let (addr, word) = line.split_once(':').ok_or_else(|| DecodeError::BadAddress {
                    line: line_no,
                    address: line.to_string(),
                })?;
                let addr = addr.trim();
                let found = addr.parse::<usize>().map_err(|_| DecodeError::BadAddress {
                    line: line_no,
                    address: addr.to_string(),
                })?;
                if found != words.len() {
                    return Err(DecodeError::AddressGap {
                        line: line_no,
                        expected: words.len(),
                        found,
                    });
                }
                word.trim()
            }
            MemFormat::Vivado => line,
        };

        let word = from_hex(token).ok_or_else(|| DecodeError::BadToken {
            line: line_no,
            token: token.to_string(),
        })?;
        words.push(word);
    }

    Ok(words)
}
