use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mem_file::{is_header_safe, DEFAULT_INSTANCE, DEFAULT_OUTPUT};
use crate::probe::ProbeConfig;
use crate::sine_table::SineTableConfig;

pub const DEFAULT_PLOT: &str = "sinewave.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Memory instance named in the ModelSim header.
    pub instance: String,
    /// PNG written next to the data file; `None` disables the plot.
    pub plot: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from(DEFAULT_OUTPUT),
            instance: DEFAULT_INSTANCE.to_string(),
            plot: Some(PathBuf::from(DEFAULT_PLOT)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub sine: SineTableConfig,
    pub output: OutputConfig,
    pub probe: ProbeConfig,
}

impl ToolConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config: ToolConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sine.samples == 0 {
            return Err(ConfigError::Invalid("sine.samples must be positive".into()));
        }
        if self.output.instance.is_empty() {
            return Err(ConfigError::Invalid("output.instance must not be empty".into()));
        }
        if !is_header_safe(&self.output.instance) {
            return Err(ConfigError::Invalid(
                "output.instance must not contain whitespace or control characters".into(),
            ));
        }
        if self.probe.port.trim().is_empty() {
            return Err(ConfigError::Invalid("probe.port must not be empty".into()));
        }
        if self.probe.baud_rate == 0 {
            return Err(ConfigError::Invalid("probe.baud_rate must be positive".into()));
        }
        if self.probe.timeout_ms == 0 {
            return Err(ConfigError::Invalid("probe.timeout_ms must be positive".into()));
        }
        if self.probe.read_limit == 0 {
            return Err(ConfigError::Invalid("probe.read_limit must be positive".into()));
        }
        Ok(())
    }
}
