use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info, warn};

use crate::config::ToolConfig;
use crate::fixed_point::{to_hex, OverflowPolicy};
use crate::mem_file::{write_mem_file, MemFormat};
use crate::plot::{render_table, PlotStyle};
use crate::sine_table::{SineTable, SineTableConfig};

/// Flags shared by both generator binaries.
#[derive(Args, Debug, Clone, Default)]
pub struct GeneratorArgs {
    /// JSON config file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of samples (ROM addresses)
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Cycle multiplier f; the table spans 0..f*pi/4 radians
    #[arg(short = 'f', long)]
    pub multiplier: Option<u32>,

    /// Handling of +1.0 amplitudes that do not fit in 16 bits
    #[arg(long, value_enum)]
    pub overflow: Option<OverflowPolicy>,

    /// Output memory file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Memory instance path for the ModelSim header
    #[arg(long)]
    pub instance: Option<String>,

    /// PNG plot of the table
    #[arg(long, conflicts_with = "no_plot")]
    pub plot: Option<PathBuf>,

    /// Skip the plot
    #[arg(long)]
    pub no_plot: bool,

    /// Write the effective config as JSON and continue
    #[arg(long)]
    pub write_config: Option<PathBuf>,
}

impl GeneratorArgs {
    pub fn resolve(&self) -> Result<ToolConfig> {
        let mut config = ToolConfig::load_or_default(self.config.as_deref())
            .context("loading config")?;

        if let Some(samples) = self.samples {
            config.sine.samples = samples;
        }
        if let Some(multiplier) = self.multiplier {
            config.sine.cycle_multiplier = multiplier;
        }
        if let Some(overflow) = self.overflow {
            config.sine.overflow = overflow;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(instance) = &self.instance {
            config.output.instance = instance.clone();
        }
        if let Some(plot) = &self.plot {
            config.output.plot = Some(plot.clone());
        }
        if self.no_plot {
            config.output.plot = None;
        }

        config.validate()?;

        if let Some(path) = &self.write_config {
            config
                .save(path)
                .with_context(|| format!("writing config to {}", path.display()))?;
            info!(path = %path.display(), "config written");
        }
        Ok(config)
    }
}

#[derive(Clone, Debug)]
pub struct GenerateConfig {
    pub table: SineTableConfig,
    pub format: MemFormat,
    pub output: PathBuf,
    pub plot: Option<PathBuf>,
    pub style: PlotStyle,
    pub echo_tokens: bool,
}

/// Builds the table, writes the memory file, then renders the plot.
///
/// Only the memory file is fatal; a failed plot is logged and skipped.
pub fn generate_mem_file(config: &GenerateConfig) -> Result<SineTable> {
    let table = SineTable::generate(&config.table).context("building sine table")?;

    write_mem_file(&table, &config.format, &config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;
    info!(
        samples = table.len(),
        path = %config.output.display(),
        "memory file written"
    );

    if config.echo_tokens {
        for word in table.words() {
            debug!("{}", to_hex(word));
        }
    }

    if let Some(path) = &config.plot {
        match render_table(&table, &config.style, path) {
            Ok(()) => info!(path = %path.display(), "plot written"),
            Err(e) => warn!(path = %path.display(), error = %e, "plot failed"),
        }
    }

    Ok(table)
}
