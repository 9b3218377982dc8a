use anyhow::Result;
use clap::Parser;

use bram_rom_tools::generate::{generate_mem_file, GenerateConfig, GeneratorArgs};
use bram_rom_tools::logging;
use bram_rom_tools::mem_file::MemFormat;
use bram_rom_tools::plot::PlotStyle;

/// Quarter-period sine ROM contents, one hex word per line, for Vivado.
///
/// Vivado pads unused addresses of the block RAM with zeros.
#[derive(Parser)]
#[command(name = "sinewave-vivado", version, about)]
struct Cli {
    #[command(flatten)]
    generator: GeneratorArgs,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = cli.generator.resolve()?;

    println!("Sine ROM generator (Vivado)");
    println!("---------------------------");
    println!(
        "{} samples, f = {}",
        config.sine.samples, config.sine.cycle_multiplier
    );

    generate_mem_file(&GenerateConfig {
        table: config.sine,
        format: MemFormat::Vivado,
        output: config.output.path,
        plot: config.output.plot,
        style: PlotStyle::default(),
        echo_tokens: true,
    })?;
    Ok(())
}
