use anyhow::Result;
use clap::Parser;

use bram_rom_tools::generate::{generate_mem_file, GenerateConfig, GeneratorArgs};
use bram_rom_tools::logging;
use bram_rom_tools::mem_file::MemFormat;
use bram_rom_tools::plot::PlotStyle;

/// Quarter-period sine ROM contents as a ModelSim `.mem` file.
#[derive(Parser)]
#[command(name = "sinewave-modelsim", version, about)]
struct Cli {
    #[command(flatten)]
    generator: GeneratorArgs,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = cli.generator.resolve()?;

    println!("Sine ROM generator (ModelSim)");
    println!("-----------------------------");
    println!(
        "{} samples, f = {}, instance {}",
        config.sine.samples, config.sine.cycle_multiplier, config.output.instance
    );

    generate_mem_file(&GenerateConfig {
        table: config.sine,
        format: MemFormat::Modelsim {
            instance: config.output.instance,
        },
        output: config.output.path,
        plot: config.output.plot,
        style: PlotStyle {
            title: "Single period sine wave".to_string(),
            x_label: "Sample specifying the address in block ram".to_string(),
            y_label: "Amplitude value stored in block ram".to_string(),
            ..PlotStyle::default()
        },
        echo_tokens: false,
    })?;
    Ok(())
}
