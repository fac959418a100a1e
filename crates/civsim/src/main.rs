use std::path::PathBuf;

use civsim::commands::{self, RunOptions};
use civsim::input::parse_assignment;
use civsim::init_logging;
use civsim::report::OutputFormat;
use civsim_core::Factor;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "civsim")]
#[command(about = "Score the outcome of a society from its factor sliders")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one factor set
    Run {
        /// Start from a named preset
        #[arg(short, long)]
        preset: Option<String>,

        /// Preset catalog to search instead of the built-in one
        #[arg(long)]
        presets_file: Option<PathBuf>,

        /// YAML or JSON factor file
        #[arg(short, long)]
        factors: Option<PathBuf>,

        /// Override a single factor, e.g. --set corruption=80
        #[arg(short, long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
        overrides: Vec<Factor>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Random spread applied to preset values
        #[arg(long, default_value_t = 0.0)]
        variation: f64,

        /// Start from random sliders instead of catalog defaults
        #[arg(long)]
        randomize: bool,

        /// Engine configuration file
        #[arg(short, long)]
        weights: Option<PathBuf>,

        /// Include every intermediate value
        #[arg(short, long)]
        breakdown: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List available presets
    Presets {
        /// Preset file to list instead of the built-in catalog
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Evaluate every preset and print a summary
    Batch {
        /// Preset file to evaluate instead of the built-in catalog
        #[arg(long)]
        file: Option<PathBuf>,

        /// Engine configuration file
        #[arg(short, long)]
        weights: Option<PathBuf>,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List every recognized factor with its default
    Factors {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the default engine configuration as YAML
    Weights,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let output = match args.command {
        Command::Run {
            preset,
            presets_file,
            factors,
            overrides,
            seed,
            variation,
            randomize,
            weights,
            breakdown,
            format,
        } => commands::run(&RunOptions {
            preset,
            presets_file,
            factors_file: factors,
            overrides,
            seed,
            variation,
            randomize,
            weights,
            breakdown,
            format,
        })?,
        Command::Presets { file, format } => commands::list_presets(file.as_ref(), format)?,
        Command::Batch {
            file,
            weights,
            seed,
            format,
        } => commands::batch(file.as_ref(), weights.as_ref(), seed, format)?,
        Command::Factors { format } => commands::list_factors(format)?,
        Command::Weights => commands::default_weights()?,
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
