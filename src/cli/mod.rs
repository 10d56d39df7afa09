use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rdepack::modes::InputMode;
use std::path::PathBuf;

mod config;
mod inspect;
mod structure;

/// rdepack - RDE Input Structuring Pipeline
#[derive(Parser)]
#[command(name = "rdepack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Explicit input-mode override for the structure command.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// Preformatted-archive submissions
    Rdeformat,
    /// Flat multi-file submissions
    Multifile,
}

impl From<ModeArg> for InputMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Rdeformat => InputMode::RdeFormat,
            ModeArg::Multifile => InputMode::MultiFile,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an input directory and allocate the structured output layout
    Structure {
        /// Submission input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output base directory (created if absent)
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Explicit input mode (overrides ExcelInvoice auto-detection)
        #[arg(short = 'm', long, value_enum)]
        mode: Option<ModeArg>,

        /// Invoice schema path handed to downstream processors
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Parse an ExcelInvoice manifest and print its tables
    Inspect {
        /// Manifest workbook path (*_excel_invoice.xlsx)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Structure {
            input,
            output,
            mode,
            schema,
            config,
        } => structure::run(input, output, mode, schema, config),
        Commands::Inspect { manifest } => inspect::run(manifest),
    }
}
