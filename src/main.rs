//! # rdepack CLI
//!
//! Command-line driver for the RDE input structuring pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Classify a submission and allocate the structured output layout
//! rdepack structure data/inputdata data/output
//!
//! # Force a mode (overrides ExcelInvoice auto-detection)
//! rdepack structure data/inputdata data/output --mode rdeformat
//!
//! # Inspect a manifest workbook
//! rdepack inspect data/inputdata/sample_excel_invoice.xlsx
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbosity());
    cli::dispatch(args)
}
