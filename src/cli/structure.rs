use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use rdepack::modes::InputMode;
use rdepack::pipeline::{self, RunOptions, StructuredRun};

use crate::cli::config::Config;
use crate::cli::ModeArg;

/// Classify the input directory and allocate the output layout.
pub fn run(
    input: PathBuf,
    output: PathBuf,
    mode: Option<ModeArg>,
    schema: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    if !input.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", input.display());
    }

    let config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    // CLI flags win over config values.
    let mode = match mode {
        Some(arg) => InputMode::from(arg),
        None => config.mode()?.unwrap_or_default(),
    };
    let schema_path = schema.or(config.structuring.schema_path);

    info!("rdepack structure");
    info!("=================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());

    let options = RunOptions { mode, schema_path };
    match pipeline::run(&input, &output, &options) {
        Ok(run) => {
            print_summary(&run);
            Ok(())
        }
        Err(err) => {
            write_job_failure_log(&output, err.code(), &err.to_string());
            Err(err).context("structuring run failed")
        }
    }
}

fn print_summary(run: &StructuredRun) {
    #[cfg(feature = "colorized_output")]
    {
        use console::style;
        println!(
            "{} mode: {}",
            style("✓").green().bold(),
            style(run.mode_name).cyan()
        );
        for bundle in &run.resources {
            println!(
                "  tile {:04}: {} raw file(s) -> {}",
                bundle.index,
                bundle.raw_files.len(),
                bundle.raw.display()
            );
        }
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("mode: {}", run.mode_name);
        for bundle in &run.resources {
            println!(
                "  tile {:04}: {} raw file(s) -> {}",
                bundle.index,
                bundle.raw_files.len(),
                bundle.raw.display()
            );
        }
    }

    if let Some(manifest) = &run.manifest {
        println!("  manifest: {}", manifest.display());
    }
}

/// Best-effort failure record for the ingestion side; the original error is
/// still propagated.
fn write_job_failure_log(output: &std::path::Path, code: u16, message: &str) {
    let logs_dir = output.join("logs");
    if fs::create_dir_all(&logs_dir).is_err() {
        return;
    }
    let record = serde_json::json!({
        "error_code": code,
        "error_message": message,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    let body = serde_json::to_string_pretty(&record).unwrap_or_else(|_| message.to_string());
    let _ = fs::write(logs_dir.join("job.failed"), body);
}
