//! End-to-end structuring run.
//!
//! Ties the pieces together for one submission: create the shared scratch
//! directory, select a classifier, classify the input into tiles, and
//! expand every tile into its output resource bundle. The whole run is
//! synchronous and single-threaded; a classifier failure aborts before any
//! tile directory beyond the base layout is produced.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::modes::{self, ClassifiedInput, InputMode};
use crate::output::{self, RdeOutputResources};

/// Options for one structuring run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Externally resolved mode flag.
    pub mode: InputMode,
    /// Invoice schema location; defaults to
    /// `<output>/tasksupport/invoice.schema.json`.
    pub schema_path: Option<PathBuf>,
}

/// Result of a structuring run.
#[derive(Debug, Clone)]
pub struct StructuredRun {
    /// Short name of the classifier that handled the input.
    pub mode_name: &'static str,
    /// One resource bundle per tile, in tile order.
    pub resources: Vec<RdeOutputResources>,
    /// The ExcelInvoice manifest, when one drove the classification.
    pub manifest: Option<PathBuf>,
}

/// Classify `input_dir` and allocate the output layout under `output_dir`.
pub fn run(input_dir: &Path, output_dir: &Path, options: &RunOptions) -> Result<StructuredRun> {
    // Shared scratch, created before any classifier touches the input.
    let temp_dir = output_dir.join("temp");
    fs::create_dir_all(&temp_dir)?;

    let classifier = modes::select(options.mode, input_dir, &temp_dir)?;
    let mode_name = classifier.name();
    let ClassifiedInput { tiles, manifest } = classifier.parse(input_dir)?;
    info!(
        "classified {} as {mode_name}: {} tile(s)",
        input_dir.display(),
        tiles.len()
    );

    let invoice_org = temp_dir.join("invoice_org.json");
    let schema_path = options
        .schema_path
        .clone()
        .unwrap_or_else(|| output_dir.join("tasksupport").join("invoice.schema.json"));

    let resources = output::expand(tiles, output_dir, &invoice_org, &schema_path)
        .collect::<Result<Vec<_>>>()?;

    Ok(StructuredRun {
        mode_name,
        resources,
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_run_over_plain_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("sample1.txt"), b"x").unwrap();
        fs::write(input.join("sample2.txt"), b"y").unwrap();

        let run = run(&input, &output, &RunOptions::default()).unwrap();
        assert_eq!(run.mode_name, "invoice");
        assert!(run.manifest.is_none());
        assert_eq!(run.resources.len(), 1);
        assert_eq!(
            run.resources[0].raw_files,
            vec![input.join("sample1.txt"), input.join("sample2.txt")]
        );
        assert!(output.join("raw").is_dir());
        assert!(output.join("temp").is_dir());
    }

    #[test]
    fn test_multifile_run_creates_divided_layout() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("a.txt"), b"x").unwrap();
        fs::write(input.join("b.txt"), b"y").unwrap();

        let options = RunOptions {
            mode: InputMode::MultiFile,
            ..RunOptions::default()
        };
        let run = run(&input, &output, &options).unwrap();
        assert_eq!(run.mode_name, "multifile");
        assert_eq!(run.resources.len(), 2);
        assert!(output.join("divided/0001/raw").is_dir());
    }
}
