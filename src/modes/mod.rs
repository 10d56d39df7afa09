//! Input-mode classification.
//!
//! A submission directory is handled by exactly one of four classifier
//! strategies, each turning the raw input into an ordered list of file-group
//! tiles plus an optional manifest reference:
//!
//! - [`InvoiceClassifier`]: single registration, files used as-is.
//! - [`ExcelInvoiceClassifier`]: spreadsheet-manifest-driven, with an
//!   optional compressed archive reconciled against the manifest.
//! - [`RdeFormatClassifier`]: preformatted archive whose folder structure
//!   already encodes the tile split.
//! - [`MultiFileClassifier`]: one tile per loose file.
//!
//! [`select`] picks the strategy: an explicit mode flag always wins, then
//! the presence of a `*_excel_invoice.xls(x)` file, then the default.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

mod excel_invoice;
mod invoice;
mod multifile;
mod rde_format;

pub use excel_invoice::ExcelInvoiceClassifier;
pub use invoice::InvoiceClassifier;
pub use multifile::MultiFileClassifier;
pub use rde_format::RdeFormatClassifier;

/// One tile's raw files: an ordered tuple of absolute paths belonging to a
/// single registrable data unit. May be empty ("no raw files for this
/// registration").
pub type RawFileGroup = Vec<PathBuf>;

/// Result of a successful classification.
///
/// Invariant: `tiles` is never empty; a run with no raw data still yields
/// one tile holding an empty group.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedInput {
    /// Ordered tiles, one per registration.
    pub tiles: Vec<RawFileGroup>,
    /// The ExcelInvoice manifest path, when one drove the classification.
    pub manifest: Option<PathBuf>,
}

/// Externally resolved mode flag (from CLI or config).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// No explicit flag; auto-detect between invoice and ExcelInvoice.
    #[default]
    Default,
    /// Preformatted-archive submissions.
    RdeFormat,
    /// Flat multi-file submissions.
    MultiFile,
}

/// A chosen classifier strategy.
#[derive(Debug, Clone)]
pub enum ModeClassifier {
    /// Direct-file submission.
    Invoice(InvoiceClassifier),
    /// Spreadsheet-manifest-driven submission.
    ExcelInvoice(ExcelInvoiceClassifier),
    /// Preformatted archive submission.
    RdeFormat(RdeFormatClassifier),
    /// Flat multi-file submission.
    MultiFile(MultiFileClassifier),
}

impl ModeClassifier {
    /// Classify the input directory into tiles.
    pub fn parse(&self, input_dir: &Path) -> Result<ClassifiedInput> {
        match self {
            Self::Invoice(c) => c.parse(input_dir),
            Self::ExcelInvoice(c) => c.parse(input_dir),
            Self::RdeFormat(c) => c.parse(input_dir),
            Self::MultiFile(c) => c.parse(input_dir),
        }
    }

    /// Short mode name for logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invoice(_) => "invoice",
            Self::ExcelInvoice(_) => "excel_invoice",
            Self::RdeFormat(_) => "rde_format",
            Self::MultiFile(_) => "multifile",
        }
    }
}

/// Choose the classifier for `input_dir`.
///
/// Precedence: explicit mode flag, then `*_excel_invoice.xls(x)` presence,
/// then the direct-file default. `temp_dir` is the shared scratch area for
/// archive extraction and must exist before [`ModeClassifier::parse`] runs.
pub fn select(mode: InputMode, input_dir: &Path, temp_dir: &Path) -> Result<ModeClassifier> {
    let classifier = match mode {
        InputMode::RdeFormat => {
            ModeClassifier::RdeFormat(RdeFormatClassifier::new(temp_dir.to_path_buf()))
        }
        InputMode::MultiFile => ModeClassifier::MultiFile(MultiFileClassifier),
        InputMode::Default => {
            if InputFilesGroup::from_dir(input_dir)?.has_excel_invoice() {
                ModeClassifier::ExcelInvoice(ExcelInvoiceClassifier::new(temp_dir.to_path_buf()))
            } else {
                ModeClassifier::Invoice(InvoiceClassifier)
            }
        }
    };
    info!("selected input mode: {}", classifier.name());
    Ok(classifier)
}

/// Three-way partition of a flat directory listing.
#[derive(Debug, Clone, Default)]
pub struct InputFilesGroup {
    /// `.zip` archives.
    pub zip_files: Vec<PathBuf>,
    /// ExcelInvoice manifests (`*_excel_invoice.xls(x)`).
    pub excel_invoice_files: Vec<PathBuf>,
    /// Everything else.
    pub other_files: Vec<PathBuf>,
}

impl InputFilesGroup {
    /// Partition the regular files directly inside `dir`, sorted.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut group = Self::default();
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        entries.sort();

        for path in entries {
            if has_extension(&path, &["zip"]) {
                group.zip_files.push(path);
            } else if is_excel_invoice(&path) {
                group.excel_invoice_files.push(path);
            } else {
                group.other_files.push(path);
            }
        }
        Ok(group)
    }

    /// True when at least one manifest candidate is present.
    pub fn has_excel_invoice(&self) -> bool {
        !self.excel_invoice_files.is_empty()
    }
}

/// Manifest naming convention: `.xls`/`.xlsx` suffix and a stem ending in
/// `_excel_invoice`.
pub fn is_excel_invoice(path: &Path) -> bool {
    has_extension(path, &["xls", "xlsx"])
        && path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with("_excel_invoice"))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}
