//! Structured errors for the structuring pipeline.
//!
//! Every failure in this crate is a [`StructuringError`]: a human-readable
//! message, a stable numeric code (see [`StructuringError::code`]), and the
//! underlying cause when one exists. Nothing in the pipeline retries or
//! partially succeeds; the caller is expected to surface the code and message
//! and terminate with a non-zero status.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StructuringError>;

/// Errors raised while classifying and structuring a submission.
#[derive(Debug, thiserror::Error)]
pub enum StructuringError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the ZIP archive library (unreadable or corrupt archive)
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error from the spreadsheet library while loading the manifest workbook
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Input directory violates the shape expected by the selected mode
    /// (stray files, wrong archive count, wrong manifest count)
    #[error("{0}")]
    InvalidInput(String),

    /// The ExcelInvoice workbook itself is malformed (missing/duplicate main
    /// sheet, interior blank rows, missing required columns)
    #[error("{0}")]
    InvoiceFormat(String),

    /// The manifest and the on-disk file set do not reconcile
    #[error("{0}")]
    Reconciliation(String),

    /// Two paths collide under case-insensitive comparison
    #[error("{0}")]
    Uniqueness(String),
}

impl StructuringError {
    /// Stable numeric code for job-failure reporting.
    pub fn code(&self) -> u16 {
        match self {
            Self::Io(_) => 1,
            Self::Zip(_) => 2,
            Self::Spreadsheet(_) => 3,
            Self::InvalidInput(_) => 10,
            Self::InvoiceFormat(_) => 20,
            Self::Reconciliation(_) => 30,
            Self::Uniqueness(_) => 40,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn invoice_format(message: impl Into<String>) -> Self {
        Self::InvoiceFormat(message.into())
    }

    pub(crate) fn reconciliation(message: impl Into<String>) -> Self {
        Self::Reconciliation(message.into())
    }

    pub(crate) fn uniqueness(message: impl Into<String>) -> Self {
        Self::Uniqueness(message.into())
    }
}
