//! # rdepack - RDE Input Structuring Pipeline
//!
//! `rdepack` packages heterogeneous scientific-experiment input files into
//! the RDE structured directory layout, ready for ingestion into a
//! research-data repository. Given an arbitrary submission directory it:
//!
//! 1. classifies which of four submission modes applies,
//! 2. safely unpacks and validates compressed archives against an
//!    accompanying spreadsheet manifest ("ExcelInvoice"),
//! 3. groups raw files into *tiles* (one processing unit per registered
//!    data item), deterministically ordered to match the manifest, and
//! 4. allocates one output directory bundle per tile.
//!
//! ## Submission modes
//!
//! | Mode | Trigger | Tiles |
//! |------|---------|-------|
//! | invoice | default | one tile with every input file |
//! | excel_invoice | `*_excel_invoice.xls(x)` present | one tile per manifest row |
//! | rde_format | explicit flag | one tile per `divided/NNNN/` archive segment |
//! | multifile | explicit flag | one tile per loose file |
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use rdepack::pipeline::{run, RunOptions};
//! use std::path::Path;
//!
//! let structured = run(
//!     Path::new("data/inputdata"),
//!     Path::new("data/output"),
//!     &RunOptions::default(),
//! )?;
//! for bundle in &structured.resources {
//!     println!("tile {}: {} raw file(s)", bundle.index, bundle.raw_files.len());
//! }
//! # Ok::<(), rdepack::error::StructuringError>(())
//! ```
//!
//! This creates (per tile; tile 0 un-suffixed, tiles >= 1 under
//! `divided/NNNN/`):
//!
//! ```text
//! output/
//! ├── raw/  structured/  main_image/  other_image/  thumbnail/
//! ├── meta/  logs/  invoice/  temp/
//! └── divided/0001/ ...
//! ```
//!
//! ## Architecture
//!
//! - [`archive`]: ZIP extraction with OS/editor artifact exclusion
//! - [`uniqueness`]: case-insensitive path collision detection
//! - [`manifest`]: ExcelInvoice workbook parsing
//! - [`modes`]: the four classifier strategies and the mode selector
//! - [`output`]: per-tile output directory allocation
//! - [`pipeline`]: one-call structuring run
//!
//! Everything is synchronous and single-threaded: one run processes one
//! submission end to end, and filesystem writes are idempotent so a retried
//! run does not fail on existing directories.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod archive;
pub mod error;
pub mod manifest;
pub mod modes;
pub mod output;
pub mod pipeline;
pub mod uniqueness;

#[cfg(test)]
mod testutil;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::error::{Result, StructuringError};
    pub use crate::manifest::{ExcelInvoice, InvoiceTable};
    pub use crate::modes::{
        ClassifiedInput, InputFilesGroup, InputMode, ModeClassifier, RawFileGroup,
    };
    pub use crate::output::RdeOutputResources;
    pub use crate::pipeline::{run, RunOptions, StructuredRun};
}
