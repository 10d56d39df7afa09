//! Output directory layout allocation.
//!
//! One [`RdeOutputResources`] bundle is produced per tile, in tile order.
//! Tile 0 lives directly under the output base; tiles 1 and up nest under
//! `divided/NNNN/` with a zero-padded 4-digit index. This step only
//! allocates paths and creates directories — no file content is touched.
//!
//! ```text
//! output/
//! ├── raw/ structured/ main_image/ other_image/ thumbnail/
//! ├── meta/ logs/ invoice/ temp/
//! └── divided/
//!     └── 0001/
//!         └── raw/ structured/ ... temp/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::modes::RawFileGroup;

/// Per-tile bundle of raw files and freshly created output directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdeOutputResources {
    /// Zero-based tile index (also the `divided` ordinal for index >= 1).
    pub index: usize,
    /// The tile's raw input files.
    pub raw_files: RawFileGroup,
    /// Shared manifest backup location for the whole run.
    pub invoice_org: PathBuf,
    /// Shared invoice schema location for the whole run.
    pub invoice_schema_json: PathBuf,
    /// Raw-data target directory.
    pub raw: PathBuf,
    /// Structured output directory.
    pub struct_dir: PathBuf,
    /// Main representative image directory.
    pub main_image: PathBuf,
    /// Secondary image directory.
    pub other_image: PathBuf,
    /// Thumbnail directory.
    pub thumbnail: PathBuf,
    /// Metadata directory.
    pub meta: PathBuf,
    /// Log directory.
    pub logs: PathBuf,
    /// Invoice directory.
    pub invoice: PathBuf,
    /// Per-tile scratch directory.
    pub temp: PathBuf,
}

/// Lazily expand tiles into output resource bundles rooted at `base_dir`.
///
/// Directory creation is idempotent so a retried run does not fail merely
/// because the layout already exists.
pub fn expand(
    tiles: Vec<RawFileGroup>,
    base_dir: &Path,
    invoice_org: &Path,
    invoice_schema_json: &Path,
) -> impl Iterator<Item = Result<RdeOutputResources>> {
    let base_dir = base_dir.to_path_buf();
    let invoice_org = invoice_org.to_path_buf();
    let invoice_schema_json = invoice_schema_json.to_path_buf();

    tiles.into_iter().enumerate().map(move |(index, raw_files)| {
        allocate_tile(index, raw_files, &base_dir, &invoice_org, &invoice_schema_json)
    })
}

/// Base directory for the tile at `index`.
pub fn tile_base(base_dir: &Path, index: usize) -> PathBuf {
    if index == 0 {
        base_dir.to_path_buf()
    } else {
        base_dir.join("divided").join(format!("{index:04}"))
    }
}

fn allocate_tile(
    index: usize,
    raw_files: RawFileGroup,
    base_dir: &Path,
    invoice_org: &Path,
    invoice_schema_json: &Path,
) -> Result<RdeOutputResources> {
    let tile_dir = tile_base(base_dir, index);
    debug!("allocating tile {index} under {}", tile_dir.display());

    let subdir = |name: &str| -> Result<PathBuf> {
        let dir = tile_dir.join(name);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    };

    Ok(RdeOutputResources {
        index,
        raw_files,
        invoice_org: invoice_org.to_path_buf(),
        invoice_schema_json: invoice_schema_json.to_path_buf(),
        raw: subdir("raw")?,
        struct_dir: subdir("structured")?,
        main_image: subdir("main_image")?,
        other_image: subdir("other_image")?,
        thumbnail: subdir("thumbnail")?,
        meta: subdir("meta")?,
        logs: subdir("logs")?,
        invoice: subdir("invoice")?,
        temp: subdir("temp")?,
    })
}
