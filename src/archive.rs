//! Archive extraction with artifact exclusion.
//!
//! Submissions arrive as ZIP archives that were frequently produced on
//! macOS or Windows, so the trees they unpack into carry OS and editor
//! droppings that must never become registered raw data:
//!
//! - `__MACOSX/` resource-fork mirrors and `.DS_Store` files
//! - MS Office lock files (`~$*.docx`, `~$*.xlsx`, `~$*.pptx`)
//!
//! [`unpack`] expands an archive fully and enumerates the surviving regular
//! files. Exclusion is applied to the enumeration, not the extraction, so
//! re-running against the same archive always yields the same file set.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::Result;

/// Path segments that mark an entry as an OS artifact.
const EXCLUDED_SEGMENTS: [&str; 2] = ["__MACOSX", ".DS_Store"];

/// Suffixes of MS Office lock files (paired with a `~$` name prefix).
const OFFICE_LOCK_SUFFIXES: [&str; 3] = [".docx", ".xlsx", ".pptx"];

/// Expand `archive_path` into `target_dir` and return every surviving
/// regular file, recursively, in sorted order.
///
/// The target directory is created if absent; extraction into an existing
/// directory is idempotent. An unreadable or corrupt archive is a fatal
/// error, never a silent skip.
pub fn unpack(archive_path: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(target_dir)?;

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    debug!(
        "unpacking {} ({} entries) into {}",
        archive_path.display(),
        archive.len(),
        target_dir.display()
    );

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        // Reject entries that would escape the target directory.
        let entry_path = match entry.enclosed_name() {
            Some(p) => p,
            None => continue,
        };
        let output_path = target_dir.join(entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&output_path)?;
            io::copy(&mut entry, &mut outfile)?;
        }
    }

    list_files(target_dir)
}

/// Enumerate the non-artifact regular files under `root`, sorted.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && !is_excluded(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// True when `path` is an OS/editor artifact that must not survive
/// extraction.
pub fn is_excluded(path: &Path) -> bool {
    for component in path.components() {
        let segment = component.as_os_str().to_string_lossy();
        if EXCLUDED_SEGMENTS.iter().any(|s| segment == *s) {
            return true;
        }
    }

    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if name.starts_with("~$") && OFFICE_LOCK_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            return true;
        }
    }

    false
}
