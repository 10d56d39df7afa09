//! Spreadsheet-manifest-driven ("ExcelInvoice") classification.
//!
//! The input directory holds exactly one manifest workbook, at most one zip
//! archive, and nothing else. The manifest's main table declares one
//! registration per row; the archive sub-mode depends on its columns:
//!
//! - flat-file mode (`data_file_names/name` column): each row names one
//!   file inside the archive. The declared set must be a subset of the
//!   extracted set; extra extracted files are ignored here.
//! - folder mode (`data_folder` column): each row names a distinct top-level
//!   folder inside the archive; the folder sets must match exactly.
//!
//! Either way the returned tiles follow the manifest's row order. A single
//! extracted group shared by N>1 rows is replicated N times (one shared
//! raw-data archive applying to every registration).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::archive;
use crate::error::{Result, StructuringError};
use crate::manifest::{ExcelInvoice, InvoiceTable, COLUMN_DATA_FILE_NAME, COLUMN_DATA_FOLDER};
use crate::modes::{ClassifiedInput, InputFilesGroup, RawFileGroup};
use crate::uniqueness;

/// File name excluded from folder grouping (invoice backup dropped into
/// extraction trees by earlier runs).
const INVOICE_BACKUP_NAME: &str = "invoice_org.json";

/// Manifest-driven classifier.
#[derive(Debug, Clone)]
pub struct ExcelInvoiceClassifier {
    temp_dir: PathBuf,
}

impl ExcelInvoiceClassifier {
    /// Classifier extracting into the shared scratch directory.
    pub fn new(temp_dir: PathBuf) -> Self {
        Self { temp_dir }
    }

    /// Classify the input directory against its ExcelInvoice manifest.
    pub fn parse(&self, input_dir: &Path) -> Result<ClassifiedInput> {
        let group = InputFilesGroup::from_dir(input_dir)?;

        if group.zip_files.len() > 1 {
            return Err(StructuringError::invalid_input(format!(
                "multiple zip files in input directory: {}",
                group.zip_files.len()
            )));
        }
        match group.excel_invoice_files.len() {
            0 => {
                return Err(StructuringError::invalid_input(
                    "no ExcelInvoice file in input directory",
                ))
            }
            1 => {}
            n => {
                return Err(StructuringError::invalid_input(format!(
                    "multiple ExcelInvoice files in input directory: {n}"
                )))
            }
        }
        if !group.other_files.is_empty() {
            return Err(StructuringError::invalid_input(
                "input file should be EXCEL or ZIP file",
            ));
        }

        let manifest_path = group.excel_invoice_files[0].clone();
        let invoice = ExcelInvoice::read(&manifest_path)?;
        let rows = invoice.main.len();
        if rows == 0 {
            return Err(StructuringError::invoice_format(
                "no data rows in ExcelInvoice",
            ));
        }

        let tiles = match group.zip_files.first() {
            // Manifest-only submission: one empty tile per declared row.
            None => vec![RawFileGroup::new(); rows],
            Some(zip_path) => {
                let extract_dir = self.temp_dir.join(archive_stem(zip_path));
                if invoice.main.has_column(COLUMN_DATA_FILE_NAME) {
                    let files = archive::unpack(zip_path, &extract_dir)?;
                    flat_file_tiles(&files, &invoice.main)?
                } else {
                    archive::unpack(zip_path, &extract_dir)?;
                    folder_tiles(&extract_dir, &invoice.main)?
                }
            }
        };

        if tiles.len() != rows {
            return Err(StructuringError::reconciliation(
                "input file and description in the ExcelInvoice are not consistent",
            ));
        }
        info!(
            "ExcelInvoice classification: {} tiles from {}",
            tiles.len(),
            manifest_path.display()
        );

        Ok(ClassifiedInput {
            tiles,
            manifest: Some(manifest_path),
        })
    }
}

fn archive_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string())
}

/// Flat-file sub-mode: one single-file tile per manifest row, matched by
/// exact basename. Extracted files the manifest never declares are ignored.
fn flat_file_tiles(extracted: &[PathBuf], main: &InvoiceTable) -> Result<Vec<RawFileGroup>> {
    let mut by_basename: BTreeMap<String, &PathBuf> = BTreeMap::new();
    for file in extracted {
        if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
            by_basename.entry(name.to_string()).or_insert(file);
        }
    }

    let declared = main
        .column(COLUMN_DATA_FILE_NAME)
        .unwrap_or_default();

    let mut tiles = Vec::with_capacity(declared.len());
    for name in declared {
        let name = name.trim();
        let file = by_basename.get(name).ok_or_else(|| {
            StructuringError::reconciliation(format!("raw file not found: {name}"))
        })?;
        tiles.push(vec![(*file).clone()]);
    }
    Ok(tiles)
}

/// Folder sub-mode: one tile per distinct declared folder, matched by the
/// terminal directory name of each extracted folder holding files. Duplicate
/// `data_folder` rows leave fewer tiles than rows, which the caller rejects
/// as a count mismatch.
fn folder_tiles(extract_dir: &Path, main: &InvoiceTable) -> Result<Vec<RawFileGroup>> {
    let groups = uniqueness::validate(extract_dir, &[INVOICE_BACKUP_NAME])?;

    // Terminal directory names keep their on-disk case; assumed unique.
    let mut by_name: BTreeMap<String, RawFileGroup> = BTreeMap::new();
    for files in groups.into_values() {
        let terminal = files
            .first()
            .and_then(|f| f.parent())
            .and_then(|d| d.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        by_name.entry(terminal).or_insert(files);
    }
    debug!("folder mode: {} extracted folder groups", by_name.len());

    // One shared raw-data archive applying to every manifest row.
    if by_name.len() == 1 && main.len() > 1 {
        let only = by_name
            .into_values()
            .next()
            .unwrap_or_default();
        return Ok(vec![only; main.len()]);
    }

    let declared = main.column(COLUMN_DATA_FOLDER).ok_or_else(|| {
        StructuringError::invoice_format("data_folder column not found in ExcelInvoice")
    })?;
    let declared_set: BTreeSet<&str> = declared.iter().map(|v| v.trim()).collect();

    // Lexicographically smallest offender is reported first.
    for name in by_name.keys() {
        if !declared_set.contains(name.as_str()) {
            return Err(StructuringError::reconciliation(format!(
                "unused raw data: {name}"
            )));
        }
    }
    for name in &declared_set {
        if !by_name.contains_key(*name) {
            return Err(StructuringError::reconciliation(format!(
                "raw data not found: {name}"
            )));
        }
    }

    // First-occurrence row order.
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut tiles = Vec::with_capacity(by_name.len());
    for name in &declared {
        let name = name.trim();
        if seen.insert(name) {
            tiles.push(by_name[name].clone());
        }
    }
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{write_workbook, write_zip};
    use std::fs;
    use tempfile::tempdir;
    use tempfile::TempDir;

    /// Input directory with a manifest (given header pair + data rows) and
    /// optional zip entries.
    fn fixture(
        header_top: &str,
        header_bottom: &str,
        data_rows: &[&str],
        zip_entries: Option<&[(&str, &str)]>,
    ) -> (TempDir, ExcelInvoiceClassifier) {
        let dir = tempdir().unwrap();

        let mut grid: Vec<Vec<&str>> = vec![
            vec!["invoiceList_format_id"],
            vec![header_top, "basic"],
            vec![header_bottom, "dataName"],
            vec![],
        ];
        for value in data_rows {
            grid.push(vec![value, "entry"]);
        }
        let grid_refs: Vec<&[&str]> = grid.iter().map(|r| r.as_slice()).collect();
        write_workbook(
            &dir.path().join("data_excel_invoice.xlsx"),
            &[("invoice_form", &grid_refs)],
        );

        if let Some(entries) = zip_entries {
            write_zip(&dir.path().join("raw.zip"), entries);
        }

        let temp = dir.path().join("scratch");
        fs::create_dir_all(&temp).unwrap();
        (dir, ExcelInvoiceClassifier::new(temp))
    }

    #[test]
    fn test_folder_mode_reordered_to_manifest_rows() {
        let (dir, classifier) = fixture(
            "",
            "data_folder",
            &["data2", "data1"],
            Some(&[("data1/a.txt", "a"), ("data2/b.txt", "b")]),
        );

        let parsed = classifier.parse(dir.path()).unwrap();
        assert_eq!(parsed.tiles.len(), 2);
        assert!(parsed.tiles[0][0].ends_with("data2/b.txt"));
        assert!(parsed.tiles[1][0].ends_with("data1/a.txt"));
        assert!(parsed.manifest.is_some());
    }

    #[test]
    fn test_folder_mode_unused_raw_data_is_fatal() {
        let (dir, classifier) = fixture(
            "",
            "data_folder",
            &["data1"],
            Some(&[("data1/a.txt", "a"), ("extra/b.txt", "b")]),
        );

        let err = classifier.parse(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "unused raw data: extra");
    }

    #[test]
    fn test_folder_mode_missing_folder_is_fatal() {
        let (dir, classifier) = fixture(
            "",
            "data_folder",
            &["data1", "data2", "data3"],
            Some(&[("data1/a.txt", "a"), ("data2/b.txt", "b")]),
        );

        let err = classifier.parse(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "raw data not found: data3");
    }

    #[test]
    fn test_single_group_replicated_across_rows() {
        let (dir, classifier) = fixture(
            "",
            "data_folder",
            &["data1", "data1", "data1"],
            Some(&[("data1/shared.txt", "s")]),
        );

        let parsed = classifier.parse(dir.path()).unwrap();
        assert_eq!(parsed.tiles.len(), 3);
        assert_eq!(parsed.tiles[0], parsed.tiles[1]);
        assert_eq!(parsed.tiles[1], parsed.tiles[2]);
        assert!(parsed.tiles[0][0].ends_with("data1/shared.txt"));
    }

    #[test]
    fn test_folder_mode_duplicate_rows_with_many_groups_is_fatal() {
        let (dir, classifier) = fixture(
            "",
            "data_folder",
            &["data1", "data1", "data2"],
            Some(&[("data1/a.txt", "a"), ("data2/b.txt", "b")]),
        );

        let err = classifier.parse(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "input file and description in the ExcelInvoice are not consistent"
        );
    }

    #[test]
    fn test_flat_file_mode_matches_basenames_in_row_order() {
        let (dir, classifier) = fixture(
            "data_file_names",
            "name",
            &["two.csv", "one.csv"],
            Some(&[
                ("one.csv", "1"),
                ("two.csv", "2"),
                ("ignored_extra.csv", "x"),
            ]),
        );

        let parsed = classifier.parse(dir.path()).unwrap();
        assert_eq!(parsed.tiles.len(), 2);
        assert!(parsed.tiles[0][0].ends_with("two.csv"));
        assert!(parsed.tiles[1][0].ends_with("one.csv"));
    }

    #[test]
    fn test_flat_file_mode_missing_declared_file_is_fatal() {
        let (dir, classifier) = fixture(
            "data_file_names",
            "name",
            &["one.csv", "missing.csv"],
            Some(&[("one.csv", "1")]),
        );

        let err = classifier.parse(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "raw file not found: missing.csv");
    }

    #[test]
    fn test_manifest_without_zip_yields_empty_tiles() {
        let (dir, classifier) = fixture("", "data_folder", &["data1", "data2"], None);

        let parsed = classifier.parse(dir.path()).unwrap();
        assert_eq!(parsed.tiles, vec![RawFileGroup::new(), RawFileGroup::new()]);
        assert!(parsed.manifest.is_some());
    }

    #[test]
    fn test_stray_files_are_fatal() {
        let (dir, classifier) = fixture("", "data_folder", &["data1"], None);
        fs::write(dir.path().join("stray.txt"), b"x").unwrap();

        let err = classifier.parse(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "input file should be EXCEL or ZIP file");
    }

    #[test]
    fn test_multiple_zip_files_are_fatal() {
        let (dir, classifier) = fixture("", "data_folder", &["data1"], None);
        write_zip(&dir.path().join("a.zip"), &[("data1/a.txt", "a")]);
        write_zip(&dir.path().join("b.zip"), &[("data1/b.txt", "b")]);

        let err = classifier.parse(dir.path()).unwrap_err();
        assert!(matches!(err, StructuringError::InvalidInput(_)));
    }
}
