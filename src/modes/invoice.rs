//! Direct-file ("invoice") classification.

use std::path::Path;

use crate::error::Result;
use crate::modes::{ClassifiedInput, InputFilesGroup};

/// Single-registration submissions: every file in the input directory forms
/// one tile. Zip files are not unpacked here — a compressed upload in this
/// mode is registered as the raw file it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceClassifier;

impl InvoiceClassifier {
    /// Produce exactly one tile containing all non-manifest files.
    pub fn parse(&self, input_dir: &Path) -> Result<ClassifiedInput> {
        let group = InputFilesGroup::from_dir(input_dir)?;

        let mut files = group.other_files;
        files.extend(group.zip_files);
        files.sort();

        Ok(ClassifiedInput {
            tiles: vec![files],
            manifest: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_all_files_form_one_tile() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sample1.txt"), b"x").unwrap();
        fs::write(dir.path().join("sample2.txt"), b"y").unwrap();

        let parsed = InvoiceClassifier.parse(dir.path()).unwrap();
        assert!(parsed.manifest.is_none());
        assert_eq!(parsed.tiles.len(), 1);
        assert_eq!(
            parsed.tiles[0],
            vec![dir.path().join("sample1.txt"), dir.path().join("sample2.txt")]
        );
    }

    #[test]
    fn test_zip_files_are_kept_not_unpacked() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bundle.zip"), b"x").unwrap();
        fs::write(dir.path().join("readme.txt"), b"y").unwrap();

        let parsed = InvoiceClassifier.parse(dir.path()).unwrap();
        assert_eq!(parsed.tiles.len(), 1);
        assert!(parsed.tiles[0].contains(&dir.path().join("bundle.zip")));
    }

    #[test]
    fn test_empty_directory_yields_one_empty_tile() {
        let dir = tempdir().unwrap();
        let parsed = InvoiceClassifier.parse(dir.path()).unwrap();
        assert_eq!(parsed.tiles.len(), 1);
        assert!(parsed.tiles[0].is_empty());
    }
}
