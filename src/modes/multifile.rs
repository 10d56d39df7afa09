//! Flat multi-file classification.

use std::path::Path;

use crate::error::Result;
use crate::modes::{ClassifiedInput, InputFilesGroup, RawFileGroup};

/// One tile per loose input file, in lexicographic order. Manifest-named
/// files are stripped from the listing; no archive handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFileClassifier;

impl MultiFileClassifier {
    /// Produce one singleton tile per non-manifest file.
    pub fn parse(&self, input_dir: &Path) -> Result<ClassifiedInput> {
        let group = InputFilesGroup::from_dir(input_dir)?;

        let mut files = group.other_files;
        files.extend(group.zip_files);

        let mut tiles: Vec<RawFileGroup> = files.into_iter().map(|f| vec![f]).collect();
        tiles.sort_by_key(|tile| format!("{tile:?}"));
        if tiles.is_empty() {
            tiles.push(RawFileGroup::new());
        }

        Ok(ClassifiedInput {
            tiles,
            manifest: None,
        })
    }
}
