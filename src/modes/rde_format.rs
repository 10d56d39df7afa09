//! Preformatted-archive ("RDEformat") classification.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::archive;
use crate::error::{Result, StructuringError};
use crate::modes::{ClassifiedInput, InputFilesGroup, RawFileGroup};

/// Pre-divided submissions: one zip whose folder structure already encodes
/// the tile split as `divided/NNNN/` path segments (4 ASCII digits). Files
/// outside any such segment belong to tile 0.
#[derive(Debug, Clone)]
pub struct RdeFormatClassifier {
    temp_dir: PathBuf,
}

impl RdeFormatClassifier {
    /// Classifier extracting into the shared scratch directory.
    pub fn new(temp_dir: PathBuf) -> Self {
        Self { temp_dir }
    }

    /// Extract the single archive and group files by divided index.
    pub fn parse(&self, input_dir: &Path) -> Result<ClassifiedInput> {
        let group = InputFilesGroup::from_dir(input_dir)?;
        if group.zip_files.len() != 1 {
            return Err(StructuringError::invalid_input("no zipped input files"));
        }
        let zip_path = &group.zip_files[0];

        let extract_dir = self.temp_dir.join(archive_stem(zip_path));
        let files = archive::unpack(zip_path, &extract_dir)?;

        let mut groups: BTreeMap<u32, RawFileGroup> = BTreeMap::new();
        for file in files {
            let relative = file.strip_prefix(&extract_dir).unwrap_or(&file);
            let key = divided_index(relative).unwrap_or(0);
            groups.entry(key).or_default().push(file);
        }

        // BTreeMap iteration gives ascending numeric tile order.
        let mut tiles: Vec<RawFileGroup> = groups.into_values().collect();
        if tiles.is_empty() {
            tiles.push(RawFileGroup::new());
        }

        Ok(ClassifiedInput {
            tiles,
            manifest: None,
        })
    }
}

fn archive_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string())
}

/// First directory segment made of exactly 4 ASCII digits, parsed as the
/// divided index. The terminal file name is never a segment, so a bare
/// 4-digit file name stays in tile 0.
fn divided_index(path: &Path) -> Option<u32> {
    path.parent()?
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .find(|segment| segment.len() == 4 && segment.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|segment| segment.parse().ok())
}
