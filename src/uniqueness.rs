//! Case-insensitive path uniqueness validation.
//!
//! An archive built on a case-sensitive filesystem can hold `Folder1/` and
//! `folder1/` side by side; extracted on Windows or macOS those merge into a
//! single directory and silently mix two registrations' raw files. The
//! validator walks an extraction tree and fails fast on the first pair of
//! paths that compare equal once lower-cased, before any tile is formed.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, StructuringError};

/// Walk `root` and group its (non-excluded) files by directory.
///
/// Returns a map keyed by each directory's lower-cased full path, holding
/// the sorted file paths directly inside that directory. Only directories
/// containing at least one surviving file appear. Fails on the first file
/// or directory whose lower-cased full path was already seen.
pub fn validate(
    root: &Path,
    exclude_names: &[&str],
) -> Result<BTreeMap<String, Vec<PathBuf>>> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    // lower-cased dir key -> (real dir path, files directly inside)
    let mut groups: BTreeMap<String, (PathBuf, Vec<PathBuf>)> = BTreeMap::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = path.file_name().map(|n| n.to_string_lossy());
        if name.is_some_and(|n| exclude_names.iter().any(|e| n == *e)) {
            continue;
        }

        let file_key = lowercase_key(path);
        if !seen.insert(file_key) {
            return Err(collision(path));
        }

        let parent = path.parent().unwrap_or(root);
        let dir_key = lowercase_key(parent);
        match groups.get_mut(&dir_key) {
            Some((real_dir, files)) => {
                // Same key reached from a different real directory means two
                // directories differ only by case.
                if real_dir.as_path() != parent {
                    return Err(collision(parent));
                }
                files.push(path.to_path_buf());
            }
            None => {
                if !seen.insert(dir_key.clone()) {
                    return Err(collision(parent));
                }
                groups.insert(dir_key, (parent.to_path_buf(), vec![path.to_path_buf()]));
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|(key, (_, mut files))| {
            files.sort();
            (key, files)
        })
        .collect())
}

fn lowercase_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

fn collision(path: &Path) -> StructuringError {
    StructuringError::uniqueness(format!(
        "path collision under case-insensitive comparison: {}",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_groups_files_by_directory() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("data1/a.txt"));
        touch(&dir.path().join("data1/b.txt"));
        touch(&dir.path().join("data2/c.txt"));

        let groups = validate(dir.path(), &[]).unwrap();
        assert_eq!(groups.len(), 2);
        let key = lowercase_key(&dir.path().join("data1"));
        assert_eq!(
            groups[&key],
            vec![dir.path().join("data1/a.txt"), dir.path().join("data1/b.txt")]
        );
    }

    #[test]
    fn test_case_insensitive_file_collision_raises() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("Folder1/a.txt"));
        touch(&dir.path().join("folder1/a.txt"));

        let result = validate(dir.path(), &[]);
        assert!(matches!(result, Err(StructuringError::Uniqueness(_))));
    }

    #[test]
    fn test_case_insensitive_dir_collision_raises() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("Folder1/a.txt"));
        touch(&dir.path().join("folder1/b.txt"));

        let result = validate(dir.path(), &[]);
        assert!(matches!(result, Err(StructuringError::Uniqueness(_))));
    }

    #[test]
    fn test_same_name_in_same_dir_case_variant_raises() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("data/A.txt"));
        touch(&dir.path().join("data/a.txt"));

        let result = validate(dir.path(), &[]);
        assert!(matches!(result, Err(StructuringError::Uniqueness(_))));
    }

    #[test]
    fn test_excluded_names_do_not_form_groups() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("data/invoice_org.json"));
        touch(&dir.path().join("other/real.txt"));

        let groups = validate(dir.path(), &["invoice_org.json"]).unwrap();
        assert_eq!(groups.len(), 1);
        let key = lowercase_key(&dir.path().join("other"));
        assert!(groups.contains_key(&key));
    }

    #[test]
    fn test_empty_directories_are_ignored() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty/nested")).unwrap();
        touch(&dir.path().join("data/a.txt"));

        let groups = validate(dir.path(), &[]).unwrap();
        assert_eq!(groups.len(), 1);
    }
}
