//! Article discovery.

use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively find article files under `root` whose extension is in `extensions`.
///
/// Extensions are compared case-insensitively and given without the dot.
/// The result is sorted by path so repeated runs see files in the same order.
/// Unreadable directory entries are logged and skipped.
pub fn discover_articles(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| has_extension(path, extensions))
        .collect();

    files.sort();
    files
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}
