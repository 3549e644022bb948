use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Checks if a directory entry is hidden (starts with '.').
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Lists the files under `dir`, one level deep unless `recursive`, skipping
/// hidden entries unless `include_hidden`. I/O errors encountered during
/// traversal are propagated.
pub fn list_files_filtered(
    dir: &Path,
    recursive: bool,
    include_hidden: bool,
) -> Result<Vec<PathBuf>, walkdir::Error> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    WalkDir::new(dir)
        .max_depth(max_depth)
        .into_iter()
        // Depth 0 is the root itself; it is never filtered so that scanning
        // "." works.
        .filter_entry(|e| e.depth() == 0 || include_hidden || !is_hidden(e))
        .filter_map(|entry| match entry {
            Ok(entry) => entry
                .file_type()
                .is_file()
                .then(|| Ok(entry.path().to_path_buf())),
            Err(e) => Some(Err(e)),
        })
        .collect()
}
