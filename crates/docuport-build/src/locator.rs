//! Source file lookup by recursive filesystem walking.
//!
//! The locator resolves the bare filenames referenced by a summary document
//! to their actual paths under a search root. Matching is case-insensitive
//! on the file name only; directories play no part in matching.

use std::fs;
use std::path::{Path, PathBuf};

/// Case-insensitive recursive file finder.
///
/// Resolution order is deterministic: directory entries are visited in name
/// order, and a directory's files are matched before its subdirectories are
/// descended into. When several files share a name, the first one in that
/// order wins — a documented limitation inherited from bare-filename
/// references.
///
/// Hidden entries (dot-prefixed) are skipped, as are any excluded roots.
/// Excluding the output directory keeps generated pages from shadowing
/// their own sources on a re-run.
pub struct SourceLocator {
    search_dir: PathBuf,
    excluded: Vec<PathBuf>,
}

impl SourceLocator {
    /// Create a locator over the given search root.
    ///
    /// A missing root behaves as "nothing found".
    #[must_use]
    pub fn new(search_dir: PathBuf) -> Self {
        Self {
            search_dir,
            excluded: Vec::new(),
        }
    }

    /// Exclude a directory subtree from the search.
    #[must_use]
    pub fn exclude(mut self, dir: PathBuf) -> Self {
        self.excluded.push(dir);
        self
    }

    /// Find the first file named `filename` (case-insensitively) under the
    /// search root.
    #[must_use]
    pub fn locate(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty() {
            return None;
        }

        // Excluded roots are compared canonicalized so that e.g. "./out"
        // and "out" refer to the same subtree.
        let excluded: Vec<PathBuf> = self
            .excluded
            .iter()
            .filter_map(|dir| dir.canonicalize().ok())
            .collect();

        let target = filename.to_lowercase();
        Self::locate_in(&self.search_dir, &target, &excluded)
    }

    fn locate_in(dir: &Path, target: &str, excluded: &[PathBuf]) -> Option<PathBuf> {
        let entries = fs::read_dir(dir).ok()?;
        let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
        entries.sort_by_key(std::fs::DirEntry::file_name);

        let mut subdirs = Vec::new();
        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                if !is_excluded(&path, excluded) {
                    subdirs.push(path);
                }
            } else if name.to_lowercase() == target {
                return Some(path);
            }
        }

        subdirs
            .into_iter()
            .find_map(|subdir| Self::locate_in(&subdir, target, excluded))
    }
}

fn is_excluded(path: &Path, excluded: &[PathBuf]) -> bool {
    if excluded.is_empty() {
        return false;
    }
    let Ok(canonical) = path.canonicalize() else {
        return false;
    };
    excluded.iter().any(|dir| canonical.starts_with(dir))
}
