//! Diagnostic directory tree rendering.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Render the directory tree rooted at `dir` as an indented listing.
///
/// Entries appear in platform directory order (not sorted); directories
/// carry a trailing `/`. Purely diagnostic output — the caller decides
/// where to print it.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn render_tree(dir: &Path) -> io::Result<String> {
    let mut listing = String::new();
    render_level(dir, "", &mut listing)?;
    Ok(listing)
}

fn render_level(dir: &Path, prefix: &str, listing: &mut String) -> io::Result<()> {
    let entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    let last = entries.len().saturating_sub(1);

    for (index, entry) in entries.iter().enumerate() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let branch = if index == last { "└── " } else { "├── " };

        if entry.file_type()?.is_dir() {
            let _ = writeln!(listing, "{prefix}{branch}{name}/");
            let child_prefix = if index == last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            render_level(&entry.path(), &child_prefix, listing)?;
        } else {
            let _ = writeln!(listing, "{prefix}{branch}{name}");
        }
    }

    Ok(())
}
