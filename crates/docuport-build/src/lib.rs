//! Materializes a parsed summary hierarchy into a documentation tree.
//!
//! This crate provides [`TreeBuilder`], which consumes a validated
//! [`Summary`](docuport_summary::Summary) and produces a nested directory
//! tree: one copied page per entry (with generated frontmatter prepended)
//! and one [`CategoryDescriptor`] file per directory that contains
//! children. Source files are resolved through [`SourceLocator`];
//! unresolvable entries are skipped with a warning and reported back to the
//! caller.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docuport_build::{SourceLocator, TreeBuilder};
//! use docuport_summary::SummaryParser;
//!
//! let summary = SummaryParser::new().parse(&content)?;
//! let locator = SourceLocator::new(PathBuf::from(".")).exclude(PathBuf::from("docu_books"));
//! let report = TreeBuilder::new(PathBuf::from("docu_books/rust-book"), locator).build(&summary)?;
//! println!("{} pages written", report.pages);
//! ```

mod category;
pub mod frontmatter;
mod locator;
mod tree;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docuport_summary::Summary;

pub use category::{CATEGORY_FILENAME, CategoryDescriptor};
pub use locator::SourceLocator;
pub use tree::render_tree;

/// Error raised when materialization fails at the filesystem level.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A destination file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Outcome of a build run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of pages materialized.
    pub pages: usize,
    /// Number of distinct directories that received a category descriptor.
    pub categories: usize,
    /// Filenames that could not be located and were skipped.
    pub skipped: Vec<String>,
}

/// The builder's position in the output tree while walking the hierarchy.
struct Cursor {
    level: usize,
    path: PathBuf,
}

/// Materializes a summary hierarchy under an output root.
pub struct TreeBuilder {
    output_root: PathBuf,
    locator: SourceLocator,
}

impl TreeBuilder {
    /// Create a builder writing into `output_root`, resolving sources
    /// through `locator`.
    ///
    /// When the output root lives under the locator's search directory, the
    /// locator should exclude it so that generated pages never shadow their
    /// sources on a re-run.
    #[must_use]
    pub fn new(output_root: PathBuf, locator: SourceLocator) -> Self {
        Self {
            output_root,
            locator,
        }
    }

    /// Walk the hierarchy in document order and materialize every entry.
    ///
    /// The cursor starts at `(level 0, output root)`. Descending one level
    /// turns the previous entry into a container directory (named after its
    /// filename stem) with a category descriptor; ascending pops the cursor
    /// path by the level difference. Entries whose source cannot be located
    /// are skipped — the cursor keeps its adjusted state so subsequent
    /// entries land in the right place.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] on the first filesystem failure. Missing
    /// source files are not errors; they are collected in
    /// [`BuildReport::skipped`].
    pub fn build(&self, summary: &Summary) -> Result<BuildReport, BuildError> {
        let mut cursor = Cursor {
            level: 0,
            path: self.output_root.clone(),
        };
        let mut report = BuildReport::default();
        let mut category_dirs: HashSet<PathBuf> = HashSet::new();

        create_dir(&self.output_root)?;

        let entries = summary.entries();
        for (index, entry) in entries.iter().enumerate() {
            if entry.level > cursor.level {
                // Summary validation guarantees single-step descents, so a
                // previous entry always exists and is the new container.
                let parent = &entries[index - 1];
                cursor.path.push(filename_stem(&parent.filename));
                write_category(
                    &cursor.path,
                    &CategoryDescriptor::new(parent.title.clone(), parent.position),
                    &mut category_dirs,
                )?;
            } else {
                for _ in entry.level..cursor.level {
                    cursor.path.pop();
                }
            }
            cursor.level = entry.level;

            let Some(source) = self.locator.locate(&entry.filename) else {
                tracing::warn!(filename = %entry.filename, "source file not found, skipping entry");
                report.skipped.push(entry.filename.clone());
                continue;
            };

            let destination = if entry.has_children {
                let dir = cursor.path.join(filename_stem(&entry.filename));
                write_category(
                    &dir,
                    &CategoryDescriptor::new(entry.title.clone(), entry.position),
                    &mut category_dirs,
                )?;
                dir.join(&entry.filename)
            } else {
                cursor.path.join(&entry.filename)
            };

            let content = fs::read_to_string(&source).map_err(|e| BuildError::Read {
                path: source.clone(),
                source: e,
            })?;
            let page = frontmatter::render(&entry.title, entry.position) + &content;
            fs::write(&destination, page).map_err(|e| BuildError::Write {
                path: destination.clone(),
                source: e,
            })?;
            tracing::debug!(
                source = %source.display(),
                destination = %destination.display(),
                "materialized page"
            );
            report.pages += 1;
        }

        report.categories = category_dirs.len();
        Ok(report)
    }
}

/// Filename with the extension stripped, used as a directory name.
fn filename_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename)
}

fn create_dir(dir: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(dir).map_err(|e| BuildError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Create `dir` if absent and (re)write its category descriptor.
///
/// Descriptors are derived solely from the originating entry, so repeated
/// writes for the same directory produce identical bytes.
fn write_category(
    dir: &Path,
    descriptor: &CategoryDescriptor,
    written: &mut HashSet<PathBuf>,
) -> Result<(), BuildError> {
    create_dir(dir)?;
    let path = dir.join(CATEGORY_FILENAME);
    fs::write(&path, descriptor.to_json()).map_err(|e| BuildError::Write {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "wrote category descriptor");
    written.insert(dir.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use docuport_summary::SummaryParser;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Fixture: `<temp>/src` holds sources, `<temp>/out/book` is the output
    /// root, and the locator searches the whole temp dir with `out`
    /// excluded.
    struct Fixture {
        temp_dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new(sources: &[(&str, &str)]) -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let src = temp_dir.path().join("src");
            fs::create_dir(&src).unwrap();
            for &(name, content) in sources {
                fs::write(src.join(name), content).unwrap();
            }
            Self { temp_dir }
        }

        fn output_root(&self) -> PathBuf {
            self.temp_dir.path().join("out/book")
        }

        fn builder(&self) -> TreeBuilder {
            let locator = SourceLocator::new(self.temp_dir.path().to_path_buf())
                .exclude(self.temp_dir.path().join("out"));
            TreeBuilder::new(self.output_root(), locator)
        }

        fn build(&self, summary_text: &str) -> BuildReport {
            let summary = SummaryParser::new().parse(summary_text).unwrap();
            self.builder().build(&summary).unwrap()
        }

        fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.output_root().join(rel)).unwrap()
        }

        fn category(&self, rel_dir: &str) -> CategoryDescriptor {
            let raw = self.read(&format!("{rel_dir}/{CATEGORY_FILENAME}"));
            serde_json::from_str(&raw).unwrap()
        }

        /// All files under the output root as `relative path -> bytes`.
        fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
            let mut files = BTreeMap::new();
            collect_files(&self.output_root(), &self.output_root(), &mut files);
            files
        }
    }

    fn collect_files(base: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                collect_files(base, &path, files);
            } else {
                let rel = path.strip_prefix(base).unwrap().to_string_lossy().into_owned();
                files.insert(rel, fs::read(&path).unwrap());
            }
        }
    }

    #[test]
    fn test_build_flat_hierarchy() {
        let fixture = Fixture::new(&[("intro.md", "# Intro\n"), ("guide.md", "# Guide\n")]);
        let report = fixture.build("- [Intro](intro.md)\n- [Guide](guide.md)\n");

        assert_eq!(report.pages, 2);
        assert_eq!(report.categories, 0);
        assert!(report.skipped.is_empty());
        assert_eq!(
            fixture.read("intro.md"),
            "---\ntitle: \"Intro\"\nsidebar_position: 1\n---\n\n# Intro\n"
        );
        assert_eq!(
            fixture.read("guide.md"),
            "---\ntitle: \"Guide\"\nsidebar_position: 2\n---\n\n# Guide\n"
        );
    }

    #[test]
    fn test_build_parent_with_child() {
        // The worked scenario: intro at root, guide becomes a container
        // holding both its own page and its child.
        let fixture = Fixture::new(&[
            ("intro.md", "intro body"),
            ("guide.md", "guide body"),
            ("setup.md", "setup body"),
        ]);
        let report =
            fixture.build("- [Intro](intro.md)\n- [Guide](guide.md)\n  - [Setup](setup.md)\n");

        assert_eq!(report.pages, 3);
        assert_eq!(report.categories, 1);
        assert_eq!(
            fixture.read("intro.md"),
            "---\ntitle: \"Intro\"\nsidebar_position: 1\n---\n\nintro body"
        );
        assert_eq!(
            fixture.read("guide/guide.md"),
            "---\ntitle: \"Guide\"\nsidebar_position: 2\n---\n\nguide body"
        );
        assert_eq!(
            fixture.read("guide/setup.md"),
            "---\ntitle: \"Setup\"\nsidebar_position: 3\n---\n\nsetup body"
        );
        assert_eq!(fixture.category("guide"), CategoryDescriptor::new("Guide", 2));
    }

    #[test]
    fn test_build_category_json_bytes() {
        let fixture = Fixture::new(&[("a.md", "a"), ("b.md", "b")]);
        fixture.build("- [Section A](a.md)\n  - [B](b.md)\n");

        assert_eq!(
            fixture.read(&format!("a/{CATEGORY_FILENAME}")),
            "{\n  \"label\": \"Section A\",\n  \"position\": 1\n}"
        );
    }

    #[test]
    fn test_build_deep_nesting_depth_matches_level() {
        let fixture = Fixture::new(&[("a.md", "a"), ("b.md", "b"), ("c.md", "c")]);
        fixture.build("- [A](a.md)\n  - [B](b.md)\n    - [C](c.md)\n");

        assert!(fixture.output_root().join("a/a.md").is_file());
        assert!(fixture.output_root().join("a/b/b.md").is_file());
        assert!(fixture.output_root().join("a/b/c.md").is_file());
        assert_eq!(fixture.category("a"), CategoryDescriptor::new("A", 1));
        assert_eq!(fixture.category("a/b"), CategoryDescriptor::new("B", 2));
    }

    #[test]
    fn test_build_pops_multiple_levels() {
        let fixture = Fixture::new(&[
            ("a.md", "a"),
            ("b.md", "b"),
            ("c.md", "c"),
            ("d.md", "d"),
        ]);
        fixture.build("- [A](a.md)\n  - [B](b.md)\n    - [C](c.md)\n- [D](d.md)\n");

        assert!(fixture.output_root().join("d.md").is_file());
    }

    #[test]
    fn test_build_sibling_after_child_lands_in_parent() {
        let fixture = Fixture::new(&[
            ("a.md", "a"),
            ("b.md", "b"),
            ("c.md", "c"),
        ]);
        fixture.build("- [A](a.md)\n  - [B](b.md)\n  - [C](c.md)\n");

        assert!(fixture.output_root().join("a/b.md").is_file());
        assert!(fixture.output_root().join("a/c.md").is_file());
    }

    #[test]
    fn test_build_skips_missing_source() {
        let fixture = Fixture::new(&[("intro.md", "intro"), ("after.md", "after")]);
        let report =
            fixture.build("- [Intro](intro.md)\n- [Ghost](ghost.md)\n- [After](after.md)\n");

        assert_eq!(report.pages, 2);
        assert_eq!(report.skipped, vec!["ghost.md".to_owned()]);
        assert!(!fixture.output_root().join("ghost.md").exists());
        assert!(fixture.output_root().join("after.md").is_file());
    }

    #[test]
    fn test_build_skipped_entry_keeps_cursor_for_siblings() {
        // The missing entry sits one level deep; its sibling must still
        // land inside the parent directory.
        let fixture = Fixture::new(&[("a.md", "a"), ("c.md", "c")]);
        let report = fixture.build("- [A](a.md)\n  - [Ghost](ghost.md)\n  - [C](c.md)\n");

        assert_eq!(report.skipped, vec!["ghost.md".to_owned()]);
        assert!(fixture.output_root().join("a/c.md").is_file());
    }

    #[test]
    fn test_build_missing_parent_still_creates_container() {
        // The parent page cannot be located, but descending into its level
        // must still create the container directory and descriptor so the
        // child has somewhere to go.
        let fixture = Fixture::new(&[("child.md", "child")]);
        let report = fixture.build("- [Ghost](ghost.md)\n  - [Child](child.md)\n");

        assert_eq!(report.pages, 1);
        assert_eq!(report.categories, 1);
        assert_eq!(report.skipped, vec!["ghost.md".to_owned()]);
        assert!(!fixture.output_root().join("ghost/ghost.md").exists());
        assert!(fixture.output_root().join("ghost/child.md").is_file());
        assert_eq!(fixture.category("ghost"), CategoryDescriptor::new("Ghost", 1));
    }

    #[test]
    fn test_build_frontmatter_round_trip() {
        let body = "# Page\n\nwith \"quotes\" and\nmultiple lines\n";
        let fixture = Fixture::new(&[("page.md", body)]);
        fixture.build("- [My \"Page\"](page.md)\n");

        let written = fixture.read("page.md");
        let header = frontmatter::render("My \"Page\"", 1);
        assert_eq!(written.strip_prefix(header.as_str()).unwrap(), body);
    }

    #[test]
    fn test_build_overwrites_existing_output() {
        let fixture = Fixture::new(&[("intro.md", "new body")]);
        fs::create_dir_all(fixture.output_root()).unwrap();
        fs::write(fixture.output_root().join("intro.md"), "stale").unwrap();

        fixture.build("- [Intro](intro.md)\n");

        assert_eq!(
            fixture.read("intro.md"),
            "---\ntitle: \"Intro\"\nsidebar_position: 1\n---\n\nnew body"
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let fixture = Fixture::new(&[
            ("intro.md", "intro"),
            ("guide.md", "guide"),
            ("setup.md", "setup"),
        ]);
        let summary_text = "- [Intro](intro.md)\n- [Guide](guide.md)\n  - [Setup](setup.md)\n";

        fixture.build(summary_text);
        let first = fixture.snapshot();
        let report = fixture.build(summary_text);
        let second = fixture.snapshot();

        assert_eq!(first, second);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_build_empty_summary() {
        let fixture = Fixture::new(&[]);
        let report = fixture.build("no matching lines\n");

        assert_eq!(report.pages, 0);
        assert_eq!(report.categories, 0);
        // Output root is still created
        assert!(fixture.output_root().is_dir());
        assert!(fixture.snapshot().is_empty());
    }

    #[test]
    fn test_filename_stem() {
        assert_eq!(filename_stem("guide.md"), "guide");
        assert_eq!(filename_stem("archive.tar.md"), "archive.tar");
        assert_eq!(filename_stem("plain"), "plain");
    }
}
