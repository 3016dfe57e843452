//! Configuration management for docuport.
//!
//! Parses `docuport.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Relative paths in
//! the file resolve against the config file's directory; when no file is
//! found, defaults resolve against the working directory.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docuport.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the books directory.
    pub books_dir: Option<PathBuf>,
    /// Override the output directory root.
    pub output_dir: Option<PathBuf>,
    /// Override the source search directory.
    pub search_dir: Option<PathBuf>,
    /// Override the whitespace characters per nesting level.
    pub indent_step: Option<usize>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Books configuration (paths are relative strings from TOML).
    books: BooksConfigRaw,
    /// Docs output configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,

    /// Resolved books configuration (set after loading).
    #[serde(skip)]
    pub books_resolved: BooksConfig,
    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw books configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BooksConfigRaw {
    dir: Option<String>,
    summary: Option<String>,
    indent_step: Option<usize>,
}

/// Resolved books configuration with absolute paths.
#[derive(Debug)]
pub struct BooksConfig {
    /// Directory holding one subdirectory per book.
    pub dir: PathBuf,
    /// Summary filename inside each book directory.
    pub summary: String,
    /// Whitespace characters per nesting level in summary documents.
    pub indent_step: usize,
}

impl BooksConfig {
    /// Summary document path for a book.
    #[must_use]
    pub fn summary_path(&self, book: &str) -> PathBuf {
        self.dir.join(book).join(&self.summary)
    }
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("../books"),
            summary: "SUMMARY.md".to_owned(),
            indent_step: 2,
        }
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    output_dir: Option<String>,
    search_dir: Option<String>,
}

/// Resolved docs output configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Root directory receiving one generated tree per book.
    pub output_dir: PathBuf,
    /// Directory searched recursively for source files.
    pub search_dir: PathBuf,
}

impl DocsConfig {
    /// Output directory for a book's generated tree.
    #[must_use]
    pub fn book_output_dir(&self, book: &str) -> PathBuf {
        self.output_dir.join(book)
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docu_books"),
            search_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `docuport.toml` in the current directory and parents,
    /// falling back to defaults.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, parsing
    /// fails, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(books_dir) = &settings.books_dir {
            self.books_resolved.dir.clone_from(books_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(search_dir) = &settings.search_dir {
            self.docs_resolved.search_dir.clone_from(search_dir);
        }
        if let Some(indent_step) = settings.indent_step {
            self.books_resolved.indent_step = indent_step;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.books_resolved.indent_step == 0 {
            return Err(ConfigError::Validation(
                "books.indent_step must be greater than 0".to_owned(),
            ));
        }
        if self.books_resolved.summary.is_empty() {
            return Err(ConfigError::Validation(
                "books.summary cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to the working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to the given base.
    fn default_with_base(base: &Path) -> Self {
        Self {
            books: BooksConfigRaw::default(),
            docs: DocsConfigRaw::default(),
            books_resolved: BooksConfig {
                dir: base.join("../books"),
                ..BooksConfig::default()
            },
            docs_resolved: DocsConfig {
                output_dir: base.join("docu_books"),
                search_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths to absolute paths based on the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.books_resolved = BooksConfig {
            dir: resolve(self.books.dir.as_deref(), "../books"),
            summary: self
                .books
                .summary
                .clone()
                .unwrap_or_else(|| "SUMMARY.md".to_owned()),
            indent_step: self.books.indent_step.unwrap_or(2),
        };

        self.docs_resolved = DocsConfig {
            output_dir: resolve(self.docs.output_dir.as_deref(), "docu_books"),
            search_dir: resolve(self.docs.search_dir.as_deref(), "."),
        };
    }
}
