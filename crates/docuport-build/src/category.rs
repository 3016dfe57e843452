//! Category descriptor files for generated directories.

use serde::{Deserialize, Serialize};

/// Filename of the per-directory category descriptor.
pub const CATEGORY_FILENAME: &str = "_category_.json";

/// Display label and sort order for a directory that contains children.
///
/// Serialized as a JSON object with exactly two keys, two-space indented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Display label, taken from the originating entry's title.
    pub label: String,
    /// Sort order, taken from the originating entry's position.
    pub position: usize,
}

impl CategoryDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(label: impl Into<String>, position: usize) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }

    /// Serialize to pretty-printed JSON (two-space indentation).
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("descriptor serialization cannot fail")
    }
}
