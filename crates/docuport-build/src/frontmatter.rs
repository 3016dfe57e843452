//! Frontmatter generation for materialized pages.

/// Render the frontmatter header for a page.
///
/// Fixed format: a delimited block with the quoted title and the sidebar
/// position, followed by a blank line. The page content is appended
/// verbatim after this header, so stripping the header recovers the
/// original source byte-for-byte.
#[must_use]
pub fn render(title: &str, position: usize) -> String {
    format!(
        "---\ntitle: \"{}\"\nsidebar_position: {position}\n---\n\n",
        escape_title(title)
    )
}

/// Escape backslashes and double quotes so the emitted title is always a
/// well-formed double-quoted YAML scalar.
fn escape_title(title: &str) -> String {
    let mut escaped = String::with_capacity(title.len());
    for c in title.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
