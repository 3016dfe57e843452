//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    success: Style,
    warning: Style,
    error: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
        }
    }

    fn line(&self, style: Option<&Style>, msg: &str) {
        let rendered = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        let _ = self.term.write_line(&rendered);
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        self.line(None, msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(Some(&self.success), msg);
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Some(&self.warning), msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.error), msg);
    }
}
