//! Colored status lines on stderr.

use console::{Style, Term};

/// Status line writer.
///
/// Everything goes to stderr; stdout is reserved for `docsite render`.
pub(crate) struct Output {
    term: Term,
    label: Style,
    ok: Style,
    failed: Style,
    banner: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            ok: Style::new().green(),
            failed: Style::new().red().bold(),
            banner: Style::new().cyan().bold(),
        }
    }

    fn line(&self, text: &str) {
        // Status output is best effort
        let _ = self.term.write_line(text);
    }

    /// Print `label: value` with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: &dyn std::fmt::Display) {
        self.line(&format!("{} {value}", self.label.apply_to(format!("{label}:"))));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.ok.apply_to(msg).to_string());
    }

    /// Print an error message (bold red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.failed.apply_to(msg).to_string());
    }

    /// Print a banner line (cyan bold).
    pub(crate) fn banner(&self, msg: &str) {
        self.line(&self.banner.apply_to(msg).to_string());
    }
}
