//! Colored terminal output.

use std::path::Path;

use console::{Style, Term};

/// Startup and error messages on stderr.
pub(crate) struct Output {
    term: Term,
    dim: Style,
    green: Style,
    red: Style,
    title: Style,
}

impl Output {
    /// Styling follows `console`'s global color setting, so `--no-color`
    /// must be applied before the first message.
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            dim: Style::new().dim(),
            green: Style::new().green(),
            red: Style::new().red(),
            title: Style::new().cyan().bold(),
        }
    }

    /// Print the startup banner.
    pub(crate) fn banner(&self, version: &str, config: Option<&Path>, root: &Path, url: &str) {
        self.line(&self.title.apply_to(format!("DSK {version}")).to_string());
        if let Some(config) = config {
            self.field("config", &config.display().to_string());
        }
        self.field("definitions", &root.display().to_string());
        self.line(
            &self
                .green
                .apply_to(format!("Please visit {url}"))
                .to_string(),
        );
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    fn field(&self, name: &str, value: &str) {
        self.line(&format!("{} {value}", self.dim.apply_to(format!("{name:>12}:"))));
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }
}
