//! Non-fatal problems reported during a scan.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use crate::core::scanner::ScanObserver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No project marker found under a root path.
    NotAProject { path: PathBuf },
    /// A route file with unbalanced brackets; it contributed no routes.
    MalformedRoutes { message: String },
    /// A file or directory that could not be read.
    FileRead { path: PathBuf, message: String },
}

impl Diagnostic {
    /// Short stable name of the diagnostic kind.
    pub fn label(&self) -> &'static str {
        match self {
            Diagnostic::NotAProject { .. } => "not-a-project",
            Diagnostic::MalformedRoutes { .. } => "malformed-routes",
            Diagnostic::FileRead { .. } => "file-read",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NotAProject { path } => {
                write!(f, "No Django project found in {}", path.display())
            }
            Diagnostic::MalformedRoutes { message } => f.write_str(message),
            Diagnostic::FileRead { path, message } => {
                write!(f, "Cannot read {}: {}", path.display(), message)
            }
        }
    }
}

/// [`ScanObserver`] that keeps every diagnostic in the order reported.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl ScanObserver for DiagnosticCollector {
    fn not_project(&mut self, path: &Path) {
        self.diagnostics.push(Diagnostic::NotAProject {
            path: path.to_path_buf(),
        });
    }

    fn config_read_error(&mut self, message: &str) {
        self.diagnostics.push(Diagnostic::MalformedRoutes {
            message: message.to_string(),
        });
    }

    fn file_read_error(&mut self, path: &Path, error: &io::Error) {
        self.diagnostics.push(Diagnostic::FileRead {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
    }
}
