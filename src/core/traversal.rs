//! Depth-bounded directory walk with per-level control.
//!
//! The callback sees one directory at a time (its path and file names) and
//! decides whether the walk goes deeper, skips what lies below, or ends.

use std::{collections::HashSet, io, ops::ControlFlow, path::Path};

use glob::{Pattern, PatternError};

use super::fs::SourceFs;

/// Directory names never descended into.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    "__pycache__",
    "node_modules",
    "venv",
    ".venv",
    "env",
    ".env",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    "build",
    "dist",
    "static",
    "staticfiles",
    "media",
    "templates",
    "migrations",
    "tests",
];

/// Directory names excluded from descent: the defaults plus user glob patterns.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    names: HashSet<String>,
    patterns: Vec<Pattern>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            patterns: Vec::new(),
        }
    }
}

impl IgnoreSet {
    /// Defaults extended with extra directory-name globs such as `*.egg-info`.
    pub fn with_patterns(patterns: &[String]) -> Result<Self, PatternError> {
        let mut set = Self::default();
        for pattern in patterns {
            set.patterns.push(Pattern::new(pattern)?);
        }
        Ok(set)
    }

    pub fn is_ignored(&self, dir_name: &str) -> bool {
        self.names.contains(dir_name) || self.patterns.iter().any(|p| p.matches(dir_name))
    }
}

/// What the walk does after a level has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Go into this level's subdirectories, depth permitting.
    Descend,
    /// Leave this level's subdirectories alone; siblings are still visited.
    Prune,
    /// End the whole walk now.
    Stop,
}

/// Walk `root` at most `max_depth` levels deep.
///
/// `on_level` runs once per visited directory with its path and the names of
/// the files directly inside it. Subdirectories are visited in name order,
/// skipping ignored names, only when `on_level` returned [`Walk::Descend`] and
/// depth remains; `max_depth == 0` visits `root` alone.
///
/// A directory that cannot be listed is reported to `on_error` and its branch
/// is abandoned. Returns `Break` when `on_level` stopped the walk.
pub fn traverse<S, F, E>(
    fs: &S,
    root: &Path,
    max_depth: usize,
    ignored: &IgnoreSet,
    on_level: &mut F,
    on_error: &mut E,
) -> ControlFlow<()>
where
    S: SourceFs + ?Sized,
    F: FnMut(&Path, &[String]) -> Walk,
    E: FnMut(&Path, io::Error),
{
    let listing = match fs.list_dir(root) {
        Ok(listing) => listing,
        Err(err) => {
            on_error(root, err);
            return ControlFlow::Continue(());
        }
    };

    match on_level(root, &listing.files) {
        Walk::Stop => return ControlFlow::Break(()),
        Walk::Prune => return ControlFlow::Continue(()),
        Walk::Descend => {}
    }

    if max_depth == 0 {
        return ControlFlow::Continue(());
    }

    for dir in listing.dirs.iter().filter(|dir| !ignored.is_ignored(dir)) {
        traverse(fs, &root.join(dir), max_depth - 1, ignored, on_level, on_error)?;
    }

    ControlFlow::Continue(())
}
