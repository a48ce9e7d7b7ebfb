//! End-to-end scan of one or more root paths.
//!
//! For every root, strictly in order:
//!
//! 1. Walk down to the first directory holding `manage.py`; that is the
//!    project root. No marker means the root is reported as not a project.
//! 2. Walk the project root, mining every `urls.py` for routes and every
//!    admin module (`admin.py` or an `admin/` package) for registered models.
//!
//! Nothing in here fails a scan. Unreadable files and malformed route files
//! are reported to the [`ScanObserver`] and skipped.

use std::{
    cell::RefCell,
    io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Serialize;

use super::{
    fs::SourceFs,
    models::extract_models,
    routes::{AppRouteMap, RawRouteMap, extract_routes, map_routes},
    traversal::{IgnoreSet, Walk, traverse},
};

pub const PROJECT_MARKER: &str = "manage.py";
pub const ROUTE_FILE: &str = "urls.py";
pub const ADMIN_MODULE_FILE: &str = "admin.py";
pub const ADMIN_PACKAGE_DIR: &str = "admin";
pub const ADMIN_PACKAGE_INIT: &str = "__init__.py";

pub const DEFAULT_PROJECT_DEPTH: usize = 3;
pub const DEFAULT_APP_DEPTH: usize = 2;

/// Receives the non-fatal problems met during a scan.
pub trait ScanObserver {
    /// No project marker under `path` within the depth bound.
    fn not_project(&mut self, path: &Path);

    /// A route file could not be sliced; `message` names the file.
    fn config_read_error(&mut self, message: &str);

    /// A file or directory could not be read.
    fn file_read_error(&mut self, path: &Path, error: &io::Error);
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// How deep below a root path to look for the project marker.
    pub project_depth: usize,
    /// How deep below a project root to look for route files and admin modules.
    pub app_depth: usize,
    pub ignored: IgnoreSet,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            project_depth: DEFAULT_PROJECT_DEPTH,
            app_depth: DEFAULT_APP_DEPTH,
            ignored: IgnoreSet::default(),
        }
    }
}

/// Models per app, in discovery order.
pub type AppModelMap = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScanResult {
    pub project_root: PathBuf,
    pub routes: AppRouteMap,
    pub models: AppModelMap,
}

/// Scan every path in order, one result per path that holds a project.
pub fn scan_projects<S, O>(
    paths: &[PathBuf],
    fs: &S,
    options: &ScanOptions,
    observer: &mut O,
) -> Vec<ProjectScanResult>
where
    S: SourceFs + ?Sized,
    O: ScanObserver + ?Sized,
{
    paths
        .iter()
        .filter_map(|path| scan_project(path, fs, options, observer))
        .collect()
}

fn scan_project<S, O>(
    path: &Path,
    fs: &S,
    options: &ScanOptions,
    observer: &mut O,
) -> Option<ProjectScanResult>
where
    S: SourceFs + ?Sized,
    O: ScanObserver + ?Sized,
{
    let Some(project_root) = find_project_root(path, fs, options, observer) else {
        observer.not_project(path);
        return None;
    };

    let observer = RefCell::new(observer);
    let mut route_files: Vec<RawRouteMap> = Vec::new();
    let mut models = AppModelMap::new();

    let _ = traverse(
        fs,
        &project_root,
        options.app_depth,
        &options.ignored,
        &mut |level: &Path, files: &[String]| {
            let read = |file: PathBuf| match fs.read_to_string(&file) {
                Ok(text) => Some((file, text)),
                Err(err) => {
                    observer.borrow_mut().file_read_error(&file, &err);
                    None
                }
            };

            if contains(files, ROUTE_FILE)
                && let Some((file, text)) = read(level.join(ROUTE_FILE))
            {
                let source = file.display().to_string();
                route_files.push(extract_routes(&text, &source, |message| {
                    observer.borrow_mut().config_read_error(&message)
                }));
            }

            let admin_package = is_admin_package(level, files);

            if !admin_package
                && contains(files, ADMIN_MODULE_FILE)
                && let Some((_, text)) = read(level.join(ADMIN_MODULE_FILE))
            {
                add_models(&mut models, app_label(level), extract_models(&text));
            }

            if admin_package {
                let app = level.parent().map(app_label).unwrap_or_default();
                for file in files.iter().filter(|f| f.ends_with(".py")) {
                    if let Some((_, text)) = read(level.join(file)) {
                        add_models(&mut models, app.clone(), extract_models(&text));
                    }
                }
            }

            Walk::Descend
        },
        &mut |dir: &Path, err: io::Error| observer.borrow_mut().file_read_error(dir, &err),
    );

    Some(ProjectScanResult {
        project_root,
        routes: map_routes(route_files),
        models,
    })
}

/// First directory under `path` (itself included) that holds the marker file.
fn find_project_root<S, O>(
    path: &Path,
    fs: &S,
    options: &ScanOptions,
    observer: &mut O,
) -> Option<PathBuf>
where
    S: SourceFs + ?Sized,
    O: ScanObserver + ?Sized,
{
    let mut project_root = None;

    let _ = traverse(
        fs,
        path,
        options.project_depth,
        &options.ignored,
        &mut |level: &Path, files: &[String]| {
            if contains(files, PROJECT_MARKER) {
                project_root = Some(level.to_path_buf());
                Walk::Stop
            } else {
                Walk::Descend
            }
        },
        &mut |dir: &Path, err: io::Error| observer.file_read_error(dir, &err),
    );

    project_root
}

fn contains(files: &[String], name: &str) -> bool {
    files.iter().any(|f| f == name)
}

fn is_admin_package(level: &Path, files: &[String]) -> bool {
    level.file_name().is_some_and(|name| name == ADMIN_PACKAGE_DIR)
        && contains(files, ADMIN_PACKAGE_INIT)
}

/// App name of a directory: its last component, or the path itself for `.`
/// and similar.
fn app_label(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn add_models(models: &mut AppModelMap, app: String, found: Vec<String>) {
    if !found.is_empty() {
        models.entry(app).or_default().extend(found);
    }
}
