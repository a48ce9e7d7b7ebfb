use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    scanner::{DEFAULT_APP_DEPTH, DEFAULT_PROJECT_DEPTH, ScanOptions},
    traversal::IgnoreSet,
};

pub const CONFIG_FILE_NAME: &str = ".routescoutrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extra directory-name globs to skip, on top of the built-in ignore set.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_project_depth")]
    pub project_depth: usize,
    #[serde(default = "default_app_depth")]
    pub app_depth: usize,
    /// Roots scanned when none are given on the command line.
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,
}

fn default_project_depth() -> usize {
    DEFAULT_PROJECT_DEPTH
}

fn default_app_depth() -> usize {
    DEFAULT_APP_DEPTH
}

fn default_paths() -> Vec<String> {
    vec![".".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            project_depth: default_project_depth(),
            app_depth: default_app_depth(),
            paths: default_paths(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    /// Scan options described by this configuration.
    pub fn scan_options(&self) -> Result<ScanOptions> {
        let ignored = IgnoreSet::with_patterns(&self.ignores)
            .context("Invalid glob pattern in 'ignores'")?;
        Ok(ScanOptions {
            project_depth: self.project_depth,
            app_depth: self.app_depth,
            ignored,
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Nearest config file at or above `start_dir`. The search ends at the first
/// directory holding `.git`.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.validate()?;

    Ok(ConfigLoadResult {
        config,
        from_file: true,
    })
}
