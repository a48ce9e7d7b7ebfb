use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::{OutputFormat, ScanCommand},
    exit_status::ExitStatus,
    report,
};
use crate::{
    config::{CONFIG_FILE_NAME, load_config},
    core::{fs::LocalFs, scan_projects},
    diagnostics::DiagnosticCollector,
};

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to read current directory")?;
    let config_result = load_config(&cwd)?;

    if cmd.verbose && !config_result.from_file {
        eprintln!(
            "{} No {} found, using default configuration",
            "note:".bold(),
            CONFIG_FILE_NAME
        );
    }

    // CLI > config file > defaults
    let mut config = config_result.config;
    if let Some(depth) = cmd.project_depth {
        config.project_depth = depth;
    }
    if let Some(depth) = cmd.app_depth {
        config.app_depth = depth;
    }

    let options = config.scan_options()?;
    let paths: Vec<PathBuf> = if cmd.paths.is_empty() {
        config.paths.iter().map(PathBuf::from).collect()
    } else {
        cmd.paths
    };

    let mut collector = DiagnosticCollector::new();
    let results = scan_projects(&paths, &LocalFs, &options, &mut collector);
    let diagnostics = collector.into_diagnostics();

    match cmd.format {
        OutputFormat::Text => {
            report::print_text(&results);
            report::print_diagnostics(&diagnostics, cmd.verbose);
            report::print_summary(&results, diagnostics.len());
        }
        OutputFormat::Json => {
            report::print_json(&results)?;
            report::print_diagnostics(&diagnostics, cmd.verbose);
        }
    }

    if diagnostics.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
