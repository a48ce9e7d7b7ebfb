//! Report formatting and printing utilities.
//!
//! Scan results go to stdout (text or JSON); diagnostics go to stderr in
//! cargo-style `warning:` lines. Kept apart from the core so routescout can
//! be used as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{NamespaceKey, ProjectScanResult, Route};
use crate::diagnostics::Diagnostic;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print every project's routes and models to stdout.
pub fn print_text(results: &[ProjectScanResult]) {
    print_text_to(results, &mut io::stdout().lock());
}

/// Print every project's routes and models to a custom writer.
///
/// ```text
/// /srv/site
///   core
///     core:account-action  (action: string)
///     core:login
///   models
///     core: Account, Profile
/// ```
pub fn print_text_to<W: Write>(results: &[ProjectScanResult], writer: &mut W) {
    for project in results {
        let _ = writeln!(
            writer,
            "{}",
            project.project_root.display().to_string().bold()
        );

        let width = max_view_name_width(project);
        for (namespace, routes) in &project.routes {
            let _ = writeln!(writer, "  {}", namespace_label(namespace).cyan());
            if routes.is_empty() {
                let _ = writeln!(writer, "    {}", "(no named routes)".dimmed());
            }
            for route in routes {
                print_route(route, width, writer);
            }
        }

        if !project.models.is_empty() {
            let _ = writeln!(writer, "  {}", "models".cyan());
            for (app, models) in &project.models {
                let _ = writeln!(writer, "    {}: {}", app.bold(), models.join(", "));
            }
        }

        let _ = writeln!(writer);
    }
}

/// Print the scan results as a pretty JSON array to stdout.
pub fn print_json(results: &[ProjectScanResult]) -> Result<()> {
    print_json_to(results, &mut io::stdout().lock())
}

pub fn print_json_to<W: Write>(results: &[ProjectScanResult], writer: &mut W) -> Result<()> {
    let json =
        serde_json::to_string_pretty(results).context("Failed to serialize scan results.")?;
    writeln!(writer, "{}", json).context("Failed to write scan results.")?;
    Ok(())
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic], verbose: bool) {
    print_diagnostics_to(diagnostics, verbose, &mut io::stderr().lock());
}

/// Print diagnostics to a custom writer.
///
/// Unreadable paths are listed one by one only in verbose mode; otherwise
/// they are folded into a single count.
pub fn print_diagnostics_to<W: Write>(diagnostics: &[Diagnostic], verbose: bool, writer: &mut W) {
    let mut unreadable = 0;

    for diagnostic in diagnostics {
        if !verbose && matches!(diagnostic, Diagnostic::FileRead { .. }) {
            unreadable += 1;
            continue;
        }
        let _ = writeln!(
            writer,
            "{} {}  {}",
            "warning:".bold().yellow(),
            diagnostic,
            diagnostic.label().dimmed().cyan()
        );
    }

    if unreadable > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            unreadable,
            "-v".cyan()
        );
    }
}

/// Print the closing summary line to stdout.
pub fn print_summary(results: &[ProjectScanResult], diagnostic_count: usize) {
    print_summary_to(results, diagnostic_count, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(
    results: &[ProjectScanResult],
    diagnostic_count: usize,
    writer: &mut W,
) {
    let route_count: usize = results
        .iter()
        .flat_map(|project| project.routes.values())
        .map(Vec::len)
        .sum();
    let model_count: usize = results
        .iter()
        .flat_map(|project| project.models.values())
        .map(Vec::len)
        .sum();

    let found = format!(
        "Found {} {} and {} {} in {} {}",
        route_count,
        if route_count == 1 { "route" } else { "routes" },
        model_count,
        if model_count == 1 { "model" } else { "models" },
        results.len(),
        if results.len() == 1 {
            "project"
        } else {
            "projects"
        }
    );

    if diagnostic_count == 0 {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), found.green());
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({} {})",
            FAILURE_MARK.red(),
            found,
            diagnostic_count,
            if diagnostic_count == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_route<W: Write>(route: &Route, width: usize, writer: &mut W) {
    if !route.has_args {
        let _ = writeln!(writer, "    {}", route.qualified_view_name);
        return;
    }

    let padding = width - UnicodeWidthStr::width(route.qualified_view_name.as_str());
    let _ = writeln!(
        writer,
        "    {}{:padding$}  {}",
        route.qualified_view_name,
        "",
        describe_args(route).dimmed(),
        padding = padding
    );
}

fn describe_args(route: &Route) -> String {
    let args: Vec<String> = route
        .args
        .iter()
        .map(|arg| match arg.arg_type {
            Some(arg_type) => format!("{}: {}", arg.name, arg_type),
            None => arg.name.clone(),
        })
        .collect();
    format!("({})", args.join(", "))
}

fn namespace_label(namespace: &NamespaceKey) -> String {
    match namespace {
        NamespaceKey::App(name) => name.clone(),
        NamespaceKey::File(path) => format!("{} (no app_name)", path),
    }
}

fn max_view_name_width(project: &ProjectScanResult) -> usize {
    project
        .routes
        .values()
        .flatten()
        .map(|route| UnicodeWidthStr::width(route.qualified_view_name.as_str()))
        .max()
        .unwrap_or(0)
}

// ============================================================
// Tests
// ============================================================
