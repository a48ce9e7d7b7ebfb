//! routescout - route and admin model miner for Django projects
//!
//! routescout finds Django projects on disk (by their `manage.py`) and reads
//! their `urls.py` and admin modules as plain text, without running Python.
//! It reports every named route with its namespace-qualified view name and
//! typed path arguments, and every model registered with the admin site.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Text mining and project traversal
//! - `diagnostics`: Non-fatal problems reported during a scan

pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
