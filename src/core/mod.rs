//! Core mining pipeline.
//!
//! ## Module Structure
//!
//! - `delimiters`: balanced bracket slicing
//! - `normalize`: comment stripping
//! - `route_args`: typed route placeholders
//! - `routes`: route extraction and mapping for `urls.py`
//! - `models`: admin registration mining
//! - `fs`: filesystem access behind a trait
//! - `traversal`: depth-bounded directory walk
//! - `scanner`: the end-to-end scan over root paths

pub mod delimiters;
pub mod fs;
pub mod models;
pub mod normalize;
pub mod route_args;
pub mod routes;
pub mod scanner;
pub mod traversal;


pub use routes::{AppRouteMap, NamespaceKey, Route};
pub use scanner::{ProjectScanResult, ScanObserver, ScanOptions, scan_projects};
