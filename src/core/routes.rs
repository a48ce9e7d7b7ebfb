//! Route extraction from `urls.py` text.
//!
//! Two phases:
//!
//! 1. [`extract_routes`]: per file, find the app namespace and cut the raw
//!    route tuples out of the `urlpatterns` list literal.
//! 2. [`map_routes`]: merge the per-file maps and turn each raw tuple into a
//!    [`Route`] with its reverse-lookup name and typed arguments.

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::sync::LazyLock;

use super::delimiters::{self, DelimiterError, DelimiterKind};
use super::normalize::normalize;
use super::route_args::{RouteArgument, parse_placeholders};

/// Prefix of the namespace key used for files without an `app_name`.
pub const FILE_PATH_KEY_PREFIX: &str = "READER_FILE_PATH_";

static APP_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bapp_name\s*=\s*['"](?P<app_name>[^'"]*)['"]"#).unwrap()
});

// `\b` keeps `app_name=` from counting as a route name.
static ROUTE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bname\s*=\s*['"](?P<name>[^'"]+)['"]"#).unwrap());

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]+>").unwrap());

/// Groups the routes of one `urls.py`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamespaceKey {
    /// Declared through `app_name = "..."`.
    App(String),
    /// No namespace declared; keyed by the file the routes came from.
    File(String),
}

impl NamespaceKey {
    pub fn is_file_path(&self) -> bool {
        matches!(self, NamespaceKey::File(_))
    }

    /// Name used to reverse a route of this namespace.
    pub fn qualify(&self, route_name: &str) -> String {
        match self {
            NamespaceKey::App(app) => format!("{}:{}", app, route_name),
            NamespaceKey::File(_) => route_name.to_string(),
        }
    }
}

impl fmt::Display for NamespaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceKey::App(app) => f.write_str(app),
            NamespaceKey::File(path) => write!(f, "{}{}", FILE_PATH_KEY_PREFIX, path),
        }
    }
}

impl Serialize for NamespaceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub name: String,
    pub has_args: bool,
    pub args: Vec<RouteArgument>,
    pub qualified_view_name: String,
}

/// Raw route tuple texts keyed by namespace, as cut out of one or more files.
pub type RawRouteMap = IndexMap<NamespaceKey, Vec<String>>;

/// Structured routes keyed by namespace.
pub type AppRouteMap = IndexMap<NamespaceKey, Vec<Route>>;

/// Cut the raw route tuples out of one `urls.py`.
///
/// The result always holds exactly one entry. Unbalanced brackets are handed
/// to `on_error` together with `source` and leave the entry empty.
pub fn extract_routes<F>(text: &str, source: &str, on_error: F) -> RawRouteMap
where
    F: FnOnce(String),
{
    let formatted = normalize(text, false);

    let key = APP_NAME_REGEX
        .captures(&formatted)
        .and_then(|caps| caps.name("app_name"))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .map(|name| NamespaceKey::App(name.to_string()))
        .unwrap_or_else(|| NamespaceKey::File(source.to_string()));

    let routes = match route_tuples(&formatted) {
        Ok(routes) => routes,
        Err(err) => {
            on_error(format!("Malformed route file {}: {}", source, err));
            Vec::new()
        }
    };

    let mut map = RawRouteMap::new();
    map.insert(key, routes);
    map
}

fn route_tuples(text: &str) -> Result<Vec<String>, DelimiterError> {
    let lists = delimiters::scan(text, DelimiterKind::Square, false)?;

    let mut tuples = Vec::new();
    for list in &lists {
        tuples.extend(delimiters::scan(list, DelimiterKind::Round, false)?);
    }
    Ok(tuples)
}

/// Merge per-file raw maps and build the final route records.
///
/// A key seen again in a later map replaces the earlier routes but keeps its
/// original position. Tuples without a `name=` literal are dropped.
pub fn map_routes<I>(per_file: I) -> AppRouteMap
where
    I: IntoIterator<Item = RawRouteMap>,
{
    let mut merged = RawRouteMap::new();
    for map in per_file {
        merged.extend(map);
    }

    merged
        .into_iter()
        .map(|(key, raw_routes)| {
            let routes = raw_routes
                .iter()
                .filter_map(|raw| build_route(&key, raw))
                .collect();
            (key, routes)
        })
        .collect()
}

fn build_route(key: &NamespaceKey, raw: &str) -> Option<Route> {
    let name = ROUTE_NAME_REGEX.captures(raw)?.name("name")?.as_str();

    let tokens: Vec<&str> = PLACEHOLDER_REGEX
        .find_iter(raw)
        .map(|m| m.as_str())
        .collect();

    Some(Route {
        name: name.to_string(),
        has_args: !tokens.is_empty(),
        args: parse_placeholders(&tokens),
        qualified_view_name: key.qualify(name),
    })
}
