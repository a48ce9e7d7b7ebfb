//! Typed route arguments from `<converter:name>` placeholders.

use serde::Serialize;

/// Path converter of a route argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArgType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "slug")]
    Slug,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "UUID")]
    Uuid,
    #[serde(rename = "path")]
    Path,
}

impl ArgType {
    /// Look up a converter tag as written in a placeholder (`str`, `int`, ...).
    pub fn from_converter(tag: &str) -> Option<Self> {
        match tag {
            "str" => Some(ArgType::String),
            "slug" => Some(ArgType::Slug),
            "int" => Some(ArgType::Integer),
            "uuid" => Some(ArgType::Uuid),
            "path" => Some(ArgType::Path),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Slug => "slug",
            ArgType::Integer => "integer",
            ArgType::Uuid => "UUID",
            ArgType::Path => "path",
        }
    }
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteArgument {
    pub name: String,
    /// `None` when the converter is missing or not one of the built-in ones.
    #[serde(rename = "type")]
    pub arg_type: Option<ArgType>,
}

impl RouteArgument {
    pub fn new(name: impl Into<String>, arg_type: Option<ArgType>) -> Self {
        Self {
            name: name.into(),
            arg_type,
        }
    }
}

/// Turn raw placeholder tokens such as `<int:pk>` into arguments, keeping order
/// and duplicates.
pub fn parse_placeholders<S: AsRef<str>>(tokens: &[S]) -> Vec<RouteArgument> {
    tokens
        .iter()
        .map(|token| parse_placeholder(token.as_ref()))
        .collect()
}

fn parse_placeholder(token: &str) -> RouteArgument {
    let inner = token.strip_prefix('<').unwrap_or(token);
    let inner = inner.strip_suffix('>').unwrap_or(inner);

    match inner.split_once(':') {
        Some((converter, name)) => RouteArgument::new(name, ArgType::from_converter(converter)),
        None => RouteArgument::new(inner, None),
    }
}
