//! Comment stripping for Python source text.

use regex::Regex;
use std::sync::LazyLock;

// Triple-quoted blocks, lazily matched across lines.
static BLOCK_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)""".*?""""#).unwrap());

// `#` to the end of the line, newline included.
static LINE_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[^\n]*(?:\n|$)").unwrap());

/// Remove docstring blocks and `#` comments from `text`.
///
/// Unless `preserve_newlines` is set, the first remaining newline (and only
/// that one) is turned into a space. Route extraction depends on this exact
/// behavior, so it is kept as is.
///
/// ```
/// use routescout::core::normalize::normalize;
///
/// assert_eq!(normalize("# My name is \nMuremwa\nDaniel", false), "Muremwa Daniel");
/// assert_eq!(normalize("# My name is \nMuremwa\nDaniel", true), "Muremwa\nDaniel");
/// ```
pub fn normalize(text: &str, preserve_newlines: bool) -> String {
    let without_blocks = BLOCK_COMMENT_REGEX.replace_all(text, "");
    let stripped = LINE_COMMENT_REGEX.replace_all(&without_blocks, "");

    if preserve_newlines {
        stripped.into_owned()
    } else {
        stripped.replacen('\n', " ", 1)
    }
}
