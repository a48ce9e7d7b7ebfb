//! Balanced delimiter scanning.
//!
//! Slices text into its top-level bracketed groups for a single bracket kind.
//! Route files are never parsed as a grammar; list literals and route tuples are
//! recovered purely by bracket balance.

use thiserror::Error;

/// The bracket pair a scan operates on. Glyphs of every other kind are inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterKind {
    Round,
    Square,
    Curly,
    Angle,
}

impl DelimiterKind {
    pub fn open(self) -> char {
        match self {
            DelimiterKind::Round => '(',
            DelimiterKind::Square => '[',
            DelimiterKind::Curly => '{',
            DelimiterKind::Angle => '<',
        }
    }

    pub fn close(self) -> char {
        match self {
            DelimiterKind::Round => ')',
            DelimiterKind::Square => ']',
            DelimiterKind::Curly => '}',
            DelimiterKind::Angle => '>',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelimiterError {
    /// A closing glyph appeared while no group of its kind was open.
    #[error("unmatched '{glyph}' at byte offset {offset}")]
    Unmatched { glyph: char, offset: usize },
}

/// Split `text` into its top-level groups of `kind`, in source order.
///
/// Nested groups of the same kind stay inside their outermost group and are
/// never emitted on their own. With `strip_delimiters` each group loses its
/// enclosing glyphs.
///
/// Groups still open at end of text are dropped without error.
///
/// # Examples
///
/// ```
/// use routescout::core::delimiters::{DelimiterKind, scan};
///
/// let groups = scan("my name is Jane (the King) Doe. I am twenty(20)", DelimiterKind::Round, false).unwrap();
/// assert_eq!(groups, vec!["(the King)", "(20)"]);
///
/// let inner = scan("(the King)(20)", DelimiterKind::Round, true).unwrap();
/// assert_eq!(inner, vec!["the King", "20"]);
/// ```
pub fn scan(
    text: &str,
    kind: DelimiterKind,
    strip_delimiters: bool,
) -> Result<Vec<String>, DelimiterError> {
    let (open, close) = (kind.open(), kind.close());
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, ch) in text.char_indices() {
        if ch == open {
            if depth == 0 {
                start = idx;
            }
            depth += 1;
        } else if ch == close {
            if depth == 0 {
                return Err(DelimiterError::Unmatched {
                    glyph: close,
                    offset: idx,
                });
            }
            depth -= 1;
            if depth == 0 {
                // Both glyphs are single-byte ASCII.
                let group = if strip_delimiters {
                    &text[start + 1..idx]
                } else {
                    &text[start..=idx]
                };
                groups.push(group.to_string());
            }
        }
    }

    Ok(groups)
}
