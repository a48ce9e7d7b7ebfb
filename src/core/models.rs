//! Admin registration mining.
//!
//! Finds the models an `admin.py` registers with the admin site, following the
//! admin import through an optional alias and one reassignment:
//!
//! ```python
//! from django.contrib import admin as ad
//! site = ad.site
//!
//! @ad.register(Book, Author)
//! class BookAdmin(ad.ModelAdmin): ...
//!
//! site.register(Publisher)
//! ```

use regex::{CaptureMatches, Regex};
use std::sync::LazyLock;

use super::normalize::normalize;

// `from django.contrib import ...` or `from django.contrib.admin import ...`,
// capturing the imported list.
static ADMIN_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*from[ \t]+[\w.]*contrib(?:\.admin[ \t]+import[ \t]+(?P<members>[^\n]*)|[ \t]+import[ \t]+(?P<modules>[^\n]*))",
    )
    .unwrap()
});

// One entry of an import list: `name` or `name as alias`.
static IMPORT_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>\w+)(?:[ \t]+as[ \t]+(?P<alias>\w+))?$").unwrap()
});

static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// The two registration idioms for one registration-function name.
struct RegistrationPatterns {
    decorator: Regex,
    call: Regex,
}

impl RegistrationPatterns {
    fn new(name: &str) -> Result<Self, regex::Error> {
        let name = regex::escape(name);
        Ok(Self {
            // @admin.register(Book, Author, site=custom_site)
            decorator: Regex::new(&format!(
                r"(?m)^[ \t]*@{name}(?:\.site)?(?:\.register)?\((?P<models>[^)]*?)(?:,\s*site\s*=[^)]*)?\)"
            ))?,
            // admin.site.register(Book, BookAdmin)
            call: Regex::new(&format!(
                r"(?m)^[ \t]*{name}(?:\.site)?(?:\.register)?\(\s*(?P<model>\w+)"
            ))?,
        })
    }
}

/// Models registered in an admin module, in discovery order. May contain
/// duplicates.
///
/// Decorator and method-call registrations are scanned by two independent
/// cursors that advance in lockstep: each round takes the next decorator match
/// (all of its models) and then the next call match. The result is that
/// interleaving, not plain document order.
///
/// Text without an admin import yields an empty list.
pub fn extract_models(text: &str) -> Vec<String> {
    let formatted = normalize(text, true);

    let Some(scope) = admin_scope(&formatted) else {
        return Vec::new();
    };
    let name = reassigned_name(&formatted, &scope).unwrap_or(scope);

    let Ok(patterns) = RegistrationPatterns::new(&name) else {
        return Vec::new();
    };

    interleave(
        patterns.decorator.captures_iter(&formatted),
        patterns.call.captures_iter(&formatted),
    )
}

/// Alias of the admin import, or the imported symbol itself. The first
/// admin-related import in the text wins.
fn admin_scope(text: &str) -> Option<String> {
    ADMIN_IMPORT_REGEX.captures_iter(text).find_map(|caps| {
        if let Some(members) = caps.name("members") {
            imported_name(members.as_str(), &["register", "site"])
        } else {
            imported_name(caps.name("modules")?.as_str(), &["admin"])
        }
    })
}

/// Local name bound by the first entry of `list` that imports one of `wanted`.
fn imported_name(list: &str, wanted: &[&str]) -> Option<String> {
    list.trim_end_matches('\\')
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '(' || c == ')').trim())
        .filter_map(|item| IMPORT_ITEM_REGEX.captures(item))
        .find(|caps| wanted.contains(&&caps["name"]))
        .map(|caps| {
            caps.name("alias")
                .map_or(&caps["name"], |alias| alias.as_str())
                .to_string()
        })
}

/// Module-level variable the admin scope is rebound to, as in
/// `site = admin.site`.
fn reassigned_name(text: &str, scope: &str) -> Option<String> {
    let pattern = format!(r"(?m)^(?P<var>\w+)[ \t]*=[ \t]*{}\b", regex::escape(scope));
    let regex = Regex::new(&pattern).ok()?;
    regex
        .captures(text)
        .and_then(|caps| caps.name("var"))
        .map(|m| m.as_str().to_string())
}

fn interleave(mut decorators: CaptureMatches<'_, '_>, mut calls: CaptureMatches<'_, '_>) -> Vec<String> {
    let mut models = Vec::new();

    loop {
        let decorator = decorators.next();
        let call = calls.next();
        if decorator.is_none() && call.is_none() {
            break;
        }

        if let Some(models_arg) = decorator.as_ref().and_then(|caps| caps.name("models")) {
            models.extend(
                IDENTIFIER_REGEX
                    .find_iter(models_arg.as_str())
                    .map(|m| m.as_str().to_string()),
            );
        }
        if let Some(model) = call.as_ref().and_then(|caps| caps.name("model")) {
            models.push(model.as_str().to_string());
        }
    }

    models
}
