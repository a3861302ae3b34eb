//! Path template translation.
//!
//! Host frameworks write named segments as `:name` and an optional format suffix as
//! `(.:format)`. Documentation UIs expect brace-delimited placeholders instead.

use regex::Regex;
use std::sync::OnceLock;

/// Optional format suffix appended by the host router
pub const FORMAT_SUFFIX: &str = "(.:format)";

const FORMAT_PLACEHOLDER: &str = "{format}";
const VERSION_PLACEHOLDER: &str = "{version}";

fn named_segment_re() -> &'static Regex {
    static NAMED_SEGMENT_RE: OnceLock<Regex> = OnceLock::new();
    NAMED_SEGMENT_RE.get_or_init(|| Regex::new(r":([a-zA-Z_]\w*)").unwrap())
}

/// Rewrite a host path template into documentation form.
///
/// The format suffix becomes `{format}`, or disappears when `hide_format` is set. Every
/// `:name` segment becomes `{name}`. When a version is given, `{version}` is replaced by it.
///
/// ```
/// use swagger_from_routes::path::translate;
///
/// assert_eq!(translate("/:version/users/:id(.:format)", Some("1.0"), false), "/1.0/users/{id}{format}");
/// assert_eq!(translate("/users/:id(.:format)", None, true), "/users/{id}");
/// ```
pub fn translate(path_template: &str, version: Option<&str>, hide_format: bool) -> String {
    let format = if hide_format { "" } else { FORMAT_PLACEHOLDER };
    let path = path_template.replace(FORMAT_SUFFIX, format);
    let path = named_segment_re().replace_all(&path, "{${1}}");

    match version {
        Some(version) => path.replace(VERSION_PLACEHOLDER, version),
        None => path.into_owned(),
    }
}
