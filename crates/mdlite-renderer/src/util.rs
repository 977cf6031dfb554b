//! Shared helpers for callers of the renderer.

use std::sync::LazyLock;

use regex::Regex;

static FILE_NAME_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// File name used when a document has no level 1 heading.
pub const DEFAULT_EXPORT_NAME: &str = "markdown-export.html";

/// File name for exported HTML, derived from the document title.
///
/// The title is lowercased and every run of characters other than ASCII
/// letters and digits becomes a single `-`.
///
/// # Examples
///
/// ```
/// use mdlite_renderer::export_file_name;
///
/// assert_eq!(export_file_name(Some("My Notes: Day 1")), "my-notes-day-1.html");
/// assert_eq!(export_file_name(None), "markdown-export.html");
/// ```
#[must_use]
pub fn export_file_name(title: Option<&str>) -> String {
    match title {
        Some(title) => {
            let lowered = title.to_lowercase();
            let stem = FILE_NAME_SEPARATOR_RE.replace_all(&lowered, "-");
            format!("{stem}.html")
        }
        None => DEFAULT_EXPORT_NAME.to_owned(),
    }
}
