//! Deferred placeholder substitution.
//!
//! Inline rewrites that must not be touched by later passes (code spans)
//! are swapped for opaque placeholders and restored once the cascade is done.

/// Collects placeholder substitutions and applies them in registration order.
///
/// # Example
///
/// ```ignore
/// let mut replacements = Replacements::default();
/// replacements.add("\u{E000}0\u{E001}", "<code>x</code>");
/// let mut html = "a \u{E000}0\u{E001} b".to_owned();
/// replacements.apply(&mut html);
/// assert_eq!(html, "a <code>x</code> b");
/// ```
#[derive(Debug, Default)]
pub(crate) struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    /// Register a substitution of every occurrence of `from` with `to`.
    pub(crate) fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.items.push((from.into(), to.into()));
    }

    /// Apply all registered substitutions in place.
    pub(crate) fn apply(&self, html: &mut String) {
        for (from, to) in &self.items {
            if html.contains(from.as_str()) {
                *html = html.replace(from.as_str(), to);
            }
        }
    }

    /// Copy of `text` with all registered substitutions applied.
    pub(crate) fn restore(&self, text: &str) -> String {
        let mut out = text.to_owned();
        self.apply(&mut out);
        out
    }

    /// Number of registered substitutions.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}
