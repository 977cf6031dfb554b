//! Heading collection and table of contents.
//!
//! [`Outline::extract`] is a read-only pre-pass over the document lines. It
//! runs before block rendering so that a `[TOC]` placeholder can list
//! headings that appear after it.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{is_toc_placeholder, parse_heading, strip_quote_markers};

static SLUG_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());
static SLUG_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text as written, trimmed.
    pub title: String,
    /// Anchor id, see [`slugify`].
    pub id: String,
}

/// Derive a heading anchor id.
///
/// Lowercases the text, drops every character other than ASCII letters,
/// digits, `_`, `-` and whitespace, then turns each whitespace run into a
/// single `-`. Equal headings get equal ids; no suffix is added for
/// duplicates.
///
/// # Examples
///
/// ```
/// use mdlite_renderer::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(&lowered, "");
    SLUG_SPACE_RE.replace_all(&stripped, "-").into_owned()
}

/// Headings of a document and whether a table of contents was requested.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outline {
    /// Every heading in document order.
    pub entries: Vec<TocEntry>,
    /// A line consisting of `[TOC]` (any case) was found.
    pub toc_requested: bool,
}

impl Outline {
    /// Collect headings from document lines.
    ///
    /// Every line is checked, block structure is not tracked. Lines behind
    /// `>` markers are read as if they were top level, so a quoted heading is
    /// listed alongside the unquoted ones, and heading-like lines inside
    /// fenced code are listed too.
    #[must_use]
    pub fn extract(lines: &[&str]) -> Self {
        let mut outline = Self::default();

        for line in lines {
            if is_toc_placeholder(line) {
                outline.toc_requested = true;
            }
            if let Some((level, content)) = parse_heading(strip_quote_markers(line)) {
                outline.entries.push(TocEntry {
                    level,
                    title: content.to_owned(),
                    id: slugify(content),
                });
            }
        }

        outline
    }

    /// Text of the first level 1 heading.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.level == 1)
            .map(|entry| entry.title.as_str())
    }
}
