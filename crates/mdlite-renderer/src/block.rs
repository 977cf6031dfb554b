//! Line classification for block parsing.
//!
//! Every block construct is recognized from the first characters of an
//! unindented line. [`classify`] checks the patterns in a fixed precedence
//! order because several of them can match the same line (`***` is both a
//! thematic break and a would-be list item, `---` both a rule and text).

use std::sync::LazyLock;

use regex::Regex;

static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```([A-Za-z0-9_]*)").unwrap());
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static THEMATIC_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*\*\*|---|___)\s*$").unwrap());
static UNORDERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+]\s+").unwrap());
static ORDERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

const FENCE: &str = "```";

/// Kind of list a marker line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListKind {
    /// `-`, `*` or `+` marker.
    Unordered,
    /// `1.` style marker.
    Ordered,
}

impl ListKind {
    /// HTML element name for the list.
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// Block construct a line opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// `[TOC]` alone on the line.
    TocPlaceholder,
    /// Opening code fence with an optional language word.
    FenceOpen { language: Option<&'a str> },
    /// ATX heading with its trimmed content.
    Heading { level: u8, content: &'a str },
    /// `***`, `---` or `___`.
    ThematicBreak,
    /// Line starting with `>`.
    Quote,
    /// Unindented list marker line.
    ListItem(ListKind),
    /// Empty or whitespace only.
    Blank,
    /// Anything else; starts or continues a paragraph.
    Text,
}

/// Classify a line, in block precedence order.
pub(crate) fn classify(line: &str) -> LineKind<'_> {
    if is_toc_placeholder(line) {
        LineKind::TocPlaceholder
    } else if let Some(language) = fence_language(line) {
        LineKind::FenceOpen {
            language: (!language.is_empty()).then_some(language),
        }
    } else if let Some((level, content)) = parse_heading(line) {
        LineKind::Heading { level, content }
    } else if THEMATIC_BREAK_RE.is_match(line) {
        LineKind::ThematicBreak
    } else if line.starts_with('>') {
        LineKind::Quote
    } else if let Some(kind) = list_marker(line) {
        LineKind::ListItem(kind)
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text
    }
}

/// Check whether a line ends a running paragraph.
///
/// Blank lines and lines opening a fence, heading, rule, quote or list end
/// it, as does any line beginning with `---`. A `[TOC]` line does not.
pub(crate) fn interrupts_paragraph(line: &str) -> bool {
    match classify(line) {
        LineKind::Text | LineKind::TocPlaceholder => line.starts_with("---"),
        _ => true,
    }
}

/// Check for a `[TOC]` placeholder line, ignoring case and surrounding whitespace.
pub(crate) fn is_toc_placeholder(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("[toc]")
}

/// Language word of an opening fence (empty if none), or `None` for other lines.
fn fence_language(line: &str) -> Option<&str> {
    FENCE_OPEN_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Check whether a line closes a fenced code block.
pub(crate) fn is_fence_close(line: &str) -> bool {
    line.starts_with(FENCE)
}

/// Parse an ATX heading into its level and trimmed content.
pub(crate) fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_RE.captures(line)?;
    let hashes = caps.get(1)?.as_str();
    let content = caps.get(2).map_or("", |m| m.as_str().trim());
    let level = u8::try_from(hashes.len()).ok()?;
    Some((level, content))
}

fn list_marker(line: &str) -> Option<ListKind> {
    if UNORDERED_ITEM_RE.is_match(line) {
        Some(ListKind::Unordered)
    } else if ORDERED_ITEM_RE.is_match(line) {
        Some(ListKind::Ordered)
    } else {
        None
    }
}

/// Item text of a list line: everything after the first space, trimmed.
pub(crate) fn list_item_text(line: &str) -> &str {
    line.split_once(' ').map_or(line, |(_, rest)| rest).trim()
}

/// Remove one `>` marker and a single following space.
pub(crate) fn strip_quote_marker(line: &str) -> &str {
    let rest = line.strip_prefix('>').unwrap_or(line);
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Remove every leading `>` marker, each with a single following space.
pub(crate) fn strip_quote_markers(mut line: &str) -> &str {
    while line.starts_with('>') {
        line = strip_quote_marker(line);
    }
    line
}
