//! HTML emission for block constructs.
//!
//! Each function returns one newline-terminated fragment. Inline content
//! arrives already formatted; raw text (code, ids, TOC titles) is escaped
//! here.

use std::fmt::Write;

use crate::block::ListKind;
use crate::escape::escape_html;
use crate::toc::TocEntry;

pub(crate) fn heading(level: u8, id: &str, content: &str) -> String {
    format!(
        "<h{level} id=\"{}\">{content}</h{level}>\n",
        escape_html(id)
    )
}

pub(crate) fn paragraph(content: &str) -> String {
    format!("<p>{content}</p>\n")
}

pub(crate) fn thematic_break() -> String {
    "<hr>\n".to_owned()
}

/// Code block with an optional `language-*` class. `content` is raw text.
pub(crate) fn code_block(lang: Option<&str>, content: &str) -> String {
    match lang {
        Some(lang) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            escape_html(lang),
            escape_html(content)
        ),
        None => format!("<pre><code>{}</code></pre>\n", escape_html(content)),
    }
}

/// Opening tag of a blockquote; the quoted fragments follow it directly.
pub(crate) fn blockquote_open() -> String {
    "<blockquote>\n".to_owned()
}

pub(crate) fn blockquote_close() -> String {
    "</blockquote>\n".to_owned()
}

/// List with one `<li>` per already formatted item.
pub(crate) fn list(kind: ListKind, items: &[String]) -> String {
    let tag = kind.tag();
    let mut out = format!("<{tag}>\n");
    for item in items {
        writeln!(out, "  <li>{item}</li>").unwrap();
    }
    writeln!(out, "</{tag}>").unwrap();
    out
}

/// Table of contents container; empty when there are no headings.
///
/// Entries are flat and indented two spaces per level below 1. Each item
/// also carries a `toc-level-N` class for styling.
pub(crate) fn toc(entries: &[TocEntry], title: &str, class: &str) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = format!(
        "<div class=\"{}\">\n<h2>{}</h2>\n<ul>\n",
        escape_html(class),
        escape_html(title)
    );
    for entry in entries {
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
        writeln!(
            out,
            r##"{indent}<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.title)
        )
        .unwrap();
    }
    out.push_str("</ul>\n</div>\n");
    out
}
