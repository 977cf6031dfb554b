//! Line-oriented block renderer.

use crate::block::{
    LineKind, ListKind, classify, interrupts_paragraph, is_fence_close, list_item_text,
    strip_quote_marker,
};
use crate::html;
use crate::inline::format_inline;
use crate::toc::{Outline, TocEntry, slugify};

/// Default heading of the table of contents container.
pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";
/// Default class of the table of contents container.
pub const DEFAULT_TOC_CLASS: &str = "markdown-toc";

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderResult {
    /// Rendered HTML, trimmed of surrounding whitespace.
    pub html: String,
    /// Text of the first level 1 heading.
    pub title: Option<String>,
    /// Headings collected by the pre-pass, in document order.
    pub toc: Vec<TocEntry>,
    /// Non-fatal findings such as an unclosed code fence.
    pub warnings: Vec<String>,
}

/// Markdown to HTML renderer.
///
/// Rendering never fails: malformed input degrades to literal text, and an
/// unclosed code fence runs to the end of the document (reported in
/// [`RenderResult::warnings`]).
///
/// # Example
///
/// ```
/// use mdlite_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new()
///     .with_toc_title("Contents")
///     .render_markdown("[TOC]\n# Hello\n\n**Bold** text");
///
/// assert_eq!(result.title.as_deref(), Some("Hello"));
/// assert!(result.html.contains("<h2>Contents</h2>"));
/// assert!(result.html.contains("<p><strong>Bold</strong> text</p>"));
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    toc_title: String,
    toc_class: String,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// List accumulation between marker lines.
#[derive(Debug, Default)]
enum ListState<'a> {
    #[default]
    Idle,
    Accumulating {
        kind: ListKind,
        lines: Vec<&'a str>,
    },
}

impl<'a> ListState<'a> {
    /// Add a marker line, flushing first if the list kind changes.
    fn push(&mut self, kind: ListKind, line: &'a str) -> Option<String> {
        if let Self::Accumulating {
            kind: current,
            lines,
        } = self
            && *current == kind
        {
            lines.push(line);
            return None;
        }
        let flushed = self.flush();
        *self = Self::Accumulating {
            kind,
            lines: vec![line],
        };
        flushed
    }

    /// Render the accumulated list, if any, and reset to idle.
    fn flush(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Accumulating { kind, lines } => {
                let items: Vec<String> = lines
                    .into_iter()
                    .map(|line| format_inline(list_item_text(line)))
                    .collect();
                Some(html::list(kind, &items))
            }
        }
    }
}

/// A line sequence being rendered: the document itself or a quote's content.
#[derive(Debug)]
struct Frame<'a> {
    lines: Vec<&'a str>,
    /// Source index of `lines[0]`, for warnings.
    line_offset: usize,
    pos: usize,
    list: ListState<'a>,
    /// Table of contents markup, built at the first placeholder.
    toc: Option<String>,
}

impl<'a> Frame<'a> {
    fn new(lines: Vec<&'a str>, line_offset: usize) -> Self {
        Self {
            lines,
            line_offset,
            pos: 0,
            list: ListState::Idle,
            toc: None,
        }
    }
}

impl MarkdownRenderer {
    /// Create a renderer with the default table of contents title and class.
    #[must_use]
    pub fn new() -> Self {
        Self {
            toc_title: DEFAULT_TOC_TITLE.to_owned(),
            toc_class: DEFAULT_TOC_CLASS.to_owned(),
        }
    }

    /// Set the heading shown inside the table of contents.
    #[must_use]
    pub fn with_toc_title(mut self, title: impl Into<String>) -> Self {
        self.toc_title = title.into();
        self
    }

    /// Set the class of the table of contents container.
    #[must_use]
    pub fn with_toc_class(mut self, class: impl Into<String>) -> Self {
        self.toc_class = class.into();
        self
    }

    /// Render markdown text.
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        let lines = split_lines(markdown);
        let line_count = lines.len();
        let outline = Outline::extract(&lines);
        let mut warnings = Vec::new();
        let html = self.render_blocks(lines, &outline, &mut warnings);

        tracing::debug!(
            lines = line_count,
            headings = outline.entries.len(),
            toc = outline.toc_requested,
            warnings = warnings.len(),
            "Rendered markdown"
        );

        RenderResult {
            html,
            title: outline.title().map(ToOwned::to_owned),
            toc: outline.entries,
            warnings,
        }
    }

    fn toc_html(&self, entries: &[TocEntry]) -> String {
        html::toc(entries, &self.toc_title, &self.toc_class)
    }

    /// Render document lines into HTML.
    ///
    /// Quoted content is rendered as a nested [`Frame`] on an explicit stack,
    /// so nesting depth is bounded by input size only. Every fragment goes to
    /// one list, with blockquote tags written when a frame opens and closes.
    fn render_blocks<'a>(
        &self,
        lines: Vec<&'a str>,
        outline: &Outline,
        warnings: &mut Vec<String>,
    ) -> String {
        let mut fragments: Vec<String> = Vec::new();
        let mut frames = vec![Frame::new(lines, 0)];

        loop {
            let depth = frames.len();
            let Some(frame) = frames.last_mut() else {
                break;
            };
            let Some(&line) = frame.lines.get(frame.pos) else {
                fragments.extend(frame.list.flush());
                frames.pop();
                if depth > 1 {
                    fragments.push(html::blockquote_close());
                }
                continue;
            };

            let kind = classify(line);
            if !matches!(kind, LineKind::ListItem(_)) {
                fragments.extend(frame.list.flush());
            }
            let start = frame.pos;
            frame.pos += 1;

            match kind {
                LineKind::TocPlaceholder => {
                    let toc = match &frame.toc {
                        Some(toc) => toc.clone(),
                        None => {
                            // Quoted documents collect their own headings.
                            let toc = if depth == 1 {
                                self.toc_html(&outline.entries)
                            } else {
                                self.toc_html(&Outline::extract(&frame.lines).entries)
                            };
                            frame.toc = Some(toc.clone());
                            toc
                        }
                    };
                    fragments.push(toc);
                }
                LineKind::FenceOpen { language } => {
                    let body_start = frame.pos;
                    while frame
                        .lines
                        .get(frame.pos)
                        .is_some_and(|line| !is_fence_close(line))
                    {
                        frame.pos += 1;
                    }
                    let body = frame.lines[body_start..frame.pos].join("\n");
                    if frame.pos < frame.lines.len() {
                        frame.pos += 1;
                    } else {
                        let line_no = frame.line_offset + start + 1;
                        tracing::debug!(line = line_no, "Unclosed code fence");
                        warnings.push(format!("Unclosed code fence opened at line {line_no}"));
                    }
                    fragments.push(html::code_block(language, body.trim_end()));
                }
                LineKind::Heading { level, content } => {
                    fragments.push(html::heading(
                        level,
                        &slugify(content),
                        &format_inline(content),
                    ));
                }
                LineKind::ThematicBreak => {
                    fragments.push(html::thematic_break());
                }
                LineKind::Quote => {
                    while frame
                        .lines
                        .get(frame.pos)
                        .is_some_and(|line| line.starts_with('>'))
                    {
                        frame.pos += 1;
                    }
                    let quoted = frame.lines[start..frame.pos]
                        .iter()
                        .copied()
                        .map(strip_quote_marker)
                        .collect();
                    let nested = Frame::new(quoted, frame.line_offset + start);
                    fragments.push(html::blockquote_open());
                    frames.push(nested);
                }
                LineKind::ListItem(list_kind) => {
                    fragments.extend(frame.list.push(list_kind, line));
                }
                LineKind::Blank => {}
                LineKind::Text => {
                    while frame
                        .lines
                        .get(frame.pos)
                        .is_some_and(|line| !interrupts_paragraph(line))
                    {
                        frame.pos += 1;
                    }
                    let text = frame.lines[start..frame.pos].join(" ");
                    fragments.push(html::paragraph(&format_inline(&text)));
                }
            }
        }

        fragments.concat().trim().to_owned()
    }
}

/// Split input into lines, dropping a `\r` before each `\n`.
fn split_lines(markdown: &str) -> Vec<&str> {
    markdown
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Render markdown with default settings.
///
/// Accepts `&str` or `Option<&str>`; absent input renders to an empty string.
///
/// # Examples
///
/// ```
/// use mdlite_renderer::render;
///
/// assert_eq!(render("# Title"), r#"<h1 id="title">Title</h1>"#);
/// assert_eq!(render(None), "");
/// ```
#[must_use]
pub fn render<'a>(markdown: impl Into<Option<&'a str>>) -> String {
    markdown
        .into()
        .map(|markdown| MarkdownRenderer::new().render_markdown(markdown).html)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_absent_input_renders_empty() {
        assert_eq!(render(None), "");
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n  \n"), "");
    }

    #[test]
    fn test_title_and_body() {
        let html = render("# Title\n\nBody");
        assert_eq!(html, "<h1 id=\"title\">Title</h1>\n<p>Body</p>");
        assert_eq!(count(&html, "<h1"), 1);
        assert_eq!(count(&html, "<p>"), 1);
    }

    #[test]
    fn test_heading_content_is_formatted_and_id_is_raw_slug() {
        assert_eq!(
            render("## Hello, *World*!"),
            "<h2 id=\"hello-world\">Hello, <em>World</em>!</h2>"
        );
    }

    #[test]
    fn test_triple_emphasis_nested() {
        assert_eq!(render("***x***"), "<p><strong><em>x</em></strong></p>");
    }

    #[test]
    fn test_double_resolved_before_single() {
        assert_eq!(
            render("**a*b*c**"),
            "<p><strong>a<em>b</em>c</strong></p>"
        );
    }

    #[test]
    fn test_code_span_has_no_emphasis() {
        assert_eq!(
            render("`*not emphasis*`"),
            "<p><code>*not emphasis*</code></p>"
        );
    }

    #[test]
    fn test_list_runs_grouped_by_kind() {
        let html = render("- a\n- b\n- c\n\n1. one\n2. two");
        assert_eq!(
            html,
            concat!(
                "<ul>\n  <li>a</li>\n  <li>b</li>\n  <li>c</li>\n</ul>\n",
                "<ol>\n  <li>one</li>\n  <li>two</li>\n</ol>"
            )
        );
        assert_eq!(count(&html, "<ul>"), 1);
        assert_eq!(count(&html, "<ol>"), 1);
    }

    #[test]
    fn test_list_kind_change_without_blank_line() {
        assert_eq!(
            render("- a\n1. b"),
            "<ul>\n  <li>a</li>\n</ul>\n<ol>\n  <li>b</li>\n</ol>"
        );
    }

    #[test]
    fn test_mixed_unordered_markers_form_one_list() {
        assert_eq!(
            render("- a\n* b\n+ c"),
            "<ul>\n  <li>a</li>\n  <li>b</li>\n  <li>c</li>\n</ul>"
        );
    }

    #[test]
    fn test_indented_item_ends_list_as_paragraph() {
        assert_eq!(
            render("- top\n  - sub"),
            "<ul>\n  <li>top</li>\n</ul>\n<p>  - sub</p>"
        );
    }

    #[test]
    fn test_task_list_items() {
        assert_eq!(
            render("- [x] done\n- [ ] open"),
            concat!(
                "<ul>\n",
                "  <li><input type=\"checkbox\" checked disabled> done</li>\n",
                "  <li><input type=\"checkbox\" disabled> open</li>\n",
                "</ul>"
            )
        );
    }

    #[test]
    fn test_blockquote_parsed_recursively() {
        assert_eq!(
            render("> # H\n> text"),
            "<blockquote>\n<h1 id=\"h\">H</h1>\n<p>text</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_nested_blockquote() {
        assert_eq!(
            render("> outer\n> > inner"),
            concat!(
                "<blockquote>\n<p>outer</p>\n",
                "<blockquote>\n<p>inner</p>\n</blockquote>\n",
                "</blockquote>"
            )
        );
    }

    #[test]
    fn test_empty_blockquote() {
        assert_eq!(render(">"), "<blockquote>\n</blockquote>");
    }

    #[test]
    fn test_deeply_nested_quote_renders() {
        let depth = 50_000;
        let html = render(">".repeat(depth).as_str());
        assert_eq!(count(&html, "<blockquote>"), depth);
        assert_eq!(count(&html, "</blockquote>"), depth);
        assert!(html.starts_with("<blockquote>\n<blockquote>\n"));
        assert!(html.ends_with("</blockquote>\n</blockquote>"));
    }

    #[test]
    fn test_deeply_nested_quote_with_text() {
        let depth = 10_000;
        let markdown = format!("{}deep\n\nafter", "> ".repeat(depth));
        let html = render(markdown.as_str());
        assert_eq!(count(&html, "<blockquote>"), depth);
        assert!(html.contains("<blockquote>\n<p>deep</p>\n</blockquote>"));
        assert!(html.ends_with("</blockquote>\n<p>after</p>"));
    }

    #[test]
    fn test_toc_inside_quote_lists_quoted_headings() {
        let html = render("# Top\n> [TOC]\n> ## Inner");
        assert!(html.contains(concat!(
            "<blockquote>\n",
            "<div class=\"markdown-toc\">\n",
            "<h2>Table of Contents</h2>\n",
            "<ul>\n",
            "  <li class=\"toc-level-2\"><a href=\"#inner\">Inner</a></li>\n",
            "</ul>\n",
            "</div>\n",
            "<h2 id=\"inner\">Inner</h2>\n",
            "</blockquote>"
        )));
        assert!(!html.contains(r##"href="#top""##));
    }

    #[test]
    fn test_blockquote_with_list() {
        assert_eq!(
            render("> - a\n> - b"),
            "<blockquote>\n<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n</blockquote>"
        );
    }

    #[test]
    fn test_blockquote_strips_one_space_only() {
        assert_eq!(
            render(">     indented"),
            "<blockquote>\n<p>    indented</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(
            render("```js\ncode\n```"),
            "<pre><code class=\"language-js\">code</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_is_escaped_and_unformatted() {
        assert_eq!(
            render("```\n<b>**x**</b>\n\n\n```\nafter"),
            "<pre><code>&lt;b&gt;**x**&lt;/b&gt;</code></pre>\n<p>after</p>"
        );
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let result = MarkdownRenderer::new().render_markdown("text\n```py\n# not a heading\n");
        assert_eq!(
            result.html,
            "<p>text</p>\n<pre><code class=\"language-py\"># not a heading</code></pre>"
        );
        assert_eq!(
            result.warnings,
            vec!["Unclosed code fence opened at line 2".to_owned()]
        );
        assert_eq!(result.toc.len(), 1);
        assert_eq!(result.toc[0].id, "not-a-heading");
        assert_eq!(result.title.as_deref(), Some("not a heading"));
    }

    #[test]
    fn test_toc_lists_heading_lines_inside_fences() {
        let result = MarkdownRenderer::new().render_markdown("[TOC]\n```sh\n# comment\n```\n# Real");
        let ids: Vec<&str> = result.toc.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["comment", "real"]);
        assert!(result.html.contains(r##"<a href="#comment">comment</a>"##));
        assert!(result.html.contains("<pre><code class=\"language-sh\"># comment</code></pre>"));
    }

    #[test]
    fn test_unclosed_fence_in_quote_reports_source_line() {
        let result = MarkdownRenderer::new().render_markdown("para\n\n> ```\n> x");
        assert_eq!(
            result.warnings,
            vec!["Unclosed code fence opened at line 3".to_owned()]
        );
    }

    #[test]
    fn test_thematic_break_ends_list() {
        assert_eq!(render("- a\n---\nb"), "<ul>\n  <li>a</li>\n</ul>\n<hr>\n<p>b</p>");
    }

    #[test]
    fn test_paragraph_joins_lines_with_space() {
        assert_eq!(
            render("one *two\nthree* four\n\nnext"),
            "<p>one <em>two three</em> four</p>\n<p>next</p>"
        );
    }

    #[test]
    fn test_paragraph_stops_at_block_starts() {
        assert_eq!(
            render("text\n# H"),
            "<p>text</p>\n<h1 id=\"h\">H</h1>"
        );
        assert_eq!(
            render("text\n- item"),
            "<p>text</p>\n<ul>\n  <li>item</li>\n</ul>"
        );
        assert_eq!(
            render("text\n> q"),
            "<p>text</p>\n<blockquote>\n<p>q</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_paragraph_continues_over_toc_line() {
        assert_eq!(render("text\n[TOC]"), "<p>text [TOC]</p>");
    }

    #[test]
    fn test_dash_prefixed_text_line() {
        assert_eq!(render("---foo\nbar"), "<p>---foo bar</p>");
    }

    #[test]
    fn test_toc_lists_headings_at_placeholder() {
        assert_eq!(
            render("[TOC]\n# A\n## B"),
            concat!(
                "<div class=\"markdown-toc\">\n",
                "<h2>Table of Contents</h2>\n",
                "<ul>\n",
                "<li class=\"toc-level-1\"><a href=\"#a\">A</a></li>\n",
                "  <li class=\"toc-level-2\"><a href=\"#b\">B</a></li>\n",
                "</ul>\n",
                "</div>\n",
                "<h1 id=\"a\">A</h1>\n",
                "<h2 id=\"b\">B</h2>"
            )
        );
    }

    #[test]
    fn test_toc_without_headings_is_empty() {
        assert_eq!(render("[toc]\ntext"), "<p>text</p>");
    }

    #[test]
    fn test_toc_includes_quoted_heading() {
        let result = MarkdownRenderer::new().render_markdown("[TOC]\n> ## Quoted");
        assert!(result.html.contains(r##"<a href="#quoted">Quoted</a>"##));
        assert_eq!(result.toc.len(), 1);
    }

    #[test]
    fn test_custom_toc_title_and_class() {
        let html = MarkdownRenderer::new()
            .with_toc_title("Contents")
            .with_toc_class("toc")
            .render_markdown("[TOC]\n# A")
            .html;
        assert!(html.starts_with("<div class=\"toc\">\n<h2>Contents</h2>"));
    }

    #[test]
    fn test_duplicate_headings_share_id() {
        assert_eq!(
            render("# Same\n# Same"),
            "<h1 id=\"same\">Same</h1>\n<h1 id=\"same\">Same</h1>"
        );
    }

    #[test]
    fn test_render_result_metadata() {
        let result = MarkdownRenderer::new().render_markdown("## Intro\n# Main Title\ntext");
        assert_eq!(result.title.as_deref(), Some("Main Title"));
        assert_eq!(result.toc.len(), 2);
        assert_eq!(result.toc[1].id, "main-title");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(
            render("# A\r\n\r\ntext\r\n"),
            "<h1 id=\"a\">A</h1>\n<p>text</p>"
        );
    }

    #[test]
    fn test_list_state_flush_resets() {
        let mut state = ListState::Idle;
        assert_eq!(state.push(ListKind::Unordered, "- a"), None);
        assert_eq!(
            state.push(ListKind::Ordered, "1. b"),
            Some("<ul>\n  <li>a</li>\n</ul>\n".to_owned())
        );
        assert_eq!(
            state.flush(),
            Some("<ol>\n  <li>b</li>\n</ol>\n".to_owned())
        );
        assert_eq!(state.flush(), None);
    }

    #[test]
    fn test_sample_document() {
        let markdown = "# Welcome\n\nIntro with [a link](https://example.com \"Example\").\n\n\
                        [TOC]\n\n## Features\n- **Bold**\n- ~~Strike~~\n\n---\nEnd.";
        let html = render(markdown);
        assert!(html.starts_with("<h1 id=\"welcome\">Welcome</h1>"));
        assert!(html.contains(
            r#"<p>Intro with <a href="https://example.com" title="Example">a link</a>.</p>"#
        ));
        assert!(html.contains(r##"<li class="toc-level-2"><a href="#features">Features</a></li>"##));
        assert!(html.contains("  <li><strong>Bold</strong></li>\n  <li><s>Strike</s></li>"));
        assert!(html.ends_with("<hr>\n<p>End.</p>"));
    }
}
