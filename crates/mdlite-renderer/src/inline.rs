//! Inline span formatting.
//!
//! Inline markup is resolved by a fixed sequence of independent rewrite
//! passes ([`InlinePass::CASCADE`]). Each pass rescans the output of the
//! previous one, so the order decides how overlapping markers resolve:
//!
//! 1. task checkboxes (`[ ]`, `[x]`, `[X]`)
//! 2. code spans
//! 3. images
//! 4. links
//! 5. `***strong emphasis***`
//! 6. `**strong**`
//! 7. `*emphasis*`
//! 8. `~~strikethrough~~`
//!
//! Code spans are swapped for placeholders as soon as they are rendered and
//! restored after the last pass, so nothing later in the cascade can rewrite
//! their content. Link and image attributes receive the restored, escaped
//! code markup instead of a placeholder.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;
use crate::replacements::Replacements;

/// Checkbox marker, or a whole code span which is passed through untouched.
static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]+?`|\[([ xX])\]").unwrap());
static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+?)`").unwrap());
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"!\[(.*?)\]\((.*?)(?:\s+"(.*?)")?\)"#).unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[(.*?)\]\((.*?)(?:\s+"(.*?)")?\)"#).unwrap());
static STRONG_EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{3}(.*?)\*{3}|_{3}(.*?)_{3}").unwrap());
static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{2}(.*?)\*{2}|_{2}(.*?)_{2}").unwrap());
static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*|_(.*?)_").unwrap());
static STRIKETHROUGH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.*?)~~").unwrap());

/// Private-use delimiters around code span placeholders. The opening side is
/// repeated as often as needed to stay unique within the formatted text.
const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// One rewrite pass of the inline cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InlinePass {
    /// `[ ]`, `[x]` and `[X]` become disabled checkboxes.
    TaskCheckbox,
    /// `` `code` `` becomes `<code>` with escaped content.
    CodeSpan,
    /// `![alt](url "title")` becomes `<img>`.
    Image,
    /// `[text](url "title")` becomes `<a>`.
    Link,
    /// `***text***` or `___text___` becomes `<strong><em>`.
    StrongEmphasis,
    /// `**text**` or `__text__` becomes `<strong>`.
    Strong,
    /// `*text*` or `_text_` becomes `<em>`.
    Emphasis,
    /// `~~text~~` becomes `<s>`.
    Strikethrough,
}

impl InlinePass {
    /// All passes in the order they are applied.
    pub const CASCADE: [Self; 8] = [
        Self::TaskCheckbox,
        Self::CodeSpan,
        Self::Image,
        Self::Link,
        Self::StrongEmphasis,
        Self::Strong,
        Self::Emphasis,
        Self::Strikethrough,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::TaskCheckbox => &CHECKBOX_RE,
            Self::CodeSpan => &CODE_SPAN_RE,
            Self::Image => &IMAGE_RE,
            Self::Link => &LINK_RE,
            Self::StrongEmphasis => &STRONG_EMPHASIS_RE,
            Self::Strong => &STRONG_RE,
            Self::Emphasis => &EMPHASIS_RE,
            Self::Strikethrough => &STRIKETHROUGH_RE,
        }
    }
}

/// Runs the inline cascade over a single piece of text.
///
/// A formatter is single use: it owns the code span placeholders created
/// while formatting one string.
#[derive(Debug)]
struct InlineFormatter {
    marker: String,
    code_spans: Replacements,
}

impl InlineFormatter {
    fn new(text: &str) -> Self {
        Self {
            marker: placeholder_marker(text),
            code_spans: Replacements::default(),
        }
    }

    fn format(mut self, text: &str) -> String {
        let mut current = text.to_owned();
        for pass in InlinePass::CASCADE {
            current = self.apply(pass, &current);
        }
        self.code_spans.apply(&mut current);
        current
    }

    fn apply(&mut self, pass: InlinePass, text: &str) -> String {
        pass.pattern()
            .replace_all(text, |caps: &Captures<'_>| self.rewrite(pass, caps))
            .into_owned()
    }

    fn rewrite(&mut self, pass: InlinePass, caps: &Captures<'_>) -> String {
        match pass {
            InlinePass::TaskCheckbox => match caps.get(1) {
                Some(mark) if mark.as_str() == " " => {
                    r#"<input type="checkbox" disabled>"#.to_owned()
                }
                Some(_) => r#"<input type="checkbox" checked disabled>"#.to_owned(),
                // A code span matched instead; leave it for the next pass.
                None => caps[0].to_owned(),
            },
            InlinePass::CodeSpan => {
                let placeholder = format!(
                    "{}{}{PLACEHOLDER_CLOSE}",
                    self.marker,
                    self.code_spans.len()
                );
                let html = format!("<code>{}</code>", escape_html(&caps[1]));
                self.code_spans.add(placeholder.clone(), html);
                placeholder
            }
            InlinePass::Image => {
                let alt = self.code_spans.restore(&caps[1]);
                let src = self.code_spans.restore(&caps[2]);
                let title = caps.get(3).map(|m| self.code_spans.restore(m.as_str()));
                format!(
                    r#"<img src="{}" alt="{}"{}>"#,
                    escape_html(&src),
                    escape_html(&alt),
                    title_attr(title.as_deref())
                )
            }
            InlinePass::Link => {
                let href = self.code_spans.restore(&caps[2]);
                let title = caps.get(3).map(|m| self.code_spans.restore(m.as_str()));
                // Link text is emitted as is; later passes may still format it.
                format!(
                    r#"<a href="{}"{}>{}</a>"#,
                    escape_html(&href),
                    title_attr(title.as_deref()),
                    &caps[1]
                )
            }
            InlinePass::StrongEmphasis => {
                format!("<strong><em>{}</em></strong>", first_group(caps))
            }
            InlinePass::Strong => format!("<strong>{}</strong>", first_group(caps)),
            InlinePass::Emphasis => format!("<em>{}</em>", first_group(caps)),
            InlinePass::Strikethrough => format!("<s>{}</s>", first_group(caps)),
        }
    }
}

/// Content of the first alternative that participated in the match.
fn first_group<'h>(caps: &Captures<'h>) -> &'h str {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map_or("", |m| m.as_str())
}

/// Opening placeholder delimiter: one more `PLACEHOLDER_OPEN` than the
/// longest run already in `text`, so no placeholder can be formed by input.
fn placeholder_marker(text: &str) -> String {
    let longest_run = text
        .split(|c: char| c != PLACEHOLDER_OPEN)
        .map(|run| run.chars().count())
        .max()
        .unwrap_or(0);
    String::from(PLACEHOLDER_OPEN).repeat(longest_run + 1)
}

fn title_attr(title: Option<&str>) -> String {
    match title {
        Some(title) if !title.is_empty() => format!(r#" title="{}""#, escape_html(title)),
        _ => String::new(),
    }
}

/// Format the inline spans of a line or of paragraph text joined into one line.
///
/// Text outside recognized spans is copied unchanged; unmatched markers stay
/// literal.
///
/// # Examples
///
/// ```
/// use mdlite_renderer::format_inline;
///
/// assert_eq!(format_inline("**bold** and `*code*`"), "<strong>bold</strong> and <code>*code*</code>");
/// ```
#[must_use]
pub fn format_inline(text: &str) -> String {
    InlineFormatter::new(text).format(text)
}
