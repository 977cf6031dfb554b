//! Line-oriented markdown to HTML renderer.
//!
//! The renderer accepts a small markdown dialect: ATX headings, paragraphs,
//! flat lists (with task checkboxes), blockquotes, fenced code blocks,
//! thematic breaks, inline emphasis, code spans, links and images, and a
//! `[TOC]` placeholder that expands to a table of contents.
//!
//! # Architecture
//!
//! Rendering takes two passes over the document lines:
//! - [`Outline::extract`] collects headings so a table of contents can list
//!   headings that appear after the placeholder
//! - [`MarkdownRenderer`] classifies each line, groups runs into blocks and
//!   emits HTML, recursing into quoted content
//!
//! Text inside blocks goes through [`format_inline`], a fixed cascade of
//! rewrite passes (see [`InlinePass`]).
//!
//! Rendering is total: any input produces HTML, and nothing is rejected.
//!
//! # Example
//!
//! ```
//! use mdlite_renderer::{MarkdownRenderer, export_file_name};
//!
//! let markdown = "# Hello\n\n**Bold** text";
//! let result = MarkdownRenderer::new().render_markdown(markdown);
//!
//! assert_eq!(
//!     result.html,
//!     "<h1 id=\"hello\">Hello</h1>\n<p><strong>Bold</strong> text</p>"
//! );
//! assert_eq!(export_file_name(result.title.as_deref()), "hello.html");
//! ```

mod block;
mod escape;
mod html;
mod inline;
mod renderer;
mod replacements;
mod toc;
mod util;

pub use escape::escape_html;
pub use inline::{InlinePass, format_inline};
pub use renderer::{
    DEFAULT_TOC_CLASS, DEFAULT_TOC_TITLE, MarkdownRenderer, RenderResult, render,
};
pub use toc::{Outline, TocEntry, slugify};
pub use util::{DEFAULT_EXPORT_NAME, export_file_name};
