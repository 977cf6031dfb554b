//! `mdlite toc` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use mdlite_renderer::{MarkdownRenderer, TocEntry};

use super::{read_input, write_stdout};
use crate::error::CliError;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Markdown file to read (default: stdin).
    input: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = read_input(self.input.as_deref())?;
        let result = MarkdownRenderer::new().render_markdown(&markdown);

        tracing::info!(headings = result.toc.len(), "Collected outline");

        if result.toc.is_empty() {
            return Ok(());
        }
        write_stdout(&format_outline(&result.toc))
    }
}

/// One line per heading, indented two spaces per level below 1.
fn format_outline(entries: &[TocEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
        writeln!(out, "{indent}{} (#{})", entry.title, entry.id).unwrap();
    }
    out
}
