//! `mdlite render` command implementation.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use mdlite_config::{CliSettings, Config};
use mdlite_renderer::{MarkdownRenderer, RenderResult, escape_html, export_file_name};

use super::{read_input, write_file, write_stdout};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write HTML into this directory, named after the document title (overrides config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Wrap the rendered fragment in a complete HTML page.
    #[arg(long)]
    standalone: bool,

    /// Write the render result (HTML, title, outline, warnings) as JSON.
    #[arg(long, conflicts_with = "standalone")]
    json: bool,

    /// Heading shown inside the table of contents (overrides config).
    #[arg(long)]
    toc_title: Option<String>,

    /// Path to configuration file (default: auto-discover mdlite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read or
    /// the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            toc_title: self.toc_title,
            output_dir: self.output_dir,
            standalone: self.standalone.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = read_input(self.input.as_deref())?;
        let renderer = MarkdownRenderer::new()
            .with_toc_title(config.render.toc_title.as_str())
            .with_toc_class(config.render.toc_class.as_str());
        let result = renderer.render_markdown(&markdown);

        tracing::info!(
            bytes = markdown.len(),
            headings = result.toc.len(),
            title = result.title.as_deref().unwrap_or_default(),
            "Rendered document"
        );
        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let document = if self.json {
            serde_json::to_string_pretty(&result)?
        } else if config.output_resolved.standalone {
            standalone_page(&result, &config.output_resolved.document_title)
        } else {
            result.html.clone()
        };

        match destination(
            self.output,
            config.output_resolved.dir.as_deref(),
            &result,
        ) {
            Some(path) => {
                write_file(&path, &document)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => write_stdout(&document)?,
        }

        Ok(())
    }
}

/// File to write to: an explicit path, else the export name inside the
/// output directory. `None` means stdout.
fn destination(
    explicit: Option<PathBuf>,
    output_dir: Option<&Path>,
    result: &RenderResult,
) -> Option<PathBuf> {
    explicit.or_else(|| output_dir.map(|dir| dir.join(export_file_name(result.title.as_deref()))))
}

/// Complete HTML page around a rendered fragment.
///
/// The page title is the document's first level 1 heading, or `fallback_title`.
fn standalone_page(result: &RenderResult, fallback_title: &str) -> String {
    let title = escape_html(result.title.as_deref().unwrap_or(fallback_title));
    let mut page = String::with_capacity(result.html.len() + 512);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    writeln!(page, "<title>{title}</title>").unwrap();
    page.push_str(concat!(
        "<style>\n",
        "body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; ",
        "line-height: 1.6; padding: 40px; max-width: 800px; margin: 0 auto; }\n",
        "</style>\n",
    ));
    page.push_str("</head>\n<body>\n<div class=\"rendered-html-content\">\n");
    page.push_str(&result.html);
    page.push_str("\n</div>\n</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rendered(markdown: &str) -> RenderResult {
        MarkdownRenderer::new().render_markdown(markdown)
    }

    #[test]
    fn test_standalone_page_uses_document_title() {
        let page = standalone_page(&rendered("# Notes & Ideas\n\ntext"), "Fallback");
        assert!(page.starts_with("<!DOCTYPE html>\n<html>\n<head>\n"));
        assert!(page.contains("<title>Notes &amp; Ideas</title>"));
        assert!(page.contains(
            "<div class=\"rendered-html-content\">\n<h1 id=\"notes-ideas\">Notes & Ideas</h1>\n<p>text</p>\n</div>"
        ));
        assert!(page.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_standalone_page_falls_back_without_h1() {
        let page = standalone_page(&rendered("## Only h2"), "Markdown HTML Preview");
        assert!(page.contains("<title>Markdown HTML Preview</title>"));
    }

    #[test]
    fn test_destination_prefers_explicit_path() {
        let result = rendered("# Title");
        assert_eq!(
            destination(
                Some(PathBuf::from("out.html")),
                Some(Path::new("exports")),
                &result
            ),
            Some(PathBuf::from("out.html"))
        );
    }

    #[test]
    fn test_destination_in_output_dir_named_after_title() {
        let result = rendered("# My Title\ntext");
        assert_eq!(
            destination(None, Some(Path::new("exports")), &result),
            Some(PathBuf::from("exports/my-title.html"))
        );
    }

    #[test]
    fn test_destination_default_export_name() {
        let result = rendered("no heading");
        assert_eq!(
            destination(None, Some(Path::new("exports")), &result),
            Some(PathBuf::from("exports/markdown-export.html"))
        );
    }

    #[test]
    fn test_destination_stdout() {
        assert_eq!(destination(None, None, &rendered("# T")), None);
    }

    #[test]
    fn test_json_output_shape() {
        let result = rendered("# A\n```\nx");
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string_pretty(&result).unwrap()).unwrap();
        assert_eq!(json["title"], "A");
        assert_eq!(json["toc"][0]["id"], "a");
        assert_eq!(json["toc"][0]["level"], 1);
        assert_eq!(
            json["warnings"][0],
            "Unclosed code fence opened at line 2"
        );
    }
}
