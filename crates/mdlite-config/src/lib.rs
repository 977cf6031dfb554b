//! Configuration management for mdlite.
//!
//! Parses `mdlite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Expansion
//!
//! `output.dir` supports `${VAR}`, `${VAR:-default}` and a leading `~`.
//! Relative directories are resolved against the directory holding the
//! config file. `output.document_title` supports `${VAR}` references.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override table of contents heading.
    pub toc_title: Option<String>,
    /// Override export directory.
    pub output_dir: Option<PathBuf>,
    /// Override standalone page output.
    pub standalone: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdlite.toml";

/// Page title used when a document has no level 1 heading.
const DEFAULT_DOCUMENT_TITLE: &str = "Markdown HTML Preview";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Output configuration (directory as a raw string from TOML).
    output: OutputConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Heading shown inside the table of contents.
    pub toc_title: String,
    /// Class of the table of contents container.
    pub toc_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            toc_title: "Table of Contents".to_owned(),
            toc_class: "markdown-toc".to_owned(),
        }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    standalone: Option<bool>,
    document_title: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug)]
pub struct OutputConfig {
    /// Directory for exported files, named after the document title.
    pub dir: Option<PathBuf>,
    /// Whether to wrap rendered HTML in a complete page.
    pub standalone: bool,
    /// Page title used when a document has no level 1 heading.
    pub document_title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            standalone: false,
            document_title: DEFAULT_DOCUMENT_TITLE.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`EXPORT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a value usable inside a `class="..."` attribute.
fn require_class_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>'))
    {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain whitespace, quotes or angle brackets"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdlite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(toc_title) = &settings.toc_title {
            self.render.toc_title.clone_from(toc_title);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir = Some(output_dir.clone());
        }
        if let Some(standalone) = settings.standalone {
            self.output_resolved.standalone = standalone;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.toc_title, "render.toc_title")?;
        require_class_name(&self.render.toc_class, "render.toc_class")?;
        require_non_empty(
            &self.output_resolved.document_title,
            "output.document_title",
        )?;
        Ok(())
    }

    /// Expand raw output values and resolve the directory against `config_dir`.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let dir = match &self.output.dir {
            Some(dir) => Some(config_dir.join(expand::expand_path(dir, "output.dir")?)),
            None => None,
        };
        let document_title = match &self.output.document_title {
            Some(title) => expand::expand_env(title, "output.document_title")?,
            None => DEFAULT_DOCUMENT_TITLE.to_owned(),
        };

        self.output_resolved = OutputConfig {
            dir,
            standalone: self.output.standalone.unwrap_or(false),
            document_title,
        };

        Ok(())
    }
}
