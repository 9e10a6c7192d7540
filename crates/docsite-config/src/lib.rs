//! Configuration management for docsite.
//!
//! Parses `docsite.toml` configuration files with serde. The file is looked up
//! in the current working directory unless an explicit path is given; when
//! neither exists, built-in defaults are used.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `docs.source_file`
//!
//! ## Runtime Environment
//!
//! The `DOCSITE_ENV` variable (`development` or `production`) overrides
//! `render.environment` from the file.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docsite.toml";

/// Environment variable selecting the runtime environment.
pub const ENVIRONMENT_VAR: &str = "DOCSITE_ENV";

/// Default location of the documentation source, relative to the working directory.
pub const DEFAULT_SOURCE_FILE: &str = "docs/main.md";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override documentation source file.
    pub source_file: Option<PathBuf>,
    /// Override render mode.
    pub mode: Option<RenderMode>,
    /// Override whether the attempted path is shown on the error page.
    pub show_path: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation source configuration.
    pub docs: DocsConfig,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Page chrome configuration.
    pub site: SiteConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Documentation source configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Markdown file to render.
    ///
    /// Relative paths resolve against the config file's directory, or the
    /// working directory when no file was loaded.
    pub source_file: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from(DEFAULT_SOURCE_FILE),
        }
    }
}

/// How the source file is turned into page content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Compile markdown (with front-matter and embedded markup) to HTML.
    #[default]
    Markdown,
    /// Show the raw file content as preformatted text.
    Verbatim,
}

/// Runtime environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development: surface compiler details on the error page.
    Development,
    /// Production: only generic messages are shown.
    #[default]
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::Validation(format!(
                "{ENVIRONMENT_VAR} must be \"development\" or \"production\", got \"{other}\""
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Rendering mode.
    pub mode: RenderMode,
    /// Show the attempted source path on the error page.
    pub show_path: bool,
    /// Runtime environment.
    pub environment: Environment,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Markdown,
            show_path: true,
            environment: Environment::Production,
        }
    }
}

/// Page chrome configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Fallback page title.
    pub title: String,
    /// Fallback page description.
    pub description: String,
    /// Document language (`<html lang>`).
    pub lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "DevOps System Documentation".to_owned(),
            description: "Technical documentation for DevOps system".to_owned(),
            lang: "zh".to_owned(),
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
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`DOCSITE_HOST`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, loads `docsite.toml` from the current directory if it exists.
    ///
    /// The `DOCSITE_ENV` variable and CLI settings are applied after loading,
    /// so they take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(found) = Self::find_in_current_dir() {
            Self::load_from_file(&found)?
        } else {
            Self::default()
        };

        if let Ok(value) = std::env::var(ENVIRONMENT_VAR) {
            config.render.environment = value.parse()?;
        }

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Directory that `docs.source_file` is resolved against.
    ///
    /// This is the directory containing the loaded config file. `None` means
    /// no file was loaded and the working directory at render time applies.
    #[must_use]
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_file) = &settings.source_file {
            self.docs.source_file.clone_from(source_file);
        }
        if let Some(mode) = settings.mode {
            self.render.mode = mode;
        }
        if let Some(show_path) = settings.show_path {
            self.render.show_path = show_path;
        }
    }

    /// Look for the config file in the current working directory.
    fn find_in_current_dir() -> Option<PathBuf> {
        let candidate = std::env::current_dir().ok()?.join(CONFIG_FILENAME);
        candidate.exists().then_some(candidate)
    }

    /// Load configuration from a specific file.
    ///
    /// The recorded `config_path` is absolute so `base_dir()` never depends on
    /// how the path was spelled on the command line.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(std::path::absolute(path)?);
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 lets the OS pick a port, which is never what a config file means
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        if self.docs.source_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "docs.source_file cannot be empty".to_owned(),
            ));
        }

        require_non_empty(&self.site.lang, "site.lang")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(source) = self.docs.source_file.to_str() {
            self.docs.source_file =
                PathBuf::from(expand::expand_env(source, "docs.source_file")?);
        }

        Ok(())
    }
}
