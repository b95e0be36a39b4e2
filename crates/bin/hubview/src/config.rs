//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `hubview.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the registry snapshot comes from.
    pub snapshot: SnapshotConfig,
    /// What to render and how to print it.
    pub render: RenderConfig,
    /// Module importer settings.
    pub loader: LoaderConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Registry snapshot source.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Path to a `{"states": [...], "components": [...]}` JSON document.
    pub path: String,
}

/// Render settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Entities to render; empty means every entity in the snapshot.
    pub entities: Vec<String>,
    pub format: OutputFormat,
    /// Passed to every view as the `editMode` prop.
    pub edit_mode: bool,
    /// Upper bound on waiting for pending imports before printing.
    pub settle_timeout_ms: u64,
}

/// How render trees are printed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tag outline.
    #[default]
    Outline,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "outline" => Ok(Self::Outline),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unknown output format {other:?}"
            ))),
        }
    }
}

/// Module importer settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Simulated latency of every import.
    pub import_delay_ms: u64,
    /// View types whose import fails, leaving their elements inert.
    pub disabled_views: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `hubview.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hubview.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HUBVIEW_SNAPSHOT") {
            self.snapshot.path = val;
        }
        if let Some(val) = var("HUBVIEW_ENTITIES") {
            self.render.entities = val
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(format) = var("HUBVIEW_FORMAT").and_then(|val| val.parse().ok()) {
            self.render.format = format;
        }
        if let Some(val) = var("HUBVIEW_EDIT_MODE") {
            self.render.edit_mode = matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        if let Some(delay) = var("HUBVIEW_IMPORT_DELAY_MS").and_then(|val| val.parse().ok()) {
            self.loader.import_delay_ms = delay;
        }
        if let Some(val) = var("HUBVIEW_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.snapshot.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "snapshot path must not be empty".to_string(),
            ));
        }
        if self.render.settle_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "settle timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn import_delay(&self) -> Duration {
        Duration::from_millis(self.loader.import_delay_ms)
    }

    #[must_use]
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.render.settle_timeout_ms)
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: "snapshot.json".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            format: OutputFormat::default(),
            edit_mode: false,
            settle_timeout_ms: 5_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hubview=info,hubview_app=info,hubview_adapter_builtin=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
