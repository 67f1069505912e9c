//! Loading configuration from TOML or JSON

use crate::config::WikiRefsConfig;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[cfg(feature = "toml")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension does not map to a known format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value that deserialized but cannot be used
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid-value error
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    #[cfg(feature = "toml")]
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            #[cfg(feature = "toml")]
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl WikiRefsConfig {
    /// Parse and validate a TOML document
    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse content in the given format
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> ConfigResult<Self> {
        match format {
            #[cfg(feature = "toml")]
            ConfigFormat::Toml => Self::from_toml_str(content),
            ConfigFormat::Json => Self::from_json_str(content),
        }
    }
}

/// Loads [`WikiRefsConfig`] from disk
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a config file, choosing the format by extension
    pub async fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<WikiRefsConfig> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path).await?;

        debug!("Loading wikirefs config from {} as {:?}", path.display(), format);
        WikiRefsConfig::from_str_with_format(&content, format)
    }
}
