//! Top-level renderer configuration and per-feature sections

use crate::css::CssNames;
use crate::loader::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Placeholder in [`EmbedsConfig::error_content`] that is replaced by the
/// target identifier.
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// Complete configuration for one wikirefs pipeline
///
/// All sections are optional when deserializing; missing values take the
/// defaults documented on each field.
///
/// # Example
///
/// ```toml
/// base_url = "/notes"
///
/// [attrs]
/// title = "Properties"
///
/// [embeds]
/// error_content = "Could not embed '{target}'"
///
/// [css]
/// wiki = "wikiref"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WikiRefsConfig {
    /// Prefix prepended to every resolved href
    #[serde(default)]
    pub base_url: String,

    /// Attribute (`type:: [[target]]`) settings
    #[serde(default)]
    pub attrs: AttrsConfig,

    /// Link (`[[target]]`) settings
    #[serde(default)]
    pub links: LinksConfig,

    /// Embed (`![[target]]`) settings
    #[serde(default)]
    pub embeds: EmbedsConfig,

    /// CSS class names used in rendered markup
    #[serde(default)]
    pub css: CssNames,
}

impl WikiRefsConfig {
    /// Create a configuration with every default applied
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL prefix
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check that the configuration can produce well-formed markup
    pub fn validate(&self) -> ConfigResult<()> {
        self.css.validate()?;

        if self.embeds.error_content.trim().is_empty() {
            return Err(ConfigError::invalid(
                "embeds.error_content",
                "error template must not be empty",
            ));
        }

        if self.base_url.chars().any(|c| c == '"' || c.is_whitespace()) {
            return Err(ConfigError::invalid(
                "base_url",
                "must not contain quotes or whitespace",
            ));
        }

        Ok(())
    }
}

/// Attribute collection and attribute-box settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AttrsConfig {
    /// Whether attribute lines are recognized at all
    pub enable: bool,

    /// Whether the collected attribute box is injected into the HTML
    pub render: bool,

    /// Heading shown at the top of the attribute box
    pub title: String,
}

impl Default for AttrsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            render: true,
            title: "Attributes".to_string(),
        }
    }
}

/// Link settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinksConfig {
    /// Whether `[[target]]` links are recognized
    pub enable: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}

/// Embed settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmbedsConfig {
    /// Whether `![[target]]` embeds are recognized
    pub enable: bool,

    /// Optional `title` attribute for document-embed wrappers
    pub title: Option<String>,

    /// Message substituted when embed content cannot be resolved
    ///
    /// `{target}` is replaced by the target identifier. Without it, the
    /// target is appended in single quotes.
    pub error_content: String,
}

impl Default for EmbedsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            title: None,
            error_content: "Error: Content not found for ".to_string(),
        }
    }
}

impl EmbedsConfig {
    /// Render the error message for an unresolvable embed target
    pub fn error_message(&self, target: &str) -> String {
        if self.error_content.contains(TARGET_PLACEHOLDER) {
            self.error_content.replace(TARGET_PLACEHOLDER, target)
        } else {
            format!("{}'{}'", self.error_content, target)
        }
    }
}
