//! Overridable CSS class names for rendered markup

use crate::loader::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Class names for every element the renderer emits
///
/// `reftype` and `doctype` are prefixes: the slug of the reference type or
/// document type is appended to them (`reftype__` + `next` = `reftype__next`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CssNames {
    /// Marker on every wiki reference
    pub wiki: String,
    /// Marker on references whose href did not resolve
    pub invalid: String,

    /// Attribute kind marker
    pub attr: String,
    /// Link kind marker
    pub link: String,
    /// Marker on typed links
    #[serde(rename = "type")]
    pub type_: String,
    /// Embed kind marker
    pub embed: String,
    /// Prefix for reference-type slugs
    pub reftype: String,
    /// Prefix for document-type slugs
    pub doctype: String,

    /// Attribute box container
    pub attrbox: String,
    /// Attribute box heading
    pub attrbox_title: String,

    /// Document-embed wrapper
    pub embed_wrapper: String,
    /// Document-embed title block
    pub embed_title: String,
    /// Document-embed link block
    pub embed_link: String,
    /// Document-embed content block
    pub embed_content: String,
    /// Anchor around the link icon
    pub embed_link_icon: String,
    /// The link icon itself
    pub link_icon: String,

    /// Media-embed wrapper
    pub embed_media: String,
    /// `<audio>` element
    pub embed_audio: String,
    /// `<img>` element
    pub embed_image: String,
    /// `<video>` element
    pub embed_video: String,
}

impl Default for CssNames {
    fn default() -> Self {
        Self {
            wiki: "wiki".to_string(),
            invalid: "invalid".to_string(),
            attr: "attr".to_string(),
            link: "link".to_string(),
            type_: "type".to_string(),
            embed: "embed".to_string(),
            reftype: "reftype__".to_string(),
            doctype: "doctype__".to_string(),
            attrbox: "attrbox".to_string(),
            attrbox_title: "attrbox-title".to_string(),
            embed_wrapper: "embed-wrapper".to_string(),
            embed_title: "embed-title".to_string(),
            embed_link: "embed-link".to_string(),
            embed_content: "embed-content".to_string(),
            embed_link_icon: "embed-link-icon".to_string(),
            link_icon: "link-icon".to_string(),
            embed_media: "embed-media".to_string(),
            embed_audio: "embed-audio".to_string(),
            embed_image: "embed-image".to_string(),
            embed_video: "embed-video".to_string(),
        }
    }
}

impl CssNames {
    fn entries(&self) -> [(&'static str, &str); 20] {
        [
            ("wiki", &self.wiki),
            ("invalid", &self.invalid),
            ("attr", &self.attr),
            ("link", &self.link),
            ("type", &self.type_),
            ("embed", &self.embed),
            ("reftype", &self.reftype),
            ("doctype", &self.doctype),
            ("attrbox", &self.attrbox),
            ("attrbox_title", &self.attrbox_title),
            ("embed_wrapper", &self.embed_wrapper),
            ("embed_title", &self.embed_title),
            ("embed_link", &self.embed_link),
            ("embed_content", &self.embed_content),
            ("embed_link_icon", &self.embed_link_icon),
            ("link_icon", &self.link_icon),
            ("embed_media", &self.embed_media),
            ("embed_audio", &self.embed_audio),
            ("embed_image", &self.embed_image),
            ("embed_video", &self.embed_video),
        ]
    }

    /// Reject names that would break the emitted `class` attribute
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, name) in self.entries() {
            if name.is_empty() {
                return Err(ConfigError::invalid(
                    format!("css.{field}"),
                    "class name must not be empty",
                ));
            }
            if name
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>'))
            {
                return Err(ConfigError::invalid(
                    format!("css.{field}"),
                    format!("'{name}' contains whitespace or quote characters"),
                ));
            }
        }
        Ok(())
    }
}
