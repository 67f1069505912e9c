//! Caller-supplied resolution and observation
//!
//! The renderer never touches the filesystem. Turning a target identifier into
//! an href, a title, a document type or embeddable content is delegated to the
//! traits below.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Synchronous target lookups used while rendering inline references
pub trait ReferenceResolver: Send + Sync {
    /// Href for `target`, without the base URL; `None` marks it invalid
    fn resolve_href(&self, target: &str) -> Option<String>;

    /// Display text for `target`
    fn resolve_text(&self, _target: &str) -> Option<String> {
        None
    }

    /// Document type of `target`, used for a `doctype__` class
    fn resolve_doctype(&self, _target: &str) -> Option<String> {
        None
    }
}

/// Asynchronous lookup of the HTML to substitute for a document embed
///
/// Implementations typically render the target document themselves, which may
/// recurse back into the same pipeline; cycle detection happens on the caller
/// side.
#[async_trait]
pub trait EmbedContentResolver: Send + Sync {
    /// Rendered content for `target`; `Ok(None)` means not found
    async fn resolve_content(&self, target: &str) -> anyhow::Result<Option<String>>;
}

/// Notified once per reference that is rendered or collected
pub trait MetadataObserver: Send + Sync {
    fn on_attribute(&self, _attr_type: &str, _target: &str) {}

    /// `link_type` is empty for untyped links
    fn on_link(&self, _link_type: &str, _target: &str) {}

    fn on_embed(&self, _target: &str) {}
}

/// What a [`MapResolver`] knows about one target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetEntry {
    pub href: String,
    pub title: Option<String>,
    pub doctype: Option<String>,
}

/// In-memory [`ReferenceResolver`] keyed by target identifier
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    entries: HashMap<String, TargetEntry>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target` with an href
    pub fn with_target(mut self, target: impl Into<String>, href: impl Into<String>) -> Self {
        self.insert(
            target,
            TargetEntry {
                href: href.into(),
                ..Default::default()
            },
        );
        self
    }

    /// Register `target` with an href and a display title
    pub fn with_titled_target(
        mut self,
        target: impl Into<String>,
        href: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        self.insert(
            target,
            TargetEntry {
                href: href.into(),
                title: Some(title.into()),
                doctype: None,
            },
        );
        self
    }

    pub fn insert(&mut self, target: impl Into<String>, entry: TargetEntry) {
        self.entries.insert(target.into(), entry);
    }

    /// Set the doctype of an already registered target
    pub fn with_doctype(mut self, target: &str, doctype: impl Into<String>) -> Self {
        if let Some(entry) = self.entries.get_mut(target) {
            entry.doctype = Some(doctype.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReferenceResolver for MapResolver {
    fn resolve_href(&self, target: &str) -> Option<String> {
        self.entries.get(target).map(|e| e.href.clone())
    }

    fn resolve_text(&self, target: &str) -> Option<String> {
        self.entries.get(target).and_then(|e| e.title.clone())
    }

    fn resolve_doctype(&self, target: &str) -> Option<String> {
        self.entries.get(target).and_then(|e| e.doctype.clone())
    }
}

/// A reference reported to a [`MetadataObserver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedReference {
    Attribute { attr_type: String, target: String },
    Link { link_type: String, target: String },
    Embed { target: String },
}

/// [`MetadataObserver`] that keeps every observation in order
#[derive(Debug, Default)]
pub struct MetadataRecorder {
    observed: Mutex<Vec<ObservedReference>>,
}

impl MetadataRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything observed so far
    pub fn observed(&self) -> Vec<ObservedReference> {
        self.observed.lock().clone()
    }

    /// Remove and return everything observed so far
    pub fn take(&self) -> Vec<ObservedReference> {
        std::mem::take(&mut *self.observed.lock())
    }
}

impl MetadataObserver for MetadataRecorder {
    fn on_attribute(&self, attr_type: &str, target: &str) {
        self.observed.lock().push(ObservedReference::Attribute {
            attr_type: attr_type.to_string(),
            target: target.to_string(),
        });
    }

    fn on_link(&self, link_type: &str, target: &str) {
        self.observed.lock().push(ObservedReference::Link {
            link_type: link_type.to_string(),
            target: target.to_string(),
        });
    }

    fn on_embed(&self, target: &str) {
        self.observed.lock().push(ObservedReference::Embed {
            target: target.to_string(),
        });
    }
}
