//! Immutable options shared by every part of a pipeline

use crate::resolve::{EmbedContentResolver, MetadataObserver, ReferenceResolver};
use std::fmt;
use std::sync::Arc;
use wikirefs_config::{CssNames, WikiRefsConfig};

/// Configuration plus the caller's resolver and observer hooks
///
/// Built once per pipeline and never mutated afterwards.
#[derive(Clone)]
pub struct RenderOptions {
    config: WikiRefsConfig,
    resolver: Arc<dyn ReferenceResolver>,
    embed_resolver: Option<Arc<dyn EmbedContentResolver>>,
    observer: Option<Arc<dyn MetadataObserver>>,
}

impl RenderOptions {
    pub fn new(config: WikiRefsConfig, resolver: Arc<dyn ReferenceResolver>) -> Self {
        Self {
            config,
            resolver,
            embed_resolver: None,
            observer: None,
        }
    }

    pub fn with_embed_resolver(mut self, embed_resolver: Arc<dyn EmbedContentResolver>) -> Self {
        self.embed_resolver = Some(embed_resolver);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn MetadataObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &WikiRefsConfig {
        &self.config
    }

    pub fn css(&self) -> &CssNames {
        &self.config.css
    }

    pub fn resolver(&self) -> &dyn ReferenceResolver {
        self.resolver.as_ref()
    }

    pub fn embed_resolver(&self) -> Option<&Arc<dyn EmbedContentResolver>> {
        self.embed_resolver.as_ref()
    }

    pub fn observer(&self) -> Option<&dyn MetadataObserver> {
        self.observer.as_deref()
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("config", &self.config)
            .field("embed_resolver", &self.embed_resolver.is_some())
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
