//! Pipeline orchestration
//!
//! [`WikiRefs`] wires the enabled features together and exposes the two-phase
//! contract consumed by a host markdown engine: a markdown pre-pass, inline
//! recognizers called during the host's own traversal, and an HTML post-pass.

use crate::attributes::AttributeCollector;
use crate::embeds::EmbedRenderer;
use crate::error::{WikiRefsError, WikiRefsResult};
use crate::extensions::{InlineRecognizer, WikiExtension};
use crate::options::RenderOptions;
use crate::resolve::{EmbedContentResolver, MetadataObserver, ReferenceResolver};
use crate::wikilinks::WikilinkRenderer;
use std::sync::Arc;
use tracing::debug;
use wikirefs_config::WikiRefsConfig;

/// A markdown engine that renders a whole document to HTML
pub trait MarkdownHost: Send + Sync {
    fn render_html(&self, markdown: &str) -> String;
}

/// The composed wiki reference pipeline
///
/// Extensions are registered in a fixed order (attributes, links, embeds) and
/// both passes run through them in that order, one after another.
#[derive(Debug)]
pub struct WikiRefs {
    options: Arc<RenderOptions>,
    attributes: Option<Arc<AttributeCollector>>,
    embeds: Option<Arc<EmbedRenderer>>,
    extensions: Vec<WikiExtension>,
}

impl WikiRefs {
    pub fn builder() -> WikiRefsBuilder {
        WikiRefsBuilder::default()
    }

    /// Build a pipeline directly from prepared options
    pub fn new(options: RenderOptions) -> Self {
        let options = Arc::new(options);
        let config = options.config();
        let mut extensions = Vec::new();

        let attributes = config.attrs.enable.then(|| {
            let collector = Arc::new(AttributeCollector::new(options.clone()));
            extensions.push(WikiExtension::new("wikiattrs").with_transform(collector.clone()));
            collector
        });

        if config.links.enable {
            let links = Arc::new(WikilinkRenderer::new(options.clone()));
            extensions.push(WikiExtension::new("wikilinks").with_recognizer(links));
        }

        let embeds = config.embeds.enable.then(|| {
            let embeds = Arc::new(EmbedRenderer::new(options.clone()));
            extensions.push(
                WikiExtension::new("wikiembeds")
                    .with_recognizer(embeds.clone())
                    .with_transform(embeds.clone()),
            );
            embeds
        });

        debug!(
            "Registered wiki extensions: {:?}",
            extensions.iter().map(|e| e.name()).collect::<Vec<_>>()
        );

        Self {
            options,
            attributes,
            embeds,
            extensions,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn extensions(&self) -> &[WikiExtension] {
        &self.extensions
    }

    /// Attribute collector, when attributes are enabled
    pub fn attributes(&self) -> Option<&AttributeCollector> {
        self.attributes.as_deref()
    }

    /// Embed renderer, when embeds are enabled
    pub fn embeds(&self) -> Option<&EmbedRenderer> {
        self.embeds.as_deref()
    }

    /// Every inline recognizer, in registration order
    pub fn recognizers(&self) -> Vec<Arc<dyn InlineRecognizer>> {
        self.extensions
            .iter()
            .flat_map(|ext| ext.recognizers().iter().cloned())
            .collect()
    }

    /// Run every pre-pass in order, each feeding the next
    pub async fn preprocess(&self, markdown: &str) -> String {
        let mut output = markdown.to_string();
        for transform in self.extensions.iter().filter_map(|ext| ext.transform()) {
            output = transform.preprocess(output).await;
        }
        output
    }

    /// Run every post-pass in order, each feeding the next
    pub async fn postprocess(&self, html: String) -> String {
        let mut output = html;
        for transform in self.extensions.iter().filter_map(|ext| ext.transform()) {
            output = transform.postprocess(output).await;
        }
        output
    }

    /// Pre-pass, host render, post-pass
    pub async fn render_document(&self, host: &impl MarkdownHost, markdown: &str) -> String {
        let prepared = self.preprocess(markdown).await;
        let html = host.render_html(&prepared);
        self.postprocess(html).await
    }
}

/// Builder for [`WikiRefs`]
#[derive(Default)]
pub struct WikiRefsBuilder {
    config: WikiRefsConfig,
    resolver: Option<Arc<dyn ReferenceResolver>>,
    embed_resolver: Option<Arc<dyn EmbedContentResolver>>,
    observer: Option<Arc<dyn MetadataObserver>>,
}

impl WikiRefsBuilder {
    pub fn config(mut self, config: WikiRefsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn embed_resolver(mut self, resolver: Arc<dyn EmbedContentResolver>) -> Self {
        self.embed_resolver = Some(resolver);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn MetadataObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Validate the configuration and assemble the pipeline
    pub fn build(self) -> WikiRefsResult<WikiRefs> {
        self.config.validate()?;
        let resolver = self.resolver.ok_or(WikiRefsError::MissingResolver)?;

        let mut options = RenderOptions::new(self.config, resolver);
        if let Some(embed_resolver) = self.embed_resolver {
            options = options.with_embed_resolver(embed_resolver);
        }
        if let Some(observer) = self.observer {
            options = options.with_observer(observer);
        }

        Ok(WikiRefs::new(options))
    }
}
