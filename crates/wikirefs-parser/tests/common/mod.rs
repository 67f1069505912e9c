//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};
use wikirefs_parser::markdown_it::MarkdownItHost;
use wikirefs_parser::{EmbedContentResolver, MapResolver, WikiRefs, WikiRefsConfig};

/// Resolver used across the integration tests
pub fn fixture_resolver() -> MapResolver {
    MapResolver::new()
        .with_target("target-a", "/target-a")
        .with_titled_target("target-b", "/target-b", "Target B")
        .with_doctype("target-b", "Reference")
        .with_target("photo.png", "/media/photo.png")
        .with_target("doc-a", "/doc-a")
        .with_target("doc-b", "/doc-b")
        .with_target("doc-c", "/doc-c")
}

/// Markdown notes served as embed content
///
/// Embedded notes render through the same pipeline that requested them, so
/// nested embeds share one cycle guard.
pub struct NoteStore {
    notes: HashMap<String, String>,
    refs: OnceLock<Weak<WikiRefs>>,
    host: OnceLock<MarkdownItHost>,
}

impl NoteStore {
    pub fn new(notes: &[(&str, &str)]) -> Self {
        Self {
            notes: notes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            refs: OnceLock::new(),
            host: OnceLock::new(),
        }
    }
}

#[async_trait]
impl EmbedContentResolver for NoteStore {
    async fn resolve_content(&self, target: &str) -> anyhow::Result<Option<String>> {
        let Some(markdown) = self.notes.get(target) else {
            return Ok(None);
        };
        let refs = self
            .refs
            .get()
            .and_then(Weak::upgrade)
            .ok_or_else(|| anyhow::anyhow!("note store is not attached to a pipeline"))?;
        let host = self
            .host
            .get()
            .ok_or_else(|| anyhow::anyhow!("note store has no host"))?;

        Ok(Some(refs.render_document(host, markdown).await))
    }
}

/// A pipeline wired to a [`NoteStore`]
pub struct Garden {
    pub refs: Arc<WikiRefs>,
    store: Arc<NoteStore>,
}

impl Garden {
    pub fn new(config: WikiRefsConfig, notes: &[(&str, &str)]) -> Self {
        let store = Arc::new(NoteStore::new(notes));
        let refs = Arc::new(
            WikiRefs::builder()
                .config(config)
                .resolver(Arc::new(fixture_resolver()))
                .embed_resolver(store.clone())
                .build()
                .expect("fixture pipeline should build"),
        );

        let _ = store.refs.set(Arc::downgrade(&refs));
        let _ = store.host.set(MarkdownItHost::new(&refs));
        Self { refs, store }
    }

    pub fn host(&self) -> &MarkdownItHost {
        self.store.host.get().expect("host is set in Garden::new")
    }

    pub async fn render(&self, markdown: &str) -> String {
        self.refs.render_document(self.host(), markdown).await
    }
}

/// Pipeline without an embed content resolver
pub fn pipeline(config: WikiRefsConfig) -> (WikiRefs, MarkdownItHost) {
    let refs = WikiRefs::builder()
        .config(config)
        .resolver(Arc::new(fixture_resolver()))
        .build()
        .expect("fixture pipeline should build");
    let host = MarkdownItHost::new(&refs);
    (refs, host)
}
