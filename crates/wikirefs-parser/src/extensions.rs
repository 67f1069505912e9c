//! Extension seams consumed by the host markdown engine
//!
//! A wiki extension contributes inline recognizers (called by the host during
//! its inline traversal) and an optional document transform with a pre-pass
//! over markdown and a post-pass over HTML.

use crate::types::ReferenceToken;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Recognizes and renders one inline reference syntax
pub trait InlineRecognizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Characters a reference of this kind can begin with
    fn markers(&self) -> &'static [char];

    /// Offset in `src` where a reference might begin
    fn start(&self, src: &str) -> Option<usize>;

    /// Structural match at offset 0 of `src`
    fn tokenize(&self, src: &str) -> Option<ReferenceToken>;

    /// HTML for a token produced by [`InlineRecognizer::tokenize`]
    fn render(&self, token: &ReferenceToken) -> String;
}

/// Whole-document transforms run before and after host rendering
///
/// Both passes default to passing their input through unchanged.
#[async_trait]
pub trait DocumentTransform: Send + Sync {
    fn name(&self) -> &'static str;

    /// Markdown-to-markdown pass run before the host parses the document
    async fn preprocess(&self, markdown: String) -> String {
        markdown
    }

    /// HTML-to-HTML pass run after the host renders the document
    async fn postprocess(&self, html: String) -> String {
        html
    }
}

/// One registered feature: its recognizers and its transform
#[derive(Clone)]
pub struct WikiExtension {
    name: &'static str,
    recognizers: Vec<Arc<dyn InlineRecognizer>>,
    transform: Option<Arc<dyn DocumentTransform>>,
}

impl WikiExtension {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            recognizers: Vec::new(),
            transform: None,
        }
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn InlineRecognizer>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    pub fn with_transform(mut self, transform: Arc<dyn DocumentTransform>) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn recognizers(&self) -> &[Arc<dyn InlineRecognizer>] {
        &self.recognizers
    }

    pub fn transform(&self) -> Option<&Arc<dyn DocumentTransform>> {
        self.transform.as_ref()
    }
}

impl fmt::Debug for WikiExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recognizers: Vec<&str> = self.recognizers.iter().map(|r| r.name()).collect();
        f.debug_struct("WikiExtension")
            .field("name", &self.name)
            .field("recognizers", &recognizers)
            .field("transform", &self.transform.as_ref().map(|t| t.name()))
            .finish()
    }
}
