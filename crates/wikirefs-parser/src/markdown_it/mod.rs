//! markdown-it host integration
//!
//! [`MarkdownItHost`] is a CommonMark parser with the wiki reference rules
//! installed; pass it to [`crate::WikiRefs::render_document`].

pub mod plugins;

use crate::pipeline::{MarkdownHost, WikiRefs};
use markdown_it::MarkdownIt;

pub use plugins::add_wikirefs_plugin;
pub use plugins::wikiref::{WikiRefNode, WikiRefRecognizers};

/// Host renderer backed by markdown-it
pub struct MarkdownItHost {
    md: MarkdownIt,
}

impl MarkdownItHost {
    /// CommonMark plus the recognizers registered on `refs`
    pub fn new(refs: &WikiRefs) -> Self {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        plugins::add_wikirefs_plugin(&mut md, refs);
        Self { md }
    }

    /// Underlying parser, for adding further plugins
    pub fn parser_mut(&mut self) -> &mut MarkdownIt {
        &mut self.md
    }
}

impl MarkdownHost for MarkdownItHost {
    fn render_html(&self, markdown: &str) -> String {
        self.md.parse(markdown).render()
    }
}
