//! Wikilink recognition and rendering
//!
//! Supported forms:
//! - Basic wikilinks: `[[note]]`
//! - Labelled wikilinks: `[[note|label]]`
//! - Typed wikilinks: `:type::[[note]]`

use crate::extensions::InlineRecognizer;
use crate::html::{ClassList, ResolvedTarget};
use crate::matcher;
use crate::options::RenderOptions;
use crate::types::{LinkToken, ReferenceToken};
use std::sync::Arc;

/// Renders `[[...]]` links as anchors
#[derive(Debug)]
pub struct WikilinkRenderer {
    options: Arc<RenderOptions>,
}

impl WikilinkRenderer {
    pub fn new(options: Arc<RenderOptions>) -> Self {
        Self { options }
    }

    /// HTML anchor for a single link token
    pub fn render_link(&self, token: &LinkToken) -> String {
        let css = self.options.css();
        let resolved = ResolvedTarget::resolve(&self.options, &token.target);

        let Some(href) = resolved.href else {
            return format!(
                "<a class=\"{} {} {}\">{}</a>",
                css.wiki, css.link, css.invalid, token.raw
            );
        };

        let mut classes = ClassList::new();
        classes.push(css.wiki.as_str()).push(css.link.as_str());
        if let Some(link_type) = &token.link_type {
            classes
                .push(css.type_.as_str())
                .push_slug(&css.reftype, link_type);
        }
        if let Some(doctype) = &resolved.doctype {
            classes.push_slug(&css.doctype, doctype);
        }

        let text = token
            .label
            .as_deref()
            .filter(|l| !l.is_empty())
            .or(resolved.text.as_deref())
            .unwrap_or(&token.target);

        if let Some(observer) = self.options.observer() {
            observer.on_link(token.link_type.as_deref().unwrap_or_default(), &token.target);
        }

        format!(
            "<a class=\"{}\" href=\"{}\" data-href=\"{}\">{}</a>",
            classes.render(),
            href,
            href,
            text
        )
    }
}

impl InlineRecognizer for WikilinkRenderer {
    fn name(&self) -> &'static str {
        "wikilinks"
    }

    fn markers(&self) -> &'static [char] {
        &['[', ':']
    }

    fn start(&self, src: &str) -> Option<usize> {
        matcher::link_start(src)
    }

    fn tokenize(&self, src: &str) -> Option<ReferenceToken> {
        matcher::match_link(src).map(ReferenceToken::Link)
    }

    fn render(&self, token: &ReferenceToken) -> String {
        match token {
            ReferenceToken::Link(link) => self.render_link(link),
            other => other.raw().to_string(),
        }
    }
}
