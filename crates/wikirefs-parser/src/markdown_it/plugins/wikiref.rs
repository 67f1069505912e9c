//! Wiki reference plugin for markdown-it
//!
//! Registers one inline rule per marker character. Each rule hands the
//! remaining inline source to the pipeline's recognizers and emits whatever
//! markup the first matching recognizer renders.
//! - `[[note]]`, `[[note|label]]` on `[`
//! - `:type::[[note]]` on `:`
//! - `![[note]]`, `![[photo.png]]` on `!`

use crate::extensions::InlineRecognizer;
use crate::pipeline::WikiRefs;
use crate::types::ReferenceToken;
use markdown_it::parser::extset::MarkdownItExt;
use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use std::fmt;
use std::sync::Arc;

/// Recognizers stored in the parser's extension set
#[derive(Clone, Default)]
pub struct WikiRefRecognizers(Vec<Arc<dyn InlineRecognizer>>);

impl WikiRefRecognizers {
    pub fn new(recognizers: Vec<Arc<dyn InlineRecognizer>>) -> Self {
        Self(recognizers)
    }

    fn for_marker(&self, marker: char) -> impl Iterator<Item = &Arc<dyn InlineRecognizer>> {
        self.0.iter().filter(move |r| r.markers().contains(&marker))
    }
}

impl fmt::Debug for WikiRefRecognizers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|r| r.name()))
            .finish()
    }
}

impl MarkdownItExt for WikiRefRecognizers {}

/// AST node holding a recognized reference and the recognizer that renders it
#[derive(Clone)]
pub struct WikiRefNode {
    pub token: ReferenceToken,
    recognizer: Arc<dyn InlineRecognizer>,
}

impl NodeValue for WikiRefNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.text_raw(&self.recognizer.render(&self.token));
    }
}

impl fmt::Debug for WikiRefNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiRefNode")
            .field("token", &self.token)
            .field("recognizer", &self.recognizer.name())
            .finish()
    }
}

fn scan(state: &mut InlineState, marker: char) -> Option<(Node, usize)> {
    let input = &state.src[state.pos..state.pos_max];
    if !input.starts_with(marker) {
        return None;
    }

    let recognizers = state.md.ext.get::<WikiRefRecognizers>()?;
    recognizers.for_marker(marker).find_map(|recognizer| {
        let token = recognizer.tokenize(input)?;
        let len = token.len();
        let node = Node::new(WikiRefNode {
            token,
            recognizer: recognizer.clone(),
        });
        Some((node, len))
    })
}

/// Scanner for `[[...]]`
pub struct WikiLinkScanner;

impl InlineRule for WikiLinkScanner {
    const MARKER: char = '[';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        scan(state, Self::MARKER)
    }
}

/// Scanner for `:type::[[...]]`
pub struct TypedLinkScanner;

impl InlineRule for TypedLinkScanner {
    const MARKER: char = ':';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        scan(state, Self::MARKER)
    }
}

/// Scanner for `![[...]]`
pub struct WikiEmbedScanner;

impl InlineRule for WikiEmbedScanner {
    const MARKER: char = '!';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        scan(state, Self::MARKER)
    }
}

/// Add the wiki reference rules for `refs` to a markdown-it parser
///
/// The rules run ahead of the built-in link and image rules so `[[` and
/// `![[` are never claimed by CommonMark syntax.
pub fn add_wikirefs_plugin(md: &mut MarkdownIt, refs: &WikiRefs) {
    md.ext.insert(WikiRefRecognizers::new(refs.recognizers()));
    md.inline.add_rule::<WikiEmbedScanner>().before_all();
    md.inline.add_rule::<TypedLinkScanner>().before_all();
    md.inline.add_rule::<WikiLinkScanner>().before_all();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::MapResolver;
    use wikirefs_config::WikiRefsConfig;

    fn setup_parser(config: WikiRefsConfig) -> MarkdownIt {
        let refs = WikiRefs::builder()
            .config(config)
            .resolver(Arc::new(
                MapResolver::new()
                    .with_target("a", "/a")
                    .with_target("pic.png", "/pic.png"),
            ))
            .build()
            .unwrap();

        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_wikirefs_plugin(&mut md, &refs);
        md
    }

    fn render(src: &str) -> String {
        setup_parser(WikiRefsConfig::default()).parse(src).render()
    }

    #[test]
    fn test_simple_wikilink() {
        assert_eq!(
            render("See [[a]] here."),
            "<p>See <a class=\"wiki link\" href=\"/a\" data-href=\"/a\">a</a> here.</p>\n"
        );
    }

    #[test]
    fn test_typed_wikilink() {
        let html = render("Next :next::[[a]]");
        assert!(html.contains("<a class=\"wiki link type reftype__next\" href=\"/a\""));
        assert!(!html.contains(":next::"));
    }

    #[test]
    fn test_media_embed() {
        let html = render("![[pic.png]]");
        assert!(html.contains("<img class=\"embed-image\" src=\"/pic.png\">"));
    }

    #[test]
    fn test_regular_markdown_links() {
        let html = render("Regular [link](url) and ![img](i.png) still work.");
        assert!(html.contains("<a href=\"url\">link</a>"));
        assert!(html.contains("src=\"i.png\""));
    }

    #[test]
    fn test_code_span_is_literal() {
        let html = render("`[[a]]`");
        assert_eq!(html, "<p><code>[[a]]</code></p>\n");
    }

    #[test]
    fn test_disabled_links_render_as_text() {
        let mut config = WikiRefsConfig::default();
        config.links.enable = false;
        let html = setup_parser(config).parse("[[a]]").render();
        assert!(!html.contains("wiki link"));
        assert!(html.contains("[[a]]"));
    }
}
