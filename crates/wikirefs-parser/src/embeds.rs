//! Embed rendering and asynchronous content resolution
//!
//! Media embeds (`![[photo.png]]`) render straight to `<img>`, `<audio>` or
//! `<video>`. Document embeds (`![[note]]`) render a wrapper holding a
//! uniquely identified placeholder; the post-pass asks the
//! [`EmbedContentResolver`] for each placeholder's content, one at a time, and
//! swaps it in.
//!
//! A resolver usually renders the embedded document through the same
//! pipeline, so resolution can recurse. The [`CycleGuard`] tracks the chain of
//! targets currently being resolved and short-circuits any target that shows
//! up twice.

use crate::extensions::{DocumentTransform, InlineRecognizer};
use crate::html::{media_slug, ClassList, ResolvedTarget};
use crate::matcher;
use crate::media::{MediaKind, MediaTarget};
use crate::options::RenderOptions;
use crate::resolve::EmbedContentResolver;
use crate::types::{EmbedToken, ReferenceToken};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Class on the placeholder element awaiting content
pub const PLACEHOLDER_CLASS: &str = "embed-placeholder";

/// Substituted for an embed whose target is already being resolved
pub const EMBED_CYCLE_MARKER: &str = "Error: Embed cycle detected";

/// A document embed waiting for its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEmbed {
    /// Unique placeholder id (`embed-<uuid>`)
    pub id: String,
    pub target: String,
    /// Exact placeholder element as emitted into the HTML
    pub markup: String,
}

impl PendingEmbed {
    pub fn new(target: &str) -> Self {
        let id = format!("embed-{}", Uuid::new_v4().simple());
        let markup = format!(
            "<div id=\"{id}\" class=\"{PLACEHOLDER_CLASS}\" data-filename=\"{target}\">Loading content for '{target}'...</div>"
        );
        Self {
            id,
            target: target.to_string(),
            markup,
        }
    }
}

/// Placeholders emitted during inline rendering, in emission order
#[derive(Debug, Default)]
pub struct PlaceholderRegistry {
    pending: Vec<PendingEmbed>,
}

impl PlaceholderRegistry {
    pub fn register(&mut self, embed: PendingEmbed) {
        self.pending.push(embed);
    }

    /// Take every pending placeholder, leaving the registry empty
    pub fn drain(&mut self) -> Vec<PendingEmbed> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Chain of embed targets currently being resolved
///
/// Every resolution truncates the stack back to the depth it started at,
/// whether it succeeded, failed or hit a cycle. The guard is never cleared
/// wholesale mid-resolution, so sibling branches cannot re-enter an ancestor
/// and a target shared by two branches is not mistaken for a cycle.
#[derive(Debug, Default)]
pub struct CycleGuard {
    stack: Vec<String>,
}

impl CycleGuard {
    /// Push `target` and return the depth to restore afterwards
    ///
    /// Returns `None` without pushing when `target` is already active.
    pub fn enter(&mut self, target: &str) -> Option<usize> {
        if self.contains(target) {
            return None;
        }
        let depth = self.stack.len();
        self.stack.push(target.to_string());
        Some(depth)
    }

    /// Drop everything pushed since `depth`
    pub fn leave(&mut self, depth: usize) {
        self.stack.truncate(depth);
    }

    pub fn contains(&self, target: &str) -> bool {
        self.stack.iter().any(|t| t == target)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn reset(&mut self) {
        self.stack.clear();
    }
}

/// Result of resolving one placeholder
#[derive(Debug)]
pub enum EmbedOutcome {
    /// Non-empty content to substitute verbatim
    Resolved(String),
    /// Resolver returned nothing
    Missing,
    /// Resolver returned an error
    Failed(anyhow::Error),
    /// Target was already being resolved
    Cycle,
}

/// Renders `![[...]]` embeds and resolves document-embed placeholders
#[derive(Debug)]
pub struct EmbedRenderer {
    options: Arc<RenderOptions>,
    registry: Mutex<PlaceholderRegistry>,
    guard: Mutex<CycleGuard>,
}

impl EmbedRenderer {
    pub fn new(options: Arc<RenderOptions>) -> Self {
        Self {
            options,
            registry: Mutex::new(PlaceholderRegistry::default()),
            guard: Mutex::new(CycleGuard::default()),
        }
    }

    /// Number of placeholders awaiting the post-pass
    pub fn pending_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Current depth of the resolution chain
    pub fn resolution_depth(&self) -> usize {
        self.guard.lock().depth()
    }

    /// Inline markup for an embed token
    pub fn render_embed(&self, token: &EmbedToken) -> String {
        let html = match MediaTarget::detect(&token.target) {
            Some(media) => self.render_media(&token.target, &media),
            None => self.render_document(&token.target),
        };

        if let Some(observer) = self.options.observer() {
            observer.on_embed(&token.target);
        }
        html
    }

    fn render_media(&self, target: &str, media: &MediaTarget) -> String {
        let css = self.options.css();
        let resolved = ResolvedTarget::resolve(&self.options, target);
        let src = resolved
            .href
            .map(|href| format!(" src=\"{href}\""))
            .unwrap_or_default();
        let slug = media_slug(target);
        let ext = &media.extension;

        let tag = match media.kind {
            MediaKind::Audio => format!(
                "<audio class=\"{}\" controls type=\"audio/{ext}\"{src}></audio>",
                css.embed_audio
            ),
            MediaKind::Image => format!("<img class=\"{}\"{src}>", css.embed_image),
            MediaKind::Video => format!(
                "<video class=\"{}\" controls type=\"video/{ext}\"{src}></video>",
                css.embed_video
            ),
        };

        format!(
            "<p>\n<span class=\"{}\" src=\"{slug}\" alt=\"{slug}\">\n{tag}\n</span>\n</p>\n",
            css.embed_media
        )
    }

    fn render_document(&self, target: &str) -> String {
        let css = self.options.css();
        let resolved = ResolvedTarget::resolve(&self.options, target);
        let text = resolved.text.as_deref().unwrap_or(target);

        let mut html = String::from("<p>\n");
        match &self.options.config().embeds.title {
            Some(title) => html.push_str(&format!(
                "<div class=\"{}\" title=\"{}\">\n",
                css.embed_wrapper, title
            )),
            None => html.push_str(&format!("<div class=\"{}\">\n", css.embed_wrapper)),
        }

        html.push_str(&format!("<div class=\"{}\">\n", css.embed_title));
        match &resolved.href {
            Some(href) => {
                let mut classes = ClassList::new();
                classes.push(css.wiki.as_str()).push(css.embed.as_str());
                if let Some(doctype) = &resolved.doctype {
                    classes.push_slug(&css.doctype, doctype);
                }
                html.push_str(&format!(
                    "<a class=\"{}\" href=\"{href}\" data-href=\"{href}\">\n{text}\n</a>\n",
                    classes.render()
                ));
            }
            None => html.push_str(&format!(
                "<a class=\"{} {} {}\">\n{text}\n</a>\n",
                css.wiki, css.embed, css.invalid
            )),
        }
        html.push_str("</div>\n");

        html.push_str(&format!("<div class=\"{}\">\n", css.embed_link));
        match &resolved.href {
            Some(href) => html.push_str(&format!(
                "<a class=\"{}\" href=\"{href}\" data-href=\"{href}\">\n",
                css.embed_link_icon
            )),
            None => html.push_str(&format!(
                "<a class=\"{} {}\">\n",
                css.embed_link_icon, css.invalid
            )),
        }
        html.push_str(&format!(
            "<i class=\"{}\"></i>\n</a>\n</div>\n",
            css.link_icon
        ));

        let pending = PendingEmbed::new(target);
        html.push_str(&format!("<div class=\"{}\">\n", css.embed_content));
        html.push_str(&pending.markup);
        html.push_str("\n</div>\n</div>\n</p>\n");

        self.registry.lock().register(pending);
        html
    }

    /// Resolve one target under the cycle guard
    pub async fn resolve_target(
        &self,
        resolver: &dyn EmbedContentResolver,
        target: &str,
    ) -> EmbedOutcome {
        let depth = {
            let mut guard = self.guard.lock();
            match guard.enter(target) {
                Some(depth) => depth,
                None => {
                    warn!(target = %target, depth = guard.depth(), "Embed cycle detected");
                    return EmbedOutcome::Cycle;
                }
            }
        };

        let result = resolver.resolve_content(target).await;
        self.guard.lock().leave(depth);

        match result {
            Ok(Some(content)) if !content.is_empty() => EmbedOutcome::Resolved(content),
            Ok(_) => EmbedOutcome::Missing,
            Err(err) => EmbedOutcome::Failed(err),
        }
    }

    /// Post-pass: swap every registered placeholder for its content
    ///
    /// Placeholders are resolved strictly one after another. Failures never
    /// propagate; they become the configured error message.
    pub async fn resolve_placeholders(&self, html: String) -> String {
        let pending = self.registry.lock().drain();

        let Some(resolver) = self.options.embed_resolver().cloned() else {
            if !pending.is_empty() {
                debug!(
                    "No embed content resolver configured, leaving {} placeholder(s)",
                    pending.len()
                );
            }
            return html;
        };
        if pending.is_empty() {
            return html;
        }

        debug!("Resolving {} embed placeholder(s)", pending.len());
        let embeds = &self.options.config().embeds;
        let mut output = html;

        for embed in pending {
            if !output.contains(&embed.markup) {
                debug!("Placeholder {} not found in HTML", embed.id);
                continue;
            }

            let replacement = match self.resolve_target(resolver.as_ref(), &embed.target).await {
                EmbedOutcome::Resolved(content) => content,
                EmbedOutcome::Cycle => EMBED_CYCLE_MARKER.to_string(),
                EmbedOutcome::Missing => embeds.error_message(&embed.target),
                EmbedOutcome::Failed(err) => {
                    error!(
                        target = %embed.target,
                        error = %err,
                        "Error resolving embed content"
                    );
                    embeds.error_message(&embed.target)
                }
            };

            output = output.replacen(&embed.markup, &replacement, 1);
        }

        output
    }
}

impl InlineRecognizer for EmbedRenderer {
    fn name(&self) -> &'static str {
        "wikiembeds"
    }

    fn markers(&self) -> &'static [char] {
        &['!']
    }

    fn start(&self, src: &str) -> Option<usize> {
        matcher::embed_start(src)
    }

    fn tokenize(&self, src: &str) -> Option<ReferenceToken> {
        matcher::match_embed(src).map(ReferenceToken::Embed)
    }

    fn render(&self, token: &ReferenceToken) -> String {
        match token {
            ReferenceToken::Embed(embed) => self.render_embed(embed),
            other => other.raw().to_string(),
        }
    }
}

#[async_trait]
impl DocumentTransform for EmbedRenderer {
    fn name(&self) -> &'static str {
        "wikiembeds"
    }

    async fn postprocess(&self, html: String) -> String {
        self.resolve_placeholders(html).await
    }
}
