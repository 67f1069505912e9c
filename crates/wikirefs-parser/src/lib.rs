//! Wiki reference rendering for markdown
//!
//! Recognizes three constructs and renders them to HTML:
//! - Attributes: `type:: [[target]]` lines, collected into one attribute box
//! - Links: `[[target]]`, `[[target|label]]` and `:type::[[target]]`
//! - Embeds: `![[target]]`, as media elements or as resolved document content
//!
//! The crate plugs into a host markdown engine through a two-phase contract:
//! a markdown pre-pass, inline recognizers invoked by the host, and an HTML
//! post-pass. A markdown-it host is included.
//!
//! ```no_run
//! use std::sync::Arc;
//! use wikirefs_parser::markdown_it::MarkdownItHost;
//! use wikirefs_parser::{MapResolver, WikiRefs};
//!
//! # async fn run() -> wikirefs_parser::WikiRefsResult<()> {
//! let refs = WikiRefs::builder()
//!     .resolver(Arc::new(MapResolver::new().with_target("note", "/note")))
//!     .build()?;
//! let host = MarkdownItHost::new(&refs);
//! let html = refs.render_document(&host, "See [[note]].").await;
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod context;
pub mod embeds;
pub mod error;
pub mod extensions;
pub mod html;
pub mod markdown_it;
pub mod matcher;
pub mod media;
pub mod options;
pub mod pipeline;
pub mod resolve;
pub mod types;
pub mod wikilinks;

pub use attributes::AttributeCollector;
pub use context::{is_renderable_position, ContextRule};
pub use embeds::{
    CycleGuard, EmbedOutcome, EmbedRenderer, PendingEmbed, PlaceholderRegistry,
    EMBED_CYCLE_MARKER, PLACEHOLDER_CLASS,
};
pub use error::{WikiRefsError, WikiRefsResult};
pub use extensions::{DocumentTransform, InlineRecognizer, WikiExtension};
pub use media::{MediaKind, MediaTarget};
pub use options::RenderOptions;
pub use pipeline::{MarkdownHost, WikiRefs, WikiRefsBuilder};
pub use resolve::{
    EmbedContentResolver, MapResolver, MetadataObserver, MetadataRecorder, ObservedReference,
    ReferenceResolver, TargetEntry,
};
pub use types::{
    AttributeCollection, AttributeToken, EmbedToken, LinkToken, ReferenceKind, ReferenceToken,
};
pub use wikilinks::WikilinkRenderer;

pub use wikirefs_config::{ConfigError, ConfigLoader, CssNames, WikiRefsConfig};
