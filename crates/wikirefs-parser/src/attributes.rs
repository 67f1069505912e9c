//! Attribute collection and the attribute box
//!
//! Attribute lines (`type:: [[target]]`) do not render where they appear.
//! The pre-pass cuts them out of the markdown and records their targets; the
//! post-pass renders everything recorded as one `<aside>` prepended to the
//! document.

use crate::context;
use crate::extensions::DocumentTransform;
use crate::html::{ClassList, ResolvedTarget};
use crate::matcher;
use crate::options::RenderOptions;
use crate::types::AttributeCollection;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

/// Per-document attribute state plus the transform that fills and renders it
#[derive(Debug)]
pub struct AttributeCollector {
    options: Arc<RenderOptions>,
    collection: Mutex<AttributeCollection>,
}

impl AttributeCollector {
    pub fn new(options: Arc<RenderOptions>) -> Self {
        Self {
            options,
            collection: Mutex::new(AttributeCollection::new()),
        }
    }

    /// Forget everything collected for the previous document
    pub fn reset_for_document(&self) {
        self.collection.lock().clear();
    }

    /// Snapshot of the current collection
    pub fn collection(&self) -> AttributeCollection {
        self.collection.lock().clone()
    }

    /// Remove and return the current collection
    pub fn take_collection(&self) -> AttributeCollection {
        std::mem::take(&mut *self.collection.lock())
    }

    /// Pre-pass: record attribute targets and strip attribute lines
    ///
    /// Attribute lines inside lists, blockquotes or code are left untouched so
    /// the host renders them as ordinary text.
    pub fn collect(&self, markdown: &str) -> String {
        self.reset_for_document();

        let mut collection = AttributeCollection::new();
        let mut removals: Vec<Range<usize>> = Vec::new();

        for attr in matcher::find_attributes(markdown) {
            if !context::is_renderable_position(markdown, attr.span.start, &attr.raw) {
                let rule = context::rejecting_rule(markdown, attr.span.start, &attr.raw);
                debug!(
                    "Skipping attribute '{}' at offset {}: {}",
                    attr.attr_type,
                    attr.span.start,
                    rule.map(|r| r.name()).unwrap_or("out of range")
                );
                continue;
            }

            for target in &attr.targets {
                collection.push(attr.attr_type.as_str(), target.as_str());
                if let Some(observer) = self.options.observer() {
                    observer.on_attribute(&attr.attr_type, target);
                }
            }
            removals.push(attr.span);
        }

        debug!(
            "Collected {} attribute type(s) from {} attribute line(s)",
            collection.len(),
            removals.len()
        );
        *self.collection.lock() = collection;

        // highest offset first so earlier spans stay valid
        removals.sort_by(|a, b| b.start.cmp(&a.start));
        let mut output = markdown.to_string();
        for span in removals {
            output.replace_range(span, "");
        }
        output
    }

    /// Markup for the attribute box; empty when nothing was collected
    pub fn render_box(&self, collection: &AttributeCollection) -> String {
        if collection.is_empty() {
            return String::new();
        }

        let config = self.options.config();
        let css = self.options.css();

        let mut html = format!("<aside class=\"{}\">\n", css.attrbox);
        html.push_str(&format!(
            "<span class=\"{}\">{}</span>\n",
            css.attrbox_title, config.attrs.title
        ));
        html.push_str("<dl>\n");

        for (attr_type, targets) in collection.iter() {
            html.push_str(&format!("<dt>{}</dt>\n", attr_type));

            for target in targets {
                let resolved = ResolvedTarget::resolve(&self.options, target);

                match resolved.href {
                    None => {
                        let wikitext = if target.is_empty() { "error" } else { target };
                        html.push_str(&format!(
                            "<dd><a class=\"{} {} {}\">[[{}]]</a></dd>\n",
                            css.attr, css.wiki, css.invalid, wikitext
                        ));
                    }
                    Some(href) => {
                        let mut classes = ClassList::new();
                        if !attr_type.is_empty() {
                            classes.push(css.attr.as_str());
                        }
                        classes.push(css.wiki.as_str());
                        if !attr_type.is_empty() {
                            classes.push_slug(&css.reftype, attr_type);
                        }
                        if let Some(doctype) = &resolved.doctype {
                            classes.push_slug(&css.doctype, doctype);
                        }
                        let text = resolved.text.as_deref().unwrap_or(target);
                        html.push_str(&format!(
                            "<dd><a class=\"{}\" href=\"{}\" data-href=\"{}\">{}</a></dd>\n",
                            classes.render(),
                            href,
                            href,
                            text
                        ));
                    }
                }
            }
        }

        html.push_str("</dl>\n</aside>\n");
        html
    }

    /// Post-pass: prepend the attribute box once
    ///
    /// Skipped when rendering is disabled, when nothing was collected, or when
    /// the HTML already carries a box from an earlier pass.
    pub fn inject_box(&self, html: String) -> String {
        let collection = self.take_collection();

        if !self.options.config().attrs.render || collection.is_empty() {
            return html;
        }

        let existing = format!("class=\"{}\"", self.options.css().attrbox);
        if html.contains(&existing) {
            debug!("Attribute box already present, not injecting another");
            return html;
        }

        let mut output = self.render_box(&collection);
        output.push_str(&html);
        output
    }
}

#[async_trait]
impl DocumentTransform for AttributeCollector {
    fn name(&self) -> &'static str {
        "wikiattrs"
    }

    async fn preprocess(&self, markdown: String) -> String {
        self.collect(&markdown)
    }

    async fn postprocess(&self, html: String) -> String {
        self.inject_box(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{MapResolver, MetadataRecorder, ObservedReference};
    use wikirefs_config::WikiRefsConfig;

    fn collector_with(config: WikiRefsConfig) -> AttributeCollector {
        let resolver = MapResolver::new()
            .with_target("target-a", "/target-a")
            .with_titled_target("target-b", "/target-b", "Target B")
            .with_doctype("target-b", "Reference Doc");
        AttributeCollector::new(Arc::new(RenderOptions::new(config, Arc::new(resolver))))
    }

    fn collector() -> AttributeCollector {
        collector_with(WikiRefsConfig::default())
    }

    #[test]
    fn test_collect_strips_top_level_attribute() {
        let collector = collector();
        let output = collector.collect("type:: [[target-a]]\n\nBody text.\n");

        assert_eq!(output, "\nBody text.\n");
        assert_eq!(collector.collection().get("type").unwrap(), ["target-a"]);
    }

    #[test]
    fn test_collect_leaves_fenced_attribute_alone() {
        let collector = collector();
        let markdown = "```\ntype:: [[target-a]]\n```\n";
        let output = collector.collect(markdown);

        assert_eq!(output, markdown);
        assert!(collector.collection().is_empty());
    }

    #[test]
    fn test_collect_leaves_list_attribute_alone() {
        let collector = collector();
        let markdown = "- type:: [[target-a]]\n> quoted:: [[target-b]]\n";
        assert_eq!(collector.collect(markdown), markdown);
        assert!(collector.collection().is_empty());
    }

    #[test]
    fn test_multiple_removals_keep_offsets() {
        let collector = collector();
        let output = collector.collect("a:: [[x]]\nkeep one\nb:: [[y]]\nkeep two\n");

        assert_eq!(output, "keep one\nkeep two\n");
        let collection = collector.collection();
        let types: Vec<&str> = collection.iter().map(|(t, _)| t).collect();
        assert_eq!(types, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let collector = collector();
        collector.collect("tag:: [[x]]\ntag:: [[x]]\n");
        assert_eq!(collector.collection().get("tag").unwrap(), ["x", "x"]);
    }

    #[test]
    fn test_collect_resets_previous_document() {
        let collector = collector();
        collector.collect("old:: [[x]]\n");
        collector.collect("no attributes here");
        assert!(collector.collection().is_empty());
    }

    #[test]
    fn test_observer_called_per_target() {
        let recorder = Arc::new(MetadataRecorder::new());
        let options = RenderOptions::new(WikiRefsConfig::default(), Arc::new(MapResolver::new()))
            .with_observer(recorder.clone());
        let collector = AttributeCollector::new(Arc::new(options));

        collector.collect("tags:: [[a]], [[b]]\n");
        assert_eq!(
            recorder.observed(),
            vec![
                ObservedReference::Attribute {
                    attr_type: "tags".to_string(),
                    target: "a".to_string()
                },
                ObservedReference::Attribute {
                    attr_type: "tags".to_string(),
                    target: "b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_render_box_markup() {
        let collector = collector();
        let mut collection = AttributeCollection::new();
        collection.push("Next Up", "target-b");
        collection.push("type", "missing");

        assert_eq!(
            collector.render_box(&collection),
            "<aside class=\"attrbox\">\n\
             <span class=\"attrbox-title\">Attributes</span>\n\
             <dl>\n\
             <dt>Next Up</dt>\n\
             <dd><a class=\"attr wiki reftype__next-up doctype__reference-doc\" href=\"/target-b\" data-href=\"/target-b\">Target B</a></dd>\n\
             <dt>type</dt>\n\
             <dd><a class=\"attr wiki invalid\">[[missing]]</a></dd>\n\
             </dl>\n\
             </aside>\n"
        );
    }

    #[test]
    fn test_empty_target_renders_error_marker() {
        let collector = collector();
        let mut collection = AttributeCollection::new();
        collection.push("type", "");

        let html = collector.render_box(&collection);
        assert!(html.contains("<dd><a class=\"attr wiki invalid\">[[error]]</a></dd>"));
    }

    #[test]
    fn test_untyped_entry_has_no_attr_class() {
        let collector = collector();
        let mut collection = AttributeCollection::new();
        collection.push("", "target-a");

        let html = collector.render_box(&collection);
        assert!(html.contains("<dt></dt>"));
        assert!(html.contains("<a class=\"wiki\" href=\"/target-a\""));
    }

    #[test]
    fn test_base_url_applied_in_box() {
        let collector = collector_with(WikiRefsConfig::default().with_base_url("/garden"));
        let mut collection = AttributeCollection::new();
        collection.push("type", "target-a");

        let html = collector.render_box(&collection);
        assert!(html.contains("href=\"/garden/target-a\" data-href=\"/garden/target-a\""));
    }

    #[test]
    fn test_inject_box_is_idempotent() {
        let collector = collector();
        collector.collect("type:: [[target-a]]\n");
        let once = collector.inject_box("<p>Body</p>\n".to_string());
        assert!(once.starts_with("<aside class=\"attrbox\">"));

        collector.collect("type:: [[target-a]]\n");
        let twice = collector.inject_box(once.clone());
        assert_eq!(twice, once);
        assert_eq!(twice.matches("<aside").count(), 1);
    }

    #[test]
    fn test_inject_box_disabled() {
        let mut config = WikiRefsConfig::default();
        config.attrs.render = false;
        let collector = collector_with(config);

        collector.collect("type:: [[target-a]]\n");
        assert_eq!(collector.inject_box("<p>x</p>".to_string()), "<p>x</p>");
        assert!(collector.collection().is_empty());
    }

    #[test]
    fn test_inject_box_consumes_collection() {
        let collector = collector();
        collector.collect("type:: [[target-a]]\n");
        let _ = collector.inject_box(String::new());
        assert!(collector.collection().is_empty());
    }
}
