//! Markup helpers shared by the attribute, link and embed renderers

use crate::options::RenderOptions;

/// Normalize a type or doctype for use in a class name
///
/// trim → lowercase → spaces to hyphens → drop anything that is not an ASCII
/// word character or hyphen.
pub fn slugify(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Lighter slug used for media `src`/`alt` attributes (no stripping)
pub fn media_slug(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-")
}

/// Space-separated class attribute value
#[derive(Debug, Default)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, class: impl Into<String>) -> &mut Self {
        self.0.push(class.into());
        self
    }

    /// Add `prefix` + slug of `value`
    pub fn push_slug(&mut self, prefix: &str, value: &str) -> &mut Self {
        self.0.push(format!("{}{}", prefix, slugify(value)));
        self
    }

    pub fn render(&self) -> String {
        self.0.join(" ")
    }
}

/// Resolved view of a target used by every renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Href with the base URL already applied; `None` when unresolvable
    pub href: Option<String>,
    /// Display text from the text resolver, if non-empty
    pub text: Option<String>,
    /// Document type, if non-empty
    pub doctype: Option<String>,
}

impl ResolvedTarget {
    /// Run every resolver for `target`
    ///
    /// Empty strings are treated the same as no value.
    pub fn resolve(options: &RenderOptions, target: &str) -> Self {
        let resolver = options.resolver();
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

        Self {
            href: non_empty(resolver.resolve_href(target))
                .map(|href| format!("{}{}", options.config().base_url, href)),
            text: non_empty(resolver.resolve_text(target)),
            doctype: non_empty(resolver.resolve_doctype(target)),
        }
    }
}
