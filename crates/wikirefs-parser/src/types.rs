//! Reference tokens and per-document collections

use std::ops::Range;

/// The three wiki reference constructs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `type:: [[target]]` on its own line
    Attribute,
    /// `[[target]]`, `[[target|label]]`, `:type::[[target]]`
    Link,
    /// `![[target]]`
    Embed,
}

/// An attribute line declaring one or more targets under a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeToken {
    /// Matched source text, verbatim
    pub raw: String,
    /// Byte span of `raw` in the scanned text
    pub span: Range<usize>,
    /// Trimmed attribute type; empty for untyped attributes
    pub attr_type: String,
    /// Targets of every link inside the attribute span, in source order
    pub targets: Vec<String>,
}

/// A single wikilink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkToken {
    /// Matched source text, verbatim
    pub raw: String,
    /// Byte span of `raw` in the scanned text
    pub span: Range<usize>,
    /// Trimmed link type from a `:type::` prefix
    pub link_type: Option<String>,
    /// Target identifier
    pub target: String,
    /// Display label after `|`
    pub label: Option<String>,
}

/// A single embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedToken {
    /// Matched source text, verbatim
    pub raw: String,
    /// Byte span of `raw` in the scanned text
    pub span: Range<usize>,
    /// Target identifier
    pub target: String,
}

/// A recognized reference of any kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceToken {
    Attribute(AttributeToken),
    Link(LinkToken),
    Embed(EmbedToken),
}

impl ReferenceToken {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Self::Attribute(_) => ReferenceKind::Attribute,
            Self::Link(_) => ReferenceKind::Link,
            Self::Embed(_) => ReferenceKind::Embed,
        }
    }

    /// Matched source text
    pub fn raw(&self) -> &str {
        match self {
            Self::Attribute(t) => &t.raw,
            Self::Link(t) => &t.raw,
            Self::Embed(t) => &t.raw,
        }
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Attribute(t) => t.span.clone(),
            Self::Link(t) => t.span.clone(),
            Self::Embed(t) => t.span.clone(),
        }
    }

    /// Length of the matched text in bytes
    pub fn len(&self) -> usize {
        self.raw().len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw().is_empty()
    }
}

/// Attribute targets grouped by type
///
/// Types iterate in first-seen order and targets keep their insertion order.
/// Repeated targets are kept: each occurrence is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeCollection {
    entries: Vec<(String, Vec<String>)>,
}

impl AttributeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a target under `attr_type`
    pub fn push(&mut self, attr_type: impl Into<String>, target: impl Into<String>) {
        let attr_type = attr_type.into();
        let target = target.into();

        match self.entries.iter_mut().find(|(t, _)| *t == attr_type) {
            Some((_, targets)) => targets.push(target),
            None => self.entries.push((attr_type, vec![target])),
        }
    }

    /// Targets recorded under `attr_type`
    pub fn get(&self, attr_type: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(t, _)| t == attr_type)
            .map(|(_, targets)| targets.as_slice())
    }

    /// Iterate `(type, targets)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(t, targets)| (t.as_str(), targets.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
