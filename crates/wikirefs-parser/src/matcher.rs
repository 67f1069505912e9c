//! Lexical matching for wiki references
//!
//! Three independent grammars:
//! - Attributes: `type:: [[a]], [[b]]` on one line, or `type::` followed by
//!   `- [[a]]` list lines
//! - Links: `[[target]]`, `[[target|label]]`, `:type::[[target]]`
//! - Embeds: `![[target]]`
//!
//! Link and embed tokenizers are left-anchored: they only match when the
//! reference begins at offset 0 of the given window. Matching is purely
//! structural; nothing here checks whether a target exists.

use crate::types::{AttributeToken, EmbedToken, LinkToken};
use regex::Regex;
use std::sync::LazyLock;

static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?::([^\r\n:\[\]|]+)::[ \t]*)?\[\[([^\[\]|\r\n]+)(?:\|([^\[\]\r\n]+))?\]\]")
        .expect("link regex")
});

static LINK_SEARCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?::[^\r\n:\[\]|]+::[ \t]*)?\[\[[^\[\]|\r\n]+(?:\|[^\[\]\r\n]+)?\]\]")
        .expect("link search regex")
});

static EMBED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[\[([^\[\]\r\n]+)\]\]").expect("embed regex"));

static EMBED_SEARCH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[[^\[\]\r\n]+\]\]").expect("embed search regex"));

/// Any link inside an attribute span; group 1 is the target
static NESTED_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]|\r\n]+)(?:\|[^\[\]\r\n]+)?\]\]").expect("nested link regex")
});

static ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let link = r"\[\[[^\[\]|\r\n]+(?:\|[^\[\]\r\n]+)?\]\]";
    let pattern = format!(
        r"(?m)^[ \t]*:?([^\r\n:\[\]|]*)::[ \t]*(?:{link}(?:[ \t]*,?[ \t]*{link})*[ \t]*(?:\r?\n|$)|\r?\n(?:[ \t]*[-*+][ \t]+{link}[ \t]*(?:\r?\n|$))+)"
    );
    Regex::new(&pattern).expect("attribute regex")
});

/// Offset of the first possible link in `src`
pub fn link_start(src: &str) -> Option<usize> {
    LINK_SEARCH_REGEX.find(src).map(|m| m.start())
}

/// Match a link beginning exactly at the start of `src`
pub fn match_link(src: &str) -> Option<LinkToken> {
    let cap = LINK_REGEX.captures(src)?;
    let full = cap.get(0)?;

    Some(LinkToken {
        raw: full.as_str().to_string(),
        span: 0..full.end(),
        link_type: cap
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty()),
        target: cap.get(2)?.as_str().to_string(),
        label: cap.get(3).map(|m| m.as_str().to_string()),
    })
}

/// Offset of the first possible embed in `src`
pub fn embed_start(src: &str) -> Option<usize> {
    EMBED_SEARCH_REGEX.find(src).map(|m| m.start())
}

/// Match an embed beginning exactly at the start of `src`
pub fn match_embed(src: &str) -> Option<EmbedToken> {
    let cap = EMBED_REGEX.captures(src)?;
    let full = cap.get(0)?;

    Some(EmbedToken {
        raw: full.as_str().to_string(),
        span: 0..full.end(),
        target: cap.get(1)?.as_str().to_string(),
    })
}

/// Find every attribute line in a document
///
/// Spans are byte offsets into `text` and `raw` is the exact matched text,
/// so callers can cut attribute lines out of the document verbatim.
pub fn find_attributes(text: &str) -> Vec<AttributeToken> {
    ATTR_REGEX
        .captures_iter(text)
        .filter_map(|cap| {
            let full = cap.get(0)?;
            let raw = full.as_str();
            Some(AttributeToken {
                raw: raw.to_string(),
                span: full.range(),
                attr_type: cap.get(1)?.as_str().trim().to_string(),
                targets: link_targets(raw),
            })
        })
        .collect()
}

/// Targets of every link inside `text`, in order
pub fn link_targets(text: &str) -> Vec<String> {
    NESTED_LINK_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_link() {
        let token = match_link("[[target-a]] trailing").unwrap();
        assert_eq!(token.raw, "[[target-a]]");
        assert_eq!(token.span, 0..12);
        assert_eq!(token.target, "target-a");
        assert_eq!(token.link_type, None);
        assert_eq!(token.label, None);
    }

    #[test]
    fn test_labelled_link() {
        let token = match_link("[[target-a|Label Text]]").unwrap();
        assert_eq!(token.target, "target-a");
        assert_eq!(token.label.as_deref(), Some("Label Text"));
    }

    #[test]
    fn test_typed_link() {
        let token = match_link(":next ::[[chapter-2]]").unwrap();
        assert_eq!(token.link_type.as_deref(), Some("next"));
        assert_eq!(token.target, "chapter-2");
        assert_eq!(token.raw, ":next ::[[chapter-2]]");
    }

    #[test]
    fn test_link_must_start_at_offset_zero() {
        assert!(match_link("see [[target]]").is_none());
        assert_eq!(link_start("see [[target]]"), Some(4));
        assert_eq!(link_start("see :type::[[target]]"), Some(4));
        assert_eq!(link_start("no refs here"), None);
    }

    #[test]
    fn test_unclosed_link_rejected() {
        assert!(match_link("[[target").is_none());
        assert!(match_link("[[]]").is_none());
        assert!(match_link("[[a\nb]]").is_none());
    }

    #[test]
    fn test_embed() {
        let token = match_embed("![[photo.png]] after").unwrap();
        assert_eq!(token.raw, "![[photo.png]]");
        assert_eq!(token.target, "photo.png");
        assert!(match_embed("[[photo.png]]").is_none());
        assert_eq!(embed_start("text ![[doc]]"), Some(5));
    }

    #[test]
    fn test_embed_target_accepts_pipe() {
        let token = match_embed("![[doc|odd]]").unwrap();
        assert_eq!(token.target, "doc|odd");
    }

    #[test]
    fn test_single_line_attribute() {
        let text = "intro\ntype:: [[target-a]]\nbody";
        let attrs = find_attributes(text);

        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].attr_type, "type");
        assert_eq!(attrs[0].targets, vec!["target-a"]);
        assert_eq!(attrs[0].raw, "type:: [[target-a]]\n");
        assert_eq!(&text[attrs[0].span.clone()], attrs[0].raw);
    }

    #[test]
    fn test_multi_valued_attribute() {
        let attrs = find_attributes(":tags::[[a]], [[b|Bee]] [[c]]");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].attr_type, "tags");
        assert_eq!(attrs[0].targets, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_attribute() {
        let text = "authors::\n- [[ada]]\n- [[grace]]\n\nParagraph";
        let attrs = find_attributes(text);

        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].attr_type, "authors");
        assert_eq!(attrs[0].targets, vec!["ada", "grace"]);
        assert_eq!(attrs[0].raw, "authors::\n- [[ada]]\n- [[grace]]\n");
    }

    #[test]
    fn test_attribute_type_with_spaces() {
        let attrs = find_attributes("see also:: [[x]]");
        assert_eq!(attrs[0].attr_type, "see also");
    }

    #[test]
    fn test_untyped_attribute() {
        let attrs = find_attributes(":: [[loose]]");
        assert_eq!(attrs[0].attr_type, "");
        assert_eq!(attrs[0].targets, vec!["loose"]);
    }

    #[test]
    fn test_attribute_requires_own_line() {
        assert!(find_attributes("see [[a]] type:: [[b]]").is_empty());
        assert!(find_attributes("type:: [[a]] and more").is_empty());
        assert!(find_attributes("[[a]]").is_empty());
    }

    #[test]
    fn test_attributes_in_list_still_match_structurally() {
        // context filtering is the validator's job
        let attrs = find_attributes("- type:: [[a]]\n");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].attr_type, "- type");
    }
}
