//! Positional validity of attribute matches
//!
//! An attribute line only counts when it sits in the document's top-level
//! flow. Inside list items, blockquotes and code (indented, fenced or inline)
//! it is left alone so the host renders it as ordinary text.
//!
//! Rules are evaluated in a fixed order. The first four look at the first line
//! of the matched text; the last two look backwards and forwards from the
//! match position in the full document.

use regex::Regex;
use std::sync::LazyLock;

static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *[-*+]\s").expect("bullet regex"));

static NUMBERED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *\d+[.)]\s").expect("numbered list regex"));

static BLOCKQUOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *>\s").expect("blockquote regex"));

static INDENTED_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?: {4,}|\t)").expect("indented code regex"));

const CODE_FENCE: &str = "```";

/// A reason to suppress a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRule {
    /// `- `, `* `, `+ ` list item
    BulletList,
    /// `1. ` or `1) ` list item
    NumberedList,
    /// `> ` blockquote
    Blockquote,
    /// Four or more leading spaces, or a leading tab
    IndentedCode,
    /// Odd number of ``` fences before the match
    FencedCode,
    /// Unbalanced backtick before the match with one still to come
    CodeSpan,
}

impl ContextRule {
    /// Every rule in evaluation order
    pub const ALL: [ContextRule; 6] = [
        ContextRule::BulletList,
        ContextRule::NumberedList,
        ContextRule::Blockquote,
        ContextRule::IndentedCode,
        ContextRule::FencedCode,
        ContextRule::CodeSpan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BulletList => "bullet-list",
            Self::NumberedList => "numbered-list",
            Self::Blockquote => "blockquote",
            Self::IndentedCode => "indented-code",
            Self::FencedCode => "fenced-code",
            Self::CodeSpan => "code-span",
        }
    }

    /// Whether this rule suppresses a match at `position`
    ///
    /// `first_line` is the first line of the matched text; `position` must be
    /// a char boundary in `document`.
    pub fn rejects(&self, document: &str, position: usize, first_line: &str) -> bool {
        match self {
            Self::BulletList => BULLET_REGEX.is_match(first_line),
            Self::NumberedList => NUMBERED_REGEX.is_match(first_line),
            Self::Blockquote => BLOCKQUOTE_REGEX.is_match(first_line),
            Self::IndentedCode => INDENTED_CODE_REGEX.is_match(first_line),
            Self::FencedCode => inside_fenced_code(document, position),
            Self::CodeSpan => inside_code_span(document, position),
        }
    }
}

/// First rule that suppresses the match, if any
///
/// Positions past the end of `document` or inside a UTF-8 sequence have no
/// context and yield `None`.
pub fn rejecting_rule(document: &str, position: usize, matched: &str) -> Option<ContextRule> {
    if position > document.len() || !document.is_char_boundary(position) {
        return None;
    }
    let first_line = matched.split('\n').next().unwrap_or_default();
    ContextRule::ALL
        .into_iter()
        .find(|rule| rule.rejects(document, position, first_line))
}

/// Whether a match of `matched` at `position` is a live reference
pub fn is_renderable_position(document: &str, position: usize, matched: &str) -> bool {
    if position >= document.len() || !document.is_char_boundary(position) {
        return false;
    }
    rejecting_rule(document, position, matched).is_none()
}

fn inside_fenced_code(document: &str, position: usize) -> bool {
    let before = &document[..position];
    before.matches(CODE_FENCE).count() % 2 != 0
}

fn inside_code_span(document: &str, position: usize) -> bool {
    let backticks_before = document[..position].matches('`').count();
    if backticks_before % 2 == 0 {
        return false;
    }
    document[position..].contains('`')
}
