//! Emoji replacement for strings and DOM trees.
//!
//! Both rewriters share one scan: the text is split into [`Token`]s, and
//! every emoji token gets a rendering decision from the source generator.
//! The string rewriter renders markup straight away. The node rewriter stages
//! a [`Fragment`] and only touches the tree when the fragment has an image.

mod collect;
mod node;
mod string;

pub use collect::{NodeClass, SKIP_TAGS, classify, collect_text_nodes};
pub use node::rewrite_node;
pub use string::rewrite_str;

use std::borrow::Cow;

use log::trace;

use crate::codepoint::{VARIATION_SELECTOR, to_code_point};
use crate::generator::SourceGenerator;
use crate::matcher::{EmojiMatch, EmojiMatcher};

/// Class set on every generated image.
pub const EMOJI_CLASS: &str = "emoji";

/// A run of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    Text(&'t str),
    Emoji(EmojiMatch<'t>),
}

/// Split `text` into plain runs and emoji matches.
///
/// The tokens cover `text` exactly. Matches that overlap an earlier one, or
/// that do not describe a slice of `text`, are left inside the plain runs.
pub fn tokenize<'t, M>(text: &'t str, matcher: &M) -> Vec<Token<'t>>
where
    M: EmojiMatcher + ?Sized,
{
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for m in matcher.find_matches(text) {
        let valid = m.index >= cursor
            && !m.raw.is_empty()
            && m.index
                .checked_add(m.raw.len())
                .and_then(|end| text.get(m.index..end))
                == Some(m.raw);
        if !valid {
            trace!("skipping malformed match {:?} at {}", m.raw, m.index);
            continue;
        }

        if m.index > cursor {
            tokens.push(Token::Text(&text[cursor..m.index]));
        }
        tokens.push(Token::Emoji(m));
        cursor = m.end();
    }

    if cursor < text.len() {
        tokens.push(Token::Text(&text[cursor..]));
    }
    tokens
}

/// Image source for a matched emoji, or `None` to keep it as text.
pub fn image_source<G>(raw: &str, generator: &G) -> Option<String>
where
    G: SourceGenerator + ?Sized,
{
    let icon = to_code_point(raw);
    let src = generator.generate(&icon).filter(|src| !src.is_empty());
    trace!("emoji {raw:?} -> {icon:?} -> {src:?}");
    if icon.is_empty() { None } else { src }
}

/// Drop `U+FE0F` from text that is not part of an emoji.
pub fn strip_variation_selectors(text: &str) -> Cow<'_, str> {
    if text.contains(VARIATION_SELECTOR) {
        Cow::Owned(text.replace(VARIATION_SELECTOR, ""))
    } else {
        Cow::Borrowed(text)
    }
}

/// One piece of a rewritten text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    Image { alt: String, src: String },
}

/// Staged replacement for a single text node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pieces: Vec<Piece>,
}

impl Fragment {
    /// Scan `text` and decide how every piece renders.
    ///
    /// Plain runs lose their variation selectors. Declined emoji keep their
    /// raw text untouched.
    pub fn build<M, G>(text: &str, matcher: &M, generator: &G) -> Self
    where
        M: EmojiMatcher + ?Sized,
        G: SourceGenerator + ?Sized,
    {
        let pieces = tokenize(text, matcher)
            .into_iter()
            .map(|token| match token {
                Token::Text(run) => Piece::Text(strip_variation_selectors(run).into_owned()),
                Token::Emoji(m) => match image_source(m.raw, generator) {
                    Some(src) => Piece::Image {
                        alt: m.raw.to_string(),
                        src,
                    },
                    None => Piece::Text(m.raw.to_string()),
                },
            })
            .collect();

        Self { pieces }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn into_pieces(self) -> Vec<Piece> {
        self.pieces
    }

    /// Whether any emoji rendered as an image.
    pub fn has_images(&self) -> bool {
        self.pieces.iter().any(|p| matches!(p, Piece::Image { .. }))
    }

    /// The fragment's text, with each image standing in as its alt text.
    pub fn alt_text(&self) -> String {
        self.pieces
            .iter()
            .map(|p| match p {
                Piece::Text(text) => text.as_str(),
                Piece::Image { alt, .. } => alt.as_str(),
            })
            .collect()
    }
}
