//! # imagemoji
//!
//! Replace emoji in text or HTML with images, so they look the same on every
//! platform.
//!
//! ## Features
//!
//! - String mode: emoji become `<img>` tags in a new string
//! - Node mode: emoji inside a DOM tree become `img` elements, and nothing
//!   else in the tree is touched
//! - Pluggable image sources ([`SourceGenerator`]) and detection
//!   ([`EmojiMatcher`])
//!
//! ## Quick Start
//!
//! ```
//! use imagemoji::parse_str;
//!
//! let html = parse_str("I \u{2764}\u{FE0F} emoji!", None);
//! assert_eq!(
//!     html,
//!     "I <img class=\"emoji\" draggable=\"false\" alt=\"\u{2764}\u{FE0F}\" \
//!      src=\"https://twemoji.maxcdn.com/v/latest/svg/2764.svg\"/> emoji!"
//! );
//! ```
//!
//! ## Custom image sources
//!
//! Any `Fn(&str) -> String` works. Returning an empty string keeps that emoji
//! as text.
//!
//! ```
//! use imagemoji::parse_str;
//!
//! let local = |icon: &str| format!("/assets/emoji/{icon}.png");
//! let html = parse_str("\u{1F4A9}", Some(&local));
//! assert!(html.contains(r#"src="/assets/emoji/1f4a9.png""#));
//! ```
//!
//! ## Working with a DOM
//!
//! ```
//! use imagemoji::dom::Dom;
//! use imagemoji::parse_node;
//!
//! let (mut dom, body) = Dom::parse_fragment("<p>Hi <b>there</b> \u{1F44D}</p>");
//! let b = dom.find_by_tag("b").unwrap();
//!
//! parse_node(&mut dom, body, None);
//!
//! // Untouched siblings keep their identity.
//! assert_eq!(dom.find_by_tag("b"), Some(b));
//! assert!(dom.find_by_tag("img").is_some());
//! ```

pub mod codepoint;
pub mod dom;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod rewrite;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use codepoint::{from_code_point, to_code_point};
pub use error::{Error, Result};
pub use generator::{CdnGenerator, DEFAULT_GENERATOR, SourceGenerator};
pub use matcher::{DefaultMatcher, EmojiMatch, EmojiMatcher};

use regex::Regex;

use dom::{Dom, NodeId};

/// What to emojify.
pub enum Input<'a> {
    /// A string, rewritten into a new string.
    Text(&'a str),
    /// A subtree of a DOM, rewritten in place.
    Node { dom: &'a mut Dom, node: NodeId },
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<(&'a mut Dom, NodeId)> for Input<'a> {
    fn from((dom, node): (&'a mut Dom, NodeId)) -> Self {
        Input::Node { dom, node }
    }
}

/// Result of [`parse`], matching the kind of [`Input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Text(String),
    /// The node that was passed in, now rewritten.
    Node(NodeId),
}

impl Parsed {
    pub fn into_text(self) -> Option<String> {
        match self {
            Parsed::Text(text) => Some(text),
            Parsed::Node(_) => None,
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        match self {
            Parsed::Node(id) => Some(*id),
            Parsed::Text(_) => None,
        }
    }
}

/// Emoji rewriting with a chosen matcher.
///
/// Every `how` argument is optional; `None` means [`DEFAULT_GENERATOR`].
#[derive(Debug, Clone, Default)]
pub struct Emojifier<M = DefaultMatcher> {
    matcher: M,
}

impl Emojifier {
    /// Use the built-in emoji list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect emoji with a regular expression instead.
    pub fn with_pattern(pattern: &str) -> Result<Emojifier<Regex>> {
        Ok(Emojifier::with_matcher(Regex::new(pattern)?))
    }
}

impl<M: EmojiMatcher> Emojifier<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Rewrite a string or a DOM subtree, depending on `what`.
    pub fn parse<'a>(&self, what: impl Into<Input<'a>>, how: Option<&dyn SourceGenerator>) -> Parsed {
        match what.into() {
            Input::Text(text) => Parsed::Text(self.parse_str(text, how)),
            Input::Node { dom, node } => Parsed::Node(self.parse_node(dom, node, how)),
        }
    }

    /// String mode. Returns a new string with `<img>` tags.
    pub fn parse_str(&self, text: &str, how: Option<&dyn SourceGenerator>) -> String {
        match how {
            Some(generator) => rewrite::rewrite_str(text, &self.matcher, generator),
            None => rewrite::rewrite_str(text, &self.matcher, &DEFAULT_GENERATOR),
        }
    }

    /// Node mode. Rewrites the subtree under `node` in place and returns it.
    pub fn parse_node(&self, dom: &mut Dom, node: NodeId, how: Option<&dyn SourceGenerator>) -> NodeId {
        match how {
            Some(generator) => rewrite::rewrite_node(dom, node, &self.matcher, generator),
            None => rewrite::rewrite_node(dom, node, &self.matcher, &DEFAULT_GENERATOR),
        }
    }

    /// Parse an HTML fragment, rewrite it in node mode and serialize it.
    pub fn parse_html(&self, html: &str, how: Option<&dyn SourceGenerator>) -> String {
        let (mut dom, body) = Dom::parse_fragment(html);
        self.parse_node(&mut dom, body, how);
        dom.inner_html(body)
    }

    /// Like [`Emojifier::parse_html`], for a whole document.
    pub fn parse_html_document(&self, html: &str, how: Option<&dyn SourceGenerator>) -> String {
        let mut dom = Dom::parse_document(html);
        let document = dom.document();
        self.parse_node(&mut dom, document, how);
        dom.outer_html(document)
    }
}

/// Rewrite a string or DOM subtree with the default matcher.
///
/// ```
/// use imagemoji::{Parsed, parse};
///
/// let decline = |_: &str| String::new();
/// let parsed = parse("I \u{2764}\u{FE0F} emoji!", Some(&decline));
/// assert_eq!(parsed, Parsed::Text("I \u{2764}\u{FE0F} emoji!".to_string()));
/// ```
pub fn parse<'a>(what: impl Into<Input<'a>>, how: Option<&dyn SourceGenerator>) -> Parsed {
    Emojifier::new().parse(what, how)
}

/// String mode with the default matcher.
pub fn parse_str(text: &str, how: Option<&dyn SourceGenerator>) -> String {
    Emojifier::new().parse_str(text, how)
}

/// Node mode with the default matcher.
pub fn parse_node(dom: &mut Dom, node: NodeId, how: Option<&dyn SourceGenerator>) -> NodeId {
    Emojifier::new().parse_node(dom, node, how)
}
