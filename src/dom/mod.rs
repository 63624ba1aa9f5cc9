//! Arena DOM with html5ever parsing and serialization.
//!
//! # Example
//!
//! ```
//! use imagemoji::dom::Dom;
//!
//! let (dom, body) = Dom::parse_fragment("<p>Hello</p>");
//! assert_eq!(dom.inner_html(body), "<p>Hello</p>");
//! ```

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, Children, Dom, LoadErrorHandler, Node, NodeData, NodeId};
pub use serialize::SerializableNode;
pub use tree_sink::ArenaSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;

impl Dom {
    /// Parse a complete HTML document.
    pub fn parse_document(html: &str) -> Dom {
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                drop_doctype: false,
                ..Default::default()
            },
            ..Default::default()
        };

        parse_document(ArenaSink::new(), opts)
            .from_utf8()
            .one(html.as_bytes())
            .into_dom()
    }

    /// Parse a body fragment. Returns the DOM and its `body` element.
    pub fn parse_fragment(html: &str) -> (Dom, NodeId) {
        let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
        let dom = Self::parse_document(&wrapped);
        // html5ever always synthesizes a body.
        let body = dom.find_by_tag("body").unwrap_or(dom.document());
        (dom, body)
    }

    /// Serialize `id` and its descendants.
    pub fn outer_html(&self, id: NodeId) -> String {
        self.serialize_scope(id, TraversalScope::IncludeNode)
    }

    /// Serialize the descendants of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        self.serialize_scope(id, TraversalScope::ChildrenOnly(None))
    }

    fn serialize_scope(&self, id: NodeId, traversal_scope: TraversalScope) -> String {
        let node = SerializableNode { dom: self, id };
        let opts = SerializeOpts {
            traversal_scope,
            ..Default::default()
        };

        let mut bytes = Vec::new();
        // Writing into a Vec cannot fail.
        if let Err(err) = serialize(&mut bytes, &node, opts) {
            log::warn!("html serialization failed: {err}");
        }
        String::from_utf8(bytes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_round_trip() {
        let html = r#"<p>Hi <b class="x">there</b> &amp; bye</p>"#;
        let (dom, body) = Dom::parse_fragment(html);

        assert_eq!(dom.inner_html(body), html);
    }

    #[test]
    fn test_outer_html_includes_node() {
        let (dom, _) = Dom::parse_fragment("<ul><li>one</li></ul>");
        let li = dom.find_by_tag("li").unwrap();

        assert_eq!(dom.outer_html(li), "<li>one</li>");
    }

    #[test]
    fn test_document_serialization() {
        let dom = Dom::parse_document("<!DOCTYPE html><title>t</title><p>x</p>");

        assert_eq!(
            dom.outer_html(dom.document()),
            "<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></body></html>"
        );
    }

    #[test]
    fn test_void_element() {
        let (mut dom, body) = Dom::parse_fragment("");
        let img = dom.create_html_element("img", vec![Attribute::new("alt", "a")]);
        dom.append(body, img);

        assert_eq!(dom.inner_html(body), r#"<img alt="a">"#);
    }
}
