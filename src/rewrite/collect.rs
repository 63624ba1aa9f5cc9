//! Gathering the text nodes a rewrite may touch.

use html5ever::ns;

use crate::dom::{Dom, NodeData, NodeId};

/// Elements whose text is not rendered as page content.
pub const SKIP_TAGS: &[&str] = &[
    "style", "script", "noscript", "iframe", "noframes", "select", "textarea",
];

/// Elements whose children are inert content rather than part of the page.
const INERT_TAGS: &[&str] = &["template"];

/// How the collector treats a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// Text to scan.
    Text,
    /// Left alone along with everything below it.
    Opaque,
    /// Element whose children are walked.
    Recurse,
}

pub fn classify(dom: &Dom, id: NodeId) -> NodeClass {
    match dom.get(id).map(|n| &n.data) {
        Some(NodeData::Text(_)) => NodeClass::Text,
        Some(NodeData::Element { name, .. })
            if name.ns == ns!(html)
                && !SKIP_TAGS
                    .iter()
                    .chain(INERT_TAGS)
                    .any(|&tag| name.local.as_ref().eq_ignore_ascii_case(tag)) =>
        {
            NodeClass::Recurse
        }
        _ => NodeClass::Opaque,
    }
}

/// Text nodes below `root`, last in document order first.
///
/// `root` itself is never included. The tree is not modified.
pub fn collect_text_nodes(dom: &Dom, root: NodeId) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack: Vec<NodeId> = dom.children(root).collect();

    // Popping the last child first yields reverse document order.
    while let Some(id) = stack.pop() {
        match classify(dom, id) {
            NodeClass::Text => found.push(id),
            NodeClass::Recurse => stack.extend(dom.children(id)),
            NodeClass::Opaque => {}
        }
    }

    found
}
