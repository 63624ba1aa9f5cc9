//! Arena-allocated DOM tree.
//!
//! Nodes live in a single vector and refer to each other by [`NodeId`].
//! Ids are never reused or shifted, so a snapshot of ids taken before a
//! mutation stays valid after it: detached nodes simply lose their links.

use html5ever::{LocalName, Namespace, QualName, ns};

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What happens when an image element fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorHandler {
    /// Swap the element for a text node holding its `alt` attribute.
    ReplaceWithAlt,
}

/// Payload of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// Recovery installed on rewritten images.
        on_error: Option<LoadErrorHandler>,
    },
    Text(String),
    Comment(String),
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// Element attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    /// Attribute in the null namespace, which is where HTML puts them.
    pub fn new(local: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, ns!(), LocalName::from(local)),
            value: value.into(),
        }
    }
}

/// A node and its tree links.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }
}

/// Arena DOM with a document root.
#[derive(Debug)]
pub struct Dom {
    nodes: Vec<Node>,
    document: NodeId,
}

impl Dom {
    /// Create an empty DOM holding only the document node.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId(0),
        };
        dom.document = dom.alloc(NodeData::Document);
        dom
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// The document root.
    pub fn document(&self) -> NodeId {
        self.document
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of allocated nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the document node exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(NodeData::Element {
            name,
            attrs,
            on_error: None,
        })
    }

    /// Create an element in the HTML namespace.
    pub fn create_html_element(&mut self, local: &str, attrs: Vec<Attribute>) -> NodeId {
        self.create_element(QualName::new(None, ns!(html), LocalName::from(local)), attrs)
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Comment(text.into()))
    }

    pub fn create_doctype(&mut self, name: String, public_id: String, system_id: String) -> NodeId {
        self.alloc(NodeData::Doctype {
            name,
            public_id,
            system_id,
        })
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// The child must already be detached.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last = self.get(parent).and_then(|n| n.last_child);

        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
            node.prev_sibling = last;
            node.next_sibling = None;
        }

        match last {
            Some(last) => {
                if let Some(node) = self.get_mut(last) {
                    node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = Some(child);
                }
            }
        }

        if let Some(node) = self.get_mut(parent) {
            node.last_child = Some(child);
        }
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let Some((parent, prev)) = self.get(sibling).map(|n| (n.parent, n.prev_sibling)) else {
            return;
        };

        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = Some(sibling);
        }

        if let Some(node) = self.get_mut(sibling) {
            node.prev_sibling = Some(new_node);
        }

        match prev {
            Some(prev) => {
                if let Some(node) = self.get_mut(prev) {
                    node.next_sibling = Some(new_node);
                }
            }
            None => {
                if let Some(node) = parent.and_then(|p| self.get_mut(p)) {
                    node.first_child = Some(new_node);
                }
            }
        }
    }

    /// Append text to `parent`, merging into its last child when that is text.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last = self.get(parent).and_then(|n| n.last_child);
        if let Some(node) = last.and_then(|id| self.get_mut(id))
            && let NodeData::Text(existing) = &mut node.data
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text);
        self.append(parent, node);
    }

    /// Unlink a node from its parent and siblings. Its own children stay.
    pub fn detach(&mut self, id: NodeId) {
        let Some((parent, prev, next)) = self
            .get(id)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };

        match prev {
            Some(prev) => {
                if let Some(node) = self.get_mut(prev) {
                    node.next_sibling = next;
                }
            }
            None => {
                if let Some(node) = parent.and_then(|p| self.get_mut(p)) {
                    node.first_child = next;
                }
            }
        }

        match next {
            Some(next) => {
                if let Some(node) = self.get_mut(next) {
                    node.prev_sibling = prev;
                }
            }
            None => {
                if let Some(node) = parent.and_then(|p| self.get_mut(p)) {
                    node.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    /// Put `replacements`, in order, where `old` was and detach `old`.
    ///
    /// Does nothing when `old` has no parent.
    pub fn replace_with(&mut self, old: NodeId, replacements: &[NodeId]) {
        if self.parent(old).is_none() {
            return;
        }
        for &node in replacements {
            self.insert_before(old, node);
        }
        self.detach(old);
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Iterate over the children of a node, first to last.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            dom: self,
            next: self.get(parent).and_then(|n| n.first_child),
        }
    }

    /// First node in document order matching `predicate`.
    pub fn find<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            if predicate(node) {
                return Some(id);
            }
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        None
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(|node| match &node.data {
            NodeData::Element { name, .. } => name.local.as_ref() == tag,
            _ => false,
        })
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children.
pub struct Children<'a> {
    dom: &'a Dom,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.dom.get(id).and_then(|n| n.next_sibling);
        Some(id)
    }
}

/// Accessors for element and text payloads.
impl Dom {
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    pub fn element_namespace(&self, id: NodeId) -> Option<&Namespace> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.ns),
            _ => None,
        })
    }

    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| matches!(n.data, NodeData::Text(_)))
    }

    /// Contents of a text node.
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn on_error(&self, id: NodeId) -> Option<LoadErrorHandler> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { on_error, .. } => *on_error,
            _ => None,
        })
    }

    /// Install a load error handler on an element. Ignored for other nodes.
    pub fn set_on_error(&mut self, id: NodeId, handler: LoadErrorHandler) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Element { on_error, .. } = &mut node.data
        {
            *on_error = Some(handler);
        }
    }

    /// Report that the resource behind `id` failed to load.
    ///
    /// Runs the element's handler, if any. With
    /// [`LoadErrorHandler::ReplaceWithAlt`] the element is swapped for a text
    /// node carrying its `alt` text verbatim and the new node is returned.
    /// Nodes without a handler, or already detached, are left alone.
    pub fn dispatch_load_error(&mut self, id: NodeId) -> Option<NodeId> {
        match self.on_error(id)? {
            LoadErrorHandler::ReplaceWithAlt => {
                self.parent(id)?;
                let alt = self.get_attr(id, "alt").unwrap_or_default().to_string();
                log::debug!("image {} failed to load, restoring alt text {alt:?}", id.index());
                let text = self.create_text(alt);
                self.replace_with(id, &[text]);
                Some(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(dom: &Dom, parent: NodeId) -> Vec<String> {
        dom.children(parent)
            .map(|c| dom.text_content(c).unwrap_or("<elem>").to_string())
            .collect()
    }

    #[test]
    fn test_append_children() {
        let mut dom = Dom::new();
        let div = dom.create_html_element("div", vec![]);
        let a = dom.create_text("a");
        let b = dom.create_text("b");

        dom.append(dom.document(), div);
        dom.append(div, a);
        dom.append(div, b);

        assert_eq!(dom.children(div).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(dom.parent(b), Some(div));
        assert_eq!(dom.element_name(div).unwrap().as_ref(), "div");
        assert!(dom.is_element(div));
        assert!(!dom.is_element(a));
        assert!(!dom.is_element(dom.document()));
    }

    #[test]
    fn test_text_merging() {
        let mut dom = Dom::new();
        let p = dom.create_html_element("p", vec![]);
        dom.append(dom.document(), p);

        dom.append_text(p, "Hello, ");
        dom.append_text(p, "World!");

        assert_eq!(texts(&dom, p), vec!["Hello, World!"]);
    }

    #[test]
    fn test_replace_with_keeps_siblings() {
        let mut dom = Dom::new();
        let p = dom.create_html_element("p", vec![]);
        let first = dom.create_text("first");
        let middle = dom.create_text("middle");
        let last = dom.create_text("last");
        dom.append(p, first);
        dom.append(p, middle);
        dom.append(p, last);

        let x = dom.create_text("x");
        let y = dom.create_text("y");
        dom.replace_with(middle, &[x, y]);

        assert_eq!(dom.children(p).collect::<Vec<_>>(), vec![first, x, y, last]);
        assert_eq!(dom.parent(middle), None);
        assert_eq!(dom.text_content(middle), Some("middle"));
    }

    #[test]
    fn test_replace_first_and_last_child() {
        let mut dom = Dom::new();
        let p = dom.create_html_element("p", vec![]);
        let only = dom.create_text("only");
        dom.append(p, only);

        let a = dom.create_text("a");
        let b = dom.create_text("b");
        dom.replace_with(only, &[a, b]);

        let node = dom.get(p).unwrap();
        assert_eq!(node.first_child, Some(a));
        assert_eq!(node.last_child, Some(b));
    }

    #[test]
    fn test_replace_detached_is_noop() {
        let mut dom = Dom::new();
        let orphan = dom.create_text("orphan");
        let other = dom.create_text("other");

        dom.replace_with(orphan, &[other]);

        assert_eq!(dom.parent(other), None);
    }

    #[test]
    fn test_dispatch_load_error_restores_alt() {
        let mut dom = Dom::new();
        let p = dom.create_html_element("p", vec![]);
        let img = dom.create_html_element("img", vec![Attribute::new("alt", "\u{2764}\u{FE0F}")]);
        dom.append(p, img);
        dom.set_on_error(img, LoadErrorHandler::ReplaceWithAlt);

        let text = dom.dispatch_load_error(img).expect("handler should run");

        assert_eq!(dom.children(p).collect::<Vec<_>>(), vec![text]);
        assert_eq!(dom.text_content(text), Some("\u{2764}\u{FE0F}"));
        assert_eq!(dom.dispatch_load_error(img), None);
    }

    #[test]
    fn test_dispatch_load_error_without_handler() {
        let mut dom = Dom::new();
        let p = dom.create_html_element("p", vec![]);
        let img = dom.create_html_element("img", vec![Attribute::new("alt", "x")]);
        dom.append(p, img);

        assert_eq!(dom.dispatch_load_error(img), None);
        assert_eq!(dom.children(p).collect::<Vec<_>>(), vec![img]);
    }
}
