//! html5ever `TreeSink` that builds a [`Dom`].

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use super::arena::{Attribute, Dom, NodeData, NodeId};

/// Sink handle. html5ever copies these freely, so it wraps the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkHandle(pub NodeId);

/// Builds a [`Dom`] while html5ever parses.
///
/// The trait hands out `&self`, so the arena sits behind a `RefCell`.
pub struct ArenaSink {
    dom: RefCell<Dom>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for ArenaSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(Dom::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    pub fn into_dom(self) -> Dom {
        self.dom.into_inner()
    }

    fn insert(&self, parent: NodeId, child: NodeOrText<SinkHandle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => dom.append(parent, node.0),
            NodeOrText::AppendText(text) => dom.append_text(parent, &text),
        }
    }
}

fn convert_attrs(attrs: Vec<Html5Attribute>) -> Vec<Attribute> {
    attrs
        .into_iter()
        .map(|a| Attribute {
            name: a.name,
            value: a.value.to_string(),
        })
        .collect()
}

impl TreeSink for ArenaSink {
    type Handle = SinkHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        // Browsers recover from everything, and so do we.
        log::trace!("html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        SinkHandle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let dom = self.dom.borrow();
        match dom.get(target.0).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => {
                // SAFETY: element names are never mutated or dropped while the
                // sink is alive, and html5ever only holds the reference
                // between calls that do not touch this node.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
            }
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        SinkHandle(
            self.dom
                .borrow_mut()
                .create_element(name, convert_attrs(attrs)),
        )
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        SinkHandle(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        SinkHandle(self.dom.borrow_mut().create_comment(data.to_string()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.insert(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self.dom.borrow().parent(element.0);
        match parent {
            Some(parent) => self.insert(parent, child),
            None => self.insert(prev_element.0, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let doc = dom.document();
        let doctype = dom.create_doctype(
            name.to_string(),
            public_id.to_string(),
            system_id.to_string(),
        );
        dom.append(doc, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents are parsed straight into the template element.
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node.0,
            NodeOrText::AppendText(text) => dom.create_text(text.to_string()),
        };
        dom.insert_before(sibling.0, node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut dom = self.dom.borrow_mut();
        if let Some(node) = dom.get_mut(target.0)
            && let NodeData::Element {
                attrs: existing, ..
            } = &mut node.data
        {
            for attr in convert_attrs(attrs) {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(attr);
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut dom = self.dom.borrow_mut();
        let children: Vec<_> = dom.children(node.0).collect();
        for child in children {
            dom.detach(child);
            dom.append(new_parent.0, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use html5ever::driver::ParseOpts;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;

    use super::*;

    fn parse_html(html: &str) -> Dom {
        parse_document(ArenaSink::new(), ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
            .into_dom()
    }

    #[test]
    fn test_basic_parse() {
        let dom = parse_html("<html><body><p>Hello</p></body></html>");

        let p = dom.find_by_tag("p").expect("should find p");
        let text = dom.children(p).next().expect("p should have a child");
        assert_eq!(dom.text_content(text), Some("Hello"));
    }

    #[test]
    fn test_attributes() {
        let dom = parse_html(r#"<img class="emoji" alt="x" src="a.svg">"#);

        let img = dom.find_by_tag("img").expect("should find img");
        assert_eq!(dom.get_attr(img, "class"), Some("emoji"));
        assert_eq!(dom.get_attr(img, "src"), Some("a.svg"));
        assert_eq!(dom.on_error(img), None);
    }

    #[test]
    fn test_svg_namespace() {
        let dom = parse_html("<p><svg><text>hi</text></svg></p>");

        let svg = dom.find_by_tag("svg").expect("should find svg");
        assert_eq!(dom.element_namespace(svg), Some(&html5ever::ns!(svg)));
    }

    #[test]
    fn test_misnested_markup_is_recovered() {
        let dom = parse_html("<p><b>bold<i>both</b>italic</i></p>");

        assert!(dom.find_by_tag("b").is_some());
        assert!(dom.find_by_tag("i").is_some());
    }
}
