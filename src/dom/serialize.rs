//! html5ever serialization for the arena.

use std::collections::VecDeque;
use std::io;

use html5ever::QualName;
use html5ever::serialize::{Serialize, Serializer, TraversalScope};

use super::arena::{Dom, NodeData, NodeId};

/// A node of a [`Dom`] in a form html5ever can serialize.
pub struct SerializableNode<'a> {
    pub dom: &'a Dom,
    pub id: NodeId,
}

enum Op {
    Open(NodeId),
    Close(QualName),
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let dom = self.dom;
        let mut ops = VecDeque::new();

        let is_document = matches!(dom.get(self.id).map(|n| &n.data), Some(NodeData::Document));
        match traversal_scope {
            TraversalScope::IncludeNode if !is_document => ops.push_back(Op::Open(self.id)),
            _ => ops.extend(dom.children(self.id).map(Op::Open)),
        }

        while let Some(op) = ops.pop_front() {
            let id = match op {
                Op::Open(id) => id,
                Op::Close(name) => {
                    serializer.end_elem(name)?;
                    continue;
                }
            };
            let Some(node) = dom.get(id) else { continue };

            match &node.data {
                NodeData::Element { name, attrs, .. } => {
                    serializer.start_elem(
                        name.clone(),
                        attrs.iter().map(|a| (&a.name, a.value.as_str())),
                    )?;
                    ops.push_front(Op::Close(name.clone()));
                    let children: Vec<_> = dom.children(id).collect();
                    for child in children.into_iter().rev() {
                        ops.push_front(Op::Open(child));
                    }
                }
                NodeData::Text(text) => serializer.write_text(text)?,
                NodeData::Comment(text) => serializer.write_comment(text)?,
                NodeData::Doctype { name, .. } => serializer.write_doctype(name)?,
                NodeData::Document => ops.extend(dom.children(id).map(Op::Open)),
            }
        }

        Ok(())
    }
}
