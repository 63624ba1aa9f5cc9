//! Node mode: emoji become `img` elements spliced into the tree.

use log::debug;

use super::{EMOJI_CLASS, Fragment, Piece, collect_text_nodes};
use crate::dom::{Attribute, Dom, LoadErrorHandler, NodeId};
use crate::generator::SourceGenerator;
use crate::matcher::EmojiMatcher;

/// Replace renderable emoji in every eligible text node under `root`.
///
/// A text node is swapped for its rewritten pieces only when at least one
/// emoji rendered as an image; otherwise it stays exactly as it was. Nodes
/// outside the swapped text nodes are never touched. Returns `root`.
pub fn rewrite_node<M, G>(dom: &mut Dom, root: NodeId, matcher: &M, generator: &G) -> NodeId
where
    M: EmojiMatcher + ?Sized,
    G: SourceGenerator + ?Sized,
{
    let text_nodes = collect_text_nodes(dom, root);
    let mut replaced = 0usize;

    // The collector returns reverse document order, so walk it backwards.
    for &id in text_nodes.iter().rev() {
        let Some(text) = dom.text_content(id) else {
            continue;
        };
        let fragment = Fragment::build(text, matcher, generator);
        if !fragment.has_images() {
            continue;
        }

        let nodes: Vec<NodeId> = fragment
            .into_pieces()
            .into_iter()
            .map(|piece| materialize(dom, piece))
            .collect();
        dom.replace_with(id, &nodes);
        replaced += 1;
    }

    debug!(
        "node rewrite: {replaced} of {} text nodes replaced",
        text_nodes.len()
    );
    root
}

fn materialize(dom: &mut Dom, piece: Piece) -> NodeId {
    match piece {
        Piece::Text(text) => dom.create_text(text),
        Piece::Image { alt, src } => {
            let img = dom.create_html_element(
                "img",
                vec![
                    Attribute::new("class", EMOJI_CLASS),
                    Attribute::new("draggable", "false"),
                    Attribute::new("alt", alt),
                    Attribute::new("src", src),
                ],
            );
            dom.set_on_error(img, LoadErrorHandler::ReplaceWithAlt);
            img
        }
    }
}
