//! Embedded list construction.
//!
//! List item markers come flat among paragraph content. Each unbroken run of
//! markers of the same kind is wrapped in a list node, and each marker
//! becomes an `EMBEDDED_LIST_ITEM`.

use log::{debug, trace};

use quire_core::{Node, NodeKind, fold::Fold};

/// Group list item markers under `root` into lists.
pub fn build_lists(root: &Node) -> Node {
    debug!("Building embedded lists");
    let mut builder = ListBuilder::default();
    let result = builder.fold_node(root);
    trace!(lists = builder.lists; "Embedded lists built");
    result
}

/// The list wrapper kind for a marker kind.
fn wrapper_for(kind: NodeKind) -> Option<NodeKind> {
    match kind {
        NodeKind::EmbeddedListItemWithHyphen => Some(NodeKind::EmbeddedListWithHyphen),
        NodeKind::EmbeddedListItemNumbered => Some(NodeKind::EmbeddedListWithNumberSign),
        _ => None,
    }
}

struct Run {
    wrapper: NodeKind,
    items: Vec<Node>,
}

#[derive(Default)]
struct ListBuilder {
    lists: usize,
}

impl ListBuilder {
    fn item(&mut self, marker: &Node) -> Node {
        let children = self.fold_children(marker, marker.children());
        marker
            .adopt(children)
            .with_kind(NodeKind::EmbeddedListItem)
    }

    fn flush(&mut self, run: &mut Option<Run>, out: &mut Vec<Node>) {
        if let Some(Run { wrapper, items }) = run.take() {
            let location = items.first().and_then(|item| item.location().cloned());
            out.push(
                Node::new(wrapper)
                    .with_location_opt(location)
                    .with_children(items),
            );
            self.lists += 1;
        }
    }
}

impl Fold for ListBuilder {
    fn fold_children(&mut self, _parent: &Node, children: &[Node]) -> Vec<Node> {
        let mut out = Vec::with_capacity(children.len());
        let mut run: Option<Run> = None;
        // Separators seen since the last marker; dropped if the run goes on.
        let mut pending = Vec::new();

        for child in children {
            if let Some(wrapper) = wrapper_for(child.kind()) {
                let item = self.item(child);
                match run.as_mut() {
                    Some(current) if current.wrapper == wrapper => {
                        pending.clear();
                        current.items.push(item);
                    }
                    _ => {
                        self.flush(&mut run, &mut out);
                        out.append(&mut pending);
                        run = Some(Run {
                            wrapper,
                            items: vec![item],
                        });
                    }
                }
            } else if run.is_some()
                && matches!(child.kind(), NodeKind::Whitespace | NodeKind::LineBreak)
            {
                pending.push(child.clone());
            } else {
                self.flush(&mut run, &mut out);
                out.append(&mut pending);
                out.push(self.fold_node(child));
            }
        }

        self.flush(&mut run, &mut out);
        out.append(&mut pending);
        out
    }
}
