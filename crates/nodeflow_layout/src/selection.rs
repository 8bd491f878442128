// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout restricted to a selection of nodes.

use crate::layering::{layout, LayoutResult};
use crate::options::LayoutOptions;
use nodeflow_graph::{Bounds, Edge, Node, NodeId};
use std::collections::HashSet;

/// Lay out only the nodes in `selected_ids`, keeping the cluster where it was.
///
/// Only edges with both ends selected take part. The rearranged cluster is
/// translated so its bounding box keeps its original top-left corner. The
/// returned list covers every input node in input order; unselected nodes are
/// copied unchanged. An empty `selected_ids` lays out the whole graph. Ids
/// that match no node are ignored, and if none match the nodes come back
/// unchanged.
pub fn layout_selection(
    nodes: &[Node],
    selected_ids: &[NodeId],
    edges: &[Edge],
    options: &LayoutOptions,
) -> LayoutResult {
    if selected_ids.is_empty() {
        return layout(nodes, edges, options);
    }

    let selected: HashSet<&NodeId> = selected_ids.iter().collect();
    let subset: Vec<Node> = nodes
        .iter()
        .filter(|n| selected.contains(&n.id))
        .cloned()
        .collect();
    if subset.is_empty() {
        tracing::debug!("selection matches no nodes; nothing to lay out");
        return LayoutResult::from_nodes(nodes.to_vec());
    }

    let inner_edges: Vec<Edge> = edges
        .iter()
        .filter(|e| selected.contains(&e.source) && selected.contains(&e.target))
        .cloned()
        .collect();

    let anchor = Bounds::from_nodes(&subset).origin();
    let sub_layout = layout(&subset, &inner_edges, options);
    let dx = anchor.x - sub_layout.bounds.min_x;
    let dy = anchor.y - sub_layout.bounds.min_y;

    let mut placed = sub_layout.nodes.into_iter();
    let merged: Vec<Node> = nodes
        .iter()
        .map(|node| {
            if !selected.contains(&node.id) {
                return node.clone();
            }
            // `placed` yields the selected nodes in the same order as `nodes`
            match placed.next() {
                Some(mut moved) => {
                    moved.position = moved.position.translated(dx, dy);
                    moved
                }
                None => node.clone(),
            }
        })
        .collect();

    tracing::debug!(
        selected = subset.len(),
        edges = inner_edges.len(),
        "selection layout finished"
    );
    LayoutResult::from_nodes(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scattered() -> Vec<Node> {
        vec![
            Node::new("a").with_size(100.0, 40.0).with_position(500.0, 300.0),
            Node::new("b").with_size(100.0, 40.0).with_position(900.0, 700.0),
            Node::new("c").with_size(100.0, 40.0).with_position(-50.0, -50.0),
        ]
    }

    #[test]
    fn test_selection_keeps_anchor_and_others() {
        let nodes = scattered();
        let edges = vec![
            Edge::new("a", "o", "b", "i"),
            Edge::new("c", "o", "a", "i"),
        ];
        let selected = [NodeId::from("a"), NodeId::from("b")];
        let result = layout_selection(&nodes, &selected, &edges, &LayoutOptions::default());

        assert_eq!(result.nodes.len(), 3);
        assert_eq!(result.nodes[2], nodes[2]);

        let a = result.nodes[0].position;
        let b = result.nodes[1].position;
        // Cluster starts where the selection started
        assert_eq!(a.x.min(b.x), 500.0);
        assert_eq!(a.y.min(b.y), 300.0);
        // a -> b is kept, c -> a crosses the boundary and is ignored
        assert_eq!(a, nodeflow_graph::Position::new(500.0, 300.0));
        assert_eq!(b, nodeflow_graph::Position::new(500.0, 420.0));
    }

    #[test]
    fn test_empty_selection_is_full_layout() {
        let nodes = scattered();
        let edges = vec![Edge::new("a", "o", "b", "i")];
        let options = LayoutOptions::default();
        assert_eq!(
            layout_selection(&nodes, &[], &edges, &options),
            layout(&nodes, &edges, &options)
        );
    }

    #[test]
    fn test_unknown_selection_changes_nothing() {
        let nodes = scattered();
        let ghost = [NodeId::from("ghost")];
        let result = layout_selection(&nodes, &ghost, &[], &LayoutOptions::default());
        assert_eq!(result.nodes, nodes);
        assert_eq!(result.bounds, Bounds::from_nodes(&nodes));
    }
}
