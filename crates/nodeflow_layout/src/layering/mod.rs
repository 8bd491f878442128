// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layered (Sugiyama-style) layout.
//!
//! The pipeline runs in four steps over an index-based copy of the input:
//! 1. `acyclic`: drop back edges so ranking sees a DAG
//! 2. `rank`: longest-path ranking, sources in rank 0
//! 3. `order`: barycenter sweeps to reduce crossings within ranks
//! 4. `position`: centre coordinates, converted to top-left and snapped

mod acyclic;
mod order;
mod position;
mod rank;

use crate::collision::{has_collisions, resolve_collisions};
use crate::options::{CollisionOptions, LayoutOptions};
use indexmap::IndexMap;
use nodeflow_graph::{Bounds, Edge, Node, NodeId, Size, DEFAULT_NODE_SIZE};
use serde::{Deserialize, Serialize};

/// Laid-out nodes plus the box enclosing them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Input nodes, same order and ids, with new positions
    pub nodes: Vec<Node>,
    /// Bounding box of `nodes`
    pub bounds: Bounds,
}

impl LayoutResult {
    /// Wrap a node list, deriving its bounds
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let bounds = Bounds::from_nodes(&nodes);
        Self { nodes, bounds }
    }
}

/// Index-based graph the pipeline works on. Node `i` is `nodes[i]` of the input.
pub(crate) struct LayerGraph {
    pub sizes: Vec<Size>,
    /// Deduplicated edges between known, distinct nodes
    pub edges: Vec<(usize, usize)>,
}

impl LayerGraph {
    fn build(nodes: &[Node], edges: &[Edge]) -> Self {
        let index: IndexMap<&NodeId, usize> =
            nodes.iter().enumerate().map(|(i, n)| (&n.id, i)).collect();

        let mut dangling = 0usize;
        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(edges.len());
        for edge in edges {
            match (index.get(&edge.source), index.get(&edge.target)) {
                (Some(&s), Some(&t)) if s != t => pairs.push((s, t)),
                (Some(_), Some(_)) => {}
                _ => dangling += 1,
            }
        }
        if dangling > 0 {
            tracing::debug!(dangling, "ignoring edges with unknown endpoints");
        }

        // Keep first occurrence order so the result stays deterministic
        let mut seen = std::collections::HashSet::new();
        pairs.retain(|pair| seen.insert(*pair));

        Self {
            sizes: nodes.iter().map(|n| n.size(DEFAULT_NODE_SIZE)).collect(),
            edges: pairs,
        }
    }

    fn len(&self) -> usize {
        self.sizes.len()
    }
}

/// Lay out the whole graph.
///
/// Edges that reference unknown nodes are ignored. Cycles are broken by
/// ignoring the back edges a depth-first search finds, so cyclic input still
/// gets a deterministic layout.
pub fn layout(nodes: &[Node], edges: &[Edge], options: &LayoutOptions) -> LayoutResult {
    if nodes.is_empty() {
        return LayoutResult::default();
    }

    let graph = LayerGraph::build(nodes, edges);
    let dag = acyclic::forward_edges(graph.len(), &graph.edges);
    let ranks = rank::longest_path(graph.len(), &dag);
    let layers = order::order(&ranks, &dag);
    let positions = position::assign(&graph, &layers, options);

    let laid_out: Vec<Node> = nodes
        .iter()
        .zip(positions)
        .map(|(node, position)| Node {
            position,
            ..node.clone()
        })
        .collect();

    tracing::debug!(
        nodes = laid_out.len(),
        edges = dag.len(),
        ranks = layers.len(),
        "layout finished"
    );
    LayoutResult::from_nodes(laid_out)
}

/// [`layout`] followed by collision resolution as a safety net.
///
/// Bounds are re-derived when nodes had to be moved. A resolver that runs out
/// of passes logs a warning and its best effort is returned.
pub fn layout_with_collision_resolution(
    nodes: &[Node],
    edges: &[Edge],
    options: &LayoutOptions,
    collision: &CollisionOptions,
) -> LayoutResult {
    let result = layout(nodes, edges, options);
    if !has_collisions(&result.nodes) {
        return result;
    }

    let collision = CollisionOptions {
        grid_snap: options.grid_snap,
        ..*collision
    };
    let resolution = resolve_collisions(&result.nodes, &collision);
    if !resolution.converged {
        tracing::warn!(
            passes = resolution.passes,
            "collision resolution did not converge; using best effort layout"
        );
    }
    LayoutResult::from_nodes(resolution.nodes)
}
