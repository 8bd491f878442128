// SPDX-License-Identifier: MIT OR Apache-2.0
//! Owning graph container for hosts that want one.
//!
//! The engine itself works on `&[Node]`/`&[Edge]` snapshots; this type keeps
//! them in insertion order and routes every new edge through the validator.

use crate::edge::{Edge, EdgeId};
use crate::node::{Node, NodeId};
use crate::port::PortId;
use crate::validation::{
    self, ConnectionCandidate, RejectReason, ValidationOptions, ValidationResult,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A node graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Edges between nodes
    edges: IndexMap<EdgeId, Edge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a snapshot without validating the edges.
    /// Use [`Graph::audit`] to find the illegal ones afterwards.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            edges: edges.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    /// Add a node to the graph, replacing any node with the same ID
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Remove a node and its edges
    pub fn remove_node(&mut self, node_id: &NodeId) -> Option<Node> {
        self.edges.retain(|_, e| !e.involves_node(node_id));
        self.nodes.shift_remove(node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Owned snapshot of the nodes, in insertion order
    pub fn node_snapshot(&self) -> Vec<Node> {
        self.nodes.values().cloned().collect()
    }

    /// Owned snapshot of the edges, in insertion order
    pub fn edge_snapshot(&self) -> Vec<Edge> {
        self.edges.values().cloned().collect()
    }

    /// Validate a candidate against the current graph
    pub fn validate(
        &self,
        candidate: &ConnectionCandidate,
        options: &ValidationOptions,
    ) -> ValidationResult {
        validation::validate_with(
            candidate,
            |id| self.nodes.get(id),
            self.edges.values(),
            options,
        )
    }

    /// Validate and commit an edge
    pub fn connect(
        &mut self,
        candidate: &ConnectionCandidate,
        options: &ValidationOptions,
    ) -> Result<EdgeId, ConnectionError> {
        let result = self.validate(candidate, options);
        if let Some(reason) = result.reason {
            return Err(ConnectionError::Rejected(reason));
        }

        // Handles fall back to the resolved ports; bare nodes keep whatever was passed
        let source_port = result
            .source_port
            .map(|p| p.id)
            .or_else(|| candidate.source_port.clone())
            .unwrap_or_else(|| PortId::from(""));
        let target_port = result
            .target_port
            .map(|p| p.id)
            .or_else(|| candidate.target_port.clone())
            .unwrap_or_else(|| PortId::from(""));

        let edge = Edge::new(
            candidate.source.clone(),
            source_port,
            candidate.target.clone(),
            target_port,
        );
        let id = edge.id.clone();
        self.edges.insert(id.clone(), edge);
        Ok(id)
    }

    /// Remove an edge
    pub fn disconnect(&mut self, edge_id: &EdgeId) -> Option<Edge> {
        self.edges.shift_remove(edge_id)
    }

    /// Audit every edge, one result per edge ID
    pub fn audit(&self, options: &ValidationOptions) -> IndexMap<EdgeId, ValidationResult> {
        validation::validate_edges(&self.edge_snapshot(), &self.node_snapshot(), options)
    }

    /// Write back positions from a laid-out node list. Unknown IDs are ignored.
    pub fn apply_positions(&mut self, laid_out: &[Node]) {
        for node in laid_out {
            if let Some(existing) = self.nodes.get_mut(&node.id) {
                existing.position = node.position;
            }
        }
    }

    /// Get nodes in topological order.
    ///
    /// Ties keep insertion order. Edges with a missing endpoint are ignored.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, CycleError> {
        let mut in_degree = vec![0usize; self.nodes.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for edge in self.edges.values() {
            let source = self.nodes.get_index_of(&edge.source);
            let target = self.nodes.get_index_of(&edge.target);
            if let (Some(source), Some(target)) = (source, target) {
                successors[source].push(target);
                in_degree[target] += 1;
            }
        }

        let mut queue: VecDeque<usize> = (0..self.nodes.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(index) = queue.pop_front() {
            if let Some((id, _)) = self.nodes.get_index(index) {
                order.push(id.clone());
            }
            for &next in &successors[index] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        if order.len() < self.nodes.len() {
            return Err(CycleError);
        }
        Ok(order)
    }
}

/// Error when creating an edge
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The validator refused the candidate
    #[error("connection rejected: {0}")]
    Rejected(RejectReason),
}

/// Error when graph contains a cycle
#[derive(Debug, thiserror::Error)]
#[error("graph contains a cycle")]
pub struct CycleError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{Port, PortCategory, PortId};

    fn pipeline() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::new("prompt").with_output(Port::output("text", PortCategory::Text)));
        graph.add_node(
            Node::new("render")
                .with_input(Port::input("prompt", PortCategory::Text))
                .with_output(Port::output("image", PortCategory::Image)),
        );
        graph.add_node(Node::new("upscale").with_input(Port::input("image", PortCategory::Image)));
        graph
    }

    #[test]
    fn test_connect_commits_resolved_ports() {
        let mut graph = pipeline();
        let candidate = ConnectionCandidate::between("prompt", "render");
        let id = graph.connect(&candidate, &ValidationOptions::default()).unwrap();
        let edge = graph.edges().find(|e| e.id == id).unwrap();
        assert_eq!(edge.source_port, PortId::from("text"));
        assert_eq!(edge.target_port, PortId::from("prompt"));
    }

    #[test]
    fn test_connect_rejects_second_edge() {
        let mut graph = pipeline();
        let options = ValidationOptions::default();
        let candidate = ConnectionCandidate::between("prompt", "render");
        graph.connect(&candidate, &options).unwrap();

        let err = graph.connect(&candidate, &options).unwrap_err();
        assert!(matches!(err, ConnectionError::Rejected(RejectReason::TargetAlreadyConnected)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_remove_node_drops_edges() {
        let mut graph = pipeline();
        let options = ValidationOptions::default();
        graph.connect(&ConnectionCandidate::between("prompt", "render"), &options).unwrap();
        graph.connect(&ConnectionCandidate::between("render", "upscale"), &options).unwrap();

        graph.remove_node(&NodeId::from("render"));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_topological_order() {
        let mut graph = pipeline();
        let options = ValidationOptions::default();
        graph.connect(&ConnectionCandidate::between("render", "upscale"), &options).unwrap();
        graph.connect(&ConnectionCandidate::between("prompt", "render"), &options).unwrap();

        let order: Vec<String> = graph
            .topological_order()
            .unwrap()
            .into_iter()
            .map(|id| id.0)
            .collect();
        assert_eq!(order, ["prompt", "render", "upscale"]);
    }

    #[test]
    fn test_topological_order_detects_cycle() {
        let graph = Graph::from_parts(
            vec![Node::new("a"), Node::new("b")],
            vec![Edge::new("a", "o", "b", "i"), Edge::new("b", "o", "a", "i")],
        );
        assert!(graph.topological_order().is_err());
    }

    #[test]
    fn test_topological_order_long_chain() {
        let nodes: Vec<Node> = (0..10_000).map(|i| Node::new(format!("n{i}"))).collect();
        // Inserted back to front so every node waits on a later insertion
        let edges: Vec<Edge> = (1..10_000)
            .rev()
            .map(|i| Edge::new(format!("n{}", i - 1), "o", format!("n{i}"), "i"))
            .collect();
        let graph = Graph::from_parts(nodes, edges);

        let order = graph.topological_order().unwrap();
        assert_eq!(order.len(), 10_000);
        assert_eq!(order[0], NodeId::from("n0"));
        assert_eq!(order[9_999], NodeId::from("n9999"));
    }

    #[test]
    fn test_topological_order_ignores_dangling_edges() {
        let graph = Graph::from_parts(
            vec![Node::new("a"), Node::new("b")],
            vec![Edge::new("ghost", "o", "a", "i"), Edge::new("b", "o", "a", "i")],
        );
        let order = graph.topological_order().unwrap();
        assert_eq!(order, [NodeId::from("b"), NodeId::from("a")]);
    }

    #[test]
    fn test_connect_bare_nodes_keeps_empty_ports() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a"));
        graph.add_node(Node::new("b"));

        let candidate = ConnectionCandidate::between("a", "b");
        let options = ValidationOptions::default();
        let id = graph.connect(&candidate, &options).unwrap();
        let edge = graph.edges().find(|e| e.id == id).unwrap();
        assert_eq!(edge.source_port, PortId::from(""));
        assert_eq!(edge.target_port, PortId::from(""));

        // Bare nodes carry no cardinality
        assert!(graph.validate(&candidate, &options).is_valid);
    }

    #[test]
    fn test_apply_positions_ignores_unknown() {
        let mut graph = pipeline();
        graph.apply_positions(&[
            Node::new("render").with_position(10.0, 20.0),
            Node::new("ghost").with_position(1.0, 1.0),
        ]);
        let render = graph.node(&NodeId::from("render")).unwrap();
        assert_eq!((render.position.x, render.position.y), (10.0, 20.0));
        assert_eq!(graph.node_count(), 3);
    }
}
