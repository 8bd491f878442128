// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection validation.
//!
//! [`validate`] decides whether a candidate edge may be committed. It runs on
//! every drag gesture, so it stays linear in the number of committed edges.
//! [`validate_edges`] audits an imported edge list in one go.
//!
//! Checks run in order and stop at the first failure:
//! 1. both endpoints resolve to nodes
//! 2. no self connection (unless allowed)
//! 3. nodes without port metadata are always accepted
//! 4. ports resolve (unresolvable ports are accepted too)
//! 5. categories are compatible
//! 6. single-connection targets are free
//! 7. no cycle is closed (only when asked for)

use crate::edge::{Edge, EdgeId};
use crate::node::{Node, NodeId};
use crate::port::{Port, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Policy knobs for [`validate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Allow an edge whose source and target are the same node
    pub allow_self_connection: bool,
    /// Ignore the target port's single-connection flag
    pub allow_multiple_connections: bool,
    /// Only accept identical categories or the wildcard
    pub strict_type_checking: bool,
    /// Reject edges that would close a cycle
    pub prevent_cycles: bool,
}

/// A proposed edge. Missing port handles fall back to the node's first
/// output (source) or first input (target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCandidate {
    /// Source node
    pub source: NodeId,
    /// Source port handle
    #[serde(default)]
    pub source_port: Option<PortId>,
    /// Target node
    pub target: NodeId,
    /// Target port handle
    #[serde(default)]
    pub target_port: Option<PortId>,
}

impl ConnectionCandidate {
    /// Candidate between two nodes using their default ports
    pub fn between(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            source_port: None,
            target: target.into(),
            target_port: None,
        }
    }

    /// Candidate between explicit ports
    pub fn ports(
        source: impl Into<NodeId>,
        source_port: impl Into<PortId>,
        target: impl Into<NodeId>,
        target_port: impl Into<PortId>,
    ) -> Self {
        Self {
            source: source.into(),
            source_port: Some(source_port.into()),
            target: target.into(),
            target_port: Some(target_port.into()),
        }
    }
}

impl From<&Edge> for ConnectionCandidate {
    fn from(edge: &Edge) -> Self {
        Self::ports(
            edge.source.clone(),
            edge.source_port.clone(),
            edge.target.clone(),
            edge.target_port.clone(),
        )
    }
}

/// Why a candidate was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Source or target node is absent
    #[error("missing endpoint")]
    MissingEndpoint,
    /// Source and target are the same node
    #[error("self connection")]
    SelfConnection,
    /// Port categories do not match
    #[error("incompatible types")]
    IncompatibleTypes,
    /// Single-connection target port already has an edge
    #[error("target already connected")]
    TargetAlreadyConnected,
    /// Target already reaches source
    #[error("would create cycle")]
    WouldCreateCycle,
}

/// Outcome of validating one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the edge may be committed
    pub is_valid: bool,
    /// Rejection reason, `None` when valid
    pub reason: Option<RejectReason>,
    /// Resolved source port, when one was found
    pub source_port: Option<Port>,
    /// Resolved target port, when one was found
    pub target_port: Option<Port>,
}

impl ValidationResult {
    fn accept(source_port: Option<&Port>, target_port: Option<&Port>) -> Self {
        Self {
            is_valid: true,
            reason: None,
            source_port: source_port.cloned(),
            target_port: target_port.cloned(),
        }
    }

    fn reject(reason: RejectReason) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
            source_port: None,
            target_port: None,
        }
    }

    fn reject_with_ports(reason: RejectReason, source_port: &Port, target_port: &Port) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
            source_port: Some(source_port.clone()),
            target_port: Some(target_port.clone()),
        }
    }

    /// Color to draw the edge with, taken from the source port category
    pub fn edge_color(&self) -> Option<[u8; 3]> {
        self.source_port.as_ref().map(|p| p.category.color())
    }
}

/// Decide whether `candidate` may be added to `edges`.
///
/// Never fails: an illegal candidate yields `is_valid == false` with a reason.
pub fn validate(
    candidate: &ConnectionCandidate,
    nodes: &[Node],
    edges: &[Edge],
    options: &ValidationOptions,
) -> ValidationResult {
    validate_with(candidate, |id| find_node(nodes, id), edges, options)
}

/// [`validate`] over any node lookup and edge collection.
///
/// Lets containers that index their nodes validate without building slices.
/// The edges are walked once for the cardinality check and once more only
/// when `prevent_cycles` is set.
pub fn validate_with<'a, F, I>(
    candidate: &ConnectionCandidate,
    lookup: F,
    edges: I,
    options: &ValidationOptions,
) -> ValidationResult
where
    F: Fn(&NodeId) -> Option<&'a Node>,
    I: IntoIterator<Item = &'a Edge>,
    I::IntoIter: Clone,
{
    let result = check(candidate, lookup, edges.into_iter(), options);
    if let Some(reason) = result.reason {
        tracing::trace!(
            source = %candidate.source,
            target = %candidate.target,
            %reason,
            "connection rejected"
        );
    }
    result
}

fn check<'a>(
    candidate: &ConnectionCandidate,
    lookup: impl Fn(&NodeId) -> Option<&'a Node>,
    edges: impl Iterator<Item = &'a Edge> + Clone,
    options: &ValidationOptions,
) -> ValidationResult {
    let find = |id: &NodeId| {
        if id.as_str().is_empty() {
            None
        } else {
            lookup(id)
        }
    };
    let (Some(source), Some(target)) = (find(&candidate.source), find(&candidate.target)) else {
        return ValidationResult::reject(RejectReason::MissingEndpoint);
    };

    if !options.allow_self_connection && source.id == target.id {
        return ValidationResult::reject(RejectReason::SelfConnection);
    }

    // Minimally described nodes are accepted unconditionally
    if !source.has_port_metadata() || !target.has_port_metadata() {
        return ValidationResult::accept(None, None);
    }

    let source_port = source.resolve_output(candidate.source_port.as_ref());
    let target_port = target.resolve_input(candidate.target_port.as_ref());
    let (Some(source_port), Some(target_port)) = (source_port, target_port) else {
        return ValidationResult::accept(source_port, target_port);
    };

    if !source_port
        .category
        .can_feed(target_port.category, options.strict_type_checking)
    {
        return ValidationResult::reject_with_ports(
            RejectReason::IncompatibleTypes,
            source_port,
            target_port,
        );
    }

    if !target_port.accepts_multiple
        && !options.allow_multiple_connections
        && edges
            .clone()
            .any(|e| e.terminates_at(&target.id, &target_port.id))
    {
        return ValidationResult::reject_with_ports(
            RejectReason::TargetAlreadyConnected,
            source_port,
            target_port,
        );
    }

    if options.prevent_cycles && reaches(&target.id, &source.id, edges) {
        return ValidationResult::reject_with_ports(
            RejectReason::WouldCreateCycle,
            source_port,
            target_port,
        );
    }

    ValidationResult::accept(Some(source_port), Some(target_port))
}

fn find_node<'a>(nodes: &'a [Node], id: &NodeId) -> Option<&'a Node> {
    nodes.iter().find(|n| n.id == *id)
}

/// Breadth-first reachability along committed edges
fn reaches<'a>(from: &NodeId, to: &NodeId, edges: impl Iterator<Item = &'a Edge>) -> bool {
    if from == to {
        return true;
    }

    let mut successors: HashMap<&'a NodeId, Vec<&'a NodeId>> = HashMap::new();
    for edge in edges {
        successors.entry(&edge.source).or_default().push(&edge.target);
    }

    let mut seen: HashSet<&NodeId> = HashSet::new();
    let mut queue: VecDeque<&NodeId> = VecDeque::from([from]);
    seen.insert(from);
    while let Some(node) = queue.pop_front() {
        for &next in successors.get(node).into_iter().flatten() {
            if next == to {
                return true;
            }
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

/// Audit a whole edge list, one result per edge id.
///
/// Each edge is checked against the earlier edges that passed, as if the
/// list were committed one edge at a time. When two edges compete for a
/// single-connection port the first valid edge wins; rejected edges never
/// occupy a port. The input is left untouched.
pub fn validate_edges(
    edges: &[Edge],
    nodes: &[Node],
    options: &ValidationOptions,
) -> IndexMap<EdgeId, ValidationResult> {
    let mut accepted: Vec<&Edge> = Vec::with_capacity(edges.len());
    let mut results: IndexMap<EdgeId, ValidationResult> = IndexMap::with_capacity(edges.len());
    for edge in edges {
        let candidate = ConnectionCandidate::from(edge);
        let result = validate_with(
            &candidate,
            |id| find_node(nodes, id),
            accepted.iter().copied(),
            options,
        );
        if result.is_valid {
            accepted.push(edge);
        }
        results.insert(edge.id.clone(), result);
    }

    let invalid = results.values().filter(|r| !r.is_valid).count();
    tracing::debug!(edges = edges.len(), invalid, "edge audit finished");
    results
}
