// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configured entry points.

use crate::config::{ConfigError, EngineConfig};
use indexmap::IndexMap;
use nodeflow_graph::{ConnectionCandidate, Edge, EdgeId, Node, NodeId, ValidationResult};
use nodeflow_layout::{CollisionResolution, LayoutResult};
use std::path::Path;

/// Layout and validation with a fixed configuration.
///
/// Holds no state besides the configuration, so one engine can serve any
/// number of callers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine from a configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create an engine from a RON configuration file
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        EngineConfig::load(path).map(Self::new)
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lay out the whole graph
    pub fn layout(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        nodeflow_layout::layout(nodes, edges, &self.config.layout)
    }

    /// Lay out the whole graph, then push apart anything still overlapping
    pub fn layout_with_collision_resolution(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        nodeflow_layout::layout_with_collision_resolution(
            nodes,
            edges,
            &self.config.layout,
            &self.config.collision,
        )
    }

    /// Lay out the selected nodes in place, leaving the rest untouched
    pub fn layout_selection(
        &self,
        nodes: &[Node],
        selected_ids: &[NodeId],
        edges: &[Edge],
    ) -> LayoutResult {
        nodeflow_layout::layout_selection(nodes, selected_ids, edges, &self.config.layout)
    }

    /// Whether any two nodes overlap
    pub fn has_collisions(&self, nodes: &[Node]) -> bool {
        nodeflow_layout::has_collisions(nodes)
    }

    /// Push overlapping nodes apart, snapping to the layout grid
    pub fn resolve_collisions(&self, nodes: &[Node]) -> CollisionResolution {
        let options = nodeflow_layout::CollisionOptions {
            grid_snap: self.config.layout.grid_snap,
            ..self.config.collision
        };
        nodeflow_layout::resolve_collisions(nodes, &options)
    }

    /// Validate a single candidate edge
    pub fn validate(
        &self,
        candidate: &ConnectionCandidate,
        nodes: &[Node],
        edges: &[Edge],
    ) -> ValidationResult {
        nodeflow_graph::validate(candidate, nodes, edges, &self.config.validation)
    }

    /// Validate every edge of an imported graph
    pub fn audit(&self, edges: &[Edge], nodes: &[Node]) -> IndexMap<EdgeId, ValidationResult> {
        nodeflow_graph::validate_edges(edges, nodes, &self.config.validation)
    }
}
