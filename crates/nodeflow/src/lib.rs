// SPDX-License-Identifier: MIT OR Apache-2.0
//! Auto-layout and connection validation engine for node-based workflow
//! editors.
//!
//! The host hands in a snapshot of its nodes and edges and gets new data back:
//! - [`layout`] / [`layout_selection`] / [`layout_with_collision_resolution`]
//!   return repositioned nodes plus their bounding box
//! - [`validate`] decides whether a candidate edge may be committed
//!
//! [`Engine`] bundles the same entry points with an [`EngineConfig`] that can
//! be loaded from a RON file. Nothing here keeps state between calls.

pub mod config;
pub mod engine;

pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;

pub use nodeflow_graph::{
    validate, validate_edges, Bounds, ConnectionCandidate, Edge, EdgeId, Graph, Node, NodeId,
    Port, PortCategory, PortDirection, PortId, Position, RejectReason, Size, ValidationOptions,
    ValidationResult, DEFAULT_NODE_SIZE,
};
pub use nodeflow_layout::{
    has_collisions, layout, layout_selection, layout_with_collision_resolution,
    resolve_collisions, CollisionOptions, CollisionResolution, LayoutDirection, LayoutOptions,
    LayoutResult,
};
