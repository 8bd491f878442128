// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph model and connection validation for node-based workflow canvases.
//!
//! The crate provides:
//! - Nodes with measured or default dimensions and typed ports
//! - Edges between a source output port and a target input port
//! - A pure connection validator, usable per drag gesture or as a batch audit
//! - An optional owning [`Graph`] container that only commits valid edges
//!
//! Everything here is plain data. Layout lives in `nodeflow_layout`.

pub mod edge;
pub mod geometry;
pub mod graph;
pub mod node;
pub mod port;
pub mod validation;

pub use edge::{Edge, EdgeId};
pub use geometry::{Bounds, Position, Size};
pub use graph::{ConnectionError, CycleError, Graph};
pub use node::{Node, NodeId, DEFAULT_NODE_SIZE};
pub use port::{Port, PortCategory, PortDirection, PortId};
pub use validation::{
    validate, validate_edges, validate_with, ConnectionCandidate, RejectReason,
    ValidationOptions, ValidationResult,
};
