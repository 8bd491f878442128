// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph model.

use crate::geometry::{Position, Size};
use crate::port::{Port, PortId};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Size used for nodes the host has not measured yet
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 200.0,
    height: 120.0,
};

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node on the canvas.
///
/// The engine reads `width`/`height` and writes `position`; everything else is
/// owned by the host. `position` is the top-left corner in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Measured width, if the host has rendered the node
    #[serde(default)]
    pub width: Option<f32>,
    /// Measured height, if the host has rendered the node
    #[serde(default)]
    pub height: Option<f32>,
    /// Top-left corner in canvas coordinates
    #[serde(default)]
    pub position: Position,
    /// Input ports
    #[serde(default)]
    pub inputs: Vec<Port>,
    /// Output ports
    #[serde(default)]
    pub outputs: Vec<Port>,
}

impl Node {
    /// Create an unmeasured node at the origin with no ports
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            width: None,
            height: None,
            position: Position::default(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the measured size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Add an input port
    pub fn with_input(mut self, port: Port) -> Self {
        self.inputs.push(port);
        self
    }

    /// Add an output port
    pub fn with_output(mut self, port: Port) -> Self {
        self.outputs.push(port);
        self
    }

    /// Resolved size, falling back to `default` for unmeasured dimensions
    pub fn size(&self, default: Size) -> Size {
        Size {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
        }
    }

    /// Whether the node declares any ports at all
    pub fn has_port_metadata(&self) -> bool {
        !self.inputs.is_empty() || !self.outputs.is_empty()
    }

    /// Find an input port by ID, or the first declared input when `port_id` is `None`
    pub fn resolve_input(&self, port_id: Option<&PortId>) -> Option<&Port> {
        match port_id {
            Some(id) => self.inputs.iter().find(|p| p.id == *id),
            None => self.inputs.first(),
        }
    }

    /// Find an output port by ID, or the first declared output when `port_id` is `None`
    pub fn resolve_output(&self, port_id: Option<&PortId>) -> Option<&Port> {
        match port_id {
            Some(id) => self.outputs.iter().find(|p| p.id == *id),
            None => self.outputs.first(),
        }
    }

    /// Get a port by ID
    pub fn port(&self, port_id: &PortId) -> Option<&Port> {
        self.inputs
            .iter()
            .find(|p| p.id == *port_id)
            .or_else(|| self.outputs.iter().find(|p| p.id == *port_id))
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}
