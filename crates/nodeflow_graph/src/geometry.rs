// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canvas geometry: positions, sizes and bounding boxes.

use crate::node::{Node, DEFAULT_NODE_SIZE};
use serde::{Deserialize, Serialize};

/// A point in canvas coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box of a set of node rectangles.
///
/// Always derived from a node list, never stored on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge
    pub min_x: f32,
    /// Top edge
    pub min_y: f32,
    /// Right edge
    pub max_x: f32,
    /// Bottom edge
    pub max_y: f32,
    /// `max_x - min_x`
    pub width: f32,
    /// `max_y - min_y`
    pub height: f32,
}

impl Bounds {
    /// Scan `nodes` for the box enclosing every top-left and bottom-right corner.
    /// Unmeasured nodes count with [`DEFAULT_NODE_SIZE`]. No nodes gives the zero box.
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut iter = nodes.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        let size = first.size(DEFAULT_NODE_SIZE);
        let mut min_x = first.position.x;
        let mut min_y = first.position.y;
        let mut max_x = first.position.x + size.width;
        let mut max_y = first.position.y + size.height;

        for node in iter {
            let size = node.size(DEFAULT_NODE_SIZE);
            min_x = min_x.min(node.position.x);
            min_y = min_y.min(node.position.y);
            max_x = max_x.max(node.position.x + size.width);
            max_y = max_y.max(node.position.y + size.height);
        }

        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> Position {
        Position::new(self.min_x, self.min_y)
    }
}
