// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout and collision settings.

use serde::{Deserialize, Serialize};

/// Direction edges flow in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Ranks stack downwards
    #[default]
    TopBottom,
    /// Ranks stack upwards
    BottomTop,
    /// Ranks stack to the right
    LeftRight,
    /// Ranks stack to the left
    RightLeft,
}

impl LayoutDirection {
    /// Whether ranks advance along the x axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftRight | Self::RightLeft)
    }

    /// Whether ranks advance towards negative coordinates
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BottomTop | Self::RightLeft)
    }
}

/// Options for [`crate::layout`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Flow direction
    pub direction: LayoutDirection,
    /// Gap between neighbours in the same rank
    pub node_spacing: f32,
    /// Gap between consecutive ranks
    pub rank_spacing: f32,
    /// Left margin of the laid-out graph
    pub margin_x: f32,
    /// Top margin of the laid-out graph
    pub margin_y: f32,
    /// Round positions to multiples of this value; `0` disables snapping
    pub grid_snap: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::TopBottom,
            node_spacing: 50.0,
            rank_spacing: 80.0,
            margin_x: 20.0,
            margin_y: 20.0,
            grid_snap: 0.0,
        }
    }
}

impl LayoutOptions {
    /// Set the direction
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the grid snap increment
    pub fn with_grid_snap(mut self, grid_snap: f32) -> Self {
        self.grid_snap = grid_snap;
        self
    }

    pub(crate) fn snap_enabled(&self) -> bool {
        self.grid_snap > 0.0 && self.grid_snap.is_finite()
    }
}

/// Options for [`crate::resolve_collisions`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionOptions {
    /// Upper bound on full pairwise passes
    pub max_iterations: usize,
    /// Clearance left between a displaced node and the node it was pushed off
    pub gap: f32,
    /// Displaced coordinates are rounded up to multiples of this; `0` disables
    pub grid_snap: f32,
}

impl Default for CollisionOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            gap: 10.0,
            grid_snap: 0.0,
        }
    }
}
