// SPDX-License-Identifier: MIT OR Apache-2.0
//! Automatic layout for node canvases.
//!
//! ## Architecture
//!
//! - [`layering`]: ranks nodes along the flow direction, orders each rank to
//!   cut crossings and emits top-left positions
//! - [`collision`]: detects and pushes apart overlapping node rectangles
//! - [`selection`]: lays out a subset of nodes and re-anchors it in place
//!
//! Every entry point is a pure function of its inputs and returns new node
//! lists; the caller's slices are never modified.

pub mod collision;
pub mod layering;
pub mod options;
pub mod selection;

pub use collision::{has_collisions, resolve_collisions, CollisionResolution};
pub use layering::{layout, layout_with_collision_resolution, LayoutResult};
pub use options::{CollisionOptions, LayoutDirection, LayoutOptions};
pub use selection::layout_selection;
