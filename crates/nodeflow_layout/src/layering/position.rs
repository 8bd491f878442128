// SPDX-License-Identifier: MIT OR Apache-2.0
//! Coordinate assignment.

use super::LayerGraph;
use crate::options::{LayoutDirection, LayoutOptions};
use nodeflow_graph::Position;

/// Top-left position of every node, indexed like the input.
///
/// Centres are computed first: along the rank axis each rank is as thick as
/// its thickest node, across it each rank is packed with `node_spacing` gaps
/// and centred on zero. The result is converted to top-left corners, moved so
/// the layout starts at the margins and finally snapped.
pub(crate) fn assign(
    graph: &LayerGraph,
    layers: &[Vec<usize>],
    options: &LayoutOptions,
) -> Vec<Position> {
    let direction = options.direction;
    let along = |i: usize| {
        let size = graph.sizes[i];
        if direction.is_horizontal() {
            size.width
        } else {
            size.height
        }
    };
    let across = |i: usize| {
        let size = graph.sizes[i];
        if direction.is_horizontal() {
            size.height
        } else {
            size.width
        }
    };

    let mut centers = vec![(0.0f32, 0.0f32); graph.len()];
    let mut rank_offset = 0.0f32;

    for layer in layers {
        let thickness = layer.iter().map(|&i| along(i)).fold(0.0f32, f32::max);
        let rank_center = rank_offset + thickness / 2.0;

        let total: f32 = layer.iter().map(|&i| across(i)).sum::<f32>()
            + layer.len().saturating_sub(1) as f32 * options.node_spacing;
        let mut cursor = -total / 2.0;

        for &i in layer {
            let cross_center = cursor + across(i) / 2.0;
            cursor += across(i) + options.node_spacing;

            centers[i] = match direction {
                LayoutDirection::TopBottom => (cross_center, rank_center),
                LayoutDirection::BottomTop => (cross_center, -rank_center),
                LayoutDirection::LeftRight => (rank_center, cross_center),
                LayoutDirection::RightLeft => (-rank_center, cross_center),
            };
        }

        rank_offset += thickness + options.rank_spacing;
    }

    let mut corners: Vec<Position> = centers
        .iter()
        .zip(&graph.sizes)
        .map(|(&(x, y), size)| Position::new(x - size.width / 2.0, y - size.height / 2.0))
        .collect();

    let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    if min_x.is_finite() && min_y.is_finite() {
        let dx = options.margin_x - min_x;
        let dy = options.margin_y - min_y;
        for corner in &mut corners {
            *corner = corner.translated(dx, dy);
        }
    }

    if options.snap_enabled() {
        let grid = options.grid_snap;
        for corner in &mut corners {
            corner.x = (corner.x / grid).round() * grid;
            corner.y = (corner.y / grid).round() * grid;
        }
    }

    corners
}
