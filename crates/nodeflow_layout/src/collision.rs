// SPDX-License-Identifier: MIT OR Apache-2.0
//! Overlap detection and resolution for node rectangles.
//!
//! Layout with sane spacing should never overlap, but host-supplied sizes and
//! grid snapping can break that. The resolver here is the safety net.

use crate::options::CollisionOptions;
use nodeflow_graph::{Node, Position, DEFAULT_NODE_SIZE};

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Rect {
    fn of(node: &Node) -> Self {
        let size = node.size(DEFAULT_NODE_SIZE);
        Self {
            x: node.position.x,
            y: node.position.y,
            w: size.width,
            h: size.height,
        }
    }

    fn right(&self) -> f32 {
        self.x + self.w
    }

    fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict intersection; touching edges do not count
    fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Result of [`resolve_collisions`]
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResolution {
    /// Input nodes with displaced positions
    pub nodes: Vec<Node>,
    /// Whether the result is free of overlaps
    pub converged: bool,
    /// Pairwise passes performed
    pub passes: usize,
}

/// Whether any two node rectangles overlap
pub fn has_collisions(nodes: &[Node]) -> bool {
    let rects: Vec<Rect> = nodes.iter().map(Rect::of).collect();
    rects
        .iter()
        .enumerate()
        .any(|(i, a)| rects[i + 1..].iter().any(|b| a.overlaps(b)))
}

/// Push overlapping nodes apart.
///
/// For each overlapping pair the node further along the axis of least
/// overlap (the later one on ties) is moved past the other, plus `gap`. Nodes
/// only ever move right or down, so relative order is preserved. Stops after
/// a clean pass or `max_iterations` passes, whichever comes first; in the
/// latter case the best effort is returned with `converged == false`.
pub fn resolve_collisions(nodes: &[Node], options: &CollisionOptions) -> CollisionResolution {
    let mut rects: Vec<Rect> = nodes.iter().map(Rect::of).collect();
    let snap = |value: f32| snap_up(value, options.grid_snap);

    let mut passes = 0;
    let mut clean = false;
    while passes < options.max_iterations {
        passes += 1;
        let mut moved = false;

        for i in 0..rects.len() {
            for j in i + 1..rects.len() {
                let (a, b) = (rects[i], rects[j]);
                if !a.overlaps(&b) {
                    continue;
                }
                moved = true;

                let overlap_x = a.right().min(b.right()) - a.x.max(b.x);
                let overlap_y = a.bottom().min(b.bottom()) - a.y.max(b.y);
                if overlap_x <= overlap_y {
                    let (anchor, mover) = if a.x + a.w / 2.0 <= b.x + b.w / 2.0 {
                        (i, j)
                    } else {
                        (j, i)
                    };
                    rects[mover].x = snap(rects[anchor].right() + options.gap);
                } else {
                    let (anchor, mover) = if a.y + a.h / 2.0 <= b.y + b.h / 2.0 {
                        (i, j)
                    } else {
                        (j, i)
                    };
                    rects[mover].y = snap(rects[anchor].bottom() + options.gap);
                }
            }
        }

        if !moved {
            clean = true;
            break;
        }
    }

    let resolved: Vec<Node> = nodes
        .iter()
        .zip(&rects)
        .map(|(node, rect)| Node {
            position: Position::new(rect.x, rect.y),
            ..node.clone()
        })
        .collect();

    let converged = clean || !has_collisions(&resolved);
    if passes > 1 {
        tracing::debug!(passes, converged, "resolved node collisions");
    }

    CollisionResolution {
        nodes: resolved,
        converged,
        passes,
    }
}

/// Smallest multiple of `grid` that is not below `value`
fn snap_up(value: f32, grid: f32) -> f32 {
    if !(grid > 0.0 && grid.is_finite()) {
        return value;
    }
    let snapped = (value / grid).ceil() * grid;
    if snapped < value {
        snapped + grid
    } else {
        snapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(id: &str, x: f32, y: f32, w: f32, h: f32) -> Node {
        Node::new(id).with_size(w, h).with_position(x, y)
    }

    #[test]
    fn test_touching_is_not_colliding() {
        let nodes = [boxed("a", 0.0, 0.0, 10.0, 10.0), boxed("b", 10.0, 0.0, 10.0, 10.0)];
        assert!(!has_collisions(&nodes));
    }

    #[test]
    fn test_zero_size_never_collides() {
        let nodes = [boxed("a", 0.0, 0.0, 0.0, 0.0), boxed("b", 0.0, 0.0, 0.0, 0.0)];
        assert!(!has_collisions(&nodes));
    }

    #[test]
    fn test_default_size_used_for_unmeasured() {
        let nodes = [Node::new("a"), Node::new("b").with_position(10.0, 10.0)];
        assert!(has_collisions(&nodes));
    }

    #[test]
    fn test_pushes_along_least_overlap() {
        // Overlap is 10 wide and 40 tall, so b moves right
        let nodes = [boxed("a", 0.0, 0.0, 50.0, 40.0), boxed("b", 40.0, 0.0, 50.0, 40.0)];
        let result = resolve_collisions(&nodes, &CollisionOptions::default());

        assert!(result.converged);
        assert_eq!(result.nodes[0].position, Position::new(0.0, 0.0));
        assert_eq!(result.nodes[1].position, Position::new(60.0, 0.0));
    }

    #[test]
    fn test_pushes_down_when_vertical_overlap_smaller() {
        let nodes = [boxed("a", 0.0, 0.0, 50.0, 40.0), boxed("b", 5.0, 35.0, 50.0, 40.0)];
        let result = resolve_collisions(&nodes, &CollisionOptions::default());
        assert_eq!(result.nodes[1].position, Position::new(5.0, 50.0));
        assert!(!has_collisions(&result.nodes));
    }

    #[test]
    fn test_earlier_node_moves_when_further_along() {
        let nodes = [boxed("a", 40.0, 0.0, 50.0, 40.0), boxed("b", 0.0, 0.0, 50.0, 40.0)];
        let result = resolve_collisions(&nodes, &CollisionOptions::default());
        assert_eq!(result.nodes[0].position.x, 60.0);
        assert_eq!(result.nodes[1].position.x, 0.0);
    }

    #[test]
    fn test_stacked_pile_separates() {
        let nodes: Vec<Node> = (0..6)
            .map(|i| boxed(&format!("n{i}"), 0.0, 0.0, 30.0, 20.0))
            .collect();
        let result = resolve_collisions(&nodes, &CollisionOptions::default());
        assert!(result.converged);
        assert!(!has_collisions(&result.nodes));
    }

    #[test]
    fn test_budget_exhaustion_is_best_effort() {
        let nodes: Vec<Node> = (0..4)
            .map(|i| boxed(&format!("n{i}"), 0.0, 0.0, 30.0, 20.0))
            .collect();
        let options = CollisionOptions {
            max_iterations: 1,
            ..Default::default()
        };
        let result = resolve_collisions(&nodes, &options);
        assert_eq!(result.passes, 1);
        assert_eq!(result.nodes.len(), 4);
        assert_eq!(result.converged, !has_collisions(&result.nodes));
    }

    #[test]
    fn test_snap_up() {
        assert_eq!(snap_up(41.0, 20.0), 60.0);
        assert_eq!(snap_up(40.0, 20.0), 40.0);
        assert_eq!(snap_up(41.5, 0.0), 41.5);
    }
}
