// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cycle breaking by depth-first search.

/// Edges that are not back edges of a DFS visiting nodes in index order.
///
/// Removing back edges leaves a DAG; the order of the surviving edges is kept.
pub(crate) fn forward_edges(node_count: usize, edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (i, &(source, _)) in edges.iter().enumerate() {
        adjacency[source].push(i);
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let mut mark = vec![Mark::Unvisited; node_count];
    let mut back = vec![false; edges.len()];
    // (node, next adjacency slot)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if mark[root] != Mark::Unvisited {
            continue;
        }
        mark[root] = Mark::OnStack;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, slot) = *frame;
            let Some(&edge) = adjacency[node].get(slot) else {
                mark[node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let target = edges[edge].1;
            match mark[target] {
                Mark::OnStack => back[edge] = true,
                Mark::Unvisited => {
                    mark[target] = Mark::OnStack;
                    stack.push((target, 0));
                }
                Mark::Done => {}
            }
        }
    }

    let removed = back.iter().filter(|b| **b).count();
    if removed > 0 {
        tracing::debug!(removed, "ignoring back edges to break cycles");
    }

    edges
        .iter()
        .zip(back)
        .filter(|(_, is_back)| !is_back)
        .map(|(edge, _)| *edge)
        .collect()
}
