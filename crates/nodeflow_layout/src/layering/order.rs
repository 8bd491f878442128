// SPDX-License-Identifier: MIT OR Apache-2.0
//! Crossing reduction using the barycenter heuristic.

use std::cmp::Ordering;

/// Number of down+up sweep rounds
const SWEEP_ROUNDS: usize = 8;

/// Group nodes by rank and order each rank to reduce crossings.
///
/// Nodes start in input order, so isolated nodes and ties stay in the order
/// the host supplied them. The best ordering seen across all sweeps is kept.
pub(crate) fn order(ranks: &[usize], edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let layer_count = ranks.iter().copied().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (node, &rank) in ranks.iter().enumerate() {
        layers[rank].push(node);
    }

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); ranks.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); ranks.len()];
    for &(source, target) in edges {
        successors[source].push(target);
        predecessors[target].push(source);
    }

    let mut slot = vec![0usize; ranks.len()];
    update_slots(&layers, &mut slot);

    let mut best = layers.clone();
    let mut best_crossings = crossings(ranks, edges, &slot);

    for _ in 0..SWEEP_ROUNDS {
        if best_crossings == 0 {
            break;
        }

        for rank in 1..layer_count {
            sort_layer(&mut layers[rank], &predecessors, &mut slot);
        }
        for rank in (0..layer_count.saturating_sub(1)).rev() {
            sort_layer(&mut layers[rank], &successors, &mut slot);
        }

        let current = crossings(ranks, edges, &slot);
        if current < best_crossings {
            best_crossings = current;
            best.clone_from(&layers);
        }
    }

    best
}

fn update_slots(layers: &[Vec<usize>], slot: &mut [usize]) {
    for layer in layers {
        for (i, &node) in layer.iter().enumerate() {
            slot[node] = i;
        }
    }
}

/// Stable sort of one layer by the mean slot of each node's neighbours.
/// Nodes without neighbours keep their current slot as their key.
fn sort_layer(layer: &mut Vec<usize>, neighbours: &[Vec<usize>], slot: &mut [usize]) {
    let mut keyed: Vec<(usize, f32)> = layer
        .iter()
        .map(|&node| {
            let adjacent = &neighbours[node];
            let key = if adjacent.is_empty() {
                slot[node] as f32
            } else {
                adjacent.iter().map(|&n| slot[n] as f32).sum::<f32>() / adjacent.len() as f32
            };
            (node, key)
        })
        .collect();

    keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    layer.clear();
    layer.extend(keyed.into_iter().map(|(node, _)| node));
    for (i, &node) in layer.iter().enumerate() {
        slot[node] = i;
    }
}

/// Count crossings between edges that span the same pair of ranks
fn crossings(ranks: &[usize], edges: &[(usize, usize)], slot: &[usize]) -> usize {
    let mut count = 0;
    for (i, &(s1, t1)) in edges.iter().enumerate() {
        for &(s2, t2) in &edges[i + 1..] {
            if ranks[s1] != ranks[s2] || ranks[t1] != ranks[t2] {
                continue;
            }
            let source_order = slot[s1].cmp(&slot[s2]);
            let target_order = slot[t1].cmp(&slot[t2]);
            if source_order != Ordering::Equal
                && target_order != Ordering::Equal
                && source_order != target_order
            {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_keep_input_order() {
        let layers = order(&[0, 0, 1, 0], &[(1, 2)]);
        assert_eq!(layers, vec![vec![0, 1, 3], vec![2]]);
    }

    #[test]
    fn test_uncrosses_two_pairs() {
        // 0 -> 3 and 1 -> 2 cross when rank 1 is in input order
        let ranks = [0, 0, 1, 1];
        let edges = [(0, 3), (1, 2)];
        let layers = order(&ranks, &edges);

        let mut slot = vec![0; 4];
        update_slots(&layers, &mut slot);
        assert_eq!(crossings(&ranks, &edges, &slot), 0);
    }

    #[test]
    fn test_crossing_count() {
        let ranks = [0, 0, 1, 1];
        let edges = [(0, 3), (1, 2)];
        let slot = [0, 1, 0, 1];
        assert_eq!(crossings(&ranks, &edges, &slot), 1);
    }
}
