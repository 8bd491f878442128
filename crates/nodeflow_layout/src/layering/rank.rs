// SPDX-License-Identifier: MIT OR Apache-2.0
//! Longest-path rank assignment.

use std::collections::VecDeque;

/// Rank of every node: sources get 0, every other node sits one rank below its
/// deepest predecessor. `edges` must be acyclic.
pub(crate) fn longest_path(node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut in_degree = vec![0usize; node_count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(source, target) in edges {
        in_degree[target] += 1;
        successors[source].push(target);
    }

    let mut rank = vec![0usize; node_count];
    let mut queue: VecDeque<usize> = (0..node_count).filter(|&v| in_degree[v] == 0).collect();

    while let Some(node) = queue.pop_front() {
        for &next in &successors[node] {
            rank[next] = rank[next].max(rank[node] + 1);
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    rank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolated_nodes_rank_zero() {
        assert_eq!(longest_path(3, &[]), [0, 0, 0]);
    }

    #[test]
    fn test_longest_path_wins() {
        // 0 -> 1 -> 2 and a shortcut 0 -> 2
        assert_eq!(longest_path(3, &[(0, 2), (0, 1), (1, 2)]), [0, 1, 2]);
    }

    #[test]
    fn test_diamond() {
        let ranks = longest_path(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(ranks, [0, 1, 1, 2]);
    }
}
