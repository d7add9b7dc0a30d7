//! Brute-force reference answers for small weighted graphs.
//!
//! Nothing here shares code with the engine: distances come from plain
//! Bellman-Ford relaxation, so agreement with `search()` is evidence rather
//! than tautology.

use pathwise_harness::worlds::weighted_graph::WeightedGraph;

/// Distance used for "no path" in heuristic tables.
pub const UNREACHABLE: i64 = i64::MAX / 4;

/// Cheapest cost from the start (node 0) to any goal node, or `None` when no
/// goal is reachable.
#[must_use]
pub fn optimal_cost(graph: &WeightedGraph) -> Option<i64> {
    let dist = distances_from_start(graph);
    (0..graph.node_count())
        .filter(|&n| graph.is_goal_node(n))
        .filter_map(|n| dist[n])
        .min()
}

/// Single-source distances from node 0. Edge costs are non-negative, so
/// `node_count` rounds of relaxation always reach the fixpoint.
#[must_use]
pub fn distances_from_start(graph: &WeightedGraph) -> Vec<Option<i64>> {
    let n = graph.node_count();
    let mut dist: Vec<Option<i64>> = vec![None; n];
    if n == 0 {
        return dist;
    }
    dist[0] = Some(0);
    for _ in 0..n {
        let mut changed = false;
        for from in 0..n {
            let Some(d) = dist[from] else { continue };
            for &(to, cost) in graph.edges_from(from) {
                let candidate = d + cost;
                if dist[to].is_none_or(|cur| candidate < cur) {
                    dist[to] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

/// Exact cost-to-go for every node: a perfect, and therefore consistent,
/// heuristic. Nodes that cannot reach a goal get [`UNREACHABLE`].
#[must_use]
pub fn exact_cost_to_goal(graph: &WeightedGraph) -> Vec<i64> {
    let n = graph.node_count();
    let mut dist: Vec<Option<i64>> = (0..n)
        .map(|node| graph.is_goal_node(node).then_some(0))
        .collect();
    for _ in 0..n {
        let mut changed = false;
        for from in 0..n {
            for &(to, cost) in graph.edges_from(from) {
                let Some(d) = dist[to] else { continue };
                let candidate = d + cost;
                if dist[from].is_none_or(|cur| candidate < cur) {
                    dist[from] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist.into_iter().map(|d| d.unwrap_or(UNREACHABLE)).collect()
}

/// Build a graph over nodes `n0..n{nodes-1}` from `(from, to, cost)` index
/// triples. Indices are reduced modulo `nodes`; every node is interned in
/// index order so node `i` is named `n{i}` and sits at index `i`.
#[must_use]
pub fn indexed_graph(nodes: usize, edges: &[(usize, usize, i64)], goal: usize) -> WeightedGraph {
    let nodes = nodes.max(1);
    let mut graph = WeightedGraph::new("indexed_graph", "n0");
    let names: Vec<String> = (0..nodes).map(|i| format!("n{i}")).collect();
    // Self-loops intern a node without adding a reachable shortcut.
    for name in names.iter().skip(1) {
        graph
            .add_edge(name, name, 0)
            .unwrap_or_else(|e| panic!("zero-cost self-loop rejected: {e}"));
    }
    for &(from, to, cost) in edges {
        graph
            .add_edge(&names[from % nodes], &names[to % nodes], cost.abs())
            .unwrap_or_else(|e| panic!("non-negative edge rejected: {e}"));
    }
    graph.add_goal(&names[goal % nodes]);
    graph
}

/// Install `h` as the graph's heuristic table.
///
/// # Panics
///
/// Panics if `h` is longer than the graph's node count.
pub fn install_heuristic(graph: &mut WeightedGraph, h: &[i64]) {
    for (idx, &value) in h.iter().enumerate() {
        let name = graph.node_name(idx).to_string();
        graph
            .set_heuristic(&name, value)
            .unwrap_or_else(|e| panic!("heuristic for node {idx}: {e}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_graph_distances() {
        let graph = indexed_graph(4, &[(0, 1, 1), (0, 2, 4), (1, 3, 5), (2, 3, 1)], 3);
        assert_eq!(optimal_cost(&graph), Some(5));
        assert_eq!(exact_cost_to_goal(&graph), vec![5, 5, 1, 0]);
    }

    #[test]
    fn unreachable_goal_has_no_cost() {
        let graph = indexed_graph(3, &[(0, 1, 1)], 2);
        assert_eq!(optimal_cost(&graph), None);
        assert_eq!(exact_cost_to_goal(&graph)[0], UNREACHABLE);
    }
}
