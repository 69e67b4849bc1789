//! Local structure: clustering and degree correlations.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::graph::WeightedGraph;

/// Local clustering coefficient of every node, aligned to `graph.nodes()`.
///
/// Unweighted: closed neighbor pairs over possible neighbor pairs. Nodes
/// with fewer than two neighbors score 0.
pub fn clustering_coefficients<G: WeightedGraph>(graph: &G) -> Vec<f64> {
    graph
        .nodes()
        .into_iter()
        .map(|node| local_clustering(graph, node))
        .collect()
}

/// Local clustering coefficient of a single node.
pub fn local_clustering<G: WeightedGraph>(graph: &G, node: G::Node) -> f64 {
    let neighbors = graph.neighbors(node);
    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }
    let mut closed = 0usize;
    for (i, &u) in neighbors.iter().enumerate() {
        let u_nbrs: FxHashSet<G::Node> = graph.neighbors(u).into_iter().collect();
        closed += neighbors[i + 1..]
            .iter()
            .filter(|v| u_nbrs.contains(v))
            .count();
    }
    let possible = k * (k - 1) / 2;
    closed as f64 / possible as f64
}

/// Mean degree of the neighbors of `node`; 0 for isolated nodes.
pub fn neighbor_degree<G: WeightedGraph>(graph: &G, node: G::Node) -> f64 {
    let edges = graph.incident_edges(node);
    if edges.is_empty() {
        return 0.0;
    }
    let total: usize = edges.iter().map(|(nbr, _)| graph.degree(*nbr)).sum();
    total as f64 / edges.len() as f64
}

/// [`neighbor_degree`] of every node, aligned to `graph.nodes()`.
pub fn average_neighbor_degrees<G: WeightedGraph>(graph: &G) -> Vec<(G::Node, f64)> {
    graph
        .nodes()
        .into_iter()
        .map(|node| (node, neighbor_degree(graph, node)))
        .collect()
}

/// Average nearest-neighbor degree `k_nn(k)`: the mean [`neighbor_degree`]
/// over all nodes of degree `k`. Rising curves indicate assortative mixing,
/// falling ones disassortative.
pub fn average_knn_per_degree<G: WeightedGraph>(graph: &G) -> BTreeMap<usize, f64> {
    let mut buckets: BTreeMap<usize, (f64, usize)> = BTreeMap::new();
    for (node, knn) in average_neighbor_degrees(graph) {
        let entry = buckets.entry(graph.degree(node)).or_insert((0.0, 0));
        entry.0 += knn;
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect()
}
