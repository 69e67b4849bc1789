//! Shared fixtures for the artnet integration tests.

use artnet_core::graph::{NodeId, SimilarityGraph};

/// Asserts two floats agree within `tol`, naming the quantity on failure.
pub fn assert_close(actual: f64, expected: f64, tol: f64, label: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{} mismatch: expected {:.15}, got {:.15}, diff={:.3e}",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}

/// Star graph with one hub and `leaves` spokes of equal weight.
pub fn star_graph(leaves: usize, weight: f64) -> (SimilarityGraph, NodeId, Vec<NodeId>) {
    let mut g = SimilarityGraph::new();
    let hub = g.add_node("hub");
    let spokes: Vec<NodeId> = (0..leaves)
        .map(|i| g.add_node(format!("leaf-{}", i)))
        .collect();
    for &leaf in &spokes {
        g.add_edge(hub, leaf, weight)
            .expect("star edges connect distinct known nodes");
    }
    (g, hub, spokes)
}

/// Two-tier fixture: a 5-node clique (the core) whose members also link to
/// a 10-node periphery. Core strengths are 9, 8, 7, 6, 5 and every
/// periphery node has strength 1 or 2.
pub fn two_tier_graph(weight: f64) -> (SimilarityGraph, Vec<NodeId>, Vec<NodeId>) {
    let mut g = SimilarityGraph::new();
    let core: Vec<NodeId> = (0..5).map(|i| g.add_node(format!("core-{}", i))).collect();
    let periphery: Vec<NodeId> = (0..10)
        .map(|i| g.add_node(format!("periphery-{}", i)))
        .collect();
    for i in 0..core.len() {
        for j in (i + 1)..core.len() {
            g.add_edge(core[i], core[j], weight)
                .expect("clique edges are valid");
        }
    }
    let spokes: [&[usize]; 5] = [&[0, 1, 2, 3, 4], &[5, 6, 7, 8], &[9, 0, 1], &[2, 3], &[4]];
    for (c, targets) in spokes.iter().enumerate() {
        for &p in targets.iter() {
            g.add_edge(core[c], periphery[p], weight)
                .expect("spoke edges are valid");
        }
    }
    (g, core, periphery)
}
