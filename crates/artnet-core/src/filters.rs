//! Edge filters that sparsify a similarity graph.
//!
//! - **threshold filter**: hard weight cutoff
//! - **disparity filter**: per-node significance of each edge against a
//!   uniform split of the node's strength (Serrano, Boguñá & Vespignani 2009)
//!
//! The filters that remove anything mutate the graph they are given;
//! clone beforehand to keep the original.

use rustc_hash::FxHashMap;

use crate::errors::AnalysisError;
use crate::graph::WeightedGraph;
use crate::metrics::largest_component_size;

/// Significance probability per directed `(node, neighbor)` pair. An
/// undirected edge has one entry per endpoint.
pub type EdgeProbabilities<N> = FxHashMap<(N, N), f64>;

/// What a destructive filter removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterReport {
    pub edges_removed: usize,
    pub nodes_removed: usize,
}

/// Removes every edge lighter than `threshold`, then every node left without
/// edges. Mutates `graph` in place.
pub fn threshold_filter<G: WeightedGraph>(graph: &mut G, threshold: f64) -> FilterReport {
    let light: Vec<_> = graph
        .weighted_edges()
        .into_iter()
        .filter(|(_, _, w)| *w < threshold)
        .map(|(u, v, _)| (u, v))
        .collect();
    graph.remove_edges(&light);
    let nodes_removed = remove_isolates(graph);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Threshold filter at {}: removed {} edges, {} isolated nodes",
        threshold,
        light.len(),
        nodes_removed
    );

    FilterReport {
        edges_removed: light.len(),
        nodes_removed,
    }
}

/// Disparity-filter probabilities `p = (1 - w/s)^(k-1)` for every edge
/// endpoint, where `k` is the node's degree and `s` its strength.
///
/// A low `p` marks an edge that is unlikely under the node's uniform null
/// model. A node with a single edge always yields `p = 1` (`x^0 = 1`), so its
/// edge is never significant from that side. A node whose strength is zero
/// also yields `p = 1` for each of its edges.
///
/// The map holds one entry per neighbor, so multigraphs are rejected.
pub fn disparity_filter<G: WeightedGraph>(
    graph: &G,
) -> Result<EdgeProbabilities<G::Node>, AnalysisError> {
    if graph.is_multigraph() {
        #[cfg(feature = "tracing")]
        tracing::warn!("disparity_filter called on a multigraph");
        return Err(AnalysisError::UnsupportedGraphKind(
            "disparity filter is not implemented for multigraphs".into(),
        ));
    }
    let mut probas = FxHashMap::default();
    for node in graph.nodes() {
        let edges = graph.incident_edges(node);
        let k = edges.len();
        let strength: f64 = edges.iter().map(|(_, w)| w).sum();
        for (nbr, w) in edges {
            let p = if strength == 0.0 {
                1.0
            } else {
                (1.0 - w / strength).powi(k as i32 - 1)
            };
            probas.insert((node, nbr), p);
        }
    }
    Ok(probas)
}

/// Keeps only edges significant at level `alpha` from at least one endpoint
/// (`p < alpha`), then removes isolated nodes. Mutates `graph` in place;
/// a multigraph is rejected untouched.
pub fn disparity_backbone<G: WeightedGraph>(
    graph: &mut G,
    alpha: f64,
) -> Result<FilterReport, AnalysisError> {
    let probas = disparity_filter(graph)?;
    let significant = |u: G::Node, v: G::Node| probas.get(&(u, v)).is_some_and(|p| *p < alpha);
    let noise: Vec<_> = graph
        .edges()
        .into_iter()
        .filter(|&(u, v)| !significant(u, v) && !significant(v, u))
        .collect();
    graph.remove_edges(&noise);
    let nodes_removed = remove_isolates(graph);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Disparity backbone at alpha={}: removed {} edges, {} isolated nodes",
        alpha,
        noise.len(),
        nodes_removed
    );

    Ok(FilterReport {
        edges_removed: noise.len(),
        nodes_removed,
    })
}

/// Graph size after thresholding at one cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdPoint {
    pub threshold: f64,
    pub edges: usize,
    pub largest_component: usize,
}

/// Edge count and largest-component size after applying each threshold to a
/// fresh copy of `graph`. The input is left untouched.
pub fn threshold_sweep<G: WeightedGraph>(graph: &G, thresholds: &[f64]) -> Vec<ThresholdPoint> {
    thresholds
        .iter()
        .map(|&threshold| {
            let mut copy = graph.clone();
            threshold_filter(&mut copy, threshold);
            ThresholdPoint {
                threshold,
                edges: copy.edge_count(),
                largest_component: largest_component_size(&copy),
            }
        })
        .collect()
}

fn remove_isolates<G: WeightedGraph>(graph: &mut G) -> usize {
    let isolates: Vec<_> = graph
        .nodes()
        .into_iter()
        .filter(|n| graph.degree(*n) == 0)
        .collect();
    graph.remove_nodes(&isolates);
    isolates.len()
}
