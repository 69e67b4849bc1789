//! Rich-club and rich-core analysis.
//!
//! The rich-club coefficient `φ(k)` is the edge density among nodes of
//! degree greater than `k`. Its normalized form divides by the uncorrelated
//! expectation `k² / (N⟨k⟩)`, which only holds in the high-degree limit;
//! entries below the mean degree are flagged as noisy rather than dropped.
//!
//! The rich core (Ma & Mondragón 2015) is the weighted core/periphery split:
//! nodes ranked by strength, each scored by the summed strength of its
//! stronger neighbors, the core ending at the rank where that score peaks.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::errors::AnalysisError;
use crate::graph::WeightedGraph;

/// One entry of the normalized rich-club curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RichClubPoint {
    pub degree: usize,
    pub coefficient: f64,
    /// `degree` is below the mean degree, where the approximation is unreliable.
    pub low_degree: bool,
}

/// Raw rich-club coefficient `φ(k) = 2 E_k / (N_k (N_k - 1))` for every `k`
/// with at least two nodes of degree greater than `k`.
pub fn rich_club_coefficient<G: WeightedGraph>(
    graph: &G,
) -> Result<BTreeMap<usize, f64>, AnalysisError> {
    if graph.is_multigraph() {
        return Err(AnalysisError::UnsupportedGraphKind(
            "rich-club coefficient is not implemented for multigraphs".into(),
        ));
    }
    let degrees: FxHashMap<G::Node, usize> = graph
        .nodes()
        .into_iter()
        .map(|n| (n, graph.degree(n)))
        .collect();
    let max_degree = degrees.values().copied().max().unwrap_or(0);
    // smaller endpoint degree of every edge decides the clubs it belongs to
    let edge_floors: Vec<usize> = graph
        .edges()
        .into_iter()
        .map(|(u, v)| degrees[&u].min(degrees[&v]))
        .collect();

    let mut rc = BTreeMap::new();
    for k in 0..=max_degree {
        let nk = degrees.values().filter(|&&d| d > k).count();
        if nk <= 1 {
            break;
        }
        let ek = edge_floors.iter().filter(|&&d| d > k).count();
        rc.insert(k, 2.0 * ek as f64 / (nk * (nk - 1)) as f64);
    }
    Ok(rc)
}

/// Rich-club coefficient normalized by the uncorrelated-network expectation:
/// with mean degree `d̄` and `f = 1 / (N d̄)`, each `φ(k)` becomes
/// `φ(k) / (f k²)`. `k = 0` is discarded. Empty or edgeless graphs yield an
/// empty curve.
pub fn normalized_rich_club<G: WeightedGraph>(
    graph: &G,
) -> Result<Vec<RichClubPoint>, AnalysisError> {
    let raw = rich_club_coefficient(graph)?;
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }
    let total_degree: usize = graph.nodes().into_iter().map(|v| graph.degree(v)).sum();
    let mean_degree = total_degree as f64 / n as f64;
    if mean_degree == 0.0 {
        return Ok(Vec::new());
    }
    let factor = 1.0 / (n as f64 * mean_degree);

    Ok(raw
        .into_iter()
        .filter(|(k, _)| *k > 0)
        .map(|(k, coef)| {
            let kf = k as f64;
            RichClubPoint {
                degree: k,
                coefficient: coef / (factor * kf * kf),
                low_degree: kf < mean_degree,
            }
        })
        .collect())
}

/// Result of [`rich_core`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RichCore<N> {
    /// Nodes by descending rescaled strength (ties keep enumeration order).
    pub ranked: Vec<N>,
    /// Rescaled strength of each ranked node.
    pub strengths: Vec<f64>,
    /// Summed strength of each ranked node's strictly stronger neighbors.
    pub sigma: Vec<f64>,
    /// 1-based rank at which `sigma` peaks (first occurrence); the core is
    /// `ranked[..boundary]`.
    pub boundary: usize,
}

impl<N> RichCore<N> {
    pub fn core(&self) -> &[N] {
        &self.ranked[..self.boundary]
    }

    pub fn periphery(&self) -> &[N] {
        &self.ranked[self.boundary..]
    }
}

/// Extracts the rich core of a weighted simple graph.
///
/// Works on a copy: edge weights are divided by the smallest edge weight
/// (missing weights read as 1) so strengths are in units of the weakest
/// link. The caller's graph is never modified.
pub fn rich_core<G: WeightedGraph>(graph: &G) -> Result<RichCore<G::Node>, AnalysisError> {
    if graph.is_multigraph() {
        #[cfg(feature = "tracing")]
        tracing::warn!("rich_core called on a multigraph");
        return Err(AnalysisError::UnsupportedGraphKind(
            "rich-core extraction is not implemented for multigraphs".into(),
        ));
    }

    let mut scaled = graph.clone();
    let min_weight = scaled
        .weighted_edges()
        .into_iter()
        .map(|(_, _, w)| w)
        .min_by(f64::total_cmp);
    if let Some(min_weight) = min_weight {
        if min_weight <= 0.0 {
            return Err(AnalysisError::UndefinedRatio(format!(
                "cannot rescale by non-positive minimum edge weight {}",
                min_weight
            )));
        }
        scaled.rescale_weights(min_weight);
    }

    let strength: FxHashMap<G::Node, f64> = scaled
        .nodes()
        .into_iter()
        .map(|n| (n, scaled.strength(n)))
        .collect();
    let mut ranked = scaled.nodes();
    ranked.sort_by(|a, b| strength[b].total_cmp(&strength[a]));

    let sigma: Vec<f64> = ranked
        .iter()
        .map(|&node| {
            let own = strength[&node];
            scaled
                .neighbors(node)
                .into_iter()
                .map(|nbr| strength[&nbr])
                .filter(|&s| s > own)
                .sum()
        })
        .collect();

    let mut boundary = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, &s) in sigma.iter().enumerate() {
        if s > best {
            best = s;
            boundary = i + 1;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Rich core: {} of {} nodes (peak sigma {:.3})",
        boundary,
        ranked.len(),
        best
    );

    let strengths = ranked.iter().map(|n| strength[n]).collect();
    Ok(RichCore {
        ranked,
        strengths,
        sigma,
        boundary,
    })
}
