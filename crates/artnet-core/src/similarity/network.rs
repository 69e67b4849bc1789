//! Batch construction of the artist similarity network.
//!
//! Every pair of valid records is scored (O(n²) pairs). Records whose
//! timeline fails repair are skipped and reported; they never abort the
//! batch. With the `parallel` feature the rows of the pair matrix are
//! scored on the rayon pool and collected in row order, so the resulting
//! graph is identical to the sequential one.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::attributes::ArtistRecord;
use super::score::{SimilarityConfig, SimilarityScorer};
use super::years::RepairedYears;
use crate::errors::AnalysisError;
use crate::graph::{NodeId, SimilarityGraph};

/// Output of [`build_similarity_graph`].
#[derive(Debug, Clone)]
pub struct SimilarityNetwork {
    pub graph: SimilarityGraph,
    /// Names of records excluded because their years were invalid.
    pub skipped: Vec<String>,
    /// Number of pairs that were scored.
    pub pairs_scored: usize,
}

/// Scores every pair of records and keeps edges weighing more than
/// `config.min_weight`.
pub fn build_similarity_graph(
    records: &[ArtistRecord],
    config: &SimilarityConfig,
) -> Result<SimilarityNetwork, AnalysisError> {
    let scorer = SimilarityScorer::new(*config);
    let mut graph = SimilarityGraph::new();
    let mut skipped = Vec::new();
    let mut valid: Vec<(NodeId, RepairedYears, &ArtistRecord)> = Vec::new();

    for record in records {
        match scorer.repair(record) {
            Some(years) => {
                let id = graph.add_node(record.name.as_str());
                valid.push((id, years, record));
            }
            None => skipped.push(record.name.clone()),
        }
    }

    let score_row = |i: usize| -> Vec<(NodeId, NodeId, f64)> {
        let (u, years_u, rec_u) = &valid[i];
        valid[i + 1..]
            .iter()
            .map(|(v, years_v, rec_v)| {
                let w = scorer.score_repaired(years_u, &rec_u.attributes, years_v, &rec_v.attributes);
                (*u, *v, w)
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let scored: Vec<(NodeId, NodeId, f64)> = (0..valid.len())
        .into_par_iter()
        .flat_map_iter(score_row)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let scored: Vec<(NodeId, NodeId, f64)> = (0..valid.len()).flat_map(score_row).collect();

    let pairs_scored = scored.len();
    for (u, v, w) in scored {
        if w > config.min_weight {
            graph.add_edge(u, v, w)?;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Similarity network: {} records, {} skipped, {} pairs scored, {} edges kept",
        records.len(),
        skipped.len(),
        pairs_scored,
        crate::graph::WeightedGraph::edge_count(&graph)
    );

    Ok(SimilarityNetwork {
        graph,
        skipped,
        pairs_scored,
    })
}
