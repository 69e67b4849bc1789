//! # Artnet Core
//!
//! Builds a weighted similarity graph over a population of artists from
//! partially-missing biographical attributes, and analyzes its structure.
//!
//! - **similarity**: year repair, pairwise scoring, batch network construction
//! - **graph**: the weighted-graph capability trait and in-memory graph
//! - **filters**: threshold and disparity filtering
//! - **metrics**: clustering, assortativity, rich-club, rich-core, summaries
//! - **partition**: Rand/Jaccard comparison and the configuration null model
//! - **population**: descriptive attribute statistics
//!
//! Everything runs in memory on the calling thread (optionally on the rayon
//! pool with the `parallel` feature). Filters mutate the graph they are
//! given; `rich_core` works on its own copy.

pub mod errors;
pub mod filters;
pub mod graph;
pub mod metrics;
pub mod partition;
pub mod population;
pub mod similarity;

// Re-export commonly used types
pub use errors::AnalysisError;
pub use graph::{NodeId, SimilarityGraph, WeightedGraph};
pub use partition::Partition;
pub use similarity::{
    build_similarity_graph, fix_years, loc_similarity, ArtistRecord, AttributeBundle,
    SimilarityConfig,
};
