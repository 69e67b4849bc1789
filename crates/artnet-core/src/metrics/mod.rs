//! Structural measures over weighted graphs.
//!
//! - **structure**: local clustering and neighbor-degree correlation
//! - **rich**: rich-club coefficient and rich-core extraction
//! - **summary**: components, degree distribution and whole-graph summary
//!
//! Per-node outputs are aligned to the graph's own node enumeration; callers
//! should not assume any other order.

pub mod rich;
pub mod structure;
pub mod summary;

pub use rich::{normalized_rich_club, rich_club_coefficient, rich_core, RichClubPoint, RichCore};
pub use structure::{
    average_knn_per_degree, average_neighbor_degrees, clustering_coefficients, local_clustering,
    neighbor_degree,
};
pub use summary::{
    connected_components, degree_distribution, describe_graph, largest_component_size,
    GraphSummary, GraphSummaryOptions, WeightStats,
};
