//! Artist-to-artist similarity scoring.
//!
//! - **years**: timeline validation and gap repair
//! - **attributes**: per-artist location and affiliation attributes
//! - **score**: the pairwise similarity formula
//! - **network**: batch scoring of a population into a weighted graph

pub mod attributes;
pub mod network;
pub mod score;
pub mod years;

pub use attributes::{ArtistRecord, AttributeBundle};
pub use network::{build_similarity_graph, SimilarityNetwork};
pub use score::{loc_similarity, SimilarityConfig, SimilarityScorer};
pub use years::{fix_years, RepairOptions, RepairOutcome, RepairedYears, YearRecord};
