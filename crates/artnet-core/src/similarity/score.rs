//! Pairwise artist similarity.
//!
//! The score is dimensioned as years of temporal co-presence per known
//! place, scaled by how much the two artists' attributes overlap:
//!
//! ```text
//! score = (C / |places1| + C / |places2|) / 2 * p
//! ```
//!
//! where `C` is the number of shared integer years (lifespan or active span)
//! and `p` the attribute overlap. Either factor being zero zeroes the score.

use super::attributes::{ArtistRecord, AttributeBundle};
use super::years::{fix_years, RepairOptions, RepairedYears};

/// Overlap contributed by each pair of identical places.
pub const PLACE_MATCH: f64 = 1.0;
/// Overlap contributed by identical birthplaces.
pub const BIRTHPLACE_MATCH: f64 = 1.0;
/// Overlap contributed by identical citizenship, or shared out over the
/// nationality pairs when both citizenships are known but differ.
pub const AFFILIATION_MATCH: f64 = 0.3;

/// Scoring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityConfig {
    /// Count shared active years instead of shared lifetime years.
    pub active_years_only: bool,
    pub repair: RepairOptions,
    /// Batch construction only keeps pairs scoring strictly above this.
    pub min_weight: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            active_years_only: false,
            repair: RepairOptions::default(),
            min_weight: 0.0,
        }
    }
}

impl SimilarityConfig {
    pub fn with_active_years_only(mut self, active_only: bool) -> Self {
        self.active_years_only = active_only;
        self
    }

    pub fn with_repair(mut self, repair: RepairOptions) -> Self {
        self.repair = repair;
        self
    }

    pub fn with_min_weight(mut self, min_weight: f64) -> Self {
        self.min_weight = min_weight;
        self
    }
}

/// Attribute overlap `p` between two bundles. Terms whose attribute is
/// unknown on either side are skipped.
pub fn attribute_overlap(a: &AttributeBundle, b: &AttributeBundle) -> f64 {
    let mut p = 0.0;

    if let (Some(places1), Some(places2)) = (&a.places, &b.places) {
        for place1 in places1 {
            for place2 in places2 {
                if place1 == place2 {
                    p += PLACE_MATCH;
                }
            }
        }
    }

    if let (Some(bp1), Some(bp2)) = (&a.birthplace, &b.birthplace) {
        if bp1 == bp2 {
            p += BIRTHPLACE_MATCH;
        }
    }

    // nationality only stands in when both citizenships are known and differ
    if let (Some(c1), Some(c2)) = (&a.citizenship, &b.citizenship) {
        if c1 == c2 {
            p += AFFILIATION_MATCH;
        } else if let (Some(nat1), Some(nat2)) = (&a.nationality, &b.nationality) {
            // empty lists never enter the loop, so the share is never 0/0
            let share = AFFILIATION_MATCH / (nat1.len() * nat2.len()) as f64;
            for n1 in nat1 {
                for n2 in nat2 {
                    if n1 == n2 {
                        p += share;
                    }
                }
            }
        }
    }

    p
}

/// Number of integer years shared by two closed year intervals.
///
/// The interval that starts first is truncated to whole years and each of
/// its years lying inside the other interval counts once.
pub fn common_integer_years(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (first, second) = if a.0 > b.0 { (b, a) } else { (a, b) };
    let start = first.0.trunc().max(second.0.ceil());
    let end = first.1.trunc().min(second.1.floor());
    if end < start {
        0.0
    } else {
        end - start + 1.0
    }
}

/// Similarity of two artists from their repaired years and attributes.
pub fn loc_similarity(
    years1: &RepairedYears,
    attrs1: &AttributeBundle,
    years2: &RepairedYears,
    attrs2: &AttributeBundle,
    config: &SimilarityConfig,
) -> f64 {
    let p = attribute_overlap(attrs1, attrs2);

    let common = if config.active_years_only {
        common_integer_years(years1.active_span(), years2.active_span())
    } else {
        common_integer_years(years1.lifespan(), years2.lifespan())
    };

    let per_place = |attrs: &AttributeBundle| match attrs.place_count() {
        0 => 0.0,
        n => common / n as f64,
    };

    (per_place(attrs1) + per_place(attrs2)) / 2.0 * p
}

/// Scores artist records under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    config: SimilarityConfig,
}

impl SimilarityScorer {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Repairs a record's years under this scorer's options.
    pub fn repair(&self, record: &ArtistRecord) -> Option<RepairedYears> {
        fix_years(record.years, &self.config.repair).repaired()
    }

    /// Scores two records, or `None` when either timeline is invalid.
    pub fn score(&self, a: &ArtistRecord, b: &ArtistRecord) -> Option<f64> {
        let years_a = self.repair(a)?;
        let years_b = self.repair(b)?;
        Some(self.score_repaired(&years_a, &a.attributes, &years_b, &b.attributes))
    }

    pub fn score_repaired(
        &self,
        years1: &RepairedYears,
        attrs1: &AttributeBundle,
        years2: &RepairedYears,
        attrs2: &AttributeBundle,
    ) -> f64 {
        loc_similarity(years1, attrs1, years2, attrs2, &self.config)
    }
}
