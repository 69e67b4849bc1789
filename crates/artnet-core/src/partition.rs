//! Partition comparison and the randomized configuration baseline.
//!
//! Two partitions of the same node set are compared pair by pair: every
//! unordered node pair is either grouped together or apart in each
//! partition, giving the four agreement counts behind the Rand and Jaccard
//! indices. Counting is O(n²) in the number of nodes; with the `parallel`
//! feature rows are counted on the rayon pool (integer sums, so the result
//! is identical to the sequential count).

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::errors::AnalysisError;
use crate::graph::WeightedGraph;

/// Maps every node to the index of the group containing it.
///
/// Fails when a node is listed more than once (in one group or across
/// groups), since its community would be ambiguous.
pub fn community_lookup<N>(groups: &[Vec<N>]) -> Result<FxHashMap<N, usize>, AnalysisError>
where
    N: Copy + Eq + Hash + Debug,
{
    let mut lookup = FxHashMap::default();
    for (idx, group) in groups.iter().enumerate() {
        for &node in group {
            if let Some(previous) = lookup.insert(node, idx) {
                return Err(AnalysisError::InvalidPartition(format!(
                    "node {:?} appears in community {} and community {}",
                    node, previous, idx
                )));
            }
        }
    }
    Ok(lookup)
}

/// Disjoint grouping of nodes into communities.
#[derive(Debug, Clone)]
pub struct Partition<N> {
    groups: Vec<Vec<N>>,
    lookup: FxHashMap<N, usize>,
}

// lookup is derived from groups
impl<N: PartialEq> PartialEq for Partition<N> {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<N: Eq> Eq for Partition<N> {}

impl<N> Partition<N>
where
    N: Copy + Eq + Hash + Ord + Debug,
{
    /// Builds a partition, rejecting nodes listed more than once.
    pub fn new(groups: Vec<Vec<N>>) -> Result<Self, AnalysisError> {
        let lookup = community_lookup(&groups)?;
        Ok(Self { groups, lookup })
    }

    /// Every node in a community of its own.
    pub fn singletons(nodes: impl IntoIterator<Item = N>) -> Result<Self, AnalysisError> {
        Self::new(nodes.into_iter().map(|n| vec![n]).collect())
    }

    pub fn groups(&self) -> &[Vec<N>] {
        &self.groups
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    pub fn node_count(&self) -> usize {
        self.lookup.len()
    }

    /// Community index of `node`, or `None` if it belongs to no group.
    pub fn community_of(&self, node: N) -> Option<usize> {
        self.lookup.get(&node).copied()
    }

    pub fn lookup(&self) -> &FxHashMap<N, usize> {
        &self.lookup
    }

    /// All nodes in ascending order.
    pub fn sorted_nodes(&self) -> Vec<N> {
        let mut nodes: Vec<N> = self.lookup.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }
}

/// Pair counts of two partitions. `a10` counts pairs together only in the
/// first partition, `a01` pairs together only in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgreementCounts {
    pub a00: u64,
    pub a01: u64,
    pub a10: u64,
    pub a11: u64,
}

impl Add for AgreementCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            a00: self.a00 + rhs.a00,
            a01: self.a01 + rhs.a01,
            a10: self.a10 + rhs.a10,
            a11: self.a11 + rhs.a11,
        }
    }
}

impl AgreementCounts {
    pub fn total(&self) -> u64 {
        self.a00 + self.a01 + self.a10 + self.a11
    }

    /// `(a00 + a11) / total`; `None` with fewer than two nodes.
    pub fn rand_index(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| (self.a00 + self.a11) as f64 / total as f64)
    }

    /// `a11 / (a01 + a10 + a11)`; `None` when no pair is grouped together in
    /// either partition.
    pub fn jaccard_index(&self) -> Option<f64> {
        let together = self.a01 + self.a10 + self.a11;
        (together > 0).then(|| self.a11 as f64 / together as f64)
    }

    fn record(&mut self, together1: bool, together2: bool) {
        match (together1, together2) {
            (true, true) => self.a11 += 1,
            (true, false) => self.a10 += 1,
            (false, true) => self.a01 += 1,
            (false, false) => self.a00 += 1,
        }
    }
}

/// Classifies every unordered node pair by co-membership in `p1` and `p2`.
///
/// Both partitions must cover exactly the same nodes.
pub fn agreement_counts<N>(p1: &Partition<N>, p2: &Partition<N>) -> Result<AgreementCounts, AnalysisError>
where
    N: Copy + Eq + Hash + Ord + Debug + Send + Sync,
{
    ensure_same_nodes(p1, p2)?;

    let labels: Vec<(usize, usize)> = p1
        .sorted_nodes()
        .into_iter()
        .map(|n| (p1.lookup[&n], p2.lookup[&n]))
        .collect();

    let count_row = |i: usize| {
        let (c1, c2) = labels[i];
        let mut row = AgreementCounts::default();
        for &(d1, d2) in &labels[i + 1..] {
            row.record(c1 == d1, c2 == d2);
        }
        row
    };

    #[cfg(feature = "parallel")]
    let counts = (0..labels.len())
        .into_par_iter()
        .map(count_row)
        .reduce(AgreementCounts::default, |a, b| a + b);

    #[cfg(not(feature = "parallel"))]
    let counts = (0..labels.len())
        .map(count_row)
        .fold(AgreementCounts::default(), |a, b| a + b);

    Ok(counts)
}

fn ensure_same_nodes<N>(p1: &Partition<N>, p2: &Partition<N>) -> Result<(), AnalysisError>
where
    N: Copy + Eq + Hash + Ord + Debug,
{
    let mut only_first: Vec<N> = p1
        .lookup
        .keys()
        .copied()
        .filter(|n| !p2.lookup.contains_key(n))
        .collect();
    let mut only_second: Vec<N> = p2
        .lookup
        .keys()
        .copied()
        .filter(|n| !p1.lookup.contains_key(n))
        .collect();
    if only_first.is_empty() && only_second.is_empty() {
        return Ok(());
    }
    only_first.sort_unstable();
    only_second.sort_unstable();

    #[cfg(feature = "tracing")]
    tracing::warn!(
        "Partition node sets differ: {} only in first, {} only in second",
        only_first.len(),
        only_second.len()
    );

    Err(AnalysisError::PartitionMismatch(format!(
        "partitions cover different nodes: only in first {:?}, only in second {:?}",
        only_first, only_second
    )))
}

/// Rand index of two partitions; `Ok(None)` with fewer than two nodes.
pub fn rand_index<N>(p1: &Partition<N>, p2: &Partition<N>) -> Result<Option<f64>, AnalysisError>
where
    N: Copy + Eq + Hash + Ord + Debug + Send + Sync,
{
    Ok(agreement_counts(p1, p2)?.rand_index())
}

/// Jaccard index of two partitions; `Ok(None)` when every node is a
/// singleton in both.
pub fn jaccard_index<N>(p1: &Partition<N>, p2: &Partition<N>) -> Result<Option<f64>, AnalysisError>
where
    N: Copy + Eq + Hash + Ord + Debug + Send + Sync,
{
    Ok(agreement_counts(p1, p2)?.jaccard_index())
}

/// Shuffles node identities across communities while keeping the community
/// sizes and their order. The shuffle uses its own generator seeded with
/// `seed`; equal seeds give equal partitions.
pub fn randomized_configuration<N>(partition: &Partition<N>, seed: u64) -> Partition<N>
where
    N: Copy + Eq + Hash + Ord + Debug,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut flat: Vec<N> = partition.groups.iter().flatten().copied().collect();
    flat.shuffle(&mut rng);

    let mut rest = flat.as_slice();
    let groups: Vec<Vec<N>> = partition
        .groups
        .iter()
        .map(|g| {
            let (head, tail) = rest.split_at(g.len());
            rest = tail;
            head.to_vec()
        })
        .collect();
    let lookup = groups
        .iter()
        .enumerate()
        .flat_map(|(idx, g)| g.iter().map(move |&n| (n, idx)))
        .collect();
    Partition { groups, lookup }
}

/// Number of edges whose endpoints share a community. Edges touching nodes
/// outside the partition are ignored.
pub fn internal_edge_count<G: WeightedGraph>(graph: &G, partition: &Partition<G::Node>) -> usize {
    graph
        .edges()
        .into_iter()
        .filter(|(u, v)| match (partition.community_of(*u), partition.community_of(*v)) {
            (Some(cu), Some(cv)) => cu == cv,
            _ => false,
        })
        .count()
}

/// Observed internal edge count against its randomized-configuration mean.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NullModelBaseline {
    pub observed: usize,
    pub randomized_mean: f64,
    /// `observed / randomized_mean`; `None` when the randomized partitions
    /// hold no internal edges. Above 1 means denser than chance.
    pub ratio: Option<f64>,
}

/// Coreness correction: internal edge count of `partition` divided by the
/// mean internal edge count of `trials` randomized configurations seeded
/// `seed, seed + 1, ...`.
pub fn coreness_correction<G: WeightedGraph>(
    graph: &G,
    partition: &Partition<G::Node>,
    seed: u64,
    trials: usize,
) -> Result<NullModelBaseline, AnalysisError> {
    if trials == 0 {
        return Err(AnalysisError::UndefinedRatio(
            "coreness correction needs at least one randomized trial".into(),
        ));
    }
    let observed = internal_edge_count(graph, partition);
    let randomized_total: usize = (0..trials as u64)
        .map(|t| {
            let shuffled = randomized_configuration(partition, seed.wrapping_add(t));
            internal_edge_count(graph, &shuffled)
        })
        .sum();
    let randomized_mean = randomized_total as f64 / trials as f64;
    let ratio = (randomized_mean > 0.0).then(|| observed as f64 / randomized_mean);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Coreness correction: observed {} internal edges, randomized mean {:.3} over {} trials",
        observed,
        randomized_mean,
        trials
    );

    Ok(NullModelBaseline {
        observed,
        randomized_mean,
        ratio,
    })
}
