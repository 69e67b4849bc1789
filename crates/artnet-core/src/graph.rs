//! # Weighted Undirected Graphs
//!
//! The analyses in this crate only need a small capability surface from a
//! graph: node and edge enumeration, degree and strength, neighbor lookup,
//! destructive removal and induced subgraphs. That surface is the
//! [`WeightedGraph`] trait, so any graph container can be plugged in.
//!
//! [`SimilarityGraph`] is the in-memory implementation used throughout the
//! crate. It keeps nodes in insertion order, which is the enumeration order
//! every per-node result is aligned to, and stores adjacency as sorted
//! per-node maps so edge enumeration is deterministic.
//!
//! ## Example
//!
//! ```rust
//! use artnet_core::graph::{SimilarityGraph, WeightedGraph};
//!
//! let mut g = SimilarityGraph::new();
//! let a = g.add_node("Hilma af Klint");
//! let b = g.add_node("Wassily Kandinsky");
//! g.add_edge(a, b, 12.5).unwrap();
//! assert_eq!(g.strength(a), 12.5);
//! ```

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::errors::AnalysisError;

/// Weight assumed for edges that carry none.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Capability interface required of any graph handed to the analyses.
///
/// Edges are undirected. Enumeration order must be stable between calls as
/// long as the graph is not mutated; per-node outputs are aligned to
/// [`WeightedGraph::nodes`].
pub trait WeightedGraph: Clone {
    /// Node identifier type.
    type Node: Copy + Eq + Hash + Ord + Debug + Send + Sync;

    /// All nodes, in the graph's own enumeration order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// Number of nodes.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Every undirected edge once, as `(u, v)`.
    fn edges(&self) -> Vec<(Self::Node, Self::Node)>;

    /// Every undirected edge once with its weight; missing weights read as
    /// [`DEFAULT_WEIGHT`].
    fn weighted_edges(&self) -> Vec<(Self::Node, Self::Node, f64)>;

    /// Number of undirected edges (parallel edges counted separately).
    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Number of incident edges.
    fn degree(&self, node: Self::Node) -> usize;

    /// Sum of incident edge weights (weighted degree).
    fn strength(&self, node: Self::Node) -> f64;

    /// Distinct neighbors of `node`.
    fn neighbors(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Incident edges of `node` as `(neighbor, weight)`, one entry per edge.
    fn incident_edges(&self, node: Self::Node) -> Vec<(Self::Node, f64)>;

    /// Whether at least one edge joins `u` and `v`.
    fn has_edge(&self, u: Self::Node, v: Self::Node) -> bool;

    /// Removes every listed edge (all parallel copies). Unknown edges are ignored.
    fn remove_edges(&mut self, edges: &[(Self::Node, Self::Node)]);

    /// Removes every listed node and its incident edges. Unknown nodes are ignored.
    fn remove_nodes(&mut self, nodes: &[Self::Node]);

    /// Induced subgraph over `nodes` (unknown ids are ignored).
    fn subgraph(&self, nodes: &[Self::Node]) -> Self;

    /// Whether parallel edges are permitted.
    fn is_multigraph(&self) -> bool;

    /// Replaces every edge weight `w` by `w / divisor`, reading missing
    /// weights as [`DEFAULT_WEIGHT`].
    fn rescale_weights(&mut self, divisor: f64);
}

/// A unique identifier for a node in a [`SimilarityGraph`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

/// Weights of the edge(s) between two nodes. Simple graphs hold exactly one
/// entry; multigraphs hold one per parallel edge.
type EdgeWeights = SmallVec<[Option<f64>; 1]>;

/// In-memory weighted undirected graph of artists.
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    multigraph: bool,
    next_id: u32,
    order: Vec<NodeId>,
    labels: FxHashMap<NodeId, Arc<str>>,
    adjacency: FxHashMap<NodeId, BTreeMap<NodeId, EdgeWeights>>,
}

impl SimilarityGraph {
    /// Creates an empty simple graph. Re-adding an edge replaces its weight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty multigraph. Re-adding an edge adds a parallel edge.
    pub fn multigraph() -> Self {
        Self {
            multigraph: true,
            ..Self::default()
        }
    }

    /// Adds a node with the given label and returns its id.
    pub fn add_node(&mut self, label: impl Into<Arc<str>>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.order.push(id);
        self.labels.insert(id, label.into());
        self.adjacency.insert(id, BTreeMap::new());
        id
    }

    /// Label of `node`, if present.
    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.labels.get(&node).map(|l| l.as_ref())
    }

    /// First node (in enumeration order) carrying `label`.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.label(*id) == Some(label))
    }

    /// Whether `node` is part of the graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Adds a weighted undirected edge.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f64) -> Result<(), AnalysisError> {
        if !weight.is_finite() {
            return Err(AnalysisError::InvalidGraph(format!(
                "edge {:?}-{:?} has non-finite weight {}",
                u, v, weight
            )));
        }
        self.insert_edge(u, v, Some(weight))
    }

    /// Adds an undirected edge without a weight attribute.
    pub fn add_unweighted_edge(&mut self, u: NodeId, v: NodeId) -> Result<(), AnalysisError> {
        self.insert_edge(u, v, None)
    }

    /// Weight of the edge between `u` and `v`; for multigraphs the first
    /// parallel edge. Missing weights read as [`DEFAULT_WEIGHT`].
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.adjacency
            .get(&u)
            .and_then(|nbrs| nbrs.get(&v))
            .and_then(|ws| ws.first())
            .map(|w| w.unwrap_or(DEFAULT_WEIGHT))
    }

    fn insert_edge(&mut self, u: NodeId, v: NodeId, weight: Option<f64>) -> Result<(), AnalysisError> {
        if u == v {
            return Err(AnalysisError::InvalidGraph(format!(
                "self loop on {:?} is not allowed",
                u
            )));
        }
        for n in [u, v] {
            if !self.contains(n) {
                return Err(AnalysisError::InvalidGraph(format!("unknown node {:?}", n)));
            }
        }
        let multigraph = self.multigraph;
        for (a, b) in [(u, v), (v, u)] {
            let weights = self
                .adjacency
                .get_mut(&a)
                .map(|nbrs| nbrs.entry(b).or_default());
            if let Some(weights) = weights {
                if multigraph || weights.is_empty() {
                    weights.push(weight);
                } else {
                    weights[0] = weight;
                }
            }
        }
        Ok(())
    }

    fn each_edge(&self, mut f: impl FnMut(NodeId, NodeId, Option<f64>)) {
        for &u in &self.order {
            if let Some(nbrs) = self.adjacency.get(&u) {
                for (&v, weights) in nbrs.range(u..) {
                    for &w in weights {
                        f(u, v, w);
                    }
                }
            }
        }
    }
}

impl WeightedGraph for SimilarityGraph {
    type Node = NodeId;

    fn nodes(&self) -> Vec<NodeId> {
        self.order.clone()
    }

    fn node_count(&self) -> usize {
        self.order.len()
    }

    fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        self.each_edge(|u, v, _| out.push((u, v)));
        out
    }

    fn weighted_edges(&self) -> Vec<(NodeId, NodeId, f64)> {
        let mut out = Vec::new();
        self.each_edge(|u, v, w| out.push((u, v, w.unwrap_or(DEFAULT_WEIGHT))));
        out
    }

    fn edge_count(&self) -> usize {
        let endpoints: usize = self
            .adjacency
            .values()
            .flat_map(|nbrs| nbrs.values())
            .map(|ws| ws.len())
            .sum();
        endpoints / 2
    }

    fn degree(&self, node: NodeId) -> usize {
        self.adjacency
            .get(&node)
            .map(|nbrs| nbrs.values().map(|ws| ws.len()).sum())
            .unwrap_or(0)
    }

    fn strength(&self, node: NodeId) -> f64 {
        self.adjacency
            .get(&node)
            .map(|nbrs| {
                nbrs.values()
                    .flat_map(|ws| ws.iter())
                    .map(|w| w.unwrap_or(DEFAULT_WEIGHT))
                    .sum()
            })
            .unwrap_or(0.0)
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.adjacency
            .get(&node)
            .map(|nbrs| nbrs.keys().copied().collect())
            .unwrap_or_default()
    }

    fn incident_edges(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        let Some(nbrs) = self.adjacency.get(&node) else {
            return Vec::new();
        };
        nbrs.iter()
            .flat_map(|(&v, ws)| ws.iter().map(move |w| (v, w.unwrap_or(DEFAULT_WEIGHT))))
            .collect()
    }

    fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency
            .get(&u)
            .is_some_and(|nbrs| nbrs.contains_key(&v))
    }

    fn remove_edges(&mut self, edges: &[(NodeId, NodeId)]) {
        for &(u, v) in edges {
            if let Some(nbrs) = self.adjacency.get_mut(&u) {
                nbrs.remove(&v);
            }
            if let Some(nbrs) = self.adjacency.get_mut(&v) {
                nbrs.remove(&u);
            }
        }
    }

    fn remove_nodes(&mut self, nodes: &[NodeId]) {
        let doomed: FxHashSet<NodeId> = nodes.iter().copied().collect();
        for node in &doomed {
            if let Some(nbrs) = self.adjacency.remove(node) {
                for v in nbrs.keys() {
                    if let Some(back) = self.adjacency.get_mut(v) {
                        back.remove(node);
                    }
                }
            }
            self.labels.remove(node);
        }
        self.order.retain(|n| !doomed.contains(n));
    }

    fn subgraph(&self, nodes: &[NodeId]) -> Self {
        let keep: FxHashSet<NodeId> = nodes
            .iter()
            .copied()
            .filter(|n| self.contains(*n))
            .collect();
        let mut adjacency = FxHashMap::default();
        let mut labels = FxHashMap::default();
        for n in &keep {
            let nbrs: BTreeMap<NodeId, EdgeWeights> = self.adjacency[n]
                .iter()
                .filter(|(v, _)| keep.contains(v))
                .map(|(v, ws)| (*v, ws.clone()))
                .collect();
            adjacency.insert(*n, nbrs);
            if let Some(label) = self.labels.get(n) {
                labels.insert(*n, label.clone());
            }
        }
        Self {
            multigraph: self.multigraph,
            next_id: self.next_id,
            order: self
                .order
                .iter()
                .copied()
                .filter(|n| keep.contains(n))
                .collect(),
            labels,
            adjacency,
        }
    }

    fn is_multigraph(&self) -> bool {
        self.multigraph
    }

    fn rescale_weights(&mut self, divisor: f64) {
        for nbrs in self.adjacency.values_mut() {
            for weights in nbrs.values_mut() {
                for w in weights.iter_mut() {
                    *w = Some(w.unwrap_or(DEFAULT_WEIGHT) / divisor);
                }
            }
        }
    }
}
