//! Whole-graph descriptive statistics.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::WeightedGraph;

/// Connected components in discovery order (each in BFS order).
pub fn connected_components<G: WeightedGraph>(graph: &G) -> Vec<Vec<G::Node>> {
    let mut seen: FxHashSet<G::Node> = FxHashSet::default();
    let mut components = Vec::new();
    for start in graph.nodes() {
        if !seen.insert(start) {
            continue;
        }
        let mut component = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for nbr in graph.neighbors(node) {
                if seen.insert(nbr) {
                    component.push(nbr);
                    queue.push_back(nbr);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Size of the largest connected component (0 for an empty graph).
pub fn largest_component_size<G: WeightedGraph>(graph: &G) -> usize {
    connected_components(graph)
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
}

/// Number of nodes per degree.
pub fn degree_distribution<G: WeightedGraph>(graph: &G) -> BTreeMap<usize, usize> {
    let mut dist = BTreeMap::new();
    for node in graph.nodes() {
        *dist.entry(graph.degree(node)).or_insert(0) += 1;
    }
    dist
}

/// Hop distances from `source` to every reachable node.
fn bfs_distances<G: WeightedGraph>(graph: &G, source: G::Node) -> FxHashMap<G::Node, usize> {
    let mut dist = FxHashMap::default();
    dist.insert(source, 0);
    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        let d = dist[&node];
        for nbr in graph.neighbors(node) {
            if !dist.contains_key(&nbr) {
                dist.insert(nbr, d + 1);
                queue.push_back(nbr);
            }
        }
    }
    dist
}

/// What [`describe_graph`] computes beyond the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSummaryOptions {
    pub weights: bool,
    /// All-pairs BFS over the largest component; O(n·m).
    pub shortest_paths: bool,
}

impl Default for GraphSummaryOptions {
    fn default() -> Self {
        Self {
            weights: true,
            shortest_paths: true,
        }
    }
}

/// Mean, minimum and maximum edge weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    /// `None` when weights were not requested or the graph has no edges.
    pub weights: Option<WeightStats>,
    pub components: usize,
    /// Components with more than one node.
    pub nontrivial_components: usize,
    pub largest_component: usize,
    /// Mean hop distance over connected node pairs of the largest component.
    pub average_shortest_path: Option<f64>,
    /// Longest hop distance within the largest component.
    pub diameter: Option<usize>,
}

/// Summarizes size, weights, connectivity and path lengths of `graph`.
pub fn describe_graph<G: WeightedGraph>(graph: &G, options: GraphSummaryOptions) -> GraphSummary {
    let weights = if options.weights {
        weight_stats(graph)
    } else {
        None
    };

    let components = connected_components(graph);
    let largest = components.iter().max_by_key(|c| c.len());

    let (average_shortest_path, diameter) = match largest {
        Some(lcc) if options.shortest_paths => {
            let sub = graph.subgraph(lcc);
            let mut total = 0usize;
            let mut pairs = 0usize;
            let mut longest = 0usize;
            for &source in lcc {
                for (_, d) in bfs_distances(&sub, source) {
                    if d > 0 {
                        total += d;
                        pairs += 1;
                        longest = longest.max(d);
                    }
                }
            }
            let average = (pairs > 0).then(|| total as f64 / pairs as f64);
            (average, Some(longest))
        }
        _ => (None, None),
    };

    GraphSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        weights,
        components: components.len(),
        nontrivial_components: components.iter().filter(|c| c.len() > 1).count(),
        largest_component: largest.map_or(0, Vec::len),
        average_shortest_path,
        diameter,
    }
}

fn weight_stats<G: WeightedGraph>(graph: &G) -> Option<WeightStats> {
    let weights: Vec<f64> = graph
        .weighted_edges()
        .into_iter()
        .map(|(_, _, w)| w)
        .collect();
    if weights.is_empty() {
        return None;
    }
    let sum: f64 = weights.iter().sum();
    Some(WeightStats {
        mean: sum / weights.len() as f64,
        min: weights.iter().copied().fold(f64::INFINITY, f64::min),
        max: weights.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of nodes: {}", self.nodes)?;
        writeln!(f, "Number of edges: {}", self.edges)?;
        if let Some(w) = &self.weights {
            writeln!(f, "Average edge weight: {}", w.mean)?;
            writeln!(f, "Smallest edge weight: {}", w.min)?;
            writeln!(f, "Largest edge weight: {}", w.max)?;
        }
        writeln!(
            f,
            "Number of connected components: {} ({} with more than one node)",
            self.components, self.nontrivial_components
        )?;
        write!(f, "Size of largest connected component: {}", self.largest_component)?;
        if let Some(avg) = self.average_shortest_path {
            write!(f, "\nAverage shortest path length: {:.2}", avg)?;
        }
        if let Some(d) = self.diameter {
            write!(f, "\nDiameter: {}", d)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimilarityGraph;

    /// Path a-b-c plus a separate edge d-e and an isolated f.
    fn forest() -> SimilarityGraph {
        let mut g = SimilarityGraph::new();
        let ids: Vec<_> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|l| g.add_node(*l))
            .collect();
        g.add_edge(ids[0], ids[1], 2.0).unwrap();
        g.add_edge(ids[1], ids[2], 4.0).unwrap();
        g.add_edge(ids[3], ids[4], 6.0).unwrap();
        g
    }

    #[test]
    fn components_in_discovery_order() {
        let g = forest();
        let sizes: Vec<usize> = connected_components(&g).iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert_eq!(largest_component_size(&g), 3);
    }

    #[test]
    fn degree_histogram() {
        let g = forest();
        let dist = degree_distribution(&g);
        assert_eq!(dist.into_iter().collect::<Vec<_>>(), vec![(0, 1), (1, 4), (2, 1)]);
    }

    #[test]
    fn summary_of_forest() {
        let s = describe_graph(&forest(), GraphSummaryOptions::default());
        assert_eq!(s.nodes, 6);
        assert_eq!(s.edges, 3);
        assert_eq!(
            s.weights,
            Some(WeightStats {
                mean: 4.0,
                min: 2.0,
                max: 6.0
            })
        );
        assert_eq!(s.components, 3);
        assert_eq!(s.nontrivial_components, 2);
        assert_eq!(s.largest_component, 3);
        // ordered pairs in the path: 1,2,1,1,2,1 -> 8/6
        assert!((s.average_shortest_path.unwrap() - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.diameter, Some(2));
        assert!(s.to_string().contains("Diameter: 2"));
    }

    #[test]
    fn summary_without_extras() {
        let options = GraphSummaryOptions {
            weights: false,
            shortest_paths: false,
        };
        let s = describe_graph(&forest(), options);
        assert_eq!(s.weights, None);
        assert_eq!(s.average_shortest_path, None);
        assert_eq!(s.diameter, None);
    }

    #[test]
    fn summary_of_empty_graph() {
        let s = describe_graph(&SimilarityGraph::new(), GraphSummaryOptions::default());
        assert_eq!(s.nodes, 0);
        assert_eq!(s.largest_component, 0);
        assert_eq!(s.weights, None);
        assert_eq!(s.diameter, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn summary_round_trips_through_json() {
        let options = GraphSummaryOptions {
            weights: true,
            shortest_paths: false,
        };
        let s = describe_graph(&forest(), options);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"largest_component\":3"));
        let back: GraphSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
