//! Weighted single source shortest paths (Dijkstra's algorithm)
//!
//! Two minimum selection strategies are available. [`ShortestPathStrategy::LinearScan`]
//! scans the remaining candidates on every step, which is quadratic in the node count but
//! has no bookkeeping and suits subsystem sized graphs. [`ShortestPathStrategy::BinaryHeap`]
//! keeps candidates in a priority queue for larger graphs. Both break ties between equally
//! distant candidates by node creation order, so they return identical results.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use indexmap::IndexMap;
use tracing::debug;

use crate::configuration;
use crate::graph::{Graph, GraphError, NodeIndex};

/// How the next node to settle is chosen
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ShortestPathStrategy {
    /// Scan every remaining candidate for the minimum
    #[default]
    LinearScan,
    /// Pop the minimum from a binary heap
    BinaryHeap,
}

/// Distances and predecessors of every node relative to one source
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths {
    /// The node the search started from
    pub source: String,
    /// Total weight of the shortest path to each node, infinite for unreachable nodes
    pub distances: IndexMap<String, f64>,
    /// Previous node on the shortest path to each node, None for the source and for
    /// unreachable nodes
    pub predecessors: IndexMap<String, Option<String>>,
}

impl ShortestPaths {
    /// Distance from the source to `id`, None when `id` isn't in the graph
    pub fn distance(&self, id: &str) -> Option<f64> {
        self.distances.get(id).copied()
    }

    /// Reconstruct the shortest path from the source to `dest`
    ///
    /// Returns None when `dest` isn't in the graph, and an empty path with an infinite
    /// distance when it can't be reached.
    pub fn path_to(&self, dest: &str) -> Option<Path> {
        let distance = self.distance(dest)?;
        if dest == self.source {
            return Some(Path {
                nodes: vec![dest.to_string()],
                distance: 0.,
            });
        }
        let mut current = match self.predecessors.get(dest)? {
            Some(previous) => previous,
            None => return Some(Path::unreachable()),
        };
        let mut nodes = vec![dest.to_string()];
        loop {
            nodes.push(current.clone());
            match self.predecessors.get(current.as_str()) {
                Some(Some(previous)) => current = previous,
                _ => break,
            }
        }
        nodes.reverse();
        Some(Path { nodes, distance })
    }
}

/// A path through the graph with its total weight
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Node ids from the source to the destination, both included
    pub nodes: Vec<String>,
    /// Sum of the weights of the edges along the path
    pub distance: f64,
}

impl Path {
    /// The empty path returned for unreachable destinations
    pub fn unreachable() -> Path {
        Path {
            nodes: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges along the path
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

impl Graph {
    /// Shortest distances from `source` to every node, using the configured strategy
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `source` is not in the graph
    pub fn distances(&self, source: &str) -> Result<ShortestPaths, GraphError> {
        self.distances_with(source, configuration::current().shortest_path)
    }

    /// Shortest distances from `source` to every node, using `strategy`
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `source` is not in the graph
    pub fn distances_with(
        &self,
        source: &str,
        strategy: ShortestPathStrategy,
    ) -> Result<ShortestPaths, GraphError> {
        let start = self.index_of(source)?;
        let search = match strategy {
            ShortestPathStrategy::LinearScan => linear_scan(self, start),
            ShortestPathStrategy::BinaryHeap => binary_heap(self, start),
        };
        debug!(
            source,
            ?strategy,
            settled = search.settled,
            "shortest path search finished"
        );
        Ok(search.into_shortest_paths(self, source))
    }

    /// Shortest path from `source` to `dest`, using the configured strategy
    ///
    /// An unreachable destination is not an error, it yields an empty path with an
    /// infinite distance.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either id is not in the graph
    ///
    /// # Examples
    /// ```rust
    /// use metnet_core::graph::{CompoundRecord, Graph, ReactionRecord, WeightingPolicy};
    /// let reactions = vec![
    ///     ReactionRecord::new("A", "A")
    ///         .with_participant(CompoundRecord::new("X", "X"), -1.)
    ///         .with_participant(CompoundRecord::new("Y", "Y"), 1.),
    ///     ReactionRecord::new("B", "B")
    ///         .with_participant(CompoundRecord::new("Y", "Y"), -1.)
    ///         .with_participant(CompoundRecord::new("Z", "Z"), 1.),
    /// ];
    /// let graph = Graph::build(&reactions, WeightingPolicy::UniformUnitWeight).unwrap();
    /// let path = graph.path("X", "Z").unwrap();
    /// assert_eq!(path.nodes, vec!["X", "A", "Y", "B", "Z"]);
    /// assert_eq!(path.distance, 4.);
    /// ```
    pub fn path(&self, source: &str, dest: &str) -> Result<Path, GraphError> {
        self.path_with(source, dest, configuration::current().shortest_path)
    }

    /// Shortest path from `source` to `dest`, using `strategy`
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either id is not in the graph
    pub fn path_with(
        &self,
        source: &str,
        dest: &str,
        strategy: ShortestPathStrategy,
    ) -> Result<Path, GraphError> {
        self.index_of(dest)?;
        self.distances_with(source, strategy)?
            .path_to(dest)
            .ok_or_else(|| GraphError::NodeNotFound(dest.to_string()))
    }
}

/// Tentative distances and predecessors indexed by node
struct Search {
    distance: Vec<f64>,
    predecessor: Vec<Option<NodeIndex>>,
    settled: usize,
}

impl Search {
    fn new(node_count: usize, start: NodeIndex) -> Search {
        let mut distance = vec![f64::INFINITY; node_count];
        distance[start] = 0.;
        Search {
            distance,
            predecessor: vec![None; node_count],
            settled: 0,
        }
    }

    /// Relax the outgoing edges of `node`, returning the nodes whose distance improved
    fn relax(&mut self, graph: &Graph, node: NodeIndex) -> Vec<NodeIndex> {
        let mut improved = Vec::new();
        for &next in graph.neighbors(node) {
            let candidate = self.distance[node] + graph.weight_at(node, next);
            if candidate < self.distance[next] {
                self.distance[next] = candidate;
                self.predecessor[next] = Some(node);
                improved.push(next);
            }
        }
        improved
    }

    fn into_shortest_paths(self, graph: &Graph, source: &str) -> ShortestPaths {
        let distances = self
            .distance
            .iter()
            .enumerate()
            .map(|(index, &distance)| (graph.id_at(index).to_string(), distance))
            .collect();
        let predecessors = self
            .predecessor
            .iter()
            .enumerate()
            .map(|(index, previous)| {
                (
                    graph.id_at(index).to_string(),
                    previous.map(|p| graph.id_at(p).to_string()),
                )
            })
            .collect();
        ShortestPaths {
            source: source.to_string(),
            distances,
            predecessors,
        }
    }
}

fn linear_scan(graph: &Graph, start: NodeIndex) -> Search {
    let mut search = Search::new(graph.node_count(), start);
    let mut candidates: Vec<NodeIndex> = (0..graph.node_count()).collect();

    while !candidates.is_empty() {
        // Strict comparison keeps the earliest created node on ties
        let mut best = 0;
        for position in 1..candidates.len() {
            if search.distance[candidates[position]] < search.distance[candidates[best]] {
                best = position;
            }
        }
        let node = candidates.remove(best);
        if search.distance[node].is_infinite() {
            // Every remaining candidate is unreachable
            break;
        }
        search.settled += 1;
        if graph.neighbors(node).is_empty() {
            // Dead end, nothing to relax
            continue;
        }
        search.relax(graph, node);
    }
    search
}

/// Heap entry ordered so the smallest distance, then the earliest node, is popped first
#[derive(Copy, Clone, Debug, PartialEq)]
struct Candidate {
    distance: f64,
    node: NodeIndex,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn binary_heap(graph: &Graph, start: NodeIndex) -> Search {
    let mut search = Search::new(graph.node_count(), start);
    let mut settled = vec![false; graph.node_count()];
    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        distance: 0.,
        node: start,
    });

    while let Some(Candidate { distance, node }) = heap.pop() {
        // Skip stale entries left behind by later improvements
        if settled[node] || distance > search.distance[node] {
            continue;
        }
        settled[node] = true;
        search.settled += 1;
        if graph.neighbors(node).is_empty() {
            continue;
        }
        for next in search.relax(graph, node) {
            heap.push(Candidate {
                distance: search.distance[next],
                node: next,
            });
        }
    }
    search
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_graphs::{branched, chain};
    use crate::graph::{CompoundRecord, ReactionRecord, WeightingPolicy};

    const STRATEGIES: [ShortestPathStrategy; 2] = [
        ShortestPathStrategy::LinearScan,
        ShortestPathStrategy::BinaryHeap,
    ];

    /// Check that a path walks real edges and that its weights add up to its distance
    fn assert_valid_path(graph: &Graph, path: &Path, source: &str, dest: &str) {
        assert_eq!(path.nodes.first().map(String::as_str), Some(source));
        assert_eq!(path.nodes.last().map(String::as_str), Some(dest));
        let total = path.nodes.windows(2).fold(0., |total, pair| {
            let weight = graph
                .weight(&pair[0], &pair[1])
                .unwrap_or_else(|| panic!("{} -> {} is not an edge", pair[0], pair[1]));
            total + weight
        });
        assert!((total - path.distance).abs() < 1e-12);
    }

    #[test]
    fn chain_unit_distances() {
        let graph = chain(WeightingPolicy::UniformUnitWeight);
        for strategy in STRATEGIES {
            let paths = graph.distances_with("X", strategy).unwrap();
            assert_eq!(paths.distance("X"), Some(0.));
            assert_eq!(paths.distance("A"), Some(1.));
            assert_eq!(paths.distance("Y"), Some(2.));
            assert_eq!(paths.distance("B"), Some(3.));
            assert_eq!(paths.distance("Z"), Some(4.));
            assert_eq!(paths.predecessors["X"], None);
            assert_eq!(paths.predecessors["Z"], Some("B".to_string()));

            let path = graph.path_with("X", "Z", strategy).unwrap();
            assert_eq!(path.nodes, vec!["X", "A", "Y", "B", "Z"]);
            assert_eq!(path.distance, 4.);
            assert_eq!(path.hops(), 4);
        }
    }

    #[test]
    fn weights_change_the_route() {
        let weighted = branched(WeightingPolicy::StoichiometricMagnitude);
        let path = weighted.path("glc", "pyr").unwrap();
        assert_eq!(path.nodes, vec!["glc", "HEX", "g6p", "PGI", "f6p", "LONG", "pyr"]);
        assert_eq!(path.distance, 6.);
        assert_valid_path(&weighted, &path, "glc", "pyr");

        let unit = branched(WeightingPolicy::UniformUnitWeight);
        let path = unit.path("glc", "pyr").unwrap();
        assert_eq!(path.nodes, vec!["glc", "HEX", "g6p", "SHORT", "pyr"]);
        assert_eq!(path.distance, 4.);
        assert_valid_path(&unit, &path, "glc", "pyr");
    }

    #[test]
    fn dead_ends_keep_their_distance() {
        let graph = branched(WeightingPolicy::StoichiometricMagnitude);
        let paths = graph.distances("glc").unwrap();
        assert_eq!(paths.distance("adp"), Some(2.));
        assert_eq!(paths.distance("6pgl"), Some(4.));
        assert_eq!(paths.predecessors["6pgl"], Some("G6PDH".to_string()));
    }

    #[test]
    fn unreachable_destination() {
        let graph = branched(WeightingPolicy::StoichiometricMagnitude);
        let paths = graph.distances("glc").unwrap();
        for id in ["atp", "ISO", "q", "r"] {
            assert_eq!(paths.distance(id), Some(f64::INFINITY));
            assert_eq!(paths.predecessors[id], None);
        }
        let path = graph.path("glc", "r").unwrap();
        assert!(path.is_empty());
        assert_eq!(path.distance, f64::INFINITY);
        assert_eq!(path, Path::unreachable());

        // Walking backwards against the edges isn't possible either
        assert!(graph.path("pyr", "glc").unwrap().is_empty());
    }

    #[test]
    fn path_to_self() {
        let graph = chain(WeightingPolicy::UniformUnitWeight);
        let path = graph.path("Y", "Y").unwrap();
        assert_eq!(path.nodes, vec!["Y"]);
        assert_eq!(path.distance, 0.);
        assert_eq!(path.hops(), 0);
    }

    #[test]
    fn missing_nodes() {
        let graph = chain(WeightingPolicy::UniformUnitWeight);
        assert_eq!(
            graph.distances("W").unwrap_err(),
            GraphError::NodeNotFound("W".to_string())
        );
        assert_eq!(
            graph.path("X", "W").unwrap_err(),
            GraphError::NodeNotFound("W".to_string())
        );
        assert_eq!(
            graph.path("W", "X").unwrap_err(),
            GraphError::NodeNotFound("W".to_string())
        );
        let paths = graph.distances("X").unwrap();
        assert_eq!(paths.distance("W"), None);
        assert_eq!(paths.path_to("W"), None);
    }

    #[test]
    fn unit_distances_match_hop_counts() {
        for source in ["glc", "g6p", "HEX", "q"] {
            let graph = branched(WeightingPolicy::UniformUnitWeight);
            let hops = graph.hop_counts(source).unwrap();
            let paths = graph.distances(source).unwrap();
            for (id, hop_count) in &hops {
                assert_eq!(paths.distance(id), Some(*hop_count as f64), "{source} -> {id}");
            }
        }
    }

    #[test]
    fn every_reachable_path_is_valid() {
        let graph = branched(WeightingPolicy::StoichiometricMagnitude);
        let paths = graph.distances("glc").unwrap();
        for dest in graph.reachable("glc").unwrap() {
            let path = paths.path_to(&dest).unwrap();
            assert_valid_path(&graph, &path, "glc", &dest);
        }
    }

    #[test]
    fn strategies_agree() {
        // Two equally short routes from s to t, ties must be broken the same way
        let reactions = vec![
            ReactionRecord::new("R1", "R1")
                .with_participant(CompoundRecord::new("s", "s"), -1.)
                .with_participant(CompoundRecord::new("a", "a"), 1.)
                .with_participant(CompoundRecord::new("b", "b"), 1.),
            ReactionRecord::new("R2", "R2")
                .with_participant(CompoundRecord::new("b", "b"), -1.)
                .with_participant(CompoundRecord::new("t", "t"), 2.),
            ReactionRecord::new("R3", "R3")
                .with_participant(CompoundRecord::new("a", "a"), -1.)
                .with_participant(CompoundRecord::new("t", "t"), 2.),
            ReactionRecord::new("R4", "R4")
                .with_participant(CompoundRecord::new("t", "t"), -0.5)
                .with_participant(CompoundRecord::new("s", "s"), 3.),
        ];
        for weighting in [
            WeightingPolicy::StoichiometricMagnitude,
            WeightingPolicy::UniformUnitWeight,
        ] {
            let graph = Graph::build(&reactions, weighting).unwrap();
            for source in ["s", "a", "b", "t", "R4"] {
                let linear = graph
                    .distances_with(source, ShortestPathStrategy::LinearScan)
                    .unwrap();
                let heap = graph
                    .distances_with(source, ShortestPathStrategy::BinaryHeap)
                    .unwrap();
                assert_eq!(linear, heap, "{source} under {weighting:?}");
            }
            let graph = branched(weighting);
            assert_eq!(
                graph.distances_with("glc", ShortestPathStrategy::LinearScan).unwrap(),
                graph.distances_with("glc", ShortestPathStrategy::BinaryHeap).unwrap()
            );
        }
    }

    #[test]
    fn duplicate_adjacency_entries_use_latest_weight() {
        let reactions = vec![ReactionRecord::new("R", "R")
            .with_participant(CompoundRecord::new("m", "m"), -1.)
            .with_participant(CompoundRecord::new("m", "m"), -3.)
            .with_participant(CompoundRecord::new("n", "n"), 1.)];
        let graph = Graph::build(&reactions, WeightingPolicy::StoichiometricMagnitude).unwrap();
        for strategy in STRATEGIES {
            let path = graph.path_with("m", "n", strategy).unwrap();
            assert_eq!(path.nodes, vec!["m", "R", "n"]);
            assert_eq!(path.distance, 4.);
        }
    }

    #[test]
    fn candidate_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(Candidate { distance: 2., node: 0 });
        heap.push(Candidate { distance: 1., node: 5 });
        heap.push(Candidate { distance: 1., node: 3 });
        assert_eq!(heap.pop().map(|c| c.node), Some(3));
        assert_eq!(heap.pop().map(|c| c.node), Some(5));
        assert_eq!(heap.pop().map(|c| c.node), Some(0));
    }
}
