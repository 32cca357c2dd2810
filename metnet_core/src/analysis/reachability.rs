//! Unweighted reachability via breadth first search
use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::graph::{Graph, GraphError, NodeIndex};

impl Graph {
    /// Find every node reachable from `source` by following edges forward
    ///
    /// The source is always part of the result, even when it has no outgoing edges. Ids
    /// are returned in visitation order, which is neither a topological nor a distance
    /// order beyond what breadth first search implies.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `source` is not in the graph
    ///
    /// # Examples
    /// ```rust
    /// use metnet_core::graph::{CompoundRecord, Graph, ReactionRecord, WeightingPolicy};
    /// let reactions = vec![ReactionRecord::new("A", "A")
    ///     .with_participant(CompoundRecord::new("X", "X"), -1.)
    ///     .with_participant(CompoundRecord::new("Y", "Y"), 1.)];
    /// let graph = Graph::build(&reactions, WeightingPolicy::UniformUnitWeight).unwrap();
    /// let reachable = graph.reachable("X").unwrap();
    /// assert_eq!(reachable.iter().collect::<Vec<_>>(), vec!["X", "A", "Y"]);
    /// ```
    pub fn reachable(&self, source: &str) -> Result<IndexSet<String>, GraphError> {
        let start = self.index_of(source)?;
        let visited: IndexSet<String> = breadth_first(self, start)
            .into_iter()
            .map(|(index, _)| self.id_at(index).to_string())
            .collect();
        debug!(source, reachable = visited.len(), "reachability search finished");
        Ok(visited)
    }

    /// Whether `target` can be reached from `source`
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either id is not in the graph
    pub fn is_reachable(&self, source: &str, target: &str) -> Result<bool, GraphError> {
        let start = self.index_of(source)?;
        let target = self.index_of(target)?;
        Ok(breadth_first(self, start)
            .iter()
            .any(|&(index, _)| index == target))
    }

    /// Number of hops from `source` to every node reachable from it, in visitation order
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `source` is not in the graph
    pub fn hop_counts(&self, source: &str) -> Result<IndexMap<String, usize>, GraphError> {
        let start = self.index_of(source)?;
        Ok(breadth_first(self, start)
            .into_iter()
            .map(|(index, depth)| (self.id_at(index).to_string(), depth))
            .collect())
    }
}

/// Breadth first traversal from `start`, returning (node, depth) in visitation order
///
/// Nodes are marked visited when discovered, so repeated adjacency entries are skipped
/// and each node is enqueued at most once.
fn breadth_first(graph: &Graph, start: NodeIndex) -> Vec<(NodeIndex, usize)> {
    let mut visited = vec![false; graph.node_count()];
    let mut order: Vec<(NodeIndex, usize)> = Vec::new();
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();

    visited[start] = true;
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        order.push((current, depth));
        for &next in graph.neighbors(current) {
            if !visited[next] {
                visited[next] = true;
                queue.push_back((next, depth + 1));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use crate::graph::test_graphs::{branched, chain};
    use crate::graph::{CompoundRecord, Graph, GraphError, ReactionRecord, WeightingPolicy};

    fn ids(set: &indexmap::IndexSet<String>) -> Vec<&str> {
        set.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn chain_is_fully_reachable() {
        let graph = chain(WeightingPolicy::UniformUnitWeight);
        let reachable = graph.reachable("X").unwrap();
        assert_eq!(ids(&reachable), vec!["X", "A", "Y", "B", "Z"]);
    }

    #[test]
    fn traversal_goes_past_the_first_level() {
        let graph = branched(WeightingPolicy::StoichiometricMagnitude);
        let reachable = graph.reachable("glc").unwrap();
        for id in [
            "glc", "HEX", "g6p", "adp", "SHORT", "PGI", "G6PDH", "pyr", "f6p", "6pgl", "LONG",
        ] {
            assert!(reachable.contains(id), "{id} should be reachable");
        }
        for id in ["atp", "ISO", "q", "r"] {
            assert!(!reachable.contains(id), "{id} should not be reachable");
        }
        assert_eq!(reachable.len(), 11);
    }

    #[test]
    fn sink_only_reaches_itself() {
        let graph = chain(WeightingPolicy::UniformUnitWeight);
        let reachable = graph.reachable("Z").unwrap();
        assert_eq!(ids(&reachable), vec!["Z"]);
    }

    #[test]
    fn repeated_queries_agree() {
        let graph = branched(WeightingPolicy::StoichiometricMagnitude);
        assert_eq!(graph.reachable("glc").unwrap(), graph.reachable("glc").unwrap());
    }

    #[test]
    fn duplicate_adjacency_entries_are_visited_once() {
        let reactions = vec![ReactionRecord::new("R", "R")
            .with_participant(CompoundRecord::new("M", "M"), -1.)
            .with_participant(CompoundRecord::new("M", "M"), -1.)
            .with_participant(CompoundRecord::new("N", "N"), 1.)];
        let graph = Graph::build(&reactions, WeightingPolicy::UniformUnitWeight).unwrap();
        let reachable = graph.reachable("M").unwrap();
        assert_eq!(ids(&reachable), vec!["M", "R", "N"]);
    }

    #[test]
    fn cycles_terminate() {
        let reactions = vec![
            ReactionRecord::new("F", "Forward")
                .with_participant(CompoundRecord::new("a", "a"), -1.)
                .with_participant(CompoundRecord::new("b", "b"), 1.),
            ReactionRecord::new("R", "Reverse")
                .with_participant(CompoundRecord::new("b", "b"), -1.)
                .with_participant(CompoundRecord::new("a", "a"), 1.),
        ];
        let graph = Graph::build(&reactions, WeightingPolicy::UniformUnitWeight).unwrap();
        assert_eq!(ids(&graph.reachable("a").unwrap()), vec!["a", "F", "b", "R"]);
    }

    #[test]
    fn membership() {
        let graph = branched(WeightingPolicy::StoichiometricMagnitude);
        assert!(graph.is_reachable("glc", "pyr").unwrap());
        assert!(graph.is_reachable("glc", "glc").unwrap());
        assert!(!graph.is_reachable("pyr", "glc").unwrap());
        assert!(!graph.is_reachable("glc", "r").unwrap());
        assert_eq!(
            graph.is_reachable("glc", "missing").unwrap_err(),
            GraphError::NodeNotFound("missing".to_string())
        );
    }

    #[test]
    fn hop_counts_follow_layers() {
        let graph = chain(WeightingPolicy::StoichiometricMagnitude);
        let hops = graph.hop_counts("X").unwrap();
        assert_eq!(hops["X"], 0);
        assert_eq!(hops["A"], 1);
        assert_eq!(hops["Y"], 2);
        assert_eq!(hops["B"], 3);
        assert_eq!(hops["Z"], 4);
    }

    #[test]
    fn missing_source() {
        let graph = chain(WeightingPolicy::UniformUnitWeight);
        assert_eq!(
            graph.reachable("W").unwrap_err(),
            GraphError::NodeNotFound("W".to_string())
        );
    }
}
