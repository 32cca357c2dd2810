//! Module providing the bipartite compound/reaction graph
//!
//! Nodes are stored densely in insertion order, with adjacency kept as lists of node
//! indices, so traversals never hash ids. Every public query is expressed in terms of ids.

mod builder;
mod node;

pub use builder::{CompoundRecord, GraphBuilder, GraphSettings, ReactionRecord, WeightingPolicy};
pub use node::{Edge, Node, NodeKind};

use derive_builder::UninitializedFieldError;
use indexmap::IndexMap;
use thiserror::Error;

/// Position of a node in the graph's node table
pub(crate) type NodeIndex = usize;

/// Immutable directed graph of compounds and reactions
///
/// Created by a [`GraphBuilder`], the graph has no mutating operations, so it can be
/// shared between threads and queried concurrently.
#[derive(Clone, Debug)]
pub struct Graph {
    pub(crate) nodes: IndexMap<String, Node>,
    pub(crate) adjacency: Vec<Vec<NodeIndex>>,
    pub(crate) weights: IndexMap<(NodeIndex, NodeIndex), f64>,
    pub(crate) weighting: WeightingPolicy,
    pub(crate) reaction_count: usize,
    pub(crate) participation_count: usize,
}

impl Graph {
    /// Build a graph from `reactions` (see [`GraphBuilder::build`])
    pub fn build<'a, I>(reactions: I, weighting: WeightingPolicy) -> Result<Graph, GraphError>
    where
        I: IntoIterator<Item = &'a ReactionRecord>,
    {
        GraphBuilder::new(weighting).build(reactions)
    }

    /// Weighting policy the graph was built with
    pub fn weighting(&self) -> WeightingPolicy {
        self.weighting
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reaction_count
    }

    pub fn compound_count(&self) -> usize {
        self.nodes.len() - self.reaction_count
    }

    /// Number of distinct (source, destination) pairs
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Number of materialized participations, counting repeated pairs
    pub fn participation_count(&self) -> usize {
        self.participation_count
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterate over the nodes in the order they were created
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over the distinct edges in the order they were first inserted
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.weights.iter().map(|(&(from, to), &weight)| Edge {
            from: self.id_at(from),
            to: self.id_at(to),
            weight,
        })
    }

    /// Destinations of the outgoing edges of `id`, repeated pairs included
    pub fn successors(&self, id: &str) -> Result<Vec<&str>, GraphError> {
        let index = self.index_of(id)?;
        Ok(self.adjacency[index]
            .iter()
            .map(|&dest| self.id_at(dest))
            .collect())
    }

    /// Weight of the edge `from -> to`, if there is one
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.nodes.get_index_of(from)?;
        let to = self.nodes.get_index_of(to)?;
        self.weights.get(&(from, to)).copied()
    }

    pub(crate) fn index_of(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.nodes
            .get_index_of(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    pub(crate) fn id_at(&self, index: NodeIndex) -> &str {
        self.node_at(index).id()
    }

    pub(crate) fn node_at(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn neighbors(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.adjacency[index]
    }

    pub(crate) fn weight_at(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        // Every adjacency entry has a weight recorded alongside it
        self.weights
            .get(&(from, to))
            .copied()
            .unwrap_or(f64::INFINITY)
    }
}

/// Errors raised while building or querying a [`Graph`]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Id {id} is already used by a {existing} node, it can't also be a {attempted}")]
    KindCollision {
        id: String,
        existing: NodeKind,
        attempted: NodeKind,
    },
    #[error("Coefficient of {compound} in reaction {reaction} is not a finite number")]
    InvalidCoefficient { reaction: String, compound: String },
    #[error("Edge weights add up to more than the largest finite distance")]
    WeightOverflow,
    #[error("Graph builder setting {0} was never initialized")]
    UninitializedSetting(&'static str),
    #[error("Node {0} is not present in the graph")]
    NodeNotFound(String),
}

impl From<UninitializedFieldError> for GraphError {
    fn from(err: UninitializedFieldError) -> Self {
        GraphError::UninitializedSetting(err.field_name())
    }
}


#[cfg(test)]
mod tests {
    use super::test_graphs::chain;
    use super::*;

    #[test]
    fn chain_edges() {
        let graph = chain(WeightingPolicy::UniformUnitWeight);
        let edges: Vec<(&str, &str)> = graph.edges().map(|e| (e.from, e.to)).collect();
        assert_eq!(edges, vec![("X", "A"), ("A", "Y"), ("Y", "B"), ("B", "Z")]);
    }

    #[test]
    fn counts() {
        let graph = chain(WeightingPolicy::StoichiometricMagnitude);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.reaction_count(), 2);
        assert_eq!(graph.compound_count(), 3);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.participation_count(), 4);
    }

    #[test]
    fn lookups() {
        let graph = chain(WeightingPolicy::StoichiometricMagnitude);
        assert!(graph.contains("Y"));
        assert!(!graph.contains("W"));
        assert_eq!(graph.node("A").unwrap().kind(), NodeKind::Reaction);
        assert_eq!(graph.node("X").unwrap().name(), "Compound X");
        assert_eq!(
            graph.successors("W").unwrap_err(),
            GraphError::NodeNotFound("W".to_string())
        );
        assert_eq!(graph.weight("X", "W"), None);
    }

    #[test]
    fn graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Graph>();
    }
}
