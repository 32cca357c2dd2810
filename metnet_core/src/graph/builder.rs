//! Construction of a [`Graph`] from an ordered collection of reaction records
use derive_builder::Builder;
use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::node::{Node, NodeKind};
use super::{Graph, GraphError, NodeIndex};
use crate::configuration;

/// A compound participating in a reaction
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundRecord {
    pub id: String,
    pub name: String,
}

impl CompoundRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        CompoundRecord {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A reaction together with its stoichiometry, the input to [`GraphBuilder::build`]
///
/// Participants keep their insertion order. Negative coefficients mark consumed compounds,
/// positive coefficients mark produced compounds.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionRecord {
    pub id: String,
    pub name: String,
    pub participants: Vec<(CompoundRecord, f64)>,
}

impl ReactionRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ReactionRecord {
            id: id.into(),
            name: name.into(),
            participants: Vec::new(),
        }
    }

    /// Add a participant, returning the updated record
    ///
    /// # Examples
    /// ```rust
    /// use metnet_core::graph::{CompoundRecord, ReactionRecord};
    /// let pgi = ReactionRecord::new("PGI", "Glucose-6-phosphate isomerase")
    ///     .with_participant(CompoundRecord::new("g6p_c", "D-Glucose 6-phosphate"), -1.)
    ///     .with_participant(CompoundRecord::new("f6p_c", "D-Fructose 6-phosphate"), 1.);
    /// assert_eq!(pgi.participants.len(), 2);
    /// ```
    pub fn with_participant(mut self, compound: CompoundRecord, coefficient: f64) -> Self {
        self.participants.push((compound, coefficient));
        self
    }
}

/// How edge weights are derived from stoichiometric coefficients
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum WeightingPolicy {
    /// Weight is the absolute value of the coefficient
    #[default]
    StoichiometricMagnitude,
    /// Every edge has weight 1, so distances count hops
    UniformUnitWeight,
}

impl WeightingPolicy {
    pub fn weight(&self, coefficient: f64) -> f64 {
        match self {
            WeightingPolicy::StoichiometricMagnitude => coefficient.abs(),
            WeightingPolicy::UniformUnitWeight => 1.,
        }
    }
}

/// Settings applied while building a [`Graph`], assembled by a [`GraphBuilder`]
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(
    name = "GraphBuilder",
    derive(Debug),
    build_fn(private, name = "settings", error = "GraphError")
)]
pub struct GraphSettings {
    /// Edge weighting, the configured default when not set
    #[builder(default = "configuration::current().weighting")]
    pub weighting: WeightingPolicy,
}

impl GraphBuilder {
    pub fn new(weighting: WeightingPolicy) -> Self {
        let mut builder = GraphBuilder::default();
        builder.weighting(weighting);
        builder
    }

    /// Build the bipartite graph for `reactions`
    ///
    /// A reaction node is created for every reaction, and a compound node the first time a
    /// compound is seen with a nonzero coefficient. Consumed compounds point at the reaction,
    /// the reaction points at produced compounds.
    ///
    /// # Errors
    /// - [`GraphError::KindCollision`] when a reaction and a compound share an id
    /// - [`GraphError::InvalidCoefficient`] when a coefficient is NaN or infinite
    /// - [`GraphError::WeightOverflow`] when the edge weights add up past `f64::MAX`
    ///
    /// # Examples
    /// ```rust
    /// use metnet_core::graph::{CompoundRecord, GraphBuilder, ReactionRecord, WeightingPolicy};
    /// let reactions = vec![ReactionRecord::new("A", "A")
    ///     .with_participant(CompoundRecord::new("X", "X"), -2.)
    ///     .with_participant(CompoundRecord::new("Y", "Y"), 1.)];
    /// let graph = GraphBuilder::new(WeightingPolicy::StoichiometricMagnitude)
    ///     .build(&reactions)
    ///     .unwrap();
    /// assert_eq!(graph.weight("X", "A"), Some(2.));
    /// assert_eq!(graph.weight("A", "Y"), Some(1.));
    /// ```
    pub fn build<'a, I>(&self, reactions: I) -> Result<Graph, GraphError>
    where
        I: IntoIterator<Item = &'a ReactionRecord>,
    {
        let GraphSettings { weighting } = self.settings()?;
        let mut arena = Arena::default();

        for reaction in reactions {
            let reaction_index =
                arena.insert_node(NodeKind::Reaction, &reaction.id, &reaction.name)?;
            for (compound, coefficient) in &reaction.participants {
                let coefficient = *coefficient;
                if !coefficient.is_finite() {
                    return Err(GraphError::InvalidCoefficient {
                        reaction: reaction.id.clone(),
                        compound: compound.id.clone(),
                    });
                }
                if coefficient == 0. {
                    debug!(
                        reaction = %reaction.id,
                        compound = %compound.id,
                        "skipping participant with zero coefficient"
                    );
                    continue;
                }
                let compound_index =
                    arena.insert_node(NodeKind::Compound, &compound.id, &compound.name)?;
                let (source, dest) = if coefficient < 0. {
                    (compound_index, reaction_index)
                } else {
                    (reaction_index, compound_index)
                };
                arena.insert_edge(source, dest, weighting.weight(coefficient));
            }
        }

        let graph = arena.finish(weighting)?;
        debug!(
            reactions = graph.reaction_count(),
            compounds = graph.compound_count(),
            edges = graph.edge_count(),
            weighting = ?weighting,
            "built metabolic graph"
        );
        Ok(graph)
    }
}

/// Mutable state used while a graph is being constructed
#[derive(Default)]
struct Arena {
    nodes: IndexMap<String, Node>,
    adjacency: Vec<Vec<NodeIndex>>,
    weights: IndexMap<(NodeIndex, NodeIndex), f64>,
    reaction_count: usize,
    participation_count: usize,
}

impl Arena {
    /// Return the index of the node `id`, creating it if it does not exist yet
    fn insert_node(
        &mut self,
        kind: NodeKind,
        id: &str,
        name: &str,
    ) -> Result<NodeIndex, GraphError> {
        match self.nodes.entry(id.to_string()) {
            Entry::Occupied(existing) => {
                let existing_kind = existing.get().kind();
                if existing_kind != kind {
                    return Err(GraphError::KindCollision {
                        id: id.to_string(),
                        existing: existing_kind,
                        attempted: kind,
                    });
                }
                if kind == NodeKind::Reaction {
                    warn!(reaction = %id, "reaction appears more than once, reusing its node");
                }
                Ok(existing.index())
            }
            Entry::Vacant(vacant) => {
                let index = vacant.index();
                vacant.insert(Node::new(kind, id.to_string(), name.to_string()));
                self.adjacency.push(Vec::new());
                if kind == NodeKind::Reaction {
                    self.reaction_count += 1;
                }
                Ok(index)
            }
        }
    }

    fn insert_edge(&mut self, source: NodeIndex, dest: NodeIndex, weight: f64) {
        // Repeated pairs stay in the adjacency list, but only the latest weight is kept
        self.adjacency[source].push(dest);
        self.weights.insert((source, dest), weight);
        self.participation_count += 1;
    }

    /// Freeze the arena into a graph
    ///
    /// No simple path can weigh more than all distinct edges together, so a finite total
    /// keeps every shortest distance finite.
    fn finish(self, weighting: WeightingPolicy) -> Result<Graph, GraphError> {
        let total: f64 = self.weights.values().sum();
        if !total.is_finite() {
            return Err(GraphError::WeightOverflow);
        }
        Ok(Graph {
            nodes: self.nodes,
            adjacency: self.adjacency,
            weights: self.weights,
            weighting,
            reaction_count: self.reaction_count,
            participation_count: self.participation_count,
        })
    }
}
