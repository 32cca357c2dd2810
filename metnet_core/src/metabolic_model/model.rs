//! This module provides the Model struct for representing an entire metabolic model
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::graph::{Graph, GraphBuilder, GraphError, ReactionRecord};
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            id: None,
            compartments: None,
            version: None,
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use metnet_core::metabolic_model::model::Model;
    /// use metnet_core::metabolic_model::reaction::{Reaction, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a metabolite to the model
    ///
    /// # Parameters
    /// - metabolite: Metabolite to add
    ///
    /// # Examples
    /// ```rust
    /// use metnet_core::metabolic_model::metabolite::MetaboliteBuilder;
    /// use metnet_core::metabolic_model::model::Model;
    /// let mut model = Model::new_empty();
    /// let new_metabolite = MetaboliteBuilder::default().id("new_metabolite".to_string()).build().unwrap();
    /// model.add_metabolite(new_metabolite);
    /// ```
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Distinct subsystems of the model's reactions, in order of first appearance
    pub fn subsystems(&self) -> IndexSet<&str> {
        self.reactions
            .values()
            .filter_map(|r| r.subsystem.as_deref())
            .collect()
    }

    /// Convert the model's reactions into graph input records
    ///
    /// # Parameters
    /// - subsystems: when Some, only reactions belonging to one of these subsystems are
    ///   converted
    pub fn reaction_records(&self, subsystems: Option<&[&str]>) -> Vec<ReactionRecord> {
        let records: Vec<ReactionRecord> = self
            .reactions
            .values()
            .filter(|r| subsystems.map_or(true, |s| r.in_subsystem(s)))
            .map(|r| r.to_record(&self.metabolites))
            .collect();
        debug!(
            selected = records.len(),
            total = self.reactions.len(),
            "selected reactions for graph construction"
        );
        records
    }

    /// Build a graph of the model, optionally restricted to `subsystems`
    pub fn to_graph(
        &self,
        subsystems: Option<&[&str]>,
        builder: &GraphBuilder,
    ) -> Result<Graph, GraphError> {
        builder.build(&self.reaction_records(subsystems))
    }
}
