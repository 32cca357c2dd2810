//! This module provides a struct for representing reactions
use derive_builder::Builder;
use indexmap::IndexMap;

use crate::graph::{CompoundRecord, ReactionRecord};
use crate::metabolic_model::metabolite::Metabolite;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction, keyed by metabolite id
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
}

impl Reaction {
    /// Name to display for this reaction, falling back to its id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether the reaction belongs to any of `subsystems`
    pub fn in_subsystem(&self, subsystems: &[&str]) -> bool {
        self.subsystem
            .as_deref()
            .is_some_and(|subsystem| subsystems.contains(&subsystem))
    }

    /// Convert into the record used for building graphs
    ///
    /// Metabolite names are looked up in `metabolites`, metabolites missing from it are
    /// named by their id.
    pub fn to_record(&self, metabolites: &IndexMap<String, Metabolite>) -> ReactionRecord {
        let participants = self
            .metabolites
            .iter()
            .map(|(id, coefficient)| {
                let compound = match metabolites.get(id) {
                    Some(metabolite) => metabolite.to_record(),
                    None => CompoundRecord::new(id, id),
                };
                (compound, *coefficient)
            })
            .collect();
        ReactionRecord {
            id: self.id.clone(),
            name: self.display_name().to_string(),
            participants,
        }
    }
}
