//! Module providing JSON input for metnet Models
//!
//! Reads the COBRA JSON model format. Only the parts needed to build graphs are kept:
//! metabolite names and compartments, reaction names, stoichiometry and subsystems.
//! Fields such as genes, bounds and gene reaction rules are ignored.
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::metabolic_model::metabolite::{Metabolite, MetaboliteBuilder, MetaboliteBuilderError};
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder, ReactionBuilderError};

// region JSON Model
/// The subset of a COBRA JSON document read into a [`Model`], unknown keys are skipped
#[derive(Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<String>,
}

#[derive(Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    formula: Option<String>,
}

#[derive(Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    subsystem: Option<String>,
}
// endregion JSON Model

// region Conversions
impl TryFrom<JsonMetabolite> for Metabolite {
    type Error = MetaboliteBuilderError;

    fn try_from(m: JsonMetabolite) -> Result<Self, Self::Error> {
        MetaboliteBuilder::default()
            .id(m.id)
            .name(m.name)
            .compartment(m.compartment)
            .formula(m.formula)
            .build()
    }
}

impl TryFrom<JsonReaction> for Reaction {
    type Error = ReactionBuilderError;

    /// An empty subsystem string is read as no subsystem
    fn try_from(r: JsonReaction) -> Result<Self, Self::Error> {
        ReactionBuilder::default()
            .id(r.id)
            .metabolites(r.metabolites)
            .name(r.name)
            .subsystem(r.subsystem.filter(|s| !s.is_empty()))
            .build()
    }
}

impl TryFrom<JsonModel> for Model {
    type Error = JsonError;

    fn try_from(json_model: JsonModel) -> Result<Self, Self::Error> {
        let mut model = Model::new_empty();
        for metabolite in json_model.metabolites {
            model.add_metabolite(metabolite.try_into()?);
        }
        for reaction in json_model.reactions {
            model.add_reaction(reaction.try_into()?);
        }
        model.id = json_model.id;
        model.compartments = json_model.compartments;
        model.version = json_model.version;
        Ok(model)
    }
}

impl Model {
    /// Read a COBRA JSON model from `path`
    ///
    /// # Errors
    /// [`JsonError::UnableToRead`] if the file can't be read, otherwise as
    /// [`Model::from_json_str`]
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|err| JsonError::UnableToRead(err.to_string()))?;
        debug!(path = %path.display(), bytes = contents.len(), "read json model");
        Model::from_json_str(&contents)
    }

    /// Parse a COBRA JSON model from a string
    ///
    /// # Errors
    /// [`JsonError::UnableToParse`] if the document is malformed or misses a required key
    pub fn from_json_str(model_str: &str) -> Result<Model, JsonError> {
        let json_model: JsonModel = serde_json::from_str(model_str)
            .map_err(|err| JsonError::UnableToParse(err.to_string()))?;
        let model = Model::try_from(json_model)?;
        debug!(
            reactions = model.reactions.len(),
            metabolites = model.metabolites.len(),
            "converted json model"
        );
        Ok(model)
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("Unable to build metabolite")]
    UnableToBuildMetabolite(#[from] MetaboliteBuilderError),
}

// endregion Conversions
