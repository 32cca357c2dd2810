//! This module provides the metabolite struct representing a metabolite

use derive_builder::Builder;

use crate::graph::CompoundRecord;

/// Represents a metabolite
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment the metabolite is in
    #[builder(default = "None")]
    pub compartment: Option<String>,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
}

impl Metabolite {
    /// Name to display for this metabolite, falling back to its id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Convert into the compound record used for building graphs
    pub fn to_record(&self) -> CompoundRecord {
        CompoundRecord::new(&self.id, self.display_name())
    }
}
