//! Module providing the Model struct for representing a metabolic model.
//!
//! The model is only a source of reactions for graph construction; it carries no flux
//! bounds or gene rules.

pub mod metabolite;
pub mod model;
pub mod reaction;
