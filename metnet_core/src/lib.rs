//! Core rust implementation of metnet, a crate for connectivity and shortest path queries
//! over the bipartite compound/reaction network of a metabolic model.
//!
//! Graphs are built once from a collection of reactions (see [`graph::GraphBuilder`]) and
//! are read-only afterwards. Queries live in [`analysis`], and [`export`] turns a graph and
//! query results into a document for graph renderers.

pub mod analysis;
pub mod configuration;
pub mod export;
pub mod graph;
pub mod io;
pub mod metabolic_model;
