//! Read-only queries over a [`Graph`](crate::graph::Graph)

pub mod reachability;
pub mod shortest_path;
