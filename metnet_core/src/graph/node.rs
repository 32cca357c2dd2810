//! Nodes of the bipartite compound/reaction graph
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Which side of the bipartite graph a node belongs to
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A chemical compound (metabolite)
    Compound,
    /// A reaction converting compounds
    Reaction,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Compound => write!(f, "compound"),
            NodeKind::Reaction => write!(f, "reaction"),
        }
    }
}

/// A node in the graph, either a compound or a reaction
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Compound { id: String, name: String },
    Reaction { id: String, name: String },
}

impl Node {
    pub(crate) fn new(kind: NodeKind, id: String, name: String) -> Node {
        match kind {
            NodeKind::Compound => Node::Compound { id, name },
            NodeKind::Reaction => Node::Reaction { id, name },
        }
    }

    /// Unique identifier of the node
    pub fn id(&self) -> &str {
        match self {
            Node::Compound { id, .. } | Node::Reaction { id, .. } => id,
        }
    }

    /// Human readable name, used as the display label
    pub fn name(&self) -> &str {
        match self {
            Node::Compound { name, .. } | Node::Reaction { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Compound { .. } => NodeKind::Compound,
            Node::Reaction { .. } => NodeKind::Reaction,
        }
    }

    pub fn is_compound(&self) -> bool {
        self.kind() == NodeKind::Compound
    }

    pub fn is_reaction(&self) -> bool {
        self.kind() == NodeKind::Reaction
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A directed, weighted arc between two nodes
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub weight: f64,
}
