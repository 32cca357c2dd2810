//! Projection of a [`Graph`] and query results into the node/edge document consumed by
//! graph renderers
//!
//! The document has the shape
//! `{ "nodes": [{"id", "label", "size", "color"}], "edges": [{"from", "to"}] }`.
use derive_builder::Builder;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::configuration::{self, ExportStyle};
use crate::graph::{Graph, GraphError, NodeKind};

/// What to export and how to tag it
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct ExportOptions {
    /// The query source, colored with [`ExportStyle::source_color`]
    #[builder(default = "None", setter(into, strip_option))]
    pub source: Option<String>,
    /// Nodes colored with [`ExportStyle::highlight_color`], ids missing from the graph are ignored
    #[builder(default = "Vec::new()")]
    pub highlight: Vec<String>,
    /// Restrict the export to these nodes plus the source and highlighted nodes, everything
    /// is exported when None
    #[builder(default = "None", setter(strip_option))]
    pub include: Option<Vec<String>>,
    /// Size and color tags
    #[builder(default = "configuration::current().export_style")]
    pub style: ExportStyle,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            source: None,
            highlight: Vec::new(),
            include: None,
            style: configuration::current().export_style,
        }
    }
}

/// A node as seen by the renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    pub label: String,
    pub size: u32,
    pub color: String,
}

/// An edge as seen by the renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportEdge {
    pub from: String,
    pub to: String,
}

/// Node and edge lists handed to the renderer
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl GraphExport {
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Graph {
    /// Export the graph for rendering
    ///
    /// Nodes appear once each, in creation order. With an `include` allowlist, the exported
    /// nodes are the allowlist plus the source and every highlighted node. An edge is
    /// exported once per distinct pair, and only when both of its endpoints are exported.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `options.source` is set but not in the graph
    ///
    /// # Examples
    /// ```rust
    /// use metnet_core::export::ExportOptionsBuilder;
    /// use metnet_core::graph::{CompoundRecord, Graph, ReactionRecord, WeightingPolicy};
    /// let reactions = vec![ReactionRecord::new("A", "A")
    ///     .with_participant(CompoundRecord::new("X", "X"), -1.)
    ///     .with_participant(CompoundRecord::new("Y", "Y"), 1.)];
    /// let graph = Graph::build(&reactions, WeightingPolicy::UniformUnitWeight).unwrap();
    /// let options = ExportOptionsBuilder::default()
    ///     .source("X")
    ///     .highlight(vec!["Y".to_string()])
    ///     .build()
    ///     .unwrap();
    /// let export = graph.export(&options).unwrap();
    /// assert_eq!(export.nodes.len(), 3);
    /// assert_eq!(export.edges.len(), 2);
    /// ```
    pub fn export(&self, options: &ExportOptions) -> Result<GraphExport, GraphError> {
        let source = match &options.source {
            Some(id) => Some(self.index_of(id)?),
            None => None,
        };
        let highlight: IndexSet<usize> = options
            .highlight
            .iter()
            .filter_map(|id| self.nodes.get_index_of(id.as_str()))
            .collect();

        // The source and highlighted nodes are exported even when not in the allowlist
        let exported = match &options.include {
            Some(include) => {
                let mut exported = vec![false; self.node_count()];
                let included = include
                    .iter()
                    .filter_map(|id| self.nodes.get_index_of(id.as_str()));
                for index in included.chain(highlight.iter().copied()).chain(source) {
                    exported[index] = true;
                }
                exported
            }
            None => vec![true; self.node_count()],
        };

        let style = &options.style;
        let nodes: Vec<ExportNode> = self
            .nodes
            .values()
            .enumerate()
            .filter(|(index, _)| exported[*index])
            .map(|(index, node)| {
                let size = match node.kind() {
                    NodeKind::Reaction => style.reaction_size,
                    NodeKind::Compound => style.compound_size,
                };
                let color = if source == Some(index) {
                    &style.source_color
                } else if highlight.contains(&index) {
                    &style.highlight_color
                } else {
                    &style.default_color
                };
                ExportNode {
                    id: node.id().to_string(),
                    label: node.name().to_string(),
                    size,
                    color: color.clone(),
                }
            })
            .collect();

        let edges: Vec<ExportEdge> = self
            .weights
            .keys()
            .filter(|(from, to)| exported[*from] && exported[*to])
            .map(|&(from, to)| ExportEdge {
                from: self.id_at(from).to_string(),
                to: self.id_at(to).to_string(),
            })
            .collect();

        debug!(nodes = nodes.len(), edges = edges.len(), "exported graph");
        Ok(GraphExport { nodes, edges })
    }
}
