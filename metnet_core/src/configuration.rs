//! Process wide defaults used when building graphs, querying them, and exporting them
use std::sync::{LazyLock, RwLock};

use crate::analysis::shortest_path::ShortestPathStrategy;
use crate::graph::WeightingPolicy;

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Clone, Debug)]
pub struct Configuration {
    /// Edge weighting used by a [`GraphBuilder`](crate::graph::GraphBuilder) when none is given
    pub weighting: WeightingPolicy,
    /// Minimum selection strategy used by [`Graph::distances`](crate::graph::Graph::distances)
    pub shortest_path: ShortestPathStrategy,
    /// Size and color tags attached to exported nodes
    pub export_style: ExportStyle,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            weighting: WeightingPolicy::StoichiometricMagnitude,
            shortest_path: ShortestPathStrategy::LinearScan,
            export_style: ExportStyle::default(),
        }
    }
}

/// Visual tags handed to the renderer for each exported node
#[derive(Clone, Debug, PartialEq)]
pub struct ExportStyle {
    /// Size of reaction nodes
    pub reaction_size: u32,
    /// Size of compound nodes
    pub compound_size: u32,
    /// Color of the query source
    pub source_color: String,
    /// Color of highlighted nodes
    pub highlight_color: String,
    /// Color of every other node
    pub default_color: String,
}

impl Default for ExportStyle {
    fn default() -> Self {
        ExportStyle {
            reaction_size: 10,
            compound_size: 20,
            source_color: "#e41a1c".to_string(),
            highlight_color: "#ff7f00".to_string(),
            default_color: "#97c2fc".to_string(),
        }
    }
}

/// Read a snapshot of the current configuration
///
/// A poisoned lock still holds a usable configuration, so its contents are returned
/// rather than propagating the panic of another thread.
pub fn current() -> Configuration {
    match CONFIGURATION.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Apply `update` to the process wide configuration
pub fn update<F: FnOnce(&mut Configuration)>(update: F) {
    let mut config = match CONFIGURATION.write() {
        Ok(config) => config,
        Err(poisoned) => poisoned.into_inner(),
    };
    update(&mut config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert_eq!(config.weighting, WeightingPolicy::StoichiometricMagnitude);
        assert_eq!(config.shortest_path, ShortestPathStrategy::LinearScan);
        let style = config.export_style;
        assert_ne!(style.reaction_size, style.compound_size);
        assert_ne!(style.source_color, style.highlight_color);
        assert_ne!(style.highlight_color, style.default_color);
    }
}
