use metnet_core::analysis::shortest_path::ShortestPathStrategy;
use metnet_core::export::ExportOptionsBuilder;
use metnet_core::graph::{CompoundRecord, Graph, GraphError, ReactionRecord, WeightingPolicy};

use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

/// (compound id, compound name, coefficient)
type PyParticipant = (String, String, f64);
/// (reaction id, reaction name, participants)
type PyReaction = (String, String, Vec<PyParticipant>);

fn to_py_err(err: GraphError) -> PyErr {
    match err {
        GraphError::NodeNotFound(id) => PyKeyError::new_err(id),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn parse_strategy(strategy: &str) -> PyResult<ShortestPathStrategy> {
    match strategy {
        "linear" => Ok(ShortestPathStrategy::LinearScan),
        "heap" => Ok(ShortestPathStrategy::BinaryHeap),
        other => Err(PyValueError::new_err(format!(
            "unknown strategy {other}, expected 'linear' or 'heap'"
        ))),
    }
}

/// Compound/reaction graph of a metabolic network
#[pyclass(frozen)]
struct MetabolicGraph {
    inner: Graph,
}

#[pymethods]
impl MetabolicGraph {
    #[new]
    #[pyo3(signature = (reactions, unit_weights=false))]
    fn new(reactions: Vec<PyReaction>, unit_weights: bool) -> PyResult<Self> {
        let records: Vec<ReactionRecord> = reactions
            .into_iter()
            .map(|(id, name, participants)| ReactionRecord {
                id,
                name,
                participants: participants
                    .into_iter()
                    .map(|(cid, cname, coefficient)| (CompoundRecord::new(cid, cname), coefficient))
                    .collect(),
            })
            .collect();
        let weighting = if unit_weights {
            WeightingPolicy::UniformUnitWeight
        } else {
            WeightingPolicy::StoichiometricMagnitude
        };
        let inner = Graph::build(&records, weighting).map_err(to_py_err)?;
        Ok(MetabolicGraph { inner })
    }

    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn reaction_count(&self) -> usize {
        self.inner.reaction_count()
    }

    fn compound_count(&self) -> usize {
        self.inner.compound_count()
    }

    fn __contains__(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    fn reachable(&self, source: &str) -> PyResult<Vec<String>> {
        Ok(self
            .inner
            .reachable(source)
            .map_err(to_py_err)?
            .into_iter()
            .collect())
    }

    fn is_reachable(&self, source: &str, target: &str) -> PyResult<bool> {
        self.inner.is_reachable(source, target).map_err(to_py_err)
    }

    /// Distance from `source` to every node, infinite for unreachable nodes
    #[pyo3(signature = (source, strategy="linear"))]
    fn distances(&self, source: &str, strategy: &str) -> PyResult<Vec<(String, f64)>> {
        let paths = self
            .inner
            .distances_with(source, parse_strategy(strategy)?)
            .map_err(to_py_err)?;
        Ok(paths.distances.into_iter().collect())
    }

    /// Shortest path as (node ids, distance), an empty list and inf when unreachable
    #[pyo3(signature = (source, dest, strategy="linear"))]
    fn path(&self, source: &str, dest: &str, strategy: &str) -> PyResult<(Vec<String>, f64)> {
        let path = self
            .inner
            .path_with(source, dest, parse_strategy(strategy)?)
            .map_err(to_py_err)?;
        Ok((path.nodes, path.distance))
    }

    /// Renderer document as a JSON string
    #[pyo3(signature = (source=None, highlight=Vec::new(), include=None))]
    fn export_json(
        &self,
        source: Option<String>,
        highlight: Vec<String>,
        include: Option<Vec<String>>,
    ) -> PyResult<String> {
        let mut options = ExportOptionsBuilder::default();
        options.highlight(highlight);
        if let Some(source) = source {
            options.source(source);
        }
        if let Some(include) = include {
            options.include(include);
        }
        let options = options
            .build()
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        let export = self.inner.export(&options).map_err(to_py_err)?;
        export
            .to_json_string()
            .map_err(|err| PyRuntimeError::new_err(err.to_string()))
    }
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<MetabolicGraph>()?;
    Ok(())
}
