//! Command line queries over the compound/reaction graph of a COBRA JSON model
//!
//! Ids are taken verbatim; resolving user typed names to ids is left to other tools.
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use metnet_core::analysis::shortest_path::ShortestPathStrategy;
use metnet_core::export::ExportOptionsBuilder;
use metnet_core::graph::{Graph, GraphBuilder, WeightingPolicy};
use metnet_core::metabolic_model::model::Model;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Reachability and shortest path queries over a metabolic network
#[derive(Parser, Debug)]
#[command(name = "metnet")]
#[command(about = "Query the compound/reaction graph of a metabolic model", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the nodes reachable from a source, or test whether one target is reachable
    Reachable {
        #[command(flatten)]
        graph: GraphArgs,
        /// Id of the source node
        source: String,
        /// Only report whether this node is reachable
        #[arg(long)]
        target: Option<String>,
    },
    /// Find the shortest path between two nodes
    Path {
        #[command(flatten)]
        graph: GraphArgs,
        /// Id of the source node
        source: String,
        /// Id of the destination node
        dest: String,
        /// Use a binary heap instead of a linear scan to select nodes
        #[arg(long)]
        heap: bool,
    },
    /// Write the graph as a renderer document
    Export {
        #[command(flatten)]
        graph: GraphArgs,
        /// Id of the source node
        source: String,
        /// Ids of nodes to highlight
        #[arg(long)]
        highlight: Vec<String>,
        /// Only export the nodes reachable from the source
        #[arg(long)]
        reachable_only: bool,
        /// Output file, stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Options shared by every command for loading the model and building the graph
#[derive(Args, Debug)]
struct GraphArgs {
    /// Path to a COBRA JSON model
    model: PathBuf,
    /// Only include reactions of this subsystem (repeatable)
    #[arg(long = "subsystem")]
    subsystems: Vec<String>,
    /// Give every edge weight 1 instead of the coefficient magnitude
    #[arg(long)]
    unit_weights: bool,
}

impl GraphArgs {
    fn load(&self) -> anyhow::Result<Graph> {
        let model = Model::read_json(&self.model)
            .with_context(|| format!("reading model {}", self.model.display()))?;
        let weighting = if self.unit_weights {
            WeightingPolicy::UniformUnitWeight
        } else {
            WeightingPolicy::StoichiometricMagnitude
        };
        let subsystems: Vec<&str> = self.subsystems.iter().map(String::as_str).collect();
        let filter = if subsystems.is_empty() {
            None
        } else {
            Some(subsystems.as_slice())
        };
        let graph = model
            .to_graph(filter, &GraphBuilder::new(weighting))
            .context("building graph")?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph ready"
        );
        Ok(graph)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Reachable {
            graph,
            source,
            target,
        } => {
            let graph = graph.load()?;
            match target {
                Some(target) => {
                    let found = graph.is_reachable(&source, &target)?;
                    println!("{}", if found { "reachable" } else { "unreachable" });
                }
                None => {
                    for id in graph.reachable(&source)? {
                        println!("{id}");
                    }
                }
            }
        }
        Command::Path {
            graph,
            source,
            dest,
            heap,
        } => {
            let graph = graph.load()?;
            let strategy = if heap {
                ShortestPathStrategy::BinaryHeap
            } else {
                ShortestPathStrategy::LinearScan
            };
            let path = graph.path_with(&source, &dest, strategy)?;
            if path.is_empty() {
                println!("{dest} is unreachable from {source}");
            } else {
                println!("{}", path.nodes.join(" -> "));
                println!("distance: {}", path.distance);
            }
        }
        Command::Export {
            graph,
            source,
            highlight,
            reachable_only,
            output,
        } => {
            let graph = graph.load()?;
            let mut options = ExportOptionsBuilder::default();
            options.source(source.as_str()).highlight(highlight);
            if reachable_only {
                options.include(graph.reachable(&source)?.into_iter().collect::<Vec<_>>());
            }
            let export = graph.export(&options.build()?)?;
            let document = export.to_json_string()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, document)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "export written");
                }
                None => println!("{document}"),
            }
        }
    }
    Ok(())
}
