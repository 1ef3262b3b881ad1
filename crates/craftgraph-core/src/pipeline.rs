//! End-to-end assembly of the renderer document.

use craftgraph_types::{Dataset, GraphDocument};

use crate::complexity::{Classification, classify};
use crate::config::CraftgraphConfig;
use crate::filter::{FilteredDataset, filter_dataset};
use crate::graph::{CraftGraph, build_graph};
use crate::view::ViewState;

/// Every intermediate stage for one dataset.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Items and recipes that took part.
    pub filtered: FilteredDataset,
    /// Tier assignment.
    pub classification: Classification,
    /// Nodes and edges with the default view's hidden flags applied.
    pub graph: CraftGraph,
}

impl PipelineOutput {
    /// Package the result for the renderer.
    pub fn into_document(self) -> GraphDocument {
        GraphDocument {
            max_tier: self.classification.max_tier,
            passes: self.classification.passes,
            termination: self.classification.termination,
            tiers: self.classification.tiers,
            nodes: self.graph.nodes,
            edges: self.graph.edges,
        }
    }
}

/// Filter, classify, build the graph, and apply the configured default view.
pub fn run(dataset: &Dataset, config: &CraftgraphConfig) -> PipelineOutput {
    run_with_view(dataset, config, &ViewState::from(&config.view))
}

/// Like [`run`], with hidden flags taken from `view` instead of the config.
pub fn run_with_view(
    dataset: &Dataset,
    config: &CraftgraphConfig,
    view: &ViewState,
) -> PipelineOutput {
    let filtered = filter_dataset(dataset, &config.filter);
    let classification = classify(&filtered.items, &filtered.recipes, &config.classifier);
    let mut graph = build_graph(&filtered, &classification, &config.assets);

    view.visibility(&graph).apply_to(&mut graph);

    PipelineOutput {
        filtered,
        classification,
        graph,
    }
}
