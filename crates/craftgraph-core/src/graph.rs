//! Turning filtered items and recipes into graph nodes and edges.
//!
//! Each recipe contributes one directed edge per (ingredient, product) pair
//! and one co-ingredient edge per unordered pair of its ingredients. Edges
//! whose endpoint is not a filtered item are dropped. Edge identifiers come
//! from a single counter shared by both kinds.

use std::collections::BTreeSet;

use craftgraph_types::{EdgeKind, GraphEdge, GraphNode, ItemId, Recipe};
use tracing::{debug, info};

use crate::assets::icon_url;
use crate::complexity::Classification;
use crate::config::AssetConfig;
use crate::filter::FilteredDataset;

/// Nodes and edges for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraftGraph {
    /// One node per filtered item, in item order.
    pub nodes: Vec<GraphNode>,
    /// Recipe edges, in recipe order.
    pub edges: Vec<GraphEdge>,
}

impl CraftGraph {
    /// Look up a node by item.
    pub fn node(&self, id: &ItemId) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Iterate over edges of one kind.
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |edge| edge.kind == kind)
    }
}

/// Build nodes and edges from a filtered dataset and its tiers.
pub fn build_graph(
    filtered: &FilteredDataset,
    classification: &Classification,
    assets: &AssetConfig,
) -> CraftGraph {
    let nodes: Vec<GraphNode> = filtered
        .items
        .iter()
        .map(|item| GraphNode {
            id: item.class_name.clone(),
            label: item.name.clone(),
            description: item.description.clone(),
            icon_url: icon_url(item, assets),
            tier: classification
                .tier(&item.class_name)
                .unwrap_or(classification.max_tier),
            hidden: false,
        })
        .collect();

    let known = filtered.item_ids();
    let mut builder = EdgeBuilder {
        known: &known,
        edges: Vec::new(),
        next_id: 0,
        dropped: 0,
    };
    for recipe in &filtered.recipes {
        builder.add_recipe(recipe);
    }

    info!(
        nodes = nodes.len(),
        edges = builder.edges.len(),
        dropped_edges = builder.dropped,
        "Graph built"
    );

    CraftGraph {
        nodes,
        edges: builder.edges,
    }
}

struct EdgeBuilder<'a> {
    known: &'a BTreeSet<&'a ItemId>,
    edges: Vec<GraphEdge>,
    next_id: u64,
    dropped: u64,
}

impl EdgeBuilder<'_> {
    fn add_recipe(&mut self, recipe: &Recipe) {
        for product in recipe.product_ids() {
            for ingredient in recipe.ingredient_ids() {
                self.push(recipe, EdgeKind::Directed, ingredient, product);
            }
        }

        let ingredients: Vec<&ItemId> = recipe.ingredient_ids().collect();
        for (i, first) in ingredients.iter().enumerate() {
            for second in ingredients.iter().skip(i.saturating_add(1)) {
                self.push(recipe, EdgeKind::CoIngredient, first, second);
            }
        }
    }

    fn push(&mut self, recipe: &Recipe, kind: EdgeKind, from: &ItemId, to: &ItemId) {
        if !self.known.contains(from) || !self.known.contains(to) {
            debug!(recipe = %recipe.class_name, %from, %to, "Dropping edge to unknown item");
            self.dropped = self.dropped.saturating_add(1);
            return;
        }

        let prefix = match kind {
            EdgeKind::Directed => "directed",
            EdgeKind::CoIngredient => "undirected",
        };
        self.edges.push(GraphEdge {
            id: format!("{prefix}-{}", self.next_id),
            kind,
            from: from.clone(),
            to: to.clone(),
            recipe: recipe.class_name.clone(),
            recipe_name: recipe.name.clone(),
            produced_in: recipe.produced_in.clone(),
            hidden: false,
        });
        self.next_id = self.next_id.saturating_add(1);
    }
}
