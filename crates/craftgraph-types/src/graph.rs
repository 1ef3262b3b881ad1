//! Graph payload handed to the rendering layer.
//!
//! Nodes are items and edges are derived from recipes. Every type here
//! exports a `TypeScript` binding so the renderer and this workspace agree
//! on the document shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{ItemId, MachineId, RecipeId};
use crate::tier::Tier;

/// An item rendered as a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GraphNode {
    /// The item this node stands for.
    pub id: ItemId,
    /// Display label.
    pub label: String,
    /// Tooltip body text.
    pub description: String,
    /// Absolute icon URL, if the item has an icon.
    pub icon_url: Option<String>,
    /// Complexity tier.
    pub tier: Tier,
    /// Whether the node is hidden under the current view.
    pub hidden: bool,
}

/// How an edge relates its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EdgeKind {
    /// Ingredient to product.
    Directed,
    /// Two ingredients consumed by the same recipe.
    CoIngredient,
}

/// A recipe-derived edge between two item nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GraphEdge {
    /// Unique edge identifier (`directed-N` or `undirected-N`).
    pub id: String,
    /// Edge relation.
    pub kind: EdgeKind,
    /// Source node.
    pub from: ItemId,
    /// Target node.
    pub to: ItemId,
    /// The recipe the edge came from.
    pub recipe: RecipeId,
    /// Display name of that recipe.
    pub recipe_name: String,
    /// Buildings that run the recipe.
    pub produced_in: Vec<MachineId>,
    /// Whether the edge is hidden under the current view.
    pub hidden: bool,
}

impl GraphEdge {
    /// Return whether `item` is one of the endpoints.
    pub fn touches(&self, item: &ItemId) -> bool {
        &self.from == item || &self.to == item
    }
}

/// Why the tier classifier stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Termination {
    /// Every item received a tier.
    Converged,
    /// A pass assigned nothing; the remainder is cyclic or unreachable.
    Stalled,
    /// The pass limit was hit with items still unassigned.
    CeilingReached,
}

/// Everything the renderer needs for one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GraphDocument {
    /// Tier ceiling in effect; also the sentinel for unresolved items.
    pub max_tier: Tier,
    /// Layering passes the classifier ran.
    pub passes: u8,
    /// Why the classifier stopped.
    pub termination: Termination,
    /// Tier of every filtered item.
    pub tiers: BTreeMap<ItemId, Tier>,
    /// Item nodes.
    pub nodes: Vec<GraphNode>,
    /// Recipe edges.
    pub edges: Vec<GraphEdge>,
}
