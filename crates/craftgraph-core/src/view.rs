//! What the renderer shows.
//!
//! Tiers never change after classification; the view only decides which
//! nodes and edges are hidden. User toggles arrive as [`ViewEvent`]s and
//! the hidden sets are recomputed from scratch each time, so the result
//! never depends on the order toggles were applied in.
//!
//! Rules, evaluated in order:
//!
//! 1. A node is shown if its per-item override allows it (default: yes)
//!    and its tier is at most the threshold.
//! 2. An edge is shown if its kind is enabled and both endpoints are shown.
//! 3. With isolated-node hiding on, a node from step 1 stays shown only if
//!    a shown edge touches it.

use std::collections::{BTreeMap, BTreeSet};

use craftgraph_types::{EdgeKind, ItemId, Tier};
use tracing::debug;

use crate::config::ViewConfig;
use crate::graph::CraftGraph;

/// A user toggle from the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Hide items above this tier.
    SetMaxTier(Tier),
    /// Show or hide co-ingredient edges.
    ShowCoIngredients(bool),
    /// Hide or show nodes with no shown edge.
    HideIsolated(bool),
    /// Per-item checkbox.
    SetItemVisible {
        /// The item.
        item: ItemId,
        /// Whether it should be shown.
        visible: bool,
    },
}

/// Current view settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Items above this tier are hidden.
    pub max_tier: Tier,
    /// Whether co-ingredient edges are shown.
    pub show_co_ingredients: bool,
    /// Whether nodes with no shown edge are hidden.
    pub hide_isolated: bool,
    /// Per-item visibility. Items not listed are shown.
    pub item_overrides: BTreeMap<ItemId, bool>,
}

impl From<&ViewConfig> for ViewState {
    fn from(config: &ViewConfig) -> Self {
        Self {
            max_tier: config.max_tier,
            show_co_ingredients: config.show_co_ingredients,
            hide_isolated: config.hide_isolated,
            item_overrides: config.item_overrides.clone(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::from(&ViewConfig::default())
    }
}

impl ViewState {
    /// Apply one user toggle.
    pub fn apply(&mut self, event: ViewEvent) {
        debug!(?event, "View event");
        match event {
            ViewEvent::SetMaxTier(tier) => self.max_tier = tier,
            ViewEvent::ShowCoIngredients(show) => self.show_co_ingredients = show,
            ViewEvent::HideIsolated(hide) => self.hide_isolated = hide,
            ViewEvent::SetItemVisible { item, visible } => {
                self.item_overrides.insert(item, visible);
            }
        }
    }

    /// Whether an item's own checkbox allows it to be shown.
    pub fn item_enabled(&self, item: &ItemId) -> bool {
        self.item_overrides.get(item).copied().unwrap_or(true)
    }

    /// Whether edges of this kind are enabled.
    pub const fn kind_enabled(&self, kind: EdgeKind) -> bool {
        match kind {
            EdgeKind::Directed => true,
            EdgeKind::CoIngredient => self.show_co_ingredients,
        }
    }

    /// Compute hidden nodes and edges for a graph.
    pub fn visibility(&self, graph: &CraftGraph) -> Visibility {
        let mut shown: BTreeSet<&ItemId> = graph
            .nodes
            .iter()
            .filter(|node| self.item_enabled(&node.id) && node.tier <= self.max_tier)
            .map(|node| &node.id)
            .collect();

        let mut hidden_edges = BTreeSet::new();
        let mut touched: BTreeSet<&ItemId> = BTreeSet::new();
        for edge in &graph.edges {
            if self.kind_enabled(edge.kind) && shown.contains(&edge.from) && shown.contains(&edge.to)
            {
                touched.insert(&edge.from);
                touched.insert(&edge.to);
            } else {
                hidden_edges.insert(edge.id.clone());
            }
        }

        if self.hide_isolated {
            shown.retain(|id| touched.contains(id));
        }

        let hidden_nodes: BTreeSet<ItemId> = graph
            .nodes
            .iter()
            .filter(|node| !shown.contains(&node.id))
            .map(|node| node.id.clone())
            .collect();

        debug!(
            hidden_nodes = hidden_nodes.len(),
            hidden_edges = hidden_edges.len(),
            "Visibility computed"
        );

        Visibility {
            hidden_nodes,
            hidden_edges,
        }
    }
}

/// Hidden node and edge sets for one view of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    /// Items whose node is hidden.
    pub hidden_nodes: BTreeSet<ItemId>,
    /// Identifiers of hidden edges.
    pub hidden_edges: BTreeSet<String>,
}

impl Visibility {
    /// Whether the item's node is hidden.
    pub fn is_node_hidden(&self, item: &ItemId) -> bool {
        self.hidden_nodes.contains(item)
    }

    /// Whether the edge is hidden.
    pub fn is_edge_hidden(&self, edge_id: &str) -> bool {
        self.hidden_edges.contains(edge_id)
    }

    /// Write the hidden flags onto the graph's nodes and edges.
    pub fn apply_to(&self, graph: &mut CraftGraph) {
        for node in &mut graph.nodes {
            node.hidden = self.is_node_hidden(&node.id);
        }
        for edge in &mut graph.edges {
            edge.hidden = self.is_edge_hidden(&edge.id);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use craftgraph_types::{GraphEdge, GraphNode, RecipeId};

    use super::*;

    fn node(id: &str, tier: u8) -> GraphNode {
        GraphNode {
            id: ItemId::from(id),
            label: String::from(id),
            description: String::new(),
            icon_url: None,
            tier: Tier(tier),
            hidden: false,
        }
    }

    fn edge(id: &str, kind: EdgeKind, from: &str, to: &str) -> GraphEdge {
        GraphEdge {
            id: String::from(id),
            kind,
            from: ItemId::from(from),
            to: ItemId::from(to),
            recipe: RecipeId::from("Recipe_Test_C"),
            recipe_name: String::from("Test"),
            produced_in: Vec::new(),
            hidden: false,
        }
    }

    /// A(0) + B(0) -> C(1) -> D(2); E(0) is isolated.
    fn graph() -> CraftGraph {
        CraftGraph {
            nodes: vec![node("A", 0), node("B", 0), node("C", 1), node("D", 2), node("E", 0)],
            edges: vec![
                edge("directed-0", EdgeKind::Directed, "A", "C"),
                edge("directed-1", EdgeKind::Directed, "B", "C"),
                edge("undirected-2", EdgeKind::CoIngredient, "A", "B"),
                edge("directed-3", EdgeKind::Directed, "C", "D"),
            ],
        }
    }

    fn open_view() -> ViewState {
        ViewState {
            max_tier: Tier(13),
            show_co_ingredients: true,
            hide_isolated: false,
            item_overrides: BTreeMap::new(),
        }
    }

    #[test]
    fn everything_shown_by_default() {
        let vis = open_view().visibility(&graph());
        assert!(vis.hidden_nodes.is_empty());
        assert!(vis.hidden_edges.is_empty());
    }

    #[test]
    fn tier_threshold_hides_nodes_and_their_edges() {
        let mut view = open_view();
        view.apply(ViewEvent::SetMaxTier(Tier(1)));
        let vis = view.visibility(&graph());
        assert!(vis.is_node_hidden(&ItemId::from("D")));
        assert!(!vis.is_node_hidden(&ItemId::from("C")));
        assert!(vis.is_edge_hidden("directed-3"));
        assert!(!vis.is_edge_hidden("directed-0"));
    }

    #[test]
    fn co_ingredient_toggle_hides_only_those_edges() {
        let mut view = open_view();
        view.apply(ViewEvent::ShowCoIngredients(false));
        let vis = view.visibility(&graph());
        assert_eq!(vis.hidden_edges.len(), 1);
        assert!(vis.is_edge_hidden("undirected-2"));
        assert!(vis.hidden_nodes.is_empty());
    }

    #[test]
    fn hide_isolated_hides_unconnected_nodes() {
        let mut view = open_view();
        view.apply(ViewEvent::HideIsolated(true));
        let vis = view.visibility(&graph());
        assert_eq!(vis.hidden_nodes.len(), 1);
        assert!(vis.is_node_hidden(&ItemId::from("E")));
    }

    #[test]
    fn isolation_follows_other_filters() {
        // Hiding C leaves D with no shown edge.
        let mut view = open_view();
        view.apply(ViewEvent::HideIsolated(true));
        view.apply(ViewEvent::SetItemVisible {
            item: ItemId::from("C"),
            visible: false,
        });
        let vis = view.visibility(&graph());
        assert!(vis.is_node_hidden(&ItemId::from("C")));
        assert!(vis.is_node_hidden(&ItemId::from("D")));
        // A and B still share a co-ingredient edge.
        assert!(!vis.is_node_hidden(&ItemId::from("A")));
        assert!(!vis.is_node_hidden(&ItemId::from("B")));
    }

    #[test]
    fn item_override_can_reenable() {
        let mut view = open_view();
        view.apply(ViewEvent::SetItemVisible {
            item: ItemId::from("A"),
            visible: false,
        });
        assert!(!view.item_enabled(&ItemId::from("A")));
        view.apply(ViewEvent::SetItemVisible {
            item: ItemId::from("A"),
            visible: true,
        });
        assert!(view.visibility(&graph()).hidden_nodes.is_empty());
    }

    #[test]
    fn toggle_order_does_not_matter() {
        let events = [
            ViewEvent::SetMaxTier(Tier(1)),
            ViewEvent::HideIsolated(true),
            ViewEvent::ShowCoIngredients(false),
        ];
        let mut forward = open_view();
        for event in events.iter().cloned() {
            forward.apply(event);
        }
        let mut backward = open_view();
        for event in events.iter().rev().cloned() {
            backward.apply(event);
        }
        assert_eq!(forward.visibility(&graph()), backward.visibility(&graph()));
    }

    #[test]
    fn default_view_hides_sam_ingot() {
        let g = CraftGraph {
            nodes: vec![node("Desc_SAMIngot_C", 1), node("Desc_OreIron_C", 0)],
            edges: Vec::new(),
        };
        let vis = ViewState::default().visibility(&g);
        assert!(vis.is_node_hidden(&ItemId::from("Desc_SAMIngot_C")));
        assert!(!vis.is_node_hidden(&ItemId::from("Desc_OreIron_C")));
    }

    #[test]
    fn apply_to_sets_flags() {
        let mut g = graph();
        let mut view = open_view();
        view.apply(ViewEvent::SetMaxTier(Tier(0)));
        let vis = view.visibility(&g);
        vis.apply_to(&mut g);
        assert!(g.node(&ItemId::from("C")).unwrap().hidden);
        assert!(!g.node(&ItemId::from("A")).unwrap().hidden);
        assert!(g.edges.iter().filter(|e| e.kind == EdgeKind::Directed).all(|e| e.hidden));
        assert!(!g.edges.iter().any(|e| e.kind == EdgeKind::CoIngredient && e.hidden));
    }
}
