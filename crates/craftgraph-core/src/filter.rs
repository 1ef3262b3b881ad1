//! Selecting the items and recipes that take part in the graph.
//!
//! Unstackable items (equipment, buildings) are dropped. Recipes must be
//! standard (not alternate), run in a machine, and produce something.
//! Optionally, recipes that only run in packaging or converting buildings
//! are dropped too, since they would otherwise link every fluid to its
//! packaged form.

use std::collections::BTreeSet;

use craftgraph_types::{Dataset, Item, ItemId, MachineId, Recipe};
use tracing::info;

use crate::config::FilterConfig;

/// The item and recipe subsets the classifier and graph builder work on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredDataset {
    /// Tracked items, ordered by identifier.
    pub items: Vec<Item>,
    /// Participating recipes, ordered by identifier.
    pub recipes: Vec<Recipe>,
}

impl FilteredDataset {
    /// Identifiers of every filtered item.
    pub fn item_ids(&self) -> BTreeSet<&ItemId> {
        self.items.iter().map(|item| &item.class_name).collect()
    }
}

/// Apply the item and recipe filters to a loaded dataset.
pub fn filter_dataset(dataset: &Dataset, config: &FilterConfig) -> FilteredDataset {
    let items: Vec<Item> = dataset
        .items
        .values()
        .filter(|item| item.is_tracked_material())
        .cloned()
        .collect();

    let recipes: Vec<Recipe> = dataset
        .recipes
        .values()
        .filter(|recipe| recipe_participates(recipe, config))
        .cloned()
        .collect();

    info!(
        items = items.len(),
        items_dropped = dataset.items.len().saturating_sub(items.len()),
        recipes = recipes.len(),
        recipes_dropped = dataset.recipes.len().saturating_sub(recipes.len()),
        "Dataset filtered"
    );

    FilteredDataset { items, recipes }
}

/// Return whether a recipe passes the filter.
pub fn recipe_participates(recipe: &Recipe, config: &FilterConfig) -> bool {
    !recipe.alternate
        && recipe.in_machine
        && !recipe.products.is_empty()
        && !runs_only_in(recipe, &config.excluded_machines)
}

/// True when the recipe has producers and every one of them is in `machines`.
fn runs_only_in(recipe: &Recipe, machines: &BTreeSet<MachineId>) -> bool {
    !recipe.produced_in.is_empty()
        && recipe
            .produced_in
            .iter()
            .all(|machine| machines.contains(machine))
}
