//! Item and recipe records as exported by the game data tools.
//!
//! Field names follow the `camelCase` keys of `data1.0.json`. Unknown keys
//! (sink points, energy values, fluid colors, ...) are ignored, and absent
//! optional keys fall back to their defaults so partially populated exports
//! still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{ItemId, MachineId, RecipeId};

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A tracked material or product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Item {
    /// Unique class name.
    pub class_name: ItemId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// How many units fit in one inventory slot. Absent for some exports.
    #[serde(default)]
    pub stack_size: Option<u32>,
    /// Icon slug used to build image file names.
    #[serde(default)]
    pub icon: Option<String>,
    /// In-game description text.
    #[serde(default)]
    pub description: String,
}

impl Item {
    /// Items that stack to 1 (equipment, buildings) are not tracked
    /// materials.
    pub const fn is_tracked_material(&self) -> bool {
        !matches!(self.stack_size, Some(1))
    }
}

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// An item reference with a quantity, used for ingredients and products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemAmount {
    /// The referenced item.
    pub item: ItemId,
    /// Units consumed or produced per cycle.
    #[serde(default)]
    pub amount: f64,
}

/// A transformation of ingredient items into product items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Recipe {
    /// Unique class name.
    pub class_name: RecipeId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether this is an unlockable alternate recipe.
    #[serde(default)]
    pub alternate: bool,
    /// Whether the recipe can run in a production building.
    #[serde(default)]
    pub in_machine: bool,
    /// Consumed items.
    #[serde(default)]
    pub ingredients: Vec<ItemAmount>,
    /// Produced items.
    #[serde(default)]
    pub products: Vec<ItemAmount>,
    /// Buildings that can run the recipe.
    #[serde(default)]
    pub produced_in: Vec<MachineId>,
}

impl Recipe {
    /// Return whether `item` is one of this recipe's products.
    pub fn produces(&self, item: &ItemId) -> bool {
        self.products.iter().any(|product| &product.item == item)
    }

    /// Iterate over ingredient identifiers in declaration order.
    pub fn ingredient_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.ingredients.iter().map(|ingredient| &ingredient.item)
    }

    /// Iterate over product identifiers in declaration order.
    pub fn product_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.products.iter().map(|product| &product.item)
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The full game export: every item and recipe keyed by class name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// All items.
    #[serde(default)]
    pub items: BTreeMap<ItemId, Item>,
    /// All recipes.
    #[serde(default)]
    pub recipes: BTreeMap<RecipeId, Recipe>,
}
