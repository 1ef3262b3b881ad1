//! Complexity-tier assignment.
//!
//! Items are layered breadth-first over the recipe graph:
//!
//! - Tier 0: configured raw materials, plus any item no recipe produces.
//! - Tier `k`: items with some producing recipe whose ingredients were all
//!   tiered before pass `k` started.
//!
//! Each pass decides against a snapshot of the tiered set taken at pass
//! start, so the result does not depend on iteration order. Passes stop
//! when everything is tiered, when a pass makes no progress (cycles or
//! unreachable items), or after the pass for the configured ceiling.
//! Anything left over keeps the ceiling as its tier.

use std::collections::{BTreeMap, BTreeSet};

use craftgraph_types::{Item, ItemId, Recipe, Termination, Tier};
use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;

/// Result of tier assignment over one filtered dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Tier of every input item.
    pub tiers: BTreeMap<ItemId, Tier>,
    /// The ceiling in effect. Unresolved items carry this tier.
    pub max_tier: Tier,
    /// Number of layering passes that ran (tier 0 not counted).
    pub passes: u8,
    /// Why assignment stopped.
    pub termination: Termination,
    /// Items no pass reached.
    pub unresolved: BTreeSet<ItemId>,
}

impl Classification {
    /// Tier of an item, or `None` if it was not part of the input.
    pub fn tier(&self, item: &ItemId) -> Option<Tier> {
        self.tiers.get(item).copied()
    }

    /// Whether an item was reached by some pass.
    pub fn is_resolved(&self, item: &ItemId) -> bool {
        self.tiers.contains_key(item) && !self.unresolved.contains(item)
    }

    /// Number of items at each tier.
    pub fn count_by_tier(&self) -> BTreeMap<Tier, usize> {
        let mut counts: BTreeMap<Tier, usize> = BTreeMap::new();
        for tier in self.tiers.values() {
            let entry = counts.entry(*tier).or_insert(0);
            *entry = entry.saturating_add(1);
        }
        counts
    }
}

/// Assign a complexity tier to every item.
///
/// Infallible: empty input gives an empty map, and cyclic or unreachable
/// items end at `config.max_tier` with the reason recorded in
/// [`Classification::termination`].
pub fn classify(items: &[Item], recipes: &[Recipe], config: &ClassifierConfig) -> Classification {
    let ceiling = config.max_tier;

    // Product -> recipes that make it.
    let mut producers: BTreeMap<&ItemId, Vec<&Recipe>> = BTreeMap::new();
    for recipe in recipes {
        for product in recipe.product_ids() {
            producers.entry(product).or_default().push(recipe);
        }
    }

    let mut tiers: BTreeMap<ItemId, Tier> = BTreeMap::new();
    let mut assigned: BTreeSet<&ItemId> = BTreeSet::new();
    let mut unassigned: BTreeSet<&ItemId> = BTreeSet::new();

    for item in items {
        let id = &item.class_name;
        if config.raw_materials.contains(id) || !producers.contains_key(id) {
            tiers.insert(id.clone(), Tier::RAW);
            assigned.insert(id);
            unassigned.remove(id);
            debug!(item = %id, "Assigned tier 0");
        } else if !assigned.contains(id) {
            tiers.insert(id.clone(), ceiling);
            unassigned.insert(id);
        }
    }

    let mut current = Tier(1);
    let mut passes: u8 = 0;
    let mut stalled = false;

    while !unassigned.is_empty() && current <= ceiling {
        passes = passes.saturating_add(1);

        // `assigned` is not touched until the pass is decided.
        let newly_assigned: Vec<&ItemId> = unassigned
            .iter()
            .copied()
            .filter(|id| {
                producers.get(id).is_some_and(|candidates| {
                    candidates.iter().any(|recipe| {
                        recipe
                            .ingredient_ids()
                            .all(|ingredient| assigned.contains(ingredient))
                    })
                })
            })
            .collect();

        if newly_assigned.is_empty() {
            stalled = true;
            warn!(
                tier = %current,
                unresolved = unassigned.len(),
                "No more items can be assigned a tier, stopping"
            );
            break;
        }

        for id in newly_assigned {
            unassigned.remove(id);
            assigned.insert(id);
            tiers.insert(id.clone(), current);
            debug!(item = %id, tier = %current, "Assigned tier");
        }

        if current >= ceiling {
            break;
        }
        match current.next() {
            Some(next) => current = next,
            None => break,
        }
    }

    let termination = if unassigned.is_empty() {
        Termination::Converged
    } else if stalled {
        Termination::Stalled
    } else {
        warn!(
            max_tier = %ceiling,
            unresolved = unassigned.len(),
            "Tier ceiling reached with items still unassigned"
        );
        Termination::CeilingReached
    };

    let unresolved: BTreeSet<ItemId> = unassigned.into_iter().cloned().collect();

    info!(
        items = tiers.len(),
        passes,
        unresolved = unresolved.len(),
        ?termination,
        "Complexity tiers assigned"
    );

    Classification {
        tiers,
        max_tier: ceiling,
        passes,
        termination,
        unresolved,
    }
}
