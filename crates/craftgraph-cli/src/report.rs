//! Plain-text tier table.

use std::io::Write;

use craftgraph_core::{Classification, FilteredDataset};
use craftgraph_types::{Item, Termination, Tier};

/// Write `tier  id  name` rows sorted by tier then id, then per-tier counts
/// and a summary.
pub fn write_tier_table(
    out: &mut impl Write,
    filtered: &FilteredDataset,
    classification: &Classification,
) -> std::io::Result<()> {
    let mut rows: Vec<(Tier, &Item)> = filtered
        .items
        .iter()
        .map(|item| {
            let tier = classification
                .tier(&item.class_name)
                .unwrap_or(classification.max_tier);
            (tier, item)
        })
        .collect();
    rows.sort_by(|(a_tier, a), (b_tier, b)| {
        a_tier.cmp(b_tier).then_with(|| a.class_name.cmp(&b.class_name))
    });

    for (tier, item) in rows {
        let marker = if classification.is_resolved(&item.class_name) {
            ""
        } else {
            " (unresolved)"
        };
        writeln!(
            out,
            "{:>3}  {:<40}  {}{marker}",
            tier.value(),
            item.class_name.as_str(),
            item.name
        )?;
    }

    let per_tier: Vec<String> = classification
        .count_by_tier()
        .into_iter()
        .map(|(tier, count)| format!("{tier}:{count}"))
        .collect();
    writeln!(out, "per tier  {}", per_tier.join("  "))?;

    let reason = match classification.termination {
        Termination::Converged => "all items resolved",
        Termination::Stalled => "stopped: no further progress",
        Termination::CeilingReached => "stopped: tier ceiling reached",
    };
    writeln!(
        out,
        "{} items, {} passes, {} unresolved ({reason})",
        classification.tiers.len(),
        classification.passes,
        classification.unresolved.len()
    )
}
