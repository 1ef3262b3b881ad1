//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use craftgraph_core::{ViewEvent, ViewState};
use craftgraph_types::Tier;

/// Crafting dependency graphs with complexity tiers.
#[derive(Debug, Parser)]
#[command(name = "craftgraph", version, about)]
pub struct Cli {
    /// Configuration file. A missing file means built-in defaults.
    #[arg(long, global = true, default_value = "craftgraph-config.yaml")]
    pub config: PathBuf,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the node/edge/tier document for the renderer.
    Graph {
        /// Game data export (`data1.0.json`).
        #[arg(long)]
        data: PathBuf,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// View toggles applied on top of the configured default view.
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Print every item's tier, lowest first.
    Tiers {
        /// Game data export (`data1.0.json`).
        #[arg(long)]
        data: PathBuf,
    },

    /// Download item icons that are not already present.
    Icons {
        /// Game data export (`data1.0.json`).
        #[arg(long)]
        data: PathBuf,

        /// Target directory. Defaults to `assets.icon_dir`.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// View overrides for the `graph` subcommand.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ViewArgs {
    /// Hide items above this tier.
    #[arg(long)]
    pub max_tier: Option<u8>,

    /// Hide co-ingredient edges.
    #[arg(long)]
    pub no_co_ingredients: bool,

    /// Hide nodes with no visible edge.
    #[arg(long)]
    pub hide_isolated: bool,

    /// Show an item hidden by default (repeatable).
    #[arg(long = "show", value_name = "ITEM")]
    pub show: Vec<String>,

    /// Hide an item (repeatable).
    #[arg(long = "hide", value_name = "ITEM")]
    pub hide: Vec<String>,
}

impl ViewArgs {
    /// The toggles as view events, in a fixed order.
    pub fn events(&self) -> Vec<ViewEvent> {
        let mut events: Vec<ViewEvent> = self
            .max_tier
            .map(|tier| ViewEvent::SetMaxTier(Tier(tier)))
            .into_iter()
            .collect();
        if self.no_co_ingredients {
            events.push(ViewEvent::ShowCoIngredients(false));
        }
        if self.hide_isolated {
            events.push(ViewEvent::HideIsolated(true));
        }
        for item in &self.show {
            events.push(ViewEvent::SetItemVisible {
                item: item.as_str().into(),
                visible: true,
            });
        }
        for item in &self.hide {
            events.push(ViewEvent::SetItemVisible {
                item: item.as_str().into(),
                visible: false,
            });
        }
        events
    }

    /// Apply the toggles to a starting view.
    pub fn apply_to(&self, mut view: ViewState) -> ViewState {
        for event in self.events() {
            view.apply(event);
        }
        view
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable)]
mod tests {
    use craftgraph_types::ItemId;

    use super::*;

    #[test]
    fn parses_graph_with_toggles() {
        let cli = Cli::try_parse_from([
            "craftgraph",
            "graph",
            "--data",
            "data/data1.0.json",
            "--max-tier",
            "4",
            "--hide-isolated",
            "--show",
            "Desc_SAMIngot_C",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("craftgraph-config.yaml"));
        let Command::Graph { data, out, view } = cli.command else {
            unreachable!("expected graph subcommand");
        };
        assert_eq!(data, PathBuf::from("data/data1.0.json"));
        assert!(out.is_none());
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::SetMaxTier(Tier(4)),
                ViewEvent::HideIsolated(true),
                ViewEvent::SetItemVisible {
                    item: ItemId::from("Desc_SAMIngot_C"),
                    visible: true,
                },
            ]
        );
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from([
            "craftgraph",
            "tiers",
            "--data",
            "d.json",
            "--config",
            "custom.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("custom.yaml"));
        assert!(matches!(cli.command, Command::Tiers { .. }));
    }

    #[test]
    fn data_is_required() {
        assert!(Cli::try_parse_from(["craftgraph", "icons"]).is_err());
    }

    #[test]
    fn toggles_override_default_view() {
        let args = ViewArgs {
            max_tier: Some(2),
            no_co_ingredients: true,
            hide_isolated: false,
            show: vec![String::from("Desc_SAMIngot_C")],
            hide: vec![String::from("Desc_Leaves_C")],
        };
        let view = args.apply_to(ViewState::default());
        assert_eq!(view.max_tier, Tier(2));
        assert!(!view.show_co_ingredients);
        assert!(view.item_enabled(&ItemId::from("Desc_SAMIngot_C")));
        assert!(!view.item_enabled(&ItemId::from("Desc_Leaves_C")));
    }

    #[test]
    fn no_toggles_no_events() {
        assert!(ViewArgs::default().events().is_empty());
    }
}
