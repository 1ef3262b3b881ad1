//! Filtering, complexity-tier classification, and graph building for
//! crafting dependency graphs.
//!
//! The pipeline reads a game data export, keeps the tracked items and the
//! standard machine recipes, layers items into complexity tiers, and turns
//! recipes into directed and co-ingredient edges for a renderer.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `craftgraph-config.yaml` into
//!   strongly-typed structs.
//! - [`dataset`] -- Loading the JSON export.
//! - [`filter`] -- Item and recipe selection.
//! - [`complexity`] -- Breadth-first tier assignment.
//! - [`graph`] -- Node and edge construction.
//! - [`view`] -- Default visibility and user toggles.
//! - [`assets`] -- Icon file names and URLs.
//! - [`pipeline`] -- All of the above in order.

pub mod assets;
pub mod complexity;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod graph;
pub mod pipeline;
pub mod view;

// Re-export primary types at crate root.
pub use complexity::{Classification, classify};
pub use config::{ConfigError, CraftgraphConfig};
pub use dataset::DatasetError;
pub use filter::{FilteredDataset, filter_dataset};
pub use graph::{CraftGraph, build_graph};
pub use pipeline::{PipelineOutput, run, run_with_view};
pub use view::{ViewEvent, ViewState, Visibility};
