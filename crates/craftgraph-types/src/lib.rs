//! Shared type definitions for the craftgraph workspace.
//!
//! These are the records read from the game data export and the graph
//! document written for the renderer. Output types derive `ts-rs` so the
//! renderer can import matching `TypeScript` definitions.
//!
//! # Modules
//!
//! - [`ids`] -- Newtype identifiers for items, recipes, and machines
//! - [`records`] -- `Item`, `Recipe`, and the full `Dataset`
//! - [`tier`] -- The complexity [`Tier`]
//! - [`graph`] -- Nodes, edges, and the [`GraphDocument`]

pub mod graph;
pub mod ids;
pub mod records;
pub mod tier;

pub use graph::{EdgeKind, GraphDocument, GraphEdge, GraphNode, Termination};
pub use ids::{ItemId, MachineId, RecipeId};
pub use records::{Dataset, Item, ItemAmount, Recipe};
pub use tier::Tier;
