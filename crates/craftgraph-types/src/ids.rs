//! Type-safe identifier wrappers around the dataset's class names.
//!
//! The game export keys every record by an Unreal class name such as
//! `Desc_OreIron_C` or `Recipe_IronPlate_C`. Items, recipes, and machines
//! share that string shape, so each gets its own newtype to keep them from
//! being mixed at compile time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from a class name.
            pub fn new(class_name: impl Into<String>) -> Self {
                Self(class_name.into())
            }

            /// Borrow the class name.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`].
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(class_name: &str) -> Self {
                Self(String::from(class_name))
            }
        }

        impl From<String> for $name {
            fn from(class_name: String) -> Self {
                Self(class_name)
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an item (a node in the crafting graph).
    ItemId
}

define_id! {
    /// Unique identifier for a recipe.
    RecipeId
}

define_id! {
    /// Identifier of a building that runs recipes (e.g. `Desc_SmelterMk1_C`).
    MachineId
}
