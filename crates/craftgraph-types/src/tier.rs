//! Complexity tiers.
//!
//! A tier approximates how many production steps separate an item from raw
//! materials. Tier 0 is raw or externally supplied; the configured ceiling
//! (13 for the shipped game data) doubles as the "unresolved" sentinel.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Complexity layer index of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tier(pub u8);

impl Tier {
    /// Raw or never-synthesized material.
    pub const RAW: Self = Self(0);

    /// Ceiling used by the game data: both the sentinel for unresolved
    /// items and the highest tier the classifier will assign.
    pub const DEFAULT_CEILING: Self = Self(13);

    /// Return the numeric layer.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Return whether this is the raw tier.
    pub const fn is_raw(self) -> bool {
        self.0 == 0
    }

    /// The following tier, or `None` at `u8::MAX`.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::DEFAULT_CEILING
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
