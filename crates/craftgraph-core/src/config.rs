//! Configuration loading and typed config structures for craftgraph.
//!
//! The canonical configuration lives in `craftgraph-config.yaml` at the
//! project root. Every section and field has a default matching the shipped
//! game data, so an empty or missing file yields a working setup.
//!
//! The raw-material list and tier ceiling feed straight into tier
//! assignment. Changing either changes every downstream tier.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use craftgraph_types::{ItemId, MachineId, Tier};
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `craftgraph-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CraftgraphConfig {
    /// Which recipes take part.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Tier assignment constants.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Default view presented to the renderer.
    #[serde(default)]
    pub view: ViewConfig,

    /// Icon locations.
    #[serde(default)]
    pub assets: AssetConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CraftgraphConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for asset locations:
    /// - `CRAFTGRAPH_ICON_BASE_URL` overrides `assets.icon_base_url`
    /// - `CRAFTGRAPH_ICON_DIR` overrides `assets.icon_dir`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document carries no mapping to deserialize.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.assets.apply_env_overrides();
        if !config.classifier.uses_default_ceiling() {
            warn!(
                max_tier = %config.classifier.max_tier,
                default = %Tier::DEFAULT_CEILING,
                "Non-default tier ceiling, tiers will not match the game data"
            );
        }
        Ok(config)
    }
}

/// Recipe filter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterConfig {
    /// Packaging or converting buildings. A recipe whose producers are all
    /// in this set is dropped. Empty (or a bare key) keeps every machine
    /// recipe.
    #[serde(default, deserialize_with = "null_as_default")]
    pub excluded_machines: BTreeSet<MachineId>,
}

/// Tier assignment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifierConfig {
    /// Items pinned to tier 0 regardless of graph structure.
    #[serde(default = "default_raw_materials")]
    pub raw_materials: BTreeSet<ItemId>,

    /// Highest assignable tier and the sentinel for unresolved items.
    #[serde(default = "default_max_tier")]
    pub max_tier: Tier,
}

impl ClassifierConfig {
    /// Whether the ceiling is the game's 13.
    pub const fn uses_default_ceiling(&self) -> bool {
        self.max_tier.value() == Tier::DEFAULT_CEILING.value()
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            raw_materials: default_raw_materials(),
            max_tier: default_max_tier(),
        }
    }
}

/// Default view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewConfig {
    /// Items above this tier start hidden.
    #[serde(default = "default_max_tier")]
    pub max_tier: Tier,

    /// Whether co-ingredient edges start visible.
    #[serde(default = "default_true")]
    pub show_co_ingredients: bool,

    /// Whether nodes with no visible edge start hidden.
    #[serde(default)]
    pub hide_isolated: bool,

    /// Per-item default visibility. Items not listed are visible.
    #[serde(default = "default_item_overrides")]
    pub item_overrides: BTreeMap<ItemId, bool>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_tier: default_max_tier(),
            show_co_ingredients: true,
            hide_isolated: false,
            item_overrides: default_item_overrides(),
        }
    }
}

/// Icon location configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetConfig {
    /// URL prefix for item icons, with trailing slash.
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    /// Pixel size suffix in icon file names.
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,

    /// Local directory icons are downloaded into.
    #[serde(default = "default_icon_dir")]
    pub icon_dir: String,
}

impl AssetConfig {
    /// Override asset locations with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CRAFTGRAPH_ICON_BASE_URL") {
            self.icon_base_url = val;
        }
        if let Ok(val) = std::env::var("CRAFTGRAPH_ICON_DIR") {
            self.icon_dir = val;
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            icon_base_url: default_icon_base_url(),
            icon_size: default_icon_size(),
            icon_dir: default_icon_dir(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Primitive resources extracted from the map rather than crafted.
pub const RAW_MATERIALS: [&str; 9] = [
    "Desc_OreCopper_C",
    "Desc_OreIron_C",
    "Desc_Stone_C",
    "Desc_OreUranium_C",
    "Desc_Coal_C",
    "Desc_OreGold_C",
    "Desc_LiquidOil_C",
    "Desc_Water_C",
    "Desc_NitrogenGas_C",
];

fn default_raw_materials() -> BTreeSet<ItemId> {
    RAW_MATERIALS.into_iter().map(ItemId::from).collect()
}

const fn default_max_tier() -> Tier {
    Tier::DEFAULT_CEILING
}

fn default_item_overrides() -> BTreeMap<ItemId, bool> {
    BTreeMap::from([(ItemId::from("Desc_SAMIngot_C"), false)])
}

fn default_icon_base_url() -> String {
    String::from("https://www.satisfactorytools.com/assets/images/items/")
}

const fn default_icon_size() -> u32 {
    64
}

fn default_icon_dir() -> String {
    String::from("img")
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_true() -> bool {
    true
}

/// A key with no value reads as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: &str = include_str!("../../../craftgraph-config.yaml");

    #[test]
    fn default_config_matches_game_constants() {
        let config = CraftgraphConfig::default();
        assert_eq!(config.classifier.max_tier, Tier(13));
        assert_eq!(config.classifier.raw_materials.len(), 9);
        assert!(config.classifier.raw_materials.contains("Desc_OreIron_C"));
        assert!(config.filter.excluded_machines.is_empty());
        assert_eq!(
            config.view.item_overrides.get("Desc_SAMIngot_C").copied(),
            Some(false)
        );
        assert!(config.view.show_co_ingredients);
        assert!(!config.view.hide_isolated);
        assert_eq!(config.assets.icon_size, 64);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
filter:
  excluded_machines:
    - Desc_Packager_C
    - Desc_Converter_C

classifier:
  max_tier: 10
  raw_materials:
    - Desc_OreIron_C
    - Desc_Water_C

view:
  max_tier: 6
  show_co_ingredients: false
  hide_isolated: true
  item_overrides:
    Desc_SAMIngot_C: true
    Desc_Leaves_C: false

assets:
  icon_size: 256

logging:
  level: "debug"
  format: json
"#;

        let config = CraftgraphConfig::parse(yaml);
        assert!(config.is_ok(), "parse failed: {config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.filter.excluded_machines.len(), 2);
        assert!(config.filter.excluded_machines.contains("Desc_Packager_C"));
        assert_eq!(config.classifier.max_tier, Tier(10));
        assert_eq!(config.classifier.raw_materials.len(), 2);
        assert_eq!(config.view.max_tier, Tier(6));
        assert!(!config.view.show_co_ingredients);
        assert!(config.view.hide_isolated);
        assert_eq!(config.view.item_overrides.len(), 2);
        assert_eq!(config.assets.icon_size, 256);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "classifier:\n  max_tier: 5\n";
        let config = CraftgraphConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.classifier.max_tier, Tier(5));
        // Everything else uses defaults
        assert_eq!(config.classifier.raw_materials.len(), 9);
        assert_eq!(config.view.max_tier, Tier(13));
    }

    #[test]
    fn parse_empty_yaml() {
        let config = CraftgraphConfig::parse("");
        assert!(config.is_ok());
        assert_eq!(config.ok().map(|c| c.classifier.max_tier), Some(Tier(13)));
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        let config = CraftgraphConfig::parse("classifier: [unterminated");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let config = CraftgraphConfig::from_file(Path::new("/nonexistent/craftgraph.yaml"));
        assert!(matches!(config, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn shipped_config_keeps_every_machine() {
        let config = CraftgraphConfig::parse(SHIPPED).ok();
        assert_eq!(
            config.map(|c| c.filter.excluded_machines.is_empty()),
            Some(true)
        );
    }

    #[test]
    fn shipped_config_with_exclusions_uncommented() {
        let yaml = SHIPPED.replace("  #  - ", "  - ");
        let config = CraftgraphConfig::parse(&yaml);
        assert!(config.is_ok(), "uncommented config failed: {config:?}");
        let excluded = config.map(|c| c.filter.excluded_machines).unwrap_or_default();
        assert!(excluded.contains("Desc_Packager_C"));
        assert!(excluded.contains("Desc_Converter_C"));
        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn ceiling_other_than_thirteen_is_flagged() {
        assert!(ClassifierConfig::default().uses_default_ceiling());
        let config = CraftgraphConfig::parse("classifier:\n  max_tier: 20\n").ok();
        assert_eq!(
            config.map(|c| c.classifier.uses_default_ceiling()),
            Some(false)
        );
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("craftgraph-config.yaml");
        if path.exists() {
            let config = CraftgraphConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
