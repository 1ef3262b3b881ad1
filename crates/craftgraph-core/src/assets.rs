//! Item icon locations.
//!
//! Icons are published as `{icon}_{size}.png` under a common base URL. The
//! manifest lists one entry per item that has an icon; the CLI uses it to
//! mirror icons locally and the graph builder uses [`icon_url`] for nodes.

use craftgraph_types::{Item, ItemId};

use crate::config::AssetConfig;

/// One icon to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRef {
    /// The item the icon belongs to.
    pub item: ItemId,
    /// Local file name (`{icon}_{size}.png`).
    pub file_name: String,
    /// Remote URL.
    pub url: String,
}

/// File name of an icon slug at the configured size.
pub fn icon_file_name(icon: &str, config: &AssetConfig) -> String {
    format!("{icon}_{}.png", config.icon_size)
}

/// Remote URL of an item's icon, or `None` if the item has no icon.
pub fn icon_url(item: &Item, config: &AssetConfig) -> Option<String> {
    item.icon
        .as_deref()
        .filter(|icon| !icon.is_empty())
        .map(|icon| format!("{}{}", config.icon_base_url, icon_file_name(icon, config)))
}

/// Icons for every item that has one, in item order.
pub fn icon_manifest<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    config: &AssetConfig,
) -> Vec<IconRef> {
    items
        .into_iter()
        .filter_map(|item| {
            let icon = item.icon.as_deref().filter(|icon| !icon.is_empty())?;
            let file_name = icon_file_name(icon, config);
            Some(IconRef {
                item: item.class_name.clone(),
                url: format!("{}{file_name}", config.icon_base_url),
                file_name,
            })
        })
        .collect()
}
