use std::collections::HashMap;

use crate::PluginId;

/// Dictionary key of an item: `"{plugin}&{id}"`.
pub type ItemKey = String;

/// Full record of one content item as returned by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub plugin: PluginId,
    pub id: String,
    pub title: String,
    pub cover: Option<String>,
    pub author: Option<String>,
    pub latest: Option<String>,
}

impl Item {
    pub fn new(plugin: impl Into<PluginId>, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            id: id.into(),
            title: title.into(),
            cover: None,
            author: None,
            latest: None,
        }
    }

    /// Namespaced key so equal ids from different plugins never collide.
    pub fn key(&self) -> ItemKey {
        format!("{}&{}", self.plugin, self.id)
    }
}

/// Shared item store. Upsert only: entries are overwritten, never removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemDictionary {
    items: HashMap<ItemKey, Item>,
}

impl ItemDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, item: Item) -> ItemKey {
        let key = item.key();
        self.items.insert(key.clone(), item);
        key
    }

    pub fn get(&self, key: &str) -> Option<&Item> {
        self.items.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up `keys` in order, skipping any that are missing.
    pub fn resolve<'a>(&'a self, keys: &'a [ItemKey]) -> impl Iterator<Item = &'a Item> + 'a {
        keys.iter().filter_map(|key| self.items.get(key))
    }
}
