use crate::{Facet, OptionSet, PluginId};

/// Active plugin plus the chosen raw value of every discovery facet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub plugin: PluginId,
    pub type_value: String,
    pub region: String,
    pub status: String,
    pub sort: String,
}

impl FilterSelection {
    /// Selection seeded with the first option of each of the plugin's vocabularies.
    pub fn for_plugin(plugin: impl Into<PluginId>, options: &OptionSet) -> Self {
        let mut selection = Self {
            plugin: plugin.into(),
            ..Self::default()
        };
        for facet in Facet::ALL {
            if let Some(value) = options.default_value(facet) {
                selection.set(facet, value);
            }
        }
        selection
    }

    pub fn get(&self, facet: Facet) -> &str {
        match facet {
            Facet::Type => &self.type_value,
            Facet::Region => &self.region,
            Facet::Status => &self.status,
            Facet::Sort => &self.sort,
        }
    }

    pub fn set(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        match facet {
            Facet::Type => self.type_value = value,
            Facet::Region => self.region = value,
            Facet::Status => self.status = value,
            Facet::Sort => self.sort = value,
        }
    }
}

/// Search context: what the user is typing/picking, and what the search
/// feed was last submitted with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub draft_keyword: String,
    pub draft_plugin: PluginId,
    pub keyword: String,
    pub plugin: PluginId,
}

impl SearchQuery {
    pub fn new(plugin: impl Into<PluginId>) -> Self {
        let plugin = plugin.into();
        Self {
            draft_plugin: plugin.clone(),
            plugin,
            ..Self::default()
        }
    }

    pub fn is_submitted(&self) -> bool {
        !self.keyword.is_empty()
    }
}
