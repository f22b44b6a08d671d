/// Identifier naming a content source.
pub type PluginId = String;

/// One selectable `(value, label)` pair in a facet vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl OptionItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A filterable dimension of the discovery feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Type,
    Region,
    Status,
    Sort,
}

impl Facet {
    /// Display order of the filter bar.
    pub const ALL: [Facet; 4] = [Facet::Type, Facet::Region, Facet::Status, Facet::Sort];

    /// Stable lowercase name, also used as the query parameter key.
    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Type => "type",
            Facet::Region => "region",
            Facet::Status => "status",
            Facet::Sort => "sort",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// The four option vocabularies a plugin advertises. Any of them may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionSet {
    pub type_options: Vec<OptionItem>,
    pub region_options: Vec<OptionItem>,
    pub status_options: Vec<OptionItem>,
    pub sort_options: Vec<OptionItem>,
}

static EMPTY_OPTIONS: OptionSet = OptionSet {
    type_options: Vec::new(),
    region_options: Vec::new(),
    status_options: Vec::new(),
    sort_options: Vec::new(),
};

impl OptionSet {
    pub fn options(&self, facet: Facet) -> &[OptionItem] {
        match facet {
            Facet::Type => &self.type_options,
            Facet::Region => &self.region_options,
            Facet::Status => &self.status_options,
            Facet::Sort => &self.sort_options,
        }
    }

    pub fn label_for(&self, facet: Facet, selected: &str) -> String {
        label_for(self.options(facet), selected)
    }

    /// First option value of a facet, used to seed a fresh selection.
    pub fn default_value(&self, facet: Facet) -> Option<&str> {
        self.options(facet).first().map(|item| item.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.into_iter().all(|facet| self.options(facet).is_empty())
    }
}

/// Resolves a raw selected value to its display label.
///
/// Falls back to the raw value when nothing matches (or the match has an
/// empty label), so a label is never blank.
pub fn label_for(options: &[OptionItem], selected: &str) -> String {
    options
        .iter()
        .find(|item| item.value == selected)
        .map(|item| item.label.as_str())
        .filter(|label| !label.is_empty())
        .unwrap_or(selected)
        .to_string()
}

/// Static description of one content source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub id: PluginId,
    pub label: String,
    pub disabled: bool,
    pub options: OptionSet,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<PluginId>, label: impl Into<String>, options: OptionSet) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
            options,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Tagged registry `PluginId -> PluginDescriptor`, kept in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluginRegistry {
    plugins: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    pub fn new(plugins: impl IntoIterator<Item = PluginDescriptor>) -> Self {
        let mut registry = Self::default();
        for plugin in plugins {
            registry.register(plugin);
        }
        registry
    }

    /// Adds a plugin, replacing an earlier registration with the same id in place.
    pub fn register(&mut self, plugin: PluginDescriptor) {
        match self.plugins.iter_mut().find(|p| p.id == plugin.id) {
            Some(existing) => *existing = plugin,
            None => self.plugins.push(plugin),
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Option vocabularies for `id`; an unknown id resolves to four empty vocabularies.
    pub fn resolve(&self, id: &str) -> &OptionSet {
        self.lookup(id)
            .map(|plugin| &plugin.options)
            .unwrap_or(&EMPTY_OPTIONS)
    }

    pub fn list_plugins(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    /// Choices for the source picker: enabled plugins only.
    pub fn source_choices(&self) -> Vec<OptionItem> {
        self.plugins
            .iter()
            .filter(|plugin| !plugin.disabled)
            .map(|plugin| OptionItem::new(plugin.id.clone(), plugin.label.clone()))
            .collect()
    }

    pub fn plugin_label(&self, id: &str) -> String {
        let label = self.lookup(id).map(|plugin| plugin.label.as_str());
        match label {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => id.to_string(),
        }
    }

    pub fn first_enabled(&self) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|plugin| !plugin.disabled)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
