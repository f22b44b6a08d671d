use crate::view_model::{AppViewModel, FacetControl, FeedView, SourcePickerView};
use crate::{
    DiscoveryStore, Facet, FeedKind, FeedState, FilterSelection, ItemDictionary, PluginRegistry,
    SearchQuery,
};

/// In-memory session store: one selection per context, one state machine per
/// feed, and the shared item dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    registry: PluginRegistry,
    selection: FilterSelection,
    search: SearchQuery,
    discovery_feed: FeedState,
    search_feed: FeedState,
    items: ItemDictionary,
    dirty: bool,
}

impl AppState {
    /// Starts on the first enabled plugin with each facet on its first option.
    pub fn new(registry: PluginRegistry) -> Self {
        let plugin = registry
            .first_enabled()
            .map(|plugin| plugin.id.clone())
            .unwrap_or_default();
        let selection = FilterSelection::for_plugin(plugin.clone(), registry.resolve(&plugin));
        Self {
            registry,
            selection,
            search: SearchQuery::new(plugin),
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.search = SearchQuery::new(selection.plugin.clone());
        self.selection = selection;
        self
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Labels and controls are recomputed from the current plugin every time.
    pub fn view(&self) -> AppViewModel {
        let options = self.registry.resolve(&self.selection.plugin);
        let facets = Facet::ALL
            .into_iter()
            .filter(|facet| options.options(*facet).len() > 1)
            .map(|facet| FacetControl {
                facet,
                label: options.label_for(facet, self.selection.get(facet)),
                options: options.options(facet).to_vec(),
            })
            .collect();

        AppViewModel {
            source: SourcePickerView {
                discovery_label: self.registry.plugin_label(&self.selection.plugin),
                search_label: self.registry.plugin_label(&self.search.draft_plugin),
                choices: self.registry.source_choices(),
            },
            facets,
            discovery: self.feed_view(FeedKind::Discovery),
            search: self.feed_view(FeedKind::Search),
            keyword: self.search.keyword.clone(),
            dirty: self.dirty,
        }
    }

    fn feed_view(&self, kind: FeedKind) -> FeedView {
        let feed = self.feed(kind);
        FeedView {
            status: feed.status(),
            loading: feed.is_loading(),
            can_load_more: feed.can_load_more(),
            items: self.items.resolve(feed.ordered_ids()).cloned().collect(),
        }
    }
}

impl DiscoveryStore for AppState {
    fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut FilterSelection {
        &mut self.selection
    }

    fn search(&self) -> &SearchQuery {
        &self.search
    }

    fn search_mut(&mut self) -> &mut SearchQuery {
        &mut self.search
    }

    fn feed(&self, kind: FeedKind) -> &FeedState {
        match kind {
            FeedKind::Discovery => &self.discovery_feed,
            FeedKind::Search => &self.search_feed,
        }
    }

    fn feed_mut(&mut self, kind: FeedKind) -> &mut FeedState {
        match kind {
            FeedKind::Discovery => &mut self.discovery_feed,
            FeedKind::Search => &mut self.search_feed,
        }
    }

    fn items(&self) -> &ItemDictionary {
        &self.items
    }

    fn feed_and_items_mut(&mut self, kind: FeedKind) -> (&mut FeedState, &mut ItemDictionary) {
        let feed = match kind {
            FeedKind::Discovery => &mut self.discovery_feed,
            FeedKind::Search => &mut self.search_feed,
        };
        (feed, &mut self.items)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
