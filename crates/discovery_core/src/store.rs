use crate::{FeedKind, FeedState, FilterSelection, ItemDictionary, PluginRegistry, SearchQuery};

/// Read/write capabilities `update` needs from the session store.
///
/// Feeds only expose their state-machine methods, so a store cannot move a
/// feed's status around on its own.
pub trait DiscoveryStore {
    fn registry(&self) -> &PluginRegistry;

    fn selection(&self) -> &FilterSelection;
    fn selection_mut(&mut self) -> &mut FilterSelection;

    fn search(&self) -> &SearchQuery;
    fn search_mut(&mut self) -> &mut SearchQuery;

    fn feed(&self, kind: FeedKind) -> &FeedState;
    fn feed_mut(&mut self, kind: FeedKind) -> &mut FeedState;

    fn items(&self) -> &ItemDictionary;
    /// Split borrow used when a fetch result lands.
    fn feed_and_items_mut(&mut self, kind: FeedKind) -> (&mut FeedState, &mut ItemDictionary);

    fn mark_dirty(&mut self);
}
