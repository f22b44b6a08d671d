use crate::{FeedKind, FilterSelection, ItemKey, PluginId, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchDiscovery {
        token: RequestToken,
        filters: FilterSelection,
        page: u32,
    },
    FetchSearch {
        token: RequestToken,
        plugin: PluginId,
        keyword: String,
        page: u32,
    },
    /// Error for the notification collaborator.
    Notify { feed: FeedKind, message: String },
    Navigate(Destination),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Detail { item: ItemKey },
    Search { keyword: String },
    PluginSettings,
}
