use crate::{Facet, FeedKind, FetchFailure, Item, ItemKey, PluginId, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A feed's view gained focus (mount, tab switch, return from detail).
    ViewFocused(FeedKind),
    /// User picked a source. Discovery reloads at once; search waits for submit.
    SourceChanged { feed: FeedKind, plugin: PluginId },
    /// User picked a new value for a discovery facet.
    FacetChanged { facet: Facet, value: String },
    /// User edited the search box.
    KeywordChanged(String),
    /// User submitted the search box.
    SearchSubmitted,
    /// List scrolled to its end.
    LoadMore(FeedKind),
    /// User asked to reload a feed after a failure.
    Retry(FeedKind),
    /// User tapped an item in a list.
    ItemSelected(ItemKey),
    /// User opened plugin settings from the source picker.
    PluginSettingsOpened,
    /// Fetch collaborator finished a request.
    FetchCompleted {
        feed: FeedKind,
        token: RequestToken,
        result: Result<Vec<Item>, FetchFailure>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
