//! Discovery core: pure feed state machine, option resolver and view-model helpers.
mod effect;
mod feed;
mod items;
mod msg;
mod options;
mod selection;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::{Destination, Effect};
pub use feed::{Completion, FeedKind, FeedState, FetchFailure, LoadMode, LoadStatus, LoadTicket, RequestToken};
pub use items::{Item, ItemDictionary, ItemKey};
pub use msg::Msg;
pub use options::{
    label_for, Facet, OptionItem, OptionSet, PluginDescriptor, PluginId, PluginRegistry,
};
pub use selection::{FilterSelection, SearchQuery};
pub use state::AppState;
pub use store::DiscoveryStore;
pub use update::update;
pub use view_model::{AppViewModel, FacetControl, FeedView, SourcePickerView};
