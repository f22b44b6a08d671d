use crate::{Facet, Item, LoadStatus, OptionItem};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub source: SourcePickerView,
    /// Only facets with a real choice (more than one option) get a control.
    pub facets: Vec<FacetControl>,
    pub discovery: FeedView,
    pub search: FeedView,
    pub keyword: String,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourcePickerView {
    pub discovery_label: String,
    pub search_label: String,
    pub choices: Vec<OptionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetControl {
    pub facet: Facet,
    pub label: String,
    pub options: Vec<OptionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedView {
    pub status: LoadStatus,
    pub loading: bool,
    pub can_load_more: bool,
    pub items: Vec<Item>,
}
