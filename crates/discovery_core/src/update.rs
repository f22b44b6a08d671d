use feed_logging::{feed_debug, feed_warn};

use crate::{
    Completion, Destination, DiscoveryStore, Effect, FeedKind, LoadMode, LoadTicket, Msg,
};

/// Pure update function: applies a message to the store and returns any effects.
pub fn update<S: DiscoveryStore>(mut state: S, msg: Msg) -> (S, Vec<Effect>) {
    let effects = match msg {
        Msg::ViewFocused(feed) => {
            // Re-focusing never refetches on its own; only a feed that was
            // never requested loads here.
            if !state.feed(feed).needs_initial_load() {
                return (state, Vec::new());
            }
            if feed == FeedKind::Search && !state.search().is_submitted() {
                return (state, Vec::new());
            }
            request(&mut state, feed, LoadMode::Reset)
        }
        Msg::SourceChanged {
            feed: FeedKind::Search,
            plugin,
        } => {
            // Both pickers share the selected plugin; only the search fetch
            // waits for submit.
            state.selection_mut().plugin = plugin.clone();
            state.search_mut().draft_plugin = plugin;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SourceChanged {
            feed: FeedKind::Discovery,
            plugin,
        } => {
            // Facet values are kept verbatim; labels fall back to the raw value
            // when the new plugin does not know them.
            state.selection_mut().plugin = plugin;
            force_reset(&mut state, FeedKind::Discovery)
        }
        Msg::FacetChanged { facet, value } => {
            let vocabulary_empty = state
                .registry()
                .resolve(&state.selection().plugin)
                .options(facet)
                .is_empty();
            if vocabulary_empty {
                feed_warn!(
                    "facet {} has no options for plugin {:?}; passing {:?} through",
                    facet.as_str(),
                    state.selection().plugin,
                    value
                );
            }
            state.selection_mut().set(facet, value);
            force_reset(&mut state, FeedKind::Discovery)
        }
        Msg::KeywordChanged(text) => {
            state.search_mut().draft_keyword = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchSubmitted => {
            let keyword = state.search().draft_keyword.trim().to_string();
            if keyword.is_empty() {
                return (state, Vec::new());
            }
            let search = state.search_mut();
            search.keyword = keyword.clone();
            search.plugin = search.draft_plugin.clone();

            let mut effects = force_reset(&mut state, FeedKind::Search);
            effects.push(Effect::Navigate(Destination::Search { keyword }));
            effects
        }
        Msg::LoadMore(feed) => request(&mut state, feed, LoadMode::Append),
        Msg::Retry(feed) => {
            if feed == FeedKind::Search && !state.search().is_submitted() {
                return (state, Vec::new());
            }
            request(&mut state, feed, LoadMode::Reset)
        }
        Msg::ItemSelected(item) => vec![Effect::Navigate(Destination::Detail { item })],
        Msg::PluginSettingsOpened => vec![Effect::Navigate(Destination::PluginSettings)],
        Msg::FetchCompleted {
            feed,
            token,
            result,
        } => {
            let (feed_state, items) = state.feed_and_items_mut(feed);
            match feed_state.complete(token, result, items) {
                Completion::Applied { appended } => {
                    feed_debug!("{} request {} appended {} items", feed.as_str(), token, appended);
                    state.mark_dirty();
                    Vec::new()
                }
                Completion::Rejected(failure) => {
                    state.mark_dirty();
                    vec![Effect::Notify {
                        feed,
                        message: failure.message,
                    }]
                }
                Completion::Stale => Vec::new(),
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn request<S: DiscoveryStore>(state: &mut S, feed: FeedKind, mode: LoadMode) -> Vec<Effect> {
    match state.feed_mut(feed).request_load(mode) {
        Some(ticket) => {
            state.mark_dirty();
            vec![fetch_effect(state, feed, ticket)]
        }
        None => Vec::new(),
    }
}

fn force_reset<S: DiscoveryStore>(state: &mut S, feed: FeedKind) -> Vec<Effect> {
    let ticket = state.feed_mut(feed).force_reset();
    state.mark_dirty();
    vec![fetch_effect(state, feed, ticket)]
}

fn fetch_effect<S: DiscoveryStore>(state: &S, feed: FeedKind, ticket: LoadTicket) -> Effect {
    match feed {
        FeedKind::Discovery => Effect::FetchDiscovery {
            token: ticket.token,
            filters: state.selection().clone(),
            page: ticket.page,
        },
        FeedKind::Search => {
            let search = state.search();
            Effect::FetchSearch {
                token: ticket.token,
                plugin: search.plugin.clone(),
                keyword: search.keyword.clone(),
                page: ticket.page,
            }
        }
    }
}
