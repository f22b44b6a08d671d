#![allow(dead_code)]

use std::sync::Once;

use discovery_core::{
    update, AppState, Effect, FeedKind, FetchFailure, Item, Msg, OptionItem, OptionSet,
    PluginDescriptor, PluginRegistry, RequestToken,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

fn options(pairs: &[(&str, &str)]) -> Vec<OptionItem> {
    pairs
        .iter()
        .map(|(value, label)| OptionItem::new(*value, *label))
        .collect()
}

/// "alpha": full vocabularies. "beta": sort only has one entry, no region.
/// "gamma": disabled, no options at all.
pub fn registry() -> PluginRegistry {
    PluginRegistry::new(vec![
        PluginDescriptor::new(
            "alpha",
            "Alpha Comics",
            OptionSet {
                type_options: options(&[("all", "All"), ("action", "Action"), ("romance", "Romance")]),
                region_options: options(&[("all", "All"), ("jp", "Japan"), ("kr", "Korea")]),
                status_options: options(&[("all", "All"), ("ongoing", "Ongoing"), ("end", "Completed")]),
                sort_options: options(&[
                    ("latest", "Latest"),
                    ("pop", "Popular"),
                    ("score", "Top rated"),
                    ("new", "Newest"),
                ]),
            },
        ),
        PluginDescriptor::new(
            "beta",
            "Beta Reader",
            OptionSet {
                type_options: options(&[("all", "All"), ("bl", "Boys Love")]),
                region_options: Vec::new(),
                status_options: options(&[("all", "All"), ("ongoing", "Ongoing")]),
                sort_options: Vec::new(),
            },
        ),
        PluginDescriptor::new("gamma", "Gamma", OptionSet::default()).disabled(),
    ])
}

pub fn new_state() -> AppState {
    AppState::new(registry())
}

pub fn item(plugin: &str, id: &str) -> Item {
    Item::new(plugin, id, format!("Title {id}"))
}

pub fn items(plugin: &str, ids: &[&str]) -> Vec<Item> {
    ids.iter().map(|id| item(plugin, id)).collect()
}

pub fn keys(plugin: &str, ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| format!("{plugin}&{id}")).collect()
}

/// Token carried by the single fetch effect in `effects`.
pub fn fetch_token(effects: &[Effect]) -> RequestToken {
    let tokens: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchDiscovery { token, .. } | Effect::FetchSearch { token, .. } => Some(*token),
            _ => None,
        })
        .collect();
    assert_eq!(tokens.len(), 1, "expected exactly one fetch effect in {effects:?}");
    tokens[0]
}

pub fn complete_ok(
    state: AppState,
    feed: FeedKind,
    token: RequestToken,
    batch: Vec<Item>,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FetchCompleted {
            feed,
            token,
            result: Ok(batch),
        },
    )
}

pub fn complete_err(
    state: AppState,
    feed: FeedKind,
    token: RequestToken,
    message: &str,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FetchCompleted {
            feed,
            token,
            result: Err(FetchFailure::new(message)),
        },
    )
}
