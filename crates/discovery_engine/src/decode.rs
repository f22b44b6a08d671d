use discovery_core::Item;
use serde::Deserialize;

use crate::{FailureKind, FetchError};

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    items: Vec<WireItem>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    id: WireId,
    title: String,
    #[serde(default)]
    cover: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    latest: Option<String>,
}

/// Sources disagree on whether ids are strings or numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(u64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        }
    }
}

/// Decodes a `{"items": [...]}` page and stamps every item with `plugin`.
pub fn decode_items(plugin: &str, body: &[u8]) -> Result<Vec<Item>, FetchError> {
    let page: Page = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Parse, err.to_string()))?;

    Ok(page
        .items
        .into_iter()
        .map(|wire| Item {
            plugin: plugin.to_string(),
            id: wire.id.into_string(),
            title: wire.title,
            cover: wire.cover,
            author: wire.author,
            latest: wire.latest,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_and_numeric_ids() {
        let body = br#"{"items":[{"id":"a1","title":"A"},{"id":7,"title":"B","author":"X"}]}"#;
        let items = decode_items("alpha", body).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key(), "alpha&a1");
        assert_eq!(items[1].id, "7");
        assert_eq!(items[1].author.as_deref(), Some("X"));
    }

    #[test]
    fn missing_items_field_is_an_empty_page() {
        assert!(decode_items("alpha", b"{}").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_parse_failure() {
        let err = decode_items("alpha", b"<html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::Parse);
    }
}
