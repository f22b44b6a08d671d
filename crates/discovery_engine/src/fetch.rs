use std::collections::HashMap;
use std::time::Duration;

use discovery_core::{Facet, FilterSelection, Item, PluginId};
use feed_logging::feed_debug;
use futures_util::StreamExt;
use url::Url;

use crate::decode::decode_items;
use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Base URL of every plugin's JSON API.
#[derive(Debug, Clone, Default)]
pub struct SourceEndpoints {
    endpoints: HashMap<PluginId, String>,
}

impl SourceEndpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, plugin: impl Into<PluginId>, base_url: impl Into<String>) {
        self.endpoints.insert(plugin.into(), base_url.into());
    }

    pub fn get(&self, plugin: &str) -> Option<&str> {
        self.endpoints.get(plugin).map(String::as_str)
    }
}

impl<P: Into<PluginId>, U: Into<String>> FromIterator<(P, U)> for SourceEndpoints {
    fn from_iter<I: IntoIterator<Item = (P, U)>>(iter: I) -> Self {
        let mut endpoints = Self::new();
        for (plugin, url) in iter {
            endpoints.insert(plugin, url);
        }
        endpoints
    }
}

/// Fetch collaborator for a content source. Page 1 is the first page.
#[async_trait::async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_discovery(
        &self,
        filters: &FilterSelection,
        page: u32,
    ) -> Result<Vec<Item>, FetchError>;

    async fn fetch_search(
        &self,
        plugin: &str,
        keyword: &str,
        page: u32,
    ) -> Result<Vec<Item>, FetchError>;
}

/// Talks to plugins exposing `GET {base}/discovery` and `GET {base}/search`.
#[derive(Debug, Clone)]
pub struct HttpSourceFetcher {
    settings: FetchSettings,
    endpoints: SourceEndpoints,
    client: reqwest::Client,
}

impl HttpSourceFetcher {
    pub fn new(settings: FetchSettings, endpoints: SourceEndpoints) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            endpoints,
            client,
        })
    }

    fn endpoint(&self, plugin: &str, path: &str) -> Result<Url, FetchError> {
        let base = self.endpoints.get(plugin).ok_or_else(|| {
            FetchError::new(FailureKind::UnknownPlugin, format!("no endpoint for {plugin:?}"))
        })?;
        let joined = format!("{}/{}", base.trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|err| FetchError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    async fn get_items(&self, plugin: &str, url: Url) -> Result<Vec<Item>, FetchError> {
        feed_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        decode_items(plugin, &body)
    }
}

#[async_trait::async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch_discovery(
        &self,
        filters: &FilterSelection,
        page: u32,
    ) -> Result<Vec<Item>, FetchError> {
        let mut url = self.endpoint(&filters.plugin, "discovery")?;
        {
            let mut query = url.query_pairs_mut();
            for facet in Facet::ALL {
                let value = filters.get(facet);
                if !value.is_empty() {
                    query.append_pair(facet.as_str(), value);
                }
            }
            query.append_pair("page", &page.to_string());
        }
        self.get_items(&filters.plugin, url).await
    }

    async fn fetch_search(
        &self,
        plugin: &str,
        keyword: &str,
        page: u32,
    ) -> Result<Vec<Item>, FetchError> {
        let mut url = self.endpoint(plugin, "search")?;
        url.query_pairs_mut()
            .append_pair("keyword", keyword)
            .append_pair("page", &page.to_string());
        self.get_items(plugin, url).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
