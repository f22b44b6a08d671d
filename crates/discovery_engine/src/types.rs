use std::fmt;

use discovery_core::{FeedKind, FetchFailure, FilterSelection, Item, PluginId, RequestToken};
use thiserror::Error;

/// What to fetch for one accepted load ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Discovery {
        filters: FilterSelection,
        page: u32,
    },
    Search {
        plugin: PluginId,
        keyword: String,
        page: u32,
    },
}

impl FetchRequest {
    pub fn feed(&self) -> FeedKind {
        match self {
            FetchRequest::Discovery { .. } => FeedKind::Discovery,
            FetchRequest::Search { .. } => FeedKind::Search,
        }
    }

    pub fn plugin(&self) -> &str {
        match self {
            FetchRequest::Discovery { filters, .. } => &filters.plugin,
            FetchRequest::Search { plugin, .. } => plugin,
        }
    }
}

/// A request tagged with the token the core issued for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchJob {
    pub token: RequestToken,
    pub request: FetchRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FetchCompleted {
        feed: FeedKind,
        token: RequestToken,
        result: Result<Vec<Item>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<FetchError> for FetchFailure {
    fn from(err: FetchError) -> Self {
        FetchFailure::new(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    UnknownPlugin,
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Parse,
    Network,
    /// The fetch never ran to completion (worker unavailable or task panicked).
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::UnknownPlugin => write!(f, "unknown plugin"),
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Parse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Aborted => write!(f, "fetch aborted"),
        }
    }
}
