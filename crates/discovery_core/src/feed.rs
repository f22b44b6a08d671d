use std::collections::HashSet;
use std::fmt;

use feed_logging::{feed_debug, feed_warn};

use crate::{Item, ItemDictionary, ItemKey};

/// Independently paginated list contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Discovery,
    Search,
}

impl FeedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedKind::Discovery => "discovery",
            FeedKind::Search => "search",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Default,
    Pending,
    Fulfilled,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Replace the feed's result sequence, starting from page 1.
    Reset,
    /// Extend the feed's result sequence with the next page.
    Append,
}

/// Monotonically increasing per-feed request counter.
pub type RequestToken = u64;

/// Issued when a load request is accepted; the fetch must echo `token` back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: RequestToken,
    pub mode: LoadMode,
    pub page: u32,
}

/// Network or decode failure reported by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What happened when a fetch response was handed back to its feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied { appended: usize },
    Rejected(FetchFailure),
    /// The token did not match the latest request; nothing changed.
    Stale,
}

/// Load-state machine plus ordered result ids for one feed.
///
/// `Default -> Pending -> Fulfilled | Rejected`, and back to `Pending` on the
/// next accepted request. All transitions go through the methods below.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedState {
    ordered_ids: Vec<ItemKey>,
    status: LoadStatus,
    latest_token: RequestToken,
    in_flight: Option<LoadTicket>,
    pages_loaded: u32,
    exhausted: bool,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn ordered_ids(&self) -> &[ItemKey] {
        &self.ordered_ids
    }

    pub fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    /// True once a page came back empty; cleared by the next reset.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Pending
    }

    /// Focus guard: only a feed that was never requested loads on its own.
    pub fn needs_initial_load(&self) -> bool {
        self.status == LoadStatus::Default
    }

    pub fn can_load_more(&self) -> bool {
        self.status != LoadStatus::Pending && self.pages_loaded > 0 && !self.exhausted
    }

    /// Guarded request. Returns `None` when the request is dropped: while
    /// `Pending`, or for an `Append` before any page has loaded or after the
    /// source ran out of pages.
    pub fn request_load(&mut self, mode: LoadMode) -> Option<LoadTicket> {
        if self.status == LoadStatus::Pending {
            feed_debug!("load {:?} dropped: request {} still pending", mode, self.latest_token);
            return None;
        }
        if mode == LoadMode::Append {
            if self.pages_loaded == 0 {
                feed_warn!("append requested before a successful reset (status {:?})", self.status);
                return None;
            }
            if self.exhausted {
                feed_debug!("append dropped: feed exhausted after page {}", self.pages_loaded);
                return None;
            }
        }
        Some(self.issue(mode))
    }

    /// Unguarded reset that supersedes whatever is in flight.
    pub fn force_reset(&mut self) -> LoadTicket {
        if let Some(previous) = self.in_flight {
            feed_debug!("reset supersedes in-flight request {}", previous.token);
        }
        self.issue(LoadMode::Reset)
    }

    fn issue(&mut self, mode: LoadMode) -> LoadTicket {
        self.latest_token += 1;
        let page = match mode {
            LoadMode::Reset => {
                self.ordered_ids.clear();
                self.pages_loaded = 0;
                self.exhausted = false;
                1
            }
            LoadMode::Append => self.pages_loaded + 1,
        };
        let ticket = LoadTicket {
            token: self.latest_token,
            mode,
            page,
        };
        self.status = LoadStatus::Pending;
        self.in_flight = Some(ticket);
        ticket
    }

    /// Applies a fetch result. Responses whose token is not the one in flight
    /// are discarded without touching ids, status or the dictionary.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Item>, FetchFailure>,
        items: &mut ItemDictionary,
    ) -> Completion {
        let ticket = match self.in_flight {
            Some(ticket) if ticket.token == token => ticket,
            _ => {
                feed_debug!(
                    "stale response {} discarded (latest {})",
                    token,
                    self.latest_token
                );
                return Completion::Stale;
            }
        };
        self.in_flight = None;

        match result {
            Ok(batch) => {
                let empty_page = batch.is_empty();
                let mut seen: HashSet<ItemKey> = self.ordered_ids.iter().cloned().collect();
                let mut appended = 0;
                for item in batch {
                    let key = items.upsert(item);
                    if seen.insert(key.clone()) {
                        self.ordered_ids.push(key);
                        appended += 1;
                    }
                }
                self.pages_loaded = ticket.page;
                self.exhausted = empty_page;
                self.status = LoadStatus::Fulfilled;
                Completion::Applied { appended }
            }
            Err(failure) => {
                feed_warn!("request {} (page {}) failed: {}", token, ticket.page, failure);
                self.status = LoadStatus::Rejected;
                Completion::Rejected(failure)
            }
        }
    }
}
