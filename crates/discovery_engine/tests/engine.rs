use std::sync::{Arc, Mutex};
use std::time::Duration;

use discovery_core::{FeedKind, FilterSelection, Item};
use discovery_engine::{
    EngineEvent, EngineHandle, FailureKind, FetchError, FetchJob, FetchRequest, FetchSettings,
    SourceEndpoints, SourceFetcher,
};
use pretty_assertions::assert_eq;

/// Returns one item per call named after the request, and records the calls.
#[derive(Default)]
struct EchoFetcher {
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl SourceFetcher for EchoFetcher {
    async fn fetch_discovery(
        &self,
        filters: &FilterSelection,
        page: u32,
    ) -> Result<Vec<Item>, FetchError> {
        let call = format!("discovery:{}:{}:{}", filters.plugin, filters.sort, page);
        self.calls.lock().unwrap().push(call.clone());
        Ok(vec![Item::new(filters.plugin.clone(), call, "echo")])
    }

    async fn fetch_search(
        &self,
        plugin: &str,
        keyword: &str,
        page: u32,
    ) -> Result<Vec<Item>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("search:{plugin}:{keyword}:{page}"));
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok(Vec::new())
    }
}

fn wait_for(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn completion_echoes_feed_and_token() {
    let fetcher = Arc::new(EchoFetcher::default());
    let engine = EngineHandle::new(fetcher.clone());

    engine.enqueue(FetchJob {
        token: 42,
        request: FetchRequest::Discovery {
            filters: FilterSelection {
                plugin: "alpha".to_string(),
                sort: "pop".to_string(),
                ..FilterSelection::default()
            },
            page: 3,
        },
    });

    match wait_for(&engine) {
        EngineEvent::FetchCompleted {
            feed,
            token,
            result,
        } => {
            assert_eq!(feed, FeedKind::Discovery);
            assert_eq!(token, 42);
            let items = result.expect("ok");
            assert_eq!(items[0].id, "discovery:alpha:pop:3");
        }
    }
    assert_eq!(fetcher.calls.lock().unwrap().len(), 1);
}

#[test]
fn search_job_reports_search_feed() {
    let engine = EngineHandle::new(Arc::new(EchoFetcher::default()));

    engine.enqueue(FetchJob {
        token: 7,
        request: FetchRequest::Search {
            plugin: "beta".to_string(),
            keyword: "hero".to_string(),
            page: 1,
        },
    });

    let EngineEvent::FetchCompleted { feed, token, result } = wait_for(&engine);
    assert_eq!((feed, token), (FeedKind::Search, 7));
    assert_eq!(result, Ok(Vec::new()));
}

#[test]
fn http_engine_reports_unknown_plugin_as_failed_completion() {
    let engine = EngineHandle::with_http(FetchSettings::default(), SourceEndpoints::new())
        .expect("engine");

    engine.enqueue(FetchJob {
        token: 1,
        request: FetchRequest::Search {
            plugin: "ghost".to_string(),
            keyword: "x".to_string(),
            page: 1,
        },
    });

    let EngineEvent::FetchCompleted { result, .. } = wait_for(&engine);
    assert_eq!(result.unwrap_err().kind, FailureKind::UnknownPlugin);
    assert!(engine.try_recv().is_none());
}

/// Panics on discovery requests; search requests succeed.
struct PanickingFetcher;

#[async_trait::async_trait]
impl SourceFetcher for PanickingFetcher {
    async fn fetch_discovery(
        &self,
        _filters: &FilterSelection,
        _page: u32,
    ) -> Result<Vec<Item>, FetchError> {
        panic!("source crashed");
    }

    async fn fetch_search(
        &self,
        _plugin: &str,
        _keyword: &str,
        _page: u32,
    ) -> Result<Vec<Item>, FetchError> {
        Ok(Vec::new())
    }
}

#[test]
fn panicking_fetch_still_reports_a_failed_completion() {
    let engine = EngineHandle::new(Arc::new(PanickingFetcher));

    engine.enqueue(FetchJob {
        token: 3,
        request: FetchRequest::Discovery {
            filters: FilterSelection::default(),
            page: 1,
        },
    });

    let EngineEvent::FetchCompleted { feed, token, result } = wait_for(&engine);
    assert_eq!((feed, token), (FeedKind::Discovery, 3));
    assert_eq!(result.unwrap_err().kind, FailureKind::Aborted);

    // The worker survives and keeps serving later jobs.
    engine.enqueue(FetchJob {
        token: 4,
        request: FetchRequest::Search {
            plugin: "alpha".to_string(),
            keyword: "x".to_string(),
            page: 1,
        },
    });
    let EngineEvent::FetchCompleted { token, result, .. } = wait_for(&engine);
    assert_eq!(token, 4);
    assert_eq!(result, Ok(Vec::new()));
}
