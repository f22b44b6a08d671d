use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use discovery_core::Item;
use feed_logging::{feed_debug, feed_error};
use futures_util::FutureExt;

use crate::fetch::{FetchSettings, HttpSourceFetcher, SourceEndpoints, SourceFetcher};
use crate::{EngineEvent, FailureKind, FetchError, FetchJob, FetchRequest};

enum EngineCommand {
    Fetch(FetchJob),
}

/// Runs fetches on a background tokio runtime and reports completions over a
/// channel. Jobs run concurrently; ordering of completions is not guaranteed.
///
/// Every enqueued job yields exactly one `FetchCompleted`, including when the
/// runtime cannot start or the fetcher panics.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(fetcher: Arc<dyn SourceFetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker_tx = event_tx.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    feed_error!("failed to start fetch runtime: {}", err);
                    let message = format!("fetch runtime unavailable: {err}");
                    while let Ok(EngineCommand::Fetch(job)) = cmd_rx.recv() {
                        let _ = worker_tx.send(failed(job, &message));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_tx,
            event_rx,
        }
    }

    pub fn with_http(settings: FetchSettings, endpoints: SourceEndpoints) -> Result<Self, FetchError> {
        let fetcher = HttpSourceFetcher::new(settings, endpoints)?;
        Ok(Self::new(Arc::new(fetcher)))
    }

    pub fn enqueue(&self, job: FetchJob) {
        if let Err(mpsc::SendError(EngineCommand::Fetch(job))) =
            self.cmd_tx.send(EngineCommand::Fetch(job))
        {
            feed_error!("fetch worker is gone; failing job {}", job.token);
            let _ = self.event_tx.send(failed(job, "fetch worker stopped"));
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn SourceFetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch(FetchJob { token, request }) => {
            let feed = request.feed();
            feed_debug!(
                "{} fetch {} from {:?} started",
                feed.as_str(),
                token,
                request.plugin()
            );
            let outcome = AssertUnwindSafe(dispatch(fetcher, &request))
                .catch_unwind()
                .await;
            let result = outcome.unwrap_or_else(|_| {
                feed_error!("{} fetch {} panicked", feed.as_str(), token);
                Err(FetchError::new(FailureKind::Aborted, "fetch task panicked"))
            });
            let _ = event_tx.send(EngineEvent::FetchCompleted {
                feed,
                token,
                result,
            });
        }
    }
}

async fn dispatch(
    fetcher: &dyn SourceFetcher,
    request: &FetchRequest,
) -> Result<Vec<Item>, FetchError> {
    match request {
        FetchRequest::Discovery { filters, page } => fetcher.fetch_discovery(filters, *page).await,
        FetchRequest::Search {
            plugin,
            keyword,
            page,
        } => fetcher.fetch_search(plugin, keyword, *page).await,
    }
}

fn failed(job: FetchJob, message: &str) -> EngineEvent {
    EngineEvent::FetchCompleted {
        feed: job.request.feed(),
        token: job.token,
        result: Err(FetchError::new(FailureKind::Aborted, message)),
    }
}
