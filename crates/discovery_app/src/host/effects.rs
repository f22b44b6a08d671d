use discovery_core::{Destination, Effect, FeedKind, FetchFailure, Msg};
use discovery_engine::{EngineEvent, EngineHandle, FetchJob, FetchRequest};
use feed_logging::{feed_info, feed_warn};

/// Receives named-destination transitions.
pub trait Navigator {
    fn navigate(&mut self, destination: &Destination);
}

/// Receives error events for display.
pub trait Notifier {
    fn notify(&mut self, feed: FeedKind, message: &str);
}

/// Executes core effects against the engine and the host's collaborators,
/// and turns engine completions back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    navigator: Box<dyn Navigator>,
    notifier: Box<dyn Notifier>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        navigator: Box<dyn Navigator>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            engine,
            navigator,
            notifier,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchDiscovery {
                    token,
                    filters,
                    page,
                } => {
                    feed_info!(
                        "FetchDiscovery token={} plugin={} page={}",
                        token,
                        filters.plugin,
                        page
                    );
                    self.engine.enqueue(FetchJob {
                        token,
                        request: FetchRequest::Discovery { filters, page },
                    });
                }
                Effect::FetchSearch {
                    token,
                    plugin,
                    keyword,
                    page,
                } => {
                    feed_info!(
                        "FetchSearch token={} plugin={} keyword_len={} page={}",
                        token,
                        plugin,
                        keyword.len(),
                        page
                    );
                    self.engine.enqueue(FetchJob {
                        token,
                        request: FetchRequest::Search {
                            plugin,
                            keyword,
                            page,
                        },
                    });
                }
                Effect::Notify { feed, message } => {
                    self.notifier.notify(feed, &message);
                }
                Effect::Navigate(destination) => {
                    self.navigator.navigate(&destination);
                }
            }
        }
    }

    /// Next finished fetch as a message, if any.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(into_msg)
    }

    pub fn wait(&self, timeout: std::time::Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(into_msg)
    }
}

fn into_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FetchCompleted {
            feed,
            token,
            result,
        } => {
            if let Err(err) = &result {
                feed_warn!("{} fetch {} failed: {}", feed.as_str(), token, err);
            }
            Msg::FetchCompleted {
                feed,
                token,
                result: result.map_err(FetchFailure::from),
            }
        }
    }
}
