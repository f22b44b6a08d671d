//! Discovery engine: async fetch collaborator and effect execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::decode_items;
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, HttpSourceFetcher, SourceEndpoints, SourceFetcher};
pub use types::{EngineEvent, FailureKind, FetchError, FetchJob, FetchRequest};
