pub mod error;
pub mod ingest;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod types;

pub use error::{IngestError, Result};
pub use search::{SearchHit, SearchIndex, SearchOptions, SearchPage};
pub use server::CorpusServer;
pub use state::ServerState;
pub use types::{DocRecord, Record, RecordKind, TaskRecord};
