//! Shared server state: the configured corpus root and the current index
//! snapshot.
//!
//! The index is an immutable value behind an `Arc`; readers clone the `Arc`
//! and query a consistent snapshot without locking. A rebuild constructs a
//! brand-new index and installs it in a single assignment, so readers in
//! flight keep seeing the prior snapshot and nobody observes a partially
//! built index.

use anyhow::{Context, anyhow};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::ingest;
use crate::search::SearchIndex;

/// Shared state for the MCP server.
#[derive(Debug, Default)]
pub struct ServerState {
    /// Corpus root directory, once configured.
    corpus_root: RwLock<Option<PathBuf>>,

    /// Current frozen index snapshot.
    index: RwLock<Option<Arc<SearchIndex>>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configured corpus root, if any.
    pub async fn corpus_root(&self) -> Option<PathBuf> {
        self.corpus_root.read().await.clone()
    }

    /// The current index snapshot, if a corpus has been loaded.
    pub async fn index(&self) -> Option<Arc<SearchIndex>> {
        self.index.read().await.clone()
    }

    /// Configure the corpus root and build the initial index.
    pub async fn set_corpus(&self, root: PathBuf) -> Result<Arc<SearchIndex>> {
        *self.corpus_root.write().await = Some(root);
        self.rebuild().await
    }

    /// Re-ingest the configured corpus and atomically swap in a fresh index.
    ///
    /// Ingestion and index construction are CPU/IO bound, so they run on the
    /// blocking pool; the swap itself is a single assignment.
    pub async fn rebuild(&self) -> Result<Arc<SearchIndex>> {
        let root = self
            .corpus_root()
            .await
            .ok_or_else(|| anyhow!("no corpus configured"))?;

        let index = tokio::task::spawn_blocking(move || -> Result<SearchIndex> {
            let records = ingest::load_corpus(&root)?;
            Ok(SearchIndex::build(records))
        })
        .await
        .context("index build task panicked")??;

        let index = Arc::new(index);
        *self.index.write().await = Some(Arc::clone(&index));
        Ok(index)
    }
}
