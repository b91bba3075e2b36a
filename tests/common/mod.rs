//! Shared test fixtures and utilities for integration tests.
//!
//! Each test gets an isolated corpus: a fresh temporary directory populated
//! with markdown docs and JSON task definitions, plus its own `ServerState`
//! with no pre-built index. Tests configure the corpus themselves (usually
//! via [`configured_state`]) so cold-start behavior stays testable.

use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskdocs_mcp::ServerState;
use tempfile::TempDir;

/// A temporary corpus directory for test isolation.
///
/// The directory is deleted when the fixture is dropped.
pub struct TempCorpus {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempCorpus {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp corpus");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file at a corpus-relative path, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create corpus subdirectory");
        }
        std::fs::write(path, contents).expect("failed to write corpus file");
    }
}

/// A small representative corpus: two docs and two tasks.
#[fixture]
pub fn sample_corpus() -> TempCorpus {
    let corpus = TempCorpus::new();

    corpus.write(
        "docs/billing/refunds.md",
        "---\ntitle: Refund policy\nsection: Billing\ntags:\n  - billing\n---\n\n\
         # Overview\n\nRefunds are issued within 5 days of approval.\n",
    );
    corpus.write(
        "docs/webhooks.md",
        "---\ntitle: Webhook retries\ntags:\n  - webhooks\n---\n\n\
         # Delivery\n\nFailed deliveries are retried with exponential backoff.\n",
    );
    corpus.write(
        "tasks/refund-order.json",
        r#"{
            "title": "Refund order",
            "slug": "refund-order",
            "tags": ["orders"],
            "events": ["order.refund_requested"],
            "actions": ["payments.refund"],
            "scopes": ["orders:write"],
            "summary": "Refunds an order when a refund is requested."
        }"#,
    );
    corpus.write(
        "tasks/sync-inventory.json",
        r#"{
            "title": "Sync inventory",
            "slug": "sync-inventory",
            "tags": ["inventory", "sync"],
            "events": ["inventory.updated"],
            "subscriptions_template": "inventory.{updated,restocked}",
            "summary": "Keeps warehouse counts in sync."
        }"#,
    );

    corpus
}

/// A `ServerState` with the given corpus already ingested and indexed.
#[allow(dead_code)] // Used across different integration test crates
pub async fn configured_state(corpus: &TempCorpus) -> Arc<ServerState> {
    let state = Arc::new(ServerState::new());
    state
        .set_corpus(corpus.root().to_path_buf())
        .await
        .expect("corpus should ingest cleanly");
    state
}
