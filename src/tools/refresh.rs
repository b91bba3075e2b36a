//! Explicit index rebuild handler.

use std::sync::Arc;

use crate::state::ServerState;

/// Re-ingest the configured corpus and swap in a fresh index snapshot.
pub async fn handle_refresh(state: &Arc<ServerState>) -> Result<String, String> {
    let index = state.rebuild().await.map_err(|e| {
        format!(
            "Failed to rebuild index: {e:#}\n\n\
             Use set_corpus first if no corpus has been configured."
        )
    })?;

    Ok(format!(
        "Rebuilt search index: {} records, {} unique terms.",
        index.document_count(),
        index.term_count()
    ))
}
