//! Corpus configuration handler.

use rmcp::schemars;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::server::expand_tilde;
use crate::state::ServerState;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCorpusRequest {
    /// Path to the corpus directory (markdown docs and JSON task definitions)
    pub path: String,
}

/// Configure the corpus root, ingest it, and install the initial index.
pub async fn handle_set_corpus(
    state: &Arc<ServerState>,
    request: SetCorpusRequest,
) -> Result<String, String> {
    let expanded = expand_tilde(&request.path);
    let path = PathBuf::from(expanded.as_ref());

    if !path.exists() {
        return Err(format!("Path does not exist: {}", path.display()));
    }
    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", path.display()));
    }

    let canonical = path
        .canonicalize()
        .map_err(|e| format!("Failed to resolve {}: {}", path.display(), e))?;

    let index = state
        .set_corpus(canonical.clone())
        .await
        .map_err(|e| format!("Failed to load corpus: {e:#}"))?;

    Ok(format!(
        "Corpus configured at {}.\nIndexed {} records with {} unique terms.",
        canonical.display(),
        index.document_count(),
        index.term_count()
    ))
}
