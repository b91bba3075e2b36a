//! Search tool handler: runs ranked queries against the current index.

use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::search::{self, SearchOptions, SearchPage};
use crate::state::ServerState;
use crate::types::RecordKind;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query text
    pub query: String,
    /// Restrict results to a record kind: "doc" or "task"
    pub kind: Option<String>,
    /// Maximum number of results per page, 1-50 (default: 10)
    pub limit: Option<usize>,
    /// Number of ranked results to skip (default: 0)
    pub offset: Option<usize>,
    /// Whether typo-tolerant matching is enabled (default: true)
    pub fuzzy: Option<bool>,
    /// Edit-distance budget for fuzzy matching, 0-2 (default: 1)
    pub fuzzy_max_edits: Option<usize>,
    /// Fuzzy candidates kept per query token, 1-5 (default: 3)
    pub fuzzy_max_candidates: Option<usize>,
    /// Tags that must all be present on a record (case-insensitive)
    pub tags: Option<Vec<String>>,
    /// Substrings that must all occur in a task's event subscriptions
    pub subscriptions: Option<Vec<String>>,
}

/// Execute the search operation against the current index snapshot.
pub async fn handle_search(
    state: &Arc<ServerState>,
    request: SearchRequest,
) -> Result<String, String> {
    if request.query.trim().is_empty() {
        return Err("Query must not be empty.".to_string());
    }

    let kind = match request.kind.as_deref() {
        None | Some("") => None,
        Some(value) => Some(RecordKind::parse(value).ok_or_else(|| {
            format!("Unknown kind '{value}'. Valid kinds are 'doc' and 'task'.")
        })?),
    };

    let index = state.index().await.ok_or_else(|| {
        "No corpus configured.\n\n\
         Use set_corpus with a path to a directory of markdown docs and JSON task definitions."
            .to_string()
    })?;

    let defaults = SearchOptions::default();
    let options = SearchOptions {
        query: request.query.clone(),
        kind,
        limit: request.limit.unwrap_or(defaults.limit),
        offset: request.offset.unwrap_or(0),
        fuzzy: request.fuzzy.unwrap_or(defaults.fuzzy),
        fuzzy_max_edits: request.fuzzy_max_edits.unwrap_or(defaults.fuzzy_max_edits),
        fuzzy_max_candidates: request
            .fuzzy_max_candidates
            .unwrap_or(defaults.fuzzy_max_candidates),
        tags: request.tags.unwrap_or_default(),
        subscriptions: request.subscriptions.unwrap_or_default(),
    };

    let page = search::search(&index, &options);

    if page.items.is_empty() {
        let mut msg = format!("No results found for '{}'.\n\n", request.query);
        msg.push_str("Search tips:\n");
        msg.push_str("• Try a shorter or more general term\n");
        msg.push_str("• Fuzzy matching tolerates single-character typos by default\n");
        if !options.tags.is_empty() || !options.subscriptions.is_empty() {
            msg.push_str("• Filters require every requested tag/subscription to match\n");
        }
        if options.kind.is_some() {
            msg.push_str("• Drop the kind filter to search docs and tasks together\n");
        }
        return Ok(msg);
    }

    Ok(format_search_results(&page, &request.query))
}

/// Format a result page into a readable string output.
fn format_search_results(page: &SearchPage, query: &str) -> String {
    let mut output = format!("Search results for '{}':\n\n", query);

    let max_score = page.items.first().map_or(1.0, |hit| hit.score.max(1e-6));

    for (idx, hit) in page.items.iter().enumerate() {
        let relevance = ((hit.score / max_score) * 100.0).round() as u8;
        output
            .write_fmt(format_args!(
                "{}. `{}` ({}) - relevance: {}%\n   {}\n",
                idx + 1,
                hit.title,
                hit.kind,
                relevance,
                hit.path
            ))
            .unwrap();

        if !hit.snippet.is_empty() {
            let flattened = hit.snippet.replace('\n', " ");
            output
                .write_fmt(format_args!("   {}\n", flattened.trim()))
                .unwrap();
        }
        if !hit.tags.is_empty() {
            output
                .write_fmt(format_args!("   tags: {}\n", hit.tags.join(", ")))
                .unwrap();
        }
        output.push('\n');
    }

    if let Some(next_offset) = page.next_offset {
        output
            .write_fmt(format_args!(
                "More results available; repeat the search with offset={next_offset}.\n"
            ))
            .unwrap();
    }

    output
}
