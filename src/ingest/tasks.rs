//! JSON task definitions.

use serde::Deserialize;
use std::path::Path;

use crate::error::IngestError;
use crate::types::TaskRecord;

/// On-disk shape of a task definition file.
#[derive(Debug, Deserialize)]
struct TaskDefinition {
    title: String,
    slug: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    events: Vec<String>,
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    scopes: Vec<String>,
    #[serde(default)]
    subscriptions_template: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    script: Option<String>,
}

/// Parse a JSON task definition into a task record.
///
/// The record's searchable content is the blank-line-separated concatenation
/// of the definition's free-text blocks.
pub(crate) fn parse_task(relative_path: &str, raw: &str) -> Result<TaskRecord, IngestError> {
    let definition: TaskDefinition =
        serde_json::from_str(raw).map_err(|source| IngestError::InvalidTask {
            path: Path::new(relative_path).to_path_buf(),
            source,
        })?;

    let content = [
        definition.summary.as_deref(),
        definition.template.as_deref(),
        definition.script.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|block| !block.trim().is_empty())
    .collect::<Vec<_>>()
    .join("\n\n");

    Ok(TaskRecord {
        id: format!("task:{}", definition.slug),
        title: definition.title,
        path: relative_path.to_string(),
        tags: definition.tags,
        content,
        slug: definition.slug,
        events: definition.events,
        actions: definition.actions,
        scopes: definition.scopes,
        subscriptions_template: definition.subscriptions_template,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_full_definition() {
        let raw = r#"{
            "title": "Refund order",
            "slug": "refund-order",
            "tags": ["orders"],
            "events": ["order.refund_requested"],
            "actions": ["payments.refund"],
            "scopes": ["orders:write"],
            "subscriptions_template": "order.{refund_requested}",
            "summary": "Refunds an order on request.",
            "template": "refund {{ order_id }}"
        }"#;
        let task = parse_task("tasks/refund-order.json", raw).unwrap();

        check!(task.id == "task:refund-order");
        check!(task.slug == "refund-order");
        check!(task.events == vec!["order.refund_requested".to_string()]);
        check!(task.content == "Refunds an order on request.\n\nrefund {{ order_id }}");
        check!(
            task.subscriptions_template.as_deref() == Some("order.{refund_requested}")
        );
    }

    #[test]
    fn test_minimal_definition() {
        let raw = r#"{"title": "Ping", "slug": "ping"}"#;
        let task = parse_task("tasks/ping.json", raw).unwrap();

        check!(task.id == "task:ping");
        check!(task.content.is_empty());
        check!(task.events.is_empty());
        check!(task.subscriptions_template.is_none());
    }

    #[test]
    fn test_missing_slug_is_an_error() {
        let raw = r#"{"title": "No slug"}"#;
        check!(parse_task("tasks/bad.json", raw).is_err());
    }

    #[test]
    fn test_blank_blocks_are_skipped() {
        let raw = r#"{"title": "Ping", "slug": "ping", "summary": "  ", "script": "run()"}"#;
        let task = parse_task("tasks/ping.json", raw).unwrap();
        check!(task.content == "run()");
    }
}
