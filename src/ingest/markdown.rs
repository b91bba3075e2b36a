//! Markdown documentation pages: front-matter parsing and heading extraction.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

use crate::types::DocRecord;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+(.+?)[ \t]*$").unwrap());

/// Optional YAML front-matter of a documentation page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    title: Option<String>,
    section: Option<String>,
    tags: Vec<String>,
}

/// Parse a markdown file into a doc record.
///
/// Front-matter is optional; a malformed front-matter block is logged and
/// treated as absent rather than failing the file. The title falls back to
/// the first heading, then to the file stem.
pub(crate) fn parse_doc(relative_path: &str, raw: &str) -> DocRecord {
    let (front_matter, body) = split_front_matter(raw);
    let front: FrontMatter = front_matter
        .and_then(|yaml| match serde_yaml::from_str(yaml) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                tracing::warn!("Ignoring malformed front-matter in {relative_path}: {error}");
                None
            }
        })
        .unwrap_or_default();

    let headings: Vec<String> = HEADING
        .captures_iter(body)
        .map(|captures| captures[1].to_string())
        .collect();

    let stem = Path::new(relative_path).with_extension("");
    let title = front
        .title
        .or_else(|| headings.first().cloned())
        .or_else(|| {
            stem.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    DocRecord {
        id: format!("doc:{}", stem.to_string_lossy()),
        title,
        path: relative_path.to_string(),
        tags: front.tags,
        content: body.trim().to_string(),
        section: front.section,
        headings,
    }
}

/// Split an optional leading `---` delimited front-matter block from the body.
fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let Some(rest) = raw.strip_prefix("---\n") else {
        return (None, raw);
    };
    if let Some(end) = rest.find("\n---\n") {
        (Some(&rest[..end]), &rest[end + 5..])
    } else if let Some(yaml) = rest.strip_suffix("\n---") {
        (Some(yaml), "")
    } else {
        // Unterminated front-matter; treat the whole file as body.
        (None, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_front_matter_fields() {
        let raw = "---\ntitle: Refund policy\nsection: Billing\ntags:\n  - billing\n  - refunds\n---\n\n# Overview\n\nRefunds are issued within 5 days.\n";
        let doc = parse_doc("billing/refunds.md", raw);

        check!(doc.id == "doc:billing/refunds");
        check!(doc.title == "Refund policy");
        check!(doc.section.as_deref() == Some("Billing"));
        check!(doc.tags == vec!["billing".to_string(), "refunds".to_string()]);
        check!(doc.headings == vec!["Overview".to_string()]);
        check!(doc.content.starts_with("# Overview"));
    }

    #[test]
    fn test_title_falls_back_to_first_heading() {
        let doc = parse_doc("guide.md", "# Getting started\n\nWelcome.\n");
        check!(doc.title == "Getting started");
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let doc = parse_doc("api/webhooks.md", "No headings here.\n");
        check!(doc.title == "webhooks");
        check!(doc.id == "doc:api/webhooks");
    }

    #[test]
    fn test_malformed_front_matter_is_ignored() {
        let raw = "---\ntitle: [unclosed\n---\n\nBody text.\n";
        let doc = parse_doc("broken.md", raw);
        check!(doc.title == "broken");
        check!(doc.content == "Body text.");
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let raw = "---\ntitle: Dangling\n\nNo closing fence.\n";
        let doc = parse_doc("dangling.md", raw);
        check!(doc.content.contains("No closing fence."));
    }

    #[test]
    fn test_all_heading_levels_collected() {
        let raw = "# One\n\ntext\n\n## Two\n\n###### Six\n";
        let doc = parse_doc("levels.md", raw);
        check!(
            doc.headings == vec!["One".to_string(), "Two".to_string(), "Six".to_string()]
        );
    }
}
