//! Query execution: scoring, filtering, pagination, and hit assembly.

use super::fields::{FIELDS, Field};
use super::fuzzy::{Candidate, expand, literal};
use super::index::{IndexedDocument, SearchIndex};
use super::snippet::build_snippet;
use super::tokenize::tokenize;
use crate::types::{Record, RecordKind};

/// Hard bounds and defaults for search options.
pub const MAX_LIMIT: usize = 50;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_FUZZY_EDITS: usize = 2;
pub const DEFAULT_FUZZY_EDITS: usize = 1;
pub const MAX_FUZZY_CANDIDATES: usize = 5;
pub const DEFAULT_FUZZY_CANDIDATES: usize = 3;

/// Options for a single search call.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Query text; tokenized with the same rules as indexed text.
    pub query: String,
    /// Restrict results to one record kind (hard predicate, applied before
    /// scoring).
    pub kind: Option<RecordKind>,
    /// Page size, clamped to `[1, MAX_LIMIT]`.
    pub limit: usize,
    /// Number of ranked results to skip.
    pub offset: usize,
    /// Whether to expand query tokens against the vocabulary.
    pub fuzzy: bool,
    /// Edit-distance budget for fuzzy expansion, clamped to `[0, 2]`.
    pub fuzzy_max_edits: usize,
    /// Candidates kept per query token, clamped to `[1, 5]`.
    pub fuzzy_max_candidates: usize,
    /// Tag filter: every requested tag must be present (case-insensitive).
    pub tags: Vec<String>,
    /// Subscription filter: every requested substring must occur within the
    /// record's subscriptions (events plus template), case-insensitive.
    pub subscriptions: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: String::new(),
            kind: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            fuzzy: true,
            fuzzy_max_edits: DEFAULT_FUZZY_EDITS,
            fuzzy_max_candidates: DEFAULT_FUZZY_CANDIDATES,
            tags: Vec::new(),
            subscriptions: Vec::new(),
        }
    }
}

impl SearchOptions {
    /// Convenience constructor for a plain query with default options.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// One ranked search result. Ephemeral; recomputed per query.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub kind: RecordKind,
    pub title: String,
    pub path: String,
    pub snippet: String,
    pub tags: Vec<String>,
    pub score: f32,
}

/// One page of ranked results.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub items: Vec<SearchHit>,
    /// Present iff more results remain beyond this page; equals
    /// `offset + limit`.
    pub next_offset: Option<usize>,
}

/// Execute a search against a frozen index.
///
/// Query tokens combine with OR semantics: a document matching any token
/// scores, proportionally to that token's contribution. A query that
/// tokenizes to nothing (empty or all stop words) matches every document
/// with score 0, preserving browse-all behavior.
pub fn search(index: &SearchIndex, options: &SearchOptions) -> SearchPage {
    let limit = options.limit.clamp(1, MAX_LIMIT);
    let max_edits = options.fuzzy_max_edits.min(MAX_FUZZY_EDITS);
    let max_candidates = options.fuzzy_max_candidates.clamp(1, MAX_FUZZY_CANDIDATES);

    let query_tokens = tokenize(&options.query);
    let candidate_sets: Vec<Vec<Candidate>> = query_tokens
        .iter()
        .map(|token| {
            if options.fuzzy {
                expand(token, index, max_edits, max_candidates)
            } else {
                literal(token)
            }
        })
        .collect();

    let mut scored: Vec<(&IndexedDocument, f32)> = index
        .documents()
        .iter()
        .filter(|document| {
            options
                .kind
                .is_none_or(|kind| document.record().kind() == kind)
        })
        .filter(|document| matches_tags(document.record(), &options.tags))
        .filter(|document| matches_subscriptions(document.record(), &options.subscriptions))
        .filter_map(|document| {
            let score = score_document(document, &candidate_sets, index);
            (score > 0.0 || query_tokens.is_empty()).then_some((document, score))
        })
        .collect();

    // Rank by score descending; ties break by record id for determinism.
    scored.sort_by(|(a, score_a), (b, score_b)| {
        score_b
            .total_cmp(score_a)
            .then_with(|| a.record().id().cmp(b.record().id()))
    });

    let has_more = scored.len() > options.offset + limit;
    let snippet_tokens: Vec<String> = candidate_sets
        .iter()
        .flatten()
        .map(|candidate| candidate.token.clone())
        .collect();

    let items = scored
        .into_iter()
        .skip(options.offset)
        .take(limit)
        .map(|(document, score)| to_hit(document, score, &snippet_tokens))
        .collect();

    SearchPage {
        items,
        next_offset: has_more.then_some(options.offset + limit),
    }
}

/// Weighted TF-IDF score of one document against the expanded query.
fn score_document(
    document: &IndexedDocument,
    candidate_sets: &[Vec<Candidate>],
    index: &SearchIndex,
) -> f32 {
    let total_documents = index.total_documents() as f32;
    let mut score = 0.0;

    for candidate in candidate_sets.iter().flatten() {
        let doc_freq = index.doc_freq(&candidate.token) as f32;
        let idf = (1.0 + total_documents / (1.0 + doc_freq)).ln();

        for field in FIELDS {
            let frequency = document.frequency(field, &candidate.token);
            if frequency > 0 {
                score += frequency as f32 * field.weight() * idf * candidate.weight;
            }
        }
    }

    score
}

/// Every requested tag must be present in the record's tag set.
fn matches_tags(record: &Record, tags: &[String]) -> bool {
    if tags.is_empty() {
        return true;
    }
    let record_tags: Vec<String> = record.tags().iter().map(|t| t.to_lowercase()).collect();
    tags.iter()
        .all(|tag| record_tags.contains(&tag.to_lowercase()))
}

/// Every requested substring must occur within the record's subscription
/// surface (event list plus subscription template). Docs have no
/// subscriptions, so any non-empty filter excludes them.
fn matches_subscriptions(record: &Record, subscriptions: &[String]) -> bool {
    if subscriptions.is_empty() {
        return true;
    }
    let haystack = match record {
        Record::Task(task) => {
            let mut text = task.events.join(" ");
            if let Some(template) = &task.subscriptions_template {
                text.push(' ');
                text.push_str(template);
            }
            text.to_lowercase()
        }
        Record::Doc(_) => String::new(),
    };
    subscriptions
        .iter()
        .all(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Assemble a hit, deriving the snippet from the record's primary text.
fn to_hit(document: &IndexedDocument, score: f32, snippet_tokens: &[String]) -> SearchHit {
    let record = document.record();
    let snippet = build_snippet(&primary_text(document), snippet_tokens);

    SearchHit {
        id: record.id().to_string(),
        kind: record.kind(),
        title: record.title().to_string(),
        path: record.path().to_string(),
        snippet,
        tags: record.tags().to_vec(),
        score,
    }
}

/// The text a snippet is extracted from: content for tasks, content prefixed
/// with the first heading for docs.
fn primary_text(document: &IndexedDocument) -> String {
    let content = document.field_text(Field::Content);
    match document.record() {
        Record::Doc(doc) => match doc.headings.first() {
            Some(heading) => format!("{heading}\n{content}"),
            None => content.to_string(),
        },
        Record::Task(_) => content.to_string(),
    }
}
