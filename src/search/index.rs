//! TF-IDF index construction over the record corpus.

use ahash::{AHashMap, AHashSet};

use super::fields::{FIELDS, Field};
use super::tokenize::tokenize;
use crate::types::Record;

/// One record's indexed form: raw field text plus per-field term frequencies.
///
/// Fields are recomputed deterministically from the extractor and are never
/// partially populated; every field in [`FIELDS`] has an entry.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    record: Record,
    field_text: AHashMap<Field, String>,
    token_freq: AHashMap<Field, AHashMap<String, u32>>,
}

impl IndexedDocument {
    fn new(record: Record) -> Self {
        let mut field_text = AHashMap::with_capacity(FIELDS.len());
        let mut token_freq = AHashMap::with_capacity(FIELDS.len());

        for field in FIELDS {
            let text = field.extract(&record);
            let mut counts: AHashMap<String, u32> = AHashMap::new();
            for token in tokenize(&text) {
                *counts.entry(token).or_insert(0) += 1;
            }
            field_text.insert(field, text);
            token_freq.insert(field, counts);
        }

        Self {
            record,
            field_text,
            token_freq,
        }
    }

    /// The originating record (read-only).
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Raw extracted text for a field.
    pub(crate) fn field_text(&self, field: Field) -> &str {
        self.field_text.get(&field).map_or("", String::as_str)
    }

    /// Term frequency of `token` within one field.
    pub(crate) fn frequency(&self, field: Field, token: &str) -> u32 {
        self.token_freq
            .get(&field)
            .and_then(|counts| counts.get(token))
            .copied()
            .unwrap_or(0)
    }

    /// Iterate the distinct tokens appearing in any field of this document.
    fn token_union(&self) -> AHashSet<&str> {
        self.token_freq
            .values()
            .flat_map(|counts| counts.keys().map(String::as_str))
            .collect()
    }
}

/// A frozen, process-wide immutable search index snapshot.
///
/// Built once per corpus version; queries share it freely without locking.
/// A rebuild constructs an entirely new `SearchIndex` and swaps it in as a
/// whole, so no reader ever observes a partially built index.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    documents: Vec<IndexedDocument>,
    doc_freq: AHashMap<String, u32>,
    total_documents: usize,
}

impl SearchIndex {
    /// Build an index from a corpus of records.
    ///
    /// Document frequency counts a token once per document regardless of how
    /// many fields or occurrences contain it (field-union, not field-sum).
    pub fn build(records: Vec<Record>) -> Self {
        let start = std::time::Instant::now();

        let documents: Vec<IndexedDocument> =
            records.into_iter().map(IndexedDocument::new).collect();

        let mut doc_freq: AHashMap<String, u32> = AHashMap::new();
        for document in &documents {
            for token in document.token_union() {
                *doc_freq.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        let total_documents = documents.len();
        let index = Self {
            documents,
            doc_freq,
            total_documents,
        };

        tracing::info!(
            "Built search index: {} unique terms, {} documents in {:?}",
            index.term_count(),
            index.document_count(),
            start.elapsed()
        );

        index
    }

    /// All indexed documents, in corpus order.
    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    /// Number of documents containing `token` in at least one field.
    pub fn doc_freq(&self, token: &str) -> u32 {
        self.doc_freq.get(token).copied().unwrap_or(0)
    }

    /// Total number of indexed documents.
    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    /// Distinct indexed tokens across the whole corpus.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.doc_freq.keys().map(String::as_str)
    }

    /// Number of unique terms in the index.
    pub fn term_count(&self) -> usize {
        self.doc_freq.len()
    }

    /// Number of documents in the index.
    pub fn document_count(&self) -> usize {
        self.total_documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocRecord, TaskRecord};
    use assert2::check;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::Doc(DocRecord {
                id: "doc:refund".to_string(),
                title: "Refund policy".to_string(),
                content: "Refunds are issued within 5 days. Refund requests go to billing."
                    .to_string(),
                tags: vec!["billing".to_string()],
                ..DocRecord::default()
            }),
            Record::Task(TaskRecord {
                id: "task:refund-order".to_string(),
                title: "Refund order".to_string(),
                slug: "refund-order".to_string(),
                tags: vec!["orders".to_string()],
                ..TaskRecord::default()
            }),
        ]
    }

    #[test]
    fn test_doc_freq_is_field_union() {
        let index = SearchIndex::build(sample_records());
        // "refund" appears in multiple fields of both records but each
        // document is counted once.
        check!(index.doc_freq("refund") == 2);
        check!(index.doc_freq("billing") == 1);
        check!(index.doc_freq("missing") == 0);
    }

    #[test]
    fn test_frequency_counts_per_field() {
        let index = SearchIndex::build(sample_records());
        let doc = &index.documents()[0];
        check!(doc.frequency(Field::Title, "refund") == 1);
        // "Refunds" tokenizes to "refunds", so only the bare "Refund" counts.
        check!(doc.frequency(Field::Content, "refund") == 1);
        check!(doc.frequency(Field::Content, "refunds") == 1);
        check!(doc.frequency(Field::Slug, "refund") == 0);
    }

    #[test]
    fn test_empty_corpus() {
        let index = SearchIndex::build(vec![]);
        check!(index.total_documents() == 0);
        check!(index.term_count() == 0);
    }

    #[test]
    fn test_stop_words_not_indexed() {
        let index = SearchIndex::build(sample_records());
        check!(index.doc_freq("the") == 0);
        check!(index.doc_freq("to") == 0);
    }
}
