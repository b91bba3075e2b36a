//! Full-text search infrastructure for the docs/tasks corpus.
//!
//! This module provides TF-IDF based search across documentation pages and
//! task definitions, including tokenization, per-field indexing, fuzzy
//! query expansion, weighted scoring, filtering, and pagination.

// Module declarations
pub(crate) mod fields;
pub(crate) mod fuzzy;
pub(crate) mod index;
pub(crate) mod query;
pub(crate) mod snippet;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use fuzzy::{Candidate, expand, literal};
pub use index::{IndexedDocument, SearchIndex};
pub use query::{
    DEFAULT_FUZZY_CANDIDATES, DEFAULT_FUZZY_EDITS, DEFAULT_LIMIT, MAX_FUZZY_CANDIDATES,
    MAX_FUZZY_EDITS, MAX_LIMIT, SearchHit, SearchOptions, SearchPage, search,
};
pub use tokenize::{STOP_WORDS, tokenize};
