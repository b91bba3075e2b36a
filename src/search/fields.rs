//! Field extraction and the per-field weight table.
//!
//! Every record exposes the same fixed set of named fields regardless of its
//! variant; fields that don't apply to a variant extract as empty text (which
//! tokenizes to nothing). This keeps the weight table uniform so the scorer
//! never branches on record kind.

use crate::types::Record;

/// A named, weighted text field of an indexed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Field {
    Title,
    Slug,
    Tags,
    Headings,
    Section,
    Events,
    Actions,
    Scopes,
    Content,
}

/// All fields, in weight-table order. Index construction and scoring iterate
/// this exhaustively for every record variant.
pub(crate) const FIELDS: [Field; 9] = [
    Field::Title,
    Field::Slug,
    Field::Tags,
    Field::Headings,
    Field::Section,
    Field::Events,
    Field::Actions,
    Field::Scopes,
    Field::Content,
];

impl Field {
    /// Scoring multiplier for a match in this field.
    pub(crate) const fn weight(self) -> f32 {
        match self {
            Self::Title => 5.0,
            Self::Slug => 4.0,
            Self::Tags => 3.5,
            Self::Headings => 3.0,
            Self::Section | Self::Events | Self::Actions | Self::Scopes => 2.0,
            Self::Content => 1.5,
        }
    }

    /// Extract this field's raw text from a record.
    pub(crate) fn extract(self, record: &Record) -> String {
        match (record, self) {
            (Record::Doc(d), Self::Title) => d.title.clone(),
            (Record::Doc(d), Self::Tags) => d.tags.join(" "),
            (Record::Doc(d), Self::Headings) => d.headings.join(" "),
            (Record::Doc(d), Self::Section) => d.section.clone().unwrap_or_default(),
            (Record::Doc(d), Self::Content) => d.content.clone(),
            (Record::Task(t), Self::Title) => t.title.clone(),
            (Record::Task(t), Self::Slug) => t.slug.clone(),
            (Record::Task(t), Self::Tags) => t.tags.join(" "),
            (Record::Task(t), Self::Events) => t.events.join(" "),
            (Record::Task(t), Self::Actions) => t.actions.join(" "),
            (Record::Task(t), Self::Scopes) => t.scopes.join(" "),
            (Record::Task(t), Self::Content) => t.content.clone(),
            // Inapplicable variant/field combinations contribute no text.
            _ => String::new(),
        }
    }
}
