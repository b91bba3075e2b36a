//! Corpus record types shared between ingestion and the search engine.

/// The two record kinds the corpus contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Doc,
    Task,
}

impl RecordKind {
    /// Short string form used in tool output and record ids.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Task => "task",
        }
    }

    /// Parse a kind filter value as supplied by a tool request.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "doc" => Some(Self::Doc),
            "task" => Some(Self::Task),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A documentation page parsed from a markdown file.
#[derive(Debug, Clone, Default)]
pub struct DocRecord {
    /// Globally unique id, stable across rebuilds (`doc:<relative path stem>`).
    pub id: String,
    pub title: String,
    /// Corpus-relative source path.
    pub path: String,
    pub tags: Vec<String>,
    /// Markdown body with front-matter stripped.
    pub content: String,
    pub section: Option<String>,
    /// Heading texts in document order.
    pub headings: Vec<String>,
}

/// A task definition parsed from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct TaskRecord {
    /// Globally unique id, stable across rebuilds (`task:<slug>`).
    pub id: String,
    pub title: String,
    /// Corpus-relative source path.
    pub path: String,
    pub tags: Vec<String>,
    /// Blank-line-separated concatenation of the task's text blocks.
    pub content: String,
    pub slug: String,
    /// Event names the task subscribes to.
    pub events: Vec<String>,
    pub actions: Vec<String>,
    pub scopes: Vec<String>,
    pub subscriptions_template: Option<String>,
}

/// A corpus record, read-only to the search engine.
#[derive(Debug, Clone)]
pub enum Record {
    Doc(DocRecord),
    Task(TaskRecord),
}

impl Record {
    pub fn id(&self) -> &str {
        match self {
            Self::Doc(d) => &d.id,
            Self::Task(t) => &t.id,
        }
    }

    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Doc(_) => RecordKind::Doc,
            Self::Task(_) => RecordKind::Task,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Doc(d) => &d.title,
            Self::Task(t) => &t.title,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Doc(d) => &d.path,
            Self::Task(t) => &t.path,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Self::Doc(d) => &d.tags,
            Self::Task(t) => &t.tags,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Doc(d) => &d.content,
            Self::Task(t) => &t.content,
        }
    }
}
