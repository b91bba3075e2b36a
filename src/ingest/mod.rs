//! Corpus ingestion: discovering and parsing records from disk.
//!
//! A corpus is a directory tree containing markdown documentation pages and
//! JSON task definitions. Ingestion walks the tree, parses every recognized
//! file into a [`Record`], and hands the finished collection to the index
//! builder. Malformed files are logged and skipped; a single bad file never
//! fails a corpus load.

pub(crate) mod markdown;
pub(crate) mod tasks;

use ahash::AHashMap;
use anyhow::ensure;
use ignore::WalkBuilder;
use std::path::Path;

use crate::error::{IngestError, Result};
use crate::types::Record;

/// Load all records from a corpus root directory.
///
/// Records are returned sorted by id so rebuilds are deterministic
/// regardless of filesystem iteration order. When two files produce the
/// same id, the later one wins and a warning is logged.
pub fn load_corpus(root: &Path) -> Result<Vec<Record>> {
    ensure!(
        root.is_dir(),
        "corpus root {} is not a directory",
        root.display()
    );

    let start = std::time::Instant::now();
    let mut by_id: AHashMap<String, Record> = AHashMap::new();
    let (mut doc_count, mut task_count) = (0usize, 0usize);

    for entry in WalkBuilder::new(root).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!("Skipping unreadable corpus entry: {error}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let record = match path.extension().and_then(|ext| ext.to_str()) {
            Some("md" | "markdown") => match read_file(path) {
                Ok(raw) => {
                    doc_count += 1;
                    Some(Record::Doc(markdown::parse_doc(&relative, &raw)))
                }
                Err(error) => {
                    tracing::warn!("Skipping doc page: {error}");
                    None
                }
            },
            Some("json") => {
                match read_file(path).and_then(|raw| tasks::parse_task(&relative, &raw)) {
                    Ok(task) => {
                        task_count += 1;
                        Some(Record::Task(task))
                    }
                    Err(error) => {
                        tracing::warn!("Skipping task definition: {error}");
                        None
                    }
                }
            }
            _ => None,
        };

        if let Some(record) = record {
            let id = record.id().to_string();
            if by_id.insert(id.clone(), record).is_some() {
                tracing::warn!("Duplicate record id '{id}'; keeping the later file");
            }
        }
    }

    let mut records: Vec<Record> = by_id.into_values().collect();
    records.sort_by(|a, b| a.id().cmp(b.id()));

    tracing::info!(
        "Loaded corpus from {}: {} records ({} docs, {} tasks) in {:?}",
        root.display(),
        records.len(),
        doc_count,
        task_count,
        start.elapsed()
    );

    Ok(records)
}

fn read_file(path: &Path) -> std::result::Result<String, IngestError> {
    std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
