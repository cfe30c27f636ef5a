//! Durable storage of the accumulated result map.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::BatchResult;
use crate::types::OutputRecord;

/// The full persisted record set, keyed by combination id.
pub type ResultMap = HashMap<String, OutputRecord>;

/// Durable storage seam for the batch runner. `load` seeds the resume
/// set, `flush` persists the whole map at every checkpoint.
#[async_trait]
pub trait OutputStore: Send + Sync {
    async fn load(&self) -> BatchResult<ResultMap>;
    async fn flush(&self, results: &ResultMap) -> BatchResult<()>;
}

// ── JSON file store ────────────────────────────────────────────────────

/// Stores the result map as one pretty-printed JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OutputStore for JsonFileStore {
    async fn load(&self) -> BatchResult<ResultMap> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no prior output, starting fresh");
                return Ok(ResultMap::new());
            }
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str::<ResultMap>(&raw) {
            Ok(results) => {
                tracing::info!(
                    path = %self.path.display(),
                    records = results.len(),
                    "loaded prior output"
                );
                Ok(results)
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "prior output unreadable, starting fresh"
                );
                Ok(ResultMap::new())
            }
        }
    }

    async fn flush(&self, results: &ResultMap) -> BatchResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(results)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!(
            path = %self.path.display(),
            records = results.len(),
            "checkpoint written"
        );
        Ok(())
    }
}

// ── In-memory store ────────────────────────────────────────────────────

/// In-memory store for tests: keeps the last flushed map and counts
/// flushes.
#[derive(Default)]
pub struct MemoryStore {
    seed: Mutex<ResultMap>,
    flushed: Mutex<ResultMap>,
    flush_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that resumes from a pre-existing record set.
    pub fn seeded(seed: ResultMap) -> Self {
        Self {
            seed: Mutex::new(seed),
            ..Self::default()
        }
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count.load(Ordering::SeqCst)
    }

    pub fn last_flushed(&self) -> ResultMap {
        match self.flushed.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl OutputStore for MemoryStore {
    async fn load(&self) -> BatchResult<ResultMap> {
        let seed = match self.seed.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Ok(seed)
    }

    async fn flush(&self, results: &ResultMap) -> BatchResult<()> {
        match self.flushed.lock() {
            Ok(mut guard) => *guard = results.clone(),
            Err(poisoned) => *poisoned.into_inner() = results.clone(),
        }
        self.flush_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeLevel, Combination};

    fn record(id_main: &str) -> OutputRecord {
        let combo = Combination {
            main: id_main.into(),
            trend: "t".into(),
            change: ChangeLevel::C0,
        };
        OutputRecord::terminal_failure(&combo, "unavailable".into())
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("out.json"));
        assert!(store.load().await.expect("load").is_empty());
    }

    #[tokio::test]
    async fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");
        tokio::fs::write(&path, "not json {").await.expect("write");
        let store = JsonFileStore::new(&path);
        assert!(store.load().await.expect("load").is_empty());
    }

    #[tokio::test]
    async fn flush_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("nested").join("out.json"));

        let mut results = ResultMap::new();
        let rec = record("a");
        results.insert(rec.id.clone(), rec);
        store.flush(&results).await.expect("flush");

        let loaded = store.load().await.expect("load");
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("a_t_C0"));
    }

    #[tokio::test]
    async fn memory_store_counts_flushes() {
        let store = MemoryStore::new();
        let mut results = ResultMap::new();
        let rec = record("a");
        results.insert(rec.id.clone(), rec);

        store.flush(&results).await.expect("flush");
        store.flush(&results).await.expect("flush");
        assert_eq!(store.flush_count(), 2);
        assert_eq!(store.last_flushed().len(), 1);
    }
}
