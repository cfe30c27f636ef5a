//! Semantic source abstraction.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{SemanticsError, SemanticsResult};
use crate::types::SemanticDocument;

/// Fetches the semantic document from wherever it lives.
#[async_trait]
pub trait SemanticSource: Send + Sync {
    async fn fetch(&self) -> SemanticsResult<SemanticDocument>;
}

// ── JSON File Source ───────────────────────────────────────────────────

/// Reads the document from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SemanticSource for JsonFileSource {
    async fn fetch(&self) -> SemanticsResult<SemanticDocument> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            SemanticsError::SourceUnreachable(format!("{}: {}", self.path.display(), err))
        })?;
        let document: SemanticDocument = serde_json::from_str(&raw)
            .map_err(|err| SemanticsError::Malformed(err.to_string()))?;
        tracing::info!(
            path = %self.path.display(),
            records = document.core_library.len(),
            "semantic document loaded"
        );
        Ok(document)
    }
}

// ── Static Source ──────────────────────────────────────────────────────

/// Fixed in-memory source for tests and embedded defaults.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    document: SemanticDocument,
}

impl StaticSource {
    pub fn new(document: SemanticDocument) -> Self {
        Self { document }
    }
}

#[async_trait]
impl SemanticSource for StaticSource {
    async fn fetch(&self) -> SemanticsResult<SemanticDocument> {
        Ok(self.document.clone())
    }
}
