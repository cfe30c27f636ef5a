//! Identifier universe: the public semantics document the enumeration
//! runs over.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, BatchResult};

/// One public semantic entry: a summary, or keywords to fall back on.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PublicSemanticEntry {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl PublicSemanticEntry {
    /// Summary text: the summary field, else joined keywords, else empty.
    pub fn summary_text(&self) -> String {
        match &self.summary {
            Some(summary) if !summary.is_empty() => summary.clone(),
            _ => self.keywords.join(" "),
        }
    }
}

/// The identifier universe, ordered for stable enumeration.
#[derive(Clone, Debug, Default)]
pub struct IdentifierUniverse {
    entries: BTreeMap<String, PublicSemanticEntry>,
}

impl IdentifierUniverse {
    pub fn new(entries: BTreeMap<String, PublicSemanticEntry>) -> BatchResult<Self> {
        if entries.is_empty() {
            return Err(BatchError::EmptyUniverse);
        }
        Ok(Self { entries })
    }

    /// Load the universe from a public semantics JSON document.
    pub async fn load_json(path: impl AsRef<Path>) -> BatchResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|err| {
            BatchError::UniverseUnavailable(format!("{}: {}", path.display(), err))
        })?;
        let entries: BTreeMap<String, PublicSemanticEntry> = serde_json::from_str(&raw)
            .map_err(|err| {
                BatchError::UniverseUnavailable(format!("{}: {}", path.display(), err))
            })?;
        tracing::info!(path = %path.display(), ids = entries.len(), "identifier universe loaded");
        Self::new(entries)
    }

    /// Identifiers in enumeration order.
    pub fn ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Summary text for an identifier; empty for unknown ids.
    pub fn summary_for(&self, id: &str) -> String {
        self.entries
            .get(id)
            .map(PublicSemanticEntry::summary_text)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
