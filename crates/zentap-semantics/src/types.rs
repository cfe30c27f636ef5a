//! Semantic record and document types.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::alias::resolve_alias;

/// Per-position meaning for one line of a record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineMeaning {
    /// Base interpretive text for this position.
    #[serde(default)]
    pub modern_base: Option<String>,
}

/// One pre-authored meaning record, keyed by resolved identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticRecord {
    /// Present-day reading of the core situation.
    #[serde(default)]
    pub modern_meaning: Option<String>,
    /// Central image woven into generated text.
    #[serde(default)]
    pub core_imagery: Option<String>,
    /// General guidance text.
    #[serde(default, alias = "advice")]
    pub guidance: Option<String>,
    /// Per-position line meanings, keyed 1..=6 in draw order.
    #[serde(default, alias = "dimensions")]
    pub lines: BTreeMap<u8, LineMeaning>,
}

impl SemanticRecord {
    /// Line meaning text for a 1-indexed position, if authored.
    pub fn line_text(&self, position: u8) -> Option<&str> {
        self.lines
            .get(&position)
            .and_then(|line| line.modern_base.as_deref())
    }
}

// ── Document ───────────────────────────────────────────────────────────

/// On-disk shape of the semantic data source: a core identifier→record map
/// plus an optional identifier→scene→guidance map.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SemanticDocument {
    #[serde(default)]
    pub core_library: HashMap<String, SemanticRecord>,
    #[serde(default)]
    pub scenes_library: HashMap<String, HashMap<String, String>>,
}

/// Loaded, immutable semantic library.
#[derive(Clone, Debug, Default)]
pub struct SemanticLibrary {
    core: HashMap<String, SemanticRecord>,
    scenes: HashMap<String, HashMap<String, String>>,
}

impl SemanticLibrary {
    pub fn from_document(document: SemanticDocument) -> Self {
        Self {
            core: document.core_library,
            scenes: document.scenes_library,
        }
    }

    /// Resolve a binary key to its record: alias first, then the library.
    /// Absent keys are `None`, not errors.
    pub fn resolve(&self, binary_key: &str) -> Option<&SemanticRecord> {
        self.core.get(resolve_alias(binary_key))
    }

    /// Scene-specific guidance for a key, when authored.
    pub fn scene_guidance(&self, binary_key: &str, scene: &str) -> Option<&str> {
        self.scenes
            .get(resolve_alias(binary_key))
            .and_then(|scenes| scenes.get(scene))
            .map(String::as_str)
    }

    /// Whether a scenes entry exists for a key. An empty entry still
    /// counts; per-scene misses fall back to default guidance downstream.
    pub fn has_scenes(&self, binary_key: &str) -> bool {
        self.scenes.contains_key(resolve_alias(binary_key))
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }
}
