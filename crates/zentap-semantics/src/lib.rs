//! # zentap-semantics
//!
//! Maps six-bit binary keys to pre-authored semantic records.
//!
//! Resolution is a two-step pipeline: the key first passes through a fixed
//! obfuscation alias table (canonical "pure" hexagrams hide behind opaque
//! identifiers so the key space cannot be read off the shipped data), then
//! the resolved identifier indexes the loaded library. Lookup misses are
//! `None`, never errors; callers degrade to placeholder text.
//!
//! The library document is fetched once per process through a
//! `SemanticSource` and cached. Concurrent first loads coalesce into a
//! single fetch; load failure is a hard error for every waiter.

#![deny(unsafe_code)]

pub mod alias;
pub mod cache;
pub mod error;
pub mod source;
pub mod types;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use alias::resolve_alias;
pub use cache::LibraryCache;
pub use error::{SemanticsError, SemanticsResult};
pub use source::{JsonFileSource, SemanticSource, StaticSource};
pub use types::{LineMeaning, SemanticDocument, SemanticLibrary, SemanticRecord};
