//! # zentap-batch
//!
//! Offline batch generation of the pre-written output table.
//!
//! The runner enumerates the full cross product of main identifier ×
//! trend identifier × change level, pushes the combinations through a
//! bounded worker pool, calls the generation API per combination with
//! bounded retry and linear backoff, and checkpoints the accumulated
//! result map to durable storage. Completed ids are skipped on re-run, so
//! an interrupted job resumes where it stopped and never duplicates
//! records. Exhausted retries persist a terminal failure record instead
//! of looping, which guarantees forward progress across the whole set
//! even under partial provider outages.

#![deny(unsafe_code)]

pub mod combos;
pub mod error;
pub mod runner;
pub mod split;
pub mod store;
pub mod types;
pub mod universe;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use combos::enumerate_combinations;
pub use error::{BatchError, BatchResult};
pub use runner::{BatchRunner, RunnerConfig};
pub use split::split_into_fields;
pub use store::{JsonFileStore, MemoryStore, OutputStore, ResultMap};
pub use types::{
    ChangeLevel, Combination, JobSummary, OutputRecord, RecordInput, SemanticSummaries,
    StructuredOutput, CHANGE_LEVELS,
};
pub use universe::{IdentifierUniverse, PublicSemanticEntry};
