//! # zentap-core
//!
//! Deterministic reading pipeline: ambient entropy is folded into a
//! three-part seed, seeds are expanded into six divination lines, and the
//! resulting hexagrams are encoded as six-bit binary keys for semantic
//! lookup.
//!
//! The pipeline is deliberately deterministic: the same time window,
//! context string, and installation id always produce the same reading.
//! Ambient inputs are injected through the `Clock`, `ContextSource`, and
//! `IdentityStore` traits so the whole path can be pinned down in tests.

#![deny(unsafe_code)]

pub mod entropy;
pub mod error;
pub mod hexagram;
pub mod line;
pub mod reading;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use entropy::{
    context_hash, derive_seeds, generate_installation_id, Clock, ContextSource, EnvironmentContext,
    FileIdentityStore, FixedContext, IdentityStore, MemoryIdentityStore, SeedTriple, SystemClock,
    SEED_WINDOW_MILLIS,
};
pub use error::{CoreError, CoreResult};
pub use hexagram::{BinaryKey, Hexagram};
pub use line::{next_line, LineValue};
pub use reading::{Reading, ReadingEngine};
