//! # zentap-prompt
//!
//! Builds the natural-language prompts handed to the generation API: the
//! interactive reading prompt (base and scene-flavored variants) and the
//! compact batch prompt. Pure string building, no I/O, no failure modes;
//! missing semantic fields degrade to default phrases.

#![deny(unsafe_code)]

pub mod composer;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use composer::{compose_batch_prompt, compose_reading_prompt};
