//! # zentap-client
//!
//! The generation API collaborator. The core only ever needs one thing
//! from the provider: the first completion's text for a prompt. Two
//! transports cover the deployment shapes: `ProviderClient` talks to a
//! chat-completion endpoint directly with bearer auth, `ProxyClient`
//! posts `{prompt}` to the thin serverless proxy. Both share the tolerant
//! response extraction; upstream failure surfaces as an error the caller
//! degrades from (the interactive path falls back to canned text).

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod response;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use client::{GenerationClient, ProviderClient, ProxyClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use fallback::offline_reflection;
pub use response::ChatCompletionResponse;
