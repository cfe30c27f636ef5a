//! Entropy aggregation: folds weak ambient sources into a seed triple.
//!
//! Three independent components feed one reading:
//! - `heaven`: a coarse time bucket that ticks once per 60-second window,
//! - `earth`: a rolling hash of the caller's context string,
//! - `human`: a rolling hash of a per-installation identifier persisted
//!   for the lifetime of the client.
//!
//! The hash is the classic multiply-by-31 rolling hash expressed as
//! `(h << 5) - h + code`, truncated to 32-bit signed at every step, and it
//! runs over UTF-16 code units so keys derived from legacy data keep their
//! historical values.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Width of the `heaven` time bucket in milliseconds.
pub const SEED_WINDOW_MILLIS: i64 = 60_000;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ── Seed Triple ────────────────────────────────────────────────────────

/// The three seed components backing one reading.
///
/// Identical `(time bucket, context, installation id)` inputs always yield
/// an identical triple; the determinism is load-bearing, not incidental.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTriple {
    /// Coarse time bucket (`now_millis / 60_000`).
    pub heaven: i64,
    /// Rolling hash of the context string.
    pub earth: i32,
    /// Rolling hash of the installation identifier.
    pub human: i32,
}

/// Rolling 32-bit hash over the UTF-16 code units of `input`.
pub fn context_hash(input: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    hash
}

/// Derive the seed triple for one draw.
pub fn derive_seeds(context: &str, installation_id: &str, now_millis: i64) -> SeedTriple {
    SeedTriple {
        heaven: now_millis.div_euclid(SEED_WINDOW_MILLIS),
        earth: context_hash(context),
        human: context_hash(installation_id),
    }
}

// ── Collaborator Traits ────────────────────────────────────────────────

/// Source of the current wall-clock time in milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// System wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Source of the ambient context string (the browser analogue combined
/// URL and user agent; any stable environment descriptor works).
pub trait ContextSource: Send + Sync {
    fn context_string(&self) -> String;
}

/// Fixed context string.
#[derive(Debug, Clone)]
pub struct FixedContext {
    value: String,
}

impl FixedContext {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ContextSource for FixedContext {
    fn context_string(&self) -> String {
        self.value.clone()
    }
}

/// Context derived from the host environment: platform name plus hostname
/// when the environment exposes one. Stable for the lifetime of a machine,
/// which is the property the seed needs.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentContext;

impl ContextSource for EnvironmentContext {
    fn context_string(&self) -> String {
        let host = std::env::var("HOSTNAME").unwrap_or_default();
        format!("{}/{}/{}", std::env::consts::OS, std::env::consts::ARCH, host)
    }
}

/// Get-or-create store for the persisted installation identifier.
pub trait IdentityStore: Send + Sync {
    /// Return the stored identifier, creating and persisting one on first
    /// use.
    fn get_or_create(&self) -> CoreResult<String>;
}

/// Generate a fresh installation identifier: the current milliseconds in
/// base 36 followed by five random base-36 characters.
pub fn generate_installation_id(now_millis: i64) -> String {
    let mut rng = rand::thread_rng();
    let mut id = to_base36(now_millis.max(0) as u64);
    for _ in 0..5 {
        let idx = rng.gen_range(0..BASE36_ALPHABET.len());
        id.push(BASE36_ALPHABET[idx] as char);
    }
    id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

// ── Identity Stores ────────────────────────────────────────────────────

/// File-backed identity store. The identifier lives in a small text file
/// and survives across sessions.
#[derive(Debug)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IdentityStore for FileIdentityStore {
    fn get_or_create(&self) -> CoreResult<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(existing) => {
                let trimmed = existing.trim();
                if !trimmed.is_empty() {
                    return Ok(trimmed.to_string());
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        let id = generate_installation_id(SystemClock.now_millis());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, &id)?;
        tracing::debug!(path = %self.path.display(), "created installation id");
        Ok(id)
    }
}

/// In-memory identity store. Creates one identifier per process; fixture
/// construction pins it for deterministic tests.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    id: Mutex<Option<String>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a caller-chosen identifier.
    pub fn fixed(id: impl Into<String>) -> Self {
        Self {
            id: Mutex::new(Some(id.into())),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get_or_create(&self) -> CoreResult<String> {
        let mut guard = self.id.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(existing) = guard.as_ref() {
            return Ok(existing.clone());
        }
        let id = generate_installation_id(SystemClock.now_millis());
        *guard = Some(id.clone());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_for_known_inputs() {
        // h_n = 31 * h_{n-1} + code, truncated to i32.
        assert_eq!(context_hash(""), 0);
        assert_eq!(context_hash("a"), 97);
        assert_eq!(context_hash("ab"), 31 * 97 + 98);
        assert_eq!(context_hash("zen-tap"), context_hash("zen-tap"));
    }

    #[test]
    fn hash_wraps_instead_of_overflowing() {
        let long: String = "entropy".repeat(512);
        // Must not panic in debug builds; value itself is arbitrary.
        let _ = context_hash(&long);
    }

    #[test]
    fn hash_uses_utf16_units() {
        // '𝄞' is a surrogate pair in UTF-16: two units, not one char.
        let h = context_hash("𝄞");
        let expected = {
            let units: Vec<u16> = "𝄞".encode_utf16().collect();
            let mut acc: i32 = 0;
            for u in units {
                acc = acc.wrapping_mul(31).wrapping_add(u as i32);
            }
            acc
        };
        assert_eq!(h, expected);
    }

    #[test]
    fn seeds_are_deterministic_within_a_window() {
        let a = derive_seeds("ctx", "user-1", 120_000);
        let b = derive_seeds("ctx", "user-1", 179_999);
        let c = derive_seeds("ctx", "user-1", 180_000);
        assert_eq!(a, b);
        assert_ne!(a.heaven, c.heaven);
        assert_eq!(a.earth, c.earth);
        assert_eq!(a.human, c.human);
    }

    #[test]
    fn environment_context_is_stable_within_a_process() {
        let source = EnvironmentContext;
        assert_eq!(source.context_string(), source.context_string());
        assert!(!source.context_string().is_empty());
    }

    #[test]
    fn generated_id_is_base36() {
        let id = generate_installation_id(1_700_000_000_000);
        assert!(id.len() > 5);
        assert!(id.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn file_store_persists_one_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileIdentityStore::new(dir.path().join("installation-id"));
        let first = store.get_or_create().expect("create id");
        let second = store.get_or_create().expect("read id");
        assert_eq!(first, second);
    }

    #[test]
    fn memory_store_fixed_id_round_trips() {
        let store = MemoryIdentityStore::fixed("k2abc12345");
        assert_eq!(store.get_or_create().expect("fixed id"), "k2abc12345");
    }
}
