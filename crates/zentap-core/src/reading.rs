//! Reading orchestration: seeds → six lines → both hexagrams and keys.

use std::sync::Arc;

use crate::entropy::{derive_seeds, Clock, ContextSource, IdentityStore};
use crate::error::CoreResult;
use crate::hexagram::{BinaryKey, Hexagram};
use crate::line::next_line;

/// One completed reading.
#[derive(Clone, Debug)]
pub struct Reading {
    /// Hexagram as drawn.
    pub original: Hexagram,
    /// Hexagram after changing lines settle.
    pub derived: Hexagram,
    /// Per-position mutability flags of the original hexagram.
    pub changing: [bool; 6],
    pub original_key: BinaryKey,
    pub derived_key: BinaryKey,
}

impl Reading {
    /// Whether any line changes between the two hexagrams.
    pub fn has_changes(&self) -> bool {
        self.changing.iter().any(|flag| *flag)
    }
}

// ── Reading Engine ─────────────────────────────────────────────────────

/// Draws readings from injected ambient collaborators.
///
/// The seed triple is re-derived for every one of the six draws. Within a
/// single reading the time bucket, context, and installation id do not
/// move, so all six draws see the same triple; the per-component salts are
/// the only thing distinguishing the coins. This is the intended
/// randomness profile, not an accident to be redistributed.
pub struct ReadingEngine {
    clock: Arc<dyn Clock>,
    context: Arc<dyn ContextSource>,
    identity: Arc<dyn IdentityStore>,
}

impl ReadingEngine {
    pub fn new(
        clock: Arc<dyn Clock>,
        context: Arc<dyn ContextSource>,
        identity: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            clock,
            context,
            identity,
        }
    }

    /// Draw one complete reading.
    pub fn draw(&self) -> CoreResult<Reading> {
        let installation_id = self.identity.get_or_create()?;

        let mut lines = [crate::line::LineValue::OldYin; 6];
        for slot in lines.iter_mut() {
            let seeds = derive_seeds(
                &self.context.context_string(),
                &installation_id,
                self.clock.now_millis(),
            );
            *slot = next_line(&seeds);
        }

        let original = Hexagram::new(lines);
        let derived = original.derive_changed();
        let reading = Reading {
            changing: original.changing_flags(),
            original_key: original.binary_key(),
            derived_key: derived.binary_key(),
            original,
            derived,
        };
        tracing::debug!(
            original = %reading.original_key,
            derived = %reading.derived_key,
            "reading drawn"
        );
        Ok(reading)
    }
}
