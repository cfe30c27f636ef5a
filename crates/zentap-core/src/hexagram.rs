//! Hexagrams and binary keys.

use serde::{Deserialize, Serialize};

use crate::line::LineValue;

/// Ordered sequence of six lines; position 0 is the innermost, first-drawn
/// line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hexagram {
    lines: [LineValue; 6],
}

impl Hexagram {
    pub fn new(lines: [LineValue; 6]) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[LineValue; 6] {
        &self.lines
    }

    /// Per-position mutability flags.
    pub fn changing_flags(&self) -> [bool; 6] {
        let mut flags = [false; 6];
        for (flag, line) in flags.iter_mut().zip(self.lines.iter()) {
            *flag = line.is_changing();
        }
        flags
    }

    /// Derived hexagram: changing lines settle (9→8, 6→7), stable lines
    /// pass through unchanged.
    pub fn derive_changed(&self) -> Hexagram {
        let mut changed = self.lines;
        for line in changed.iter_mut() {
            *line = line.changed();
        }
        Hexagram { lines: changed }
    }

    /// Six-bit lookup key, one bit per position in draw order.
    pub fn binary_key(&self) -> BinaryKey {
        BinaryKey(self.lines.iter().map(|line| line.bit()).collect())
    }
}

// ── Binary Key ─────────────────────────────────────────────────────────

/// Six-character key over {'0','1'} identifying a hexagram for lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinaryKey(String);

impl BinaryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BinaryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for BinaryKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
