//! Key obfuscation alias table.
//!
//! The eight canonical "pure" hexagrams (the same trigram doubled) are the
//! patterns most easily recognized by eyeballing shipped data, so they
//! hide behind opaque identifiers. Every other key passes through as its
//! own identifier.

/// Resolve a binary key to the identifier used in the semantic library.
pub fn resolve_alias(binary_key: &str) -> &str {
    match binary_key {
        "111111" => "ZT-A",
        "000000" => "ZT-B",
        "010010" => "ZT-C",
        "101101" => "ZT-D",
        "001001" => "ZT-E",
        "100100" => "ZT-F",
        "110110" => "ZT-G",
        "011011" => "ZT-H",
        other => other,
    }
}
