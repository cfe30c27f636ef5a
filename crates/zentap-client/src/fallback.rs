//! Canned degradation text for the interactive path.
//!
//! When the upstream generator is unreachable the reading flow must still
//! complete with something worth reading, never crash.

const OFFLINE_REFLECTION: &str = "\
The field is still settling.

The energy of this moment is in motion, and a deeper interpretation is out \
of reach right now. Let that be its own message: sometimes silence is the \
clearest guidance.

In a phase that asks for patience, you might:
- listen to your own inner voice,
- notice the small signs around you,
- trust the natural rhythm of things.

Real wisdom often shows itself in stillness.";

/// The canned reflective message used when generation fails.
pub fn offline_reflection() -> &'static str {
    OFFLINE_REFLECTION
}
