//! Prompt composition.
//!
//! The reading prompt interpolates two resolved semantic records (original
//! and derived hexagram) plus per-line change annotations into a fixed
//! template that instructs the downstream generator to produce a bounded,
//! jargon-free reflective message. A scene-flavored variant is used when a
//! scene is requested and scene guidance exists for the original key.

use zentap_core::Reading;
use zentap_semantics::{SemanticLibrary, SemanticRecord};

const DEFAULT_MAIN_MEANING: &str = "Energy is gathering and taking form";
const DEFAULT_TREND_MEANING: &str = "An opening for change and movement is emerging";
const DEFAULT_SCENE_MEANING: &str = "Energy is gathering";
const DEFAULT_SCENE_TREND: &str = "Change is underway";
const DEFAULT_SCENE_GUIDANCE: &str = "particular guidance for the current phase";
const DEFAULT_LINE_NOTE: &str = "a significant shift of energy";

/// The neutral scene name that always selects the base template.
const BASE_SCENE: &str = "base";

/// Build the prompt for one interactive reading.
pub fn compose_reading_prompt(
    library: &SemanticLibrary,
    reading: &Reading,
    scene: Option<&str>,
) -> String {
    let original = library.resolve(reading.original_key.as_str());
    let derived = library.resolve(reading.derived_key.as_str());
    let notes = changing_line_notes(&reading.changing, original);

    match scene {
        Some(scene)
            if scene != BASE_SCENE && library.has_scenes(reading.original_key.as_str()) =>
        {
            let guidance = library
                .scene_guidance(reading.original_key.as_str(), scene)
                .unwrap_or(DEFAULT_SCENE_GUIDANCE);
            scene_prompt(scene, guidance, original, derived, &notes)
        }
        _ => base_prompt(original, derived, &notes),
    }
}

fn base_prompt(
    original: Option<&SemanticRecord>,
    derived: Option<&SemanticRecord>,
    notes: &[String],
) -> String {
    let main_meaning = field(original, |r| r.modern_meaning.as_deref(), DEFAULT_MAIN_MEANING);
    let trend_meaning = field(derived, |r| r.modern_meaning.as_deref(), DEFAULT_TREND_MEANING);
    let main_imagery = field(original, |r| r.core_imagery.as_deref(), "");
    let trend_imagery = field(derived, |r| r.core_imagery.as_deref(), "");

    let signals = if notes.is_empty() {
        "- The current cycle of energy is relatively settled".to_string()
    } else {
        format!("- Key change signals:\n{}", notes.join("\n"))
    };

    format!(
        "You are a sage attuned to the rhythms of all things. From the \
holographic scan results below, compose a unique inner reflection for the \
reader standing at this point in time.\n\
\n\
[Holographic scan results]\n\
- Core situation: {main_meaning}\n\
- Unfolding trend: {trend_meaning}\n\
{signals}\n\
\n\
Weave these results together into a consoling, wisdom-filled message that \
speaks directly to the reader.\n\
\n\
Suggested structure:\n\
1. First, describe the core feeling or situation the reader may be living \
through (from the core situation).\n\
2. Then reveal the opening for change hidden in that situation and the \
direction it points to (from the unfolding trend and the change signals).\n\
3. Close with encouragement and a forward-looking view.\n\
\n\
Requirements:\n\
- Calm, graceful, deep language in direct dialogue with the reader's heart.\n\
- Completely avoid divination terms such as \"hexagram\", \"changing \
line\", or \"I Ching\"; fold their wisdom silently into the narrative.\n\
- Blend the core imagery of \"{main_imagery}\" and \"{trend_imagery}\" \
naturally into the content.\n\
- Between 150 and 250 words, with enough depth to feel complete."
    )
}

fn scene_prompt(
    scene: &str,
    guidance: &str,
    original: Option<&SemanticRecord>,
    derived: Option<&SemanticRecord>,
    notes: &[String],
) -> String {
    let main_meaning = field(original, |r| r.modern_meaning.as_deref(), DEFAULT_SCENE_MEANING);
    let trend_meaning = field(derived, |r| r.modern_meaning.as_deref(), DEFAULT_SCENE_TREND);

    let signals = if notes.is_empty() {
        String::new()
    } else {
        format!("\n- Key changes:\n{}", notes.join("\n"))
    };

    format!(
        "You are a sage attuned to the rhythms of all things. From the \
holographic scan results below, compose a reflection for the reader \
focused on the area of {scene}.\n\
\n\
[Holographic scan results]\n\
- Core situation: {main_meaning}\n\
- Area focus: {guidance}\n\
- Unfolding trend: {trend_meaning}{signals}\n\
\n\
Blend this information together: first describe the present state of the \
reader's {scene}, then reveal the opening for change, and finish with \
concrete guidance.\n\
Completely avoid divination terms; keep the language graceful and practical."
    )
}

/// Annotations for changing positions: 1-indexed, with the line-specific
/// text when authored and a generic phrase otherwise.
fn changing_line_notes(changing: &[bool; 6], original: Option<&SemanticRecord>) -> Vec<String> {
    changing
        .iter()
        .enumerate()
        .filter(|(_, flag)| **flag)
        .map(|(index, _)| {
            let position = (index + 1) as u8;
            let text = original
                .and_then(|record| record.line_text(position))
                .unwrap_or(DEFAULT_LINE_NOTE);
            format!("  · Dimension {}: {}", position, text)
        })
        .collect()
}

fn field<'a>(
    record: Option<&'a SemanticRecord>,
    pick: impl Fn(&'a SemanticRecord) -> Option<&'a str>,
    default: &'a str,
) -> &'a str {
    record.and_then(pick).unwrap_or(default)
}

// ── Batch Prompt ───────────────────────────────────────────────────────

/// Compact prompt used by the offline batch generator.
pub fn compose_batch_prompt(
    main_summary: &str,
    trend_summary: &str,
    change_summary: &str,
) -> String {
    format!(
        "You are a modern counselor known for clear insight and gentle \
expression.\n\
From the information below, compose a short reflective note for the reader \
(structure: present → trend → caution → closing).\n\
Core situation: {main_summary}\n\
Trend: {trend_summary}\n\
Change signal: {change_summary}\n\
Requirements: modern, calm language; avoid terms such as \"dimension\" or \
\"frequency\"; a body of roughly 140-180 words; end with one gentle \
reminder of at most ten words."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use zentap_core::{Hexagram, LineValue};
    use zentap_semantics::{LineMeaning, SemanticDocument};

    fn hexagram(values: [u8; 6]) -> Hexagram {
        let mut lines = [LineValue::OldYin; 6];
        for (slot, value) in lines.iter_mut().zip(values.iter()) {
            *slot = LineValue::try_from(*value).expect("valid line value");
        }
        Hexagram::new(lines)
    }

    fn reading(values: [u8; 6]) -> Reading {
        let original = hexagram(values);
        let derived = original.derive_changed();
        Reading {
            changing: original.changing_flags(),
            original_key: original.binary_key(),
            derived_key: derived.binary_key(),
            original,
            derived,
        }
    }

    fn library_with(key: &str, meaning: &str, line1: Option<&str>) -> SemanticLibrary {
        let mut record = zentap_semantics::SemanticRecord {
            modern_meaning: Some(meaning.to_string()),
            core_imagery: Some("water finding its level".to_string()),
            ..Default::default()
        };
        if let Some(text) = line1 {
            record.lines.insert(
                1,
                LineMeaning {
                    modern_base: Some(text.to_string()),
                },
            );
        }
        let mut document = SemanticDocument::default();
        document.core_library.insert(key.to_string(), record);
        document.scenes_library.insert(
            key.to_string(),
            HashMap::from([("career".to_string(), "a steady climb".to_string())]),
        );
        SemanticLibrary::from_document(document)
    }

    #[test]
    fn base_prompt_carries_both_meanings() {
        let reading = reading([7, 8, 7, 8, 7, 8]);
        let library = library_with(reading.original_key.as_str(), "holding steady", None);
        let prompt = compose_reading_prompt(&library, &reading, None);
        assert!(prompt.contains("holding steady"));
        // Derived key misses the library: default trend phrase.
        assert!(prompt.contains(DEFAULT_TREND_MEANING) || prompt.contains("holding steady"));
        assert!(prompt.contains("relatively settled"));
        assert!(prompt.contains("150 and 250 words"));
    }

    #[test]
    fn changing_lines_are_annotated_one_indexed() {
        let reading = reading([9, 8, 7, 6, 9, 8]);
        let library = library_with(
            reading.original_key.as_str(),
            "alternation",
            Some("roots before branches"),
        );
        let prompt = compose_reading_prompt(&library, &reading, None);
        assert!(prompt.contains("Dimension 1: roots before branches"));
        // Positions 4 and 5 change but carry no authored text.
        assert!(prompt.contains(&format!("Dimension 4: {}", DEFAULT_LINE_NOTE)));
        assert!(prompt.contains(&format!("Dimension 5: {}", DEFAULT_LINE_NOTE)));
        assert!(!prompt.contains("Dimension 2:"));
    }

    #[test]
    fn missing_records_fall_back_to_defaults() {
        let reading = reading([7, 7, 7, 8, 8, 8]);
        let library = SemanticLibrary::from_document(SemanticDocument::default());
        let prompt = compose_reading_prompt(&library, &reading, None);
        assert!(prompt.contains(DEFAULT_MAIN_MEANING));
        assert!(prompt.contains(DEFAULT_TREND_MEANING));
    }

    #[test]
    fn scene_variant_used_when_guidance_exists() {
        let reading = reading([7, 8, 7, 8, 7, 8]);
        let library = library_with(reading.original_key.as_str(), "holding steady", None);
        let prompt = compose_reading_prompt(&library, &reading, Some("career"));
        assert!(prompt.contains("the area of career"));
        assert!(prompt.contains("a steady climb"));
    }

    #[test]
    fn empty_scenes_entry_uses_scene_template_with_default_guidance() {
        let reading = reading([7, 8, 7, 8, 7, 8]);
        let mut document = SemanticDocument::default();
        document.core_library.insert(
            reading.original_key.as_str().to_string(),
            zentap_semantics::SemanticRecord {
                modern_meaning: Some("holding steady".to_string()),
                ..Default::default()
            },
        );
        document
            .scenes_library
            .insert(reading.original_key.as_str().to_string(), HashMap::new());
        let library = SemanticLibrary::from_document(document);

        let prompt = compose_reading_prompt(&library, &reading, Some("career"));
        assert!(prompt.contains("the area of career"));
        assert!(prompt.contains(DEFAULT_SCENE_GUIDANCE));
    }

    #[test]
    fn base_scene_and_unknown_keys_use_base_template() {
        let reading = reading([7, 8, 7, 8, 7, 8]);
        let library = library_with(reading.original_key.as_str(), "holding steady", None);
        let base = compose_reading_prompt(&library, &reading, Some("base"));
        assert!(base.contains("Suggested structure"));

        // No scene entry for this key at all: base template.
        let bare = SemanticLibrary::from_document(SemanticDocument::default());
        let fallback = compose_reading_prompt(&bare, &reading, Some("career"));
        assert!(fallback.contains("Suggested structure"));
    }

    #[test]
    fn batch_prompt_embeds_summaries() {
        let prompt = compose_batch_prompt("quiet gathering", "slow expansion", "a marked turn");
        assert!(prompt.contains("Core situation: quiet gathering"));
        assert!(prompt.contains("Trend: slow expansion"));
        assert!(prompt.contains("Change signal: a marked turn"));
        assert!(prompt.contains("140-180"));
    }
}
