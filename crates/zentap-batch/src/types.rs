//! Batch data model: combinations, output records, job summaries.

use serde::{Deserialize, Serialize};

/// Change level of one combination: how strongly the trend departs from
/// the main situation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeLevel {
    /// Stable.
    C0,
    /// Slight change.
    C1,
    /// Strong change.
    C2,
}

/// The fixed change levels of the combination space.
pub const CHANGE_LEVELS: [ChangeLevel; 3] = [ChangeLevel::C0, ChangeLevel::C1, ChangeLevel::C2];

impl ChangeLevel {
    /// Identifier-safe code used in combination ids.
    pub fn code(self) -> &'static str {
        match self {
            ChangeLevel::C0 => "C0",
            ChangeLevel::C1 => "C1",
            ChangeLevel::C2 => "C2",
        }
    }

    /// Fixed change summary interpolated into the batch prompt.
    pub fn summary(self) -> &'static str {
        match self {
            ChangeLevel::C0 => "steady overall",
            ChangeLevel::C1 => "slight shifts emerging",
            ChangeLevel::C2 => "a marked turn underway",
        }
    }
}

impl std::fmt::Display for ChangeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ── Combination ────────────────────────────────────────────────────────

/// One (main, trend, change) tuple of the enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combination {
    pub main: String,
    pub trend: String,
    pub change: ChangeLevel,
}

impl Combination {
    /// Composite id keying the persisted record.
    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.main, self.trend, self.change.code())
    }
}

// ── Output Record ──────────────────────────────────────────────────────

/// Input identifiers echoed into the persisted record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    pub main: String,
    pub trend: String,
    pub change: String,
}

impl From<&Combination> for RecordInput {
    fn from(combo: &Combination) -> Self {
        Self {
            main: combo.main.clone(),
            trend: combo.trend.clone(),
            change: combo.change.code().to_string(),
        }
    }
}

/// Resolved semantic summaries the prompt was built from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticSummaries {
    pub main_summary: String,
    pub trend_summary: String,
    pub change_summary: String,
}

/// Heuristically structured generation output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredOutput {
    pub status: String,
    pub trend: String,
    pub warning: String,
    pub closing: String,
}

/// One persisted batch record. Success records carry `output` and `raw`;
/// terminal failures carry `error` instead. Records are never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputRecord {
    pub id: String,
    pub input: RecordInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticSummaries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<StructuredOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
}

impl OutputRecord {
    pub fn success(
        combo: &Combination,
        semantic: SemanticSummaries,
        output: StructuredOutput,
        raw: String,
    ) -> Self {
        Self {
            id: combo.id(),
            input: combo.into(),
            semantic: Some(semantic),
            output: Some(output),
            raw: Some(raw),
            error: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn terminal_failure(combo: &Combination, error: String) -> Self {
        Self {
            id: combo.id(),
            input: combo.into(),
            semantic: None,
            output: None,
            raw: None,
            error: Some(error),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

// ── Job Summary ────────────────────────────────────────────────────────

/// Completion report of one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JobSummary {
    /// Records successfully generated in this run. Terminal failures are
    /// persisted but not counted here.
    pub generated: usize,
    /// Combinations skipped because their id was already persisted.
    pub skipped: usize,
    /// Total records in the persisted set after this run.
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo() -> Combination {
        Combination {
            main: "101010".into(),
            trend: "010101".into(),
            change: ChangeLevel::C1,
        }
    }

    #[test]
    fn combination_id_shape() {
        assert_eq!(combo().id(), "101010_010101_C1");
    }

    #[test]
    fn change_levels_have_distinct_summaries() {
        let summaries: Vec<&str> = CHANGE_LEVELS.iter().map(|c| c.summary()).collect();
        assert_eq!(summaries.len(), 3);
        assert_ne!(summaries[0], summaries[1]);
        assert_ne!(summaries[1], summaries[2]);
    }

    #[test]
    fn success_record_has_output_and_no_error() {
        let record = OutputRecord::success(
            &combo(),
            SemanticSummaries::default(),
            StructuredOutput::default(),
            "raw text".into(),
        );
        assert!(record.output.is_some());
        assert!(record.error.is_none());
        assert!(!record.is_failure());
    }

    #[test]
    fn failure_record_has_error_and_no_output() {
        let record = OutputRecord::terminal_failure(&combo(), "API error 503".into());
        assert!(record.output.is_none());
        assert!(record.raw.is_none());
        assert_eq!(record.error.as_deref(), Some("API error 503"));
        assert!(record.is_failure());
    }

    #[test]
    fn failure_record_serializes_without_output_field() {
        let record = OutputRecord::terminal_failure(&combo(), "down".into());
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"error\""));
        assert!(!json.contains("\"output\""));
    }

    #[test]
    fn record_round_trips() {
        let record = OutputRecord::success(
            &combo(),
            SemanticSummaries {
                main_summary: "m".into(),
                trend_summary: "t".into(),
                change_summary: "c".into(),
            },
            StructuredOutput {
                status: "s".into(),
                trend: "t".into(),
                warning: "w".into(),
                closing: "end well".into(),
            },
            "raw".into(),
        );
        let json = serde_json::to_string(&record).expect("serialize");
        let back: OutputRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.id, record.id);
        assert_eq!(back.output, record.output);
    }
}
