//! Structured artifact payloads the assistant may emit instead of prose.
//!
//! The model is asked to reply with a small tagged JSON object when the
//! visitor requests chart-like material. Parsing is strictly best-effort:
//! anything that does not decode as a known artifact is treated as plain
//! prose by the caller, never as an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hint for the export collaborator. The server never renders these bytes
/// itself; the hint is passed through to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

/// One row of a table-over-time artifact (Gantt-style)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub task: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub group: String,
}

/// One entry of a labelled-steps artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// One point of a paired-numeric-samples artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The artifact body, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "artifact", rename_all = "snake_case")]
pub enum ArtifactData {
    Timeline { rows: Vec<TimelineRow> },
    Steps { steps: Vec<StepItem> },
    Samples { points: Vec<SamplePoint> },
}

/// A structured reply payload: the tagged body plus an export-format hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(flatten)]
    pub data: ArtifactData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportFormat>,
}

impl Artifact {
    /// Try to read an artifact out of raw model output.
    ///
    /// Accepts the bare JSON object or the same object wrapped in a
    /// Markdown code fence. Returns `None` on any mismatch, including a
    /// missing required key.
    pub fn parse(text: &str) -> Option<Self> {
        let candidate = strip_code_fence(text.trim());
        if !candidate.starts_with('{') {
            return None;
        }
        serde_json::from_str(candidate).ok()
    }
}

/// Remove a single surrounding ```/```json fence, if present
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeline() {
        let text = r#"{
            "artifact": "timeline",
            "rows": [
                {"task": "Research", "start": "2024-01-01", "finish": "2024-02-15", "group": "Planning"}
            ],
            "export": "xlsx"
        }"#;
        let artifact = Artifact::parse(text).expect("timeline should parse");
        assert_eq!(artifact.export, Some(ExportFormat::Xlsx));
        match artifact.data {
            ArtifactData::Timeline { rows } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].task, "Research");
            }
            other => panic!("unexpected artifact: {other:?}"),
        }
    }

    #[test]
    fn test_parse_samples_without_export_hint() {
        let text = r#"{"artifact": "samples", "points": [{"x": 0.2, "y": 0.8, "label": "Technical Failure"}]}"#;
        let artifact = Artifact::parse(text).unwrap();
        assert_eq!(artifact.export, None);
        match artifact.data {
            ArtifactData::Samples { points } => assert_eq!(points[0].y, 0.8),
            other => panic!("unexpected artifact: {other:?}"),
        }
    }

    #[test]
    fn test_parse_fenced_output() {
        let text = "```json\n{\"artifact\": \"steps\", \"steps\": [{\"label\": \"Design\"}]}\n```";
        assert!(Artifact::parse(text).is_some());
    }

    #[test]
    fn test_missing_required_key_is_none() {
        // "rows" absent: must fall back to prose, not raise
        let text = r#"{"artifact": "timeline", "export": "pdf"}"#;
        assert!(Artifact::parse(text).is_none());
    }

    #[test]
    fn test_prose_is_none() {
        assert!(Artifact::parse("I led several machine learning projects.").is_none());
        assert!(Artifact::parse("").is_none());
    }

    #[test]
    fn test_unknown_tag_is_none() {
        let text = r#"{"artifact": "hologram", "rows": []}"#;
        assert!(Artifact::parse(text).is_none());
    }
}
