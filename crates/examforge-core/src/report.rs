//! Assessment document types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::GenerateError;
use crate::model::Question;
use crate::results::SelectionDiagnostics;
use crate::statistics::{ChapterTallies, QuestionSetStats};

/// The assembled unified assessment. Immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub metadata: AssessmentMetadata,
    /// Chapters that contributed questions, keyed by chapter id.
    pub chapter_breakdown: BTreeMap<String, ChapterSummary>,
    /// All selected questions, sorted ascending by bloom ordinal.
    pub questions: Vec<Question>,
    pub statistics: QuestionSetStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    /// Timestamped identifier, e.g. `summative_assessment_20260806_101530123456`.
    pub id: String,
    pub title: String,
    pub assessment_type: String,
    pub created_at: DateTime<Utc>,
    pub total_questions: usize,
    /// One mark per question.
    pub total_marks: usize,
    pub timeframe_hours: u32,
    pub estimated_duration_hours: f64,
    /// Every chapter the syllabus declares, including ones that contributed
    /// no questions.
    pub chapters_included: Vec<String>,
}

/// Per-chapter slice of the assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub count: usize,
    pub statistics: ChapterTallies,
    pub diagnostics: SelectionDiagnostics,
}

impl Assessment {
    /// Save the assessment as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize assessment")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write assessment to {}", path.display()))?;
        Ok(())
    }

    /// Load an assessment from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read assessment from {}", path.display()))?;
        let assessment: Assessment =
            serde_json::from_str(&content).context("failed to parse assessment JSON")?;
        Ok(assessment)
    }
}

/// The error-shaped document a transport layer returns when generation
/// aborts, mirroring the shape of a successful assessment's metadata.
pub fn error_document(error: &GenerateError, created_at: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "error": error.to_string(),
        "metadata": {
            "id": format!(
                "summative_assessment_error_{}",
                created_at.format("%Y%m%d_%H%M%S")
            ),
            "title": "Assessment Generation Error",
            "assessment_type": "Error",
            "created_at": created_at,
            "total_questions": 0,
        },
        "questions": [],
    })
}
