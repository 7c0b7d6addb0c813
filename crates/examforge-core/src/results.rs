//! Result types produced by the selection engine.

use serde::{Deserialize, Serialize};

use crate::model::Question;

/// How a chapter's selection search went. Attached to the chapter's result,
/// not to individual questions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionDiagnostics {
    /// Sampling attempts consumed before the search stopped.
    pub attempts_used: u32,
    /// Rules the returned candidate still violates (0 on success).
    pub violation_count: u32,
    /// Non-fatal conditions, e.g. an undersized pool.
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A chapter's selected questions plus search diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSelection {
    pub questions: Vec<Question>,
    pub diagnostics: SelectionDiagnostics,
}

/// Per-type draw counts for a formative quiz.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FormativeCounts {
    pub multiple: usize,
    pub fill: usize,
    pub true_false: usize,
}

impl Default for FormativeCounts {
    fn default() -> Self {
        FormativeCounts {
            multiple: 7,
            fill: 4,
            true_false: 4,
        }
    }
}

/// A per-chapter practice quiz drawn without rule checking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormativeQuiz {
    pub chapter_id: String,
    pub title: String,
    pub questions: Vec<Question>,
}
