//! Core data model types for examforge.
//!
//! These are the fundamental types that the entire examforge system uses
//! to represent questions, chapter configurations, and question banks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Bloom's taxonomy cognitive levels, ordered from easiest to hardest.
///
/// The derived `Ord` follows the taxonomy order, so sorting questions by
/// level yields an easy-to-hard progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BloomLevel {
    Knowledge,
    Comprehension,
    Application,
    Analysis,
    Synthesis,
    Evaluation,
}

impl BloomLevel {
    /// All levels in taxonomy order.
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Knowledge,
        BloomLevel::Comprehension,
        BloomLevel::Application,
        BloomLevel::Analysis,
        BloomLevel::Synthesis,
        BloomLevel::Evaluation,
    ];

    /// Position in the taxonomy (0 = Knowledge, 5 = Evaluation).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Time-weighting multiplier applied to a question's base time.
    pub fn time_multiplier(self) -> f64 {
        match self {
            BloomLevel::Knowledge => 1.0,
            BloomLevel::Comprehension => 1.2,
            BloomLevel::Application => 1.5,
            BloomLevel::Analysis => 2.0,
            BloomLevel::Synthesis => 2.5,
            BloomLevel::Evaluation => 3.0,
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BloomLevel::Knowledge => "Knowledge",
            BloomLevel::Comprehension => "Comprehension",
            BloomLevel::Application => "Application",
            BloomLevel::Analysis => "Analysis",
            BloomLevel::Synthesis => "Synthesis",
            BloomLevel::Evaluation => "Evaluation",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BloomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Knowledge" => Ok(BloomLevel::Knowledge),
            "Comprehension" => Ok(BloomLevel::Comprehension),
            "Application" => Ok(BloomLevel::Application),
            "Analysis" => Ok(BloomLevel::Analysis),
            "Synthesis" => Ok(BloomLevel::Synthesis),
            "Evaluation" => Ok(BloomLevel::Evaluation),
            other => Err(format!("unknown bloom level: {other}")),
        }
    }
}

/// Question formats supported by the bank files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Multiple,
    Fill,
    TrueFalse,
}

impl QuestionType {
    /// Base completion time in minutes, before the bloom multiplier.
    pub fn base_minutes(self) -> f64 {
        match self {
            QuestionType::Multiple => 2.0,
            QuestionType::Fill => 2.5,
            QuestionType::TrueFalse => 1.0,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Multiple => write!(f, "multiple"),
            QuestionType::Fill => write!(f, "fill"),
            QuestionType::TrueFalse => write!(f, "true-false"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple" => Ok(QuestionType::Multiple),
            "fill" => Ok(QuestionType::Fill),
            // Older bank files spell this without the hyphen.
            "true-false" | "truefalse" => Ok(QuestionType::TrueFalse),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single exam question. Immutable once loaded from the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The question text. Never empty after loading.
    #[serde(rename = "question")]
    pub text: String,
    /// Question format.
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Cognitive difficulty level.
    pub bloom: BloomLevel,
    /// The expected answer. Bank files mix strings and booleans here, so the
    /// value is carried verbatim.
    pub answer: serde_json::Value,
    /// Answer options for multiple-choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

/// Per-chapter selection targets for the summative assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterConfig {
    /// Chapter identifier, matching the bank file name.
    pub chapter_id: String,
    /// Target number of questions to select.
    pub question_count: usize,
    /// Study time frame allotted to this chapter.
    pub time_frame_hours: u32,
    /// Share of the overall exam attributed to this chapter.
    pub percentage_of_exam: f64,
    /// Target bloom-level ratios. Ratios are treated independently and need
    /// not sum to 1.0.
    pub bloom_distribution: BTreeMap<BloomLevel, f64>,
}

/// The full assessment configuration: chapters in declared order plus
/// assessment-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Syllabus {
    /// Assessment title.
    pub title: String,
    /// Overall time frame for the unified assessment.
    pub timeframe_hours: u32,
    /// Display value for the expected sitting duration.
    pub estimated_duration_hours: f64,
    /// Chapters in the order they are assembled.
    pub chapters: Vec<ChapterConfig>,
}

impl Default for Syllabus {
    /// The built-in three-chapter syllabus.
    fn default() -> Self {
        fn distribution(ratios: [f64; 6]) -> BTreeMap<BloomLevel, f64> {
            BloomLevel::ALL.iter().copied().zip(ratios).collect()
        }

        Syllabus {
            title: "Comprehensive Summative Assessment".to_string(),
            timeframe_hours: 150,
            estimated_duration_hours: 2.5,
            chapters: vec![
                ChapterConfig {
                    chapter_id: "chapter1".to_string(),
                    question_count: 20,
                    time_frame_hours: 50,
                    percentage_of_exam: 25.25,
                    bloom_distribution: distribution([0.30, 0.25, 0.20, 0.15, 0.05, 0.05]),
                },
                ChapterConfig {
                    chapter_id: "chapter2".to_string(),
                    question_count: 18,
                    time_frame_hours: 50,
                    percentage_of_exam: 20.20,
                    bloom_distribution: distribution([0.35, 0.28, 0.18, 0.12, 0.04, 0.03]),
                },
                ChapterConfig {
                    chapter_id: "chapter3".to_string(),
                    question_count: 12,
                    time_frame_hours: 50,
                    percentage_of_exam: 15.15,
                    bloom_distribution: distribution([0.25, 0.20, 0.15, 0.25, 0.10, 0.05]),
                },
            ],
        }
    }
}

/// Read-only mapping from chapter id to that chapter's question pool.
///
/// Chapters whose source was missing or malformed map to an empty pool, so
/// lookups never distinguish "absent" from "empty".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    chapters: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chapter's pool, replacing any previous one.
    pub fn insert(&mut self, chapter_id: impl Into<String>, questions: Vec<Question>) {
        self.chapters.insert(chapter_id.into(), questions);
    }

    /// The pool for a chapter. Unknown chapters yield an empty pool.
    pub fn pool(&self, chapter_id: &str) -> &[Question] {
        self.chapters
            .get(chapter_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Chapter ids with a registered pool (possibly empty).
    pub fn chapter_ids(&self) -> impl Iterator<Item = &str> {
        self.chapters.keys().map(String::as_str)
    }

    /// Total number of questions across all chapters.
    pub fn total_questions(&self) -> usize {
        self.chapters.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<Question>)> for QuestionBank {
    fn from_iter<T: IntoIterator<Item = (String, Vec<Question>)>>(iter: T) -> Self {
        QuestionBank {
            chapters: iter.into_iter().collect(),
        }
    }
}
