//! Question-bank and syllabus loading.
//!
//! Bank chapters are JSON arrays of question records; the syllabus is a TOML
//! file. Both loaders validate as they go: invalid question records are
//! dropped with a warning, an unreadable chapter file yields an empty pool,
//! and syllabus oddities surface as non-fatal validation warnings.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{BloomLevel, ChapterConfig, Question, QuestionBank, Syllabus};

// ---------------------------------------------------------------------------
// Question bank (JSON)
// ---------------------------------------------------------------------------

/// Raw bank record before validation. Every field is optional so that a
/// single malformed record cannot fail the whole chapter file.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    bloom: Option<String>,
    #[serde(default)]
    answer: Option<serde_json::Value>,
    #[serde(default)]
    choices: Option<Vec<String>>,
}

fn validate_record(raw: RawQuestion) -> Option<Question> {
    let text = raw.question?.trim().to_string();
    if text.is_empty() {
        return None;
    }
    let kind = raw.kind?.parse().ok()?;
    let bloom = raw.bloom?.parse().ok()?;
    let answer = raw.answer?;
    Some(Question {
        text,
        kind,
        bloom,
        answer,
        choices: raw.choices,
    })
}

/// Parse one chapter's JSON content, dropping invalid records.
pub fn parse_chapter_str(content: &str, source: &Path) -> Result<Vec<Question>> {
    let raw: Vec<RawQuestion> = serde_json::from_str(content)
        .with_context(|| format!("failed to parse bank file: {}", source.display()))?;

    let total = raw.len();
    let questions: Vec<Question> = raw.into_iter().filter_map(validate_record).collect();
    let dropped = total - questions.len();
    if dropped > 0 {
        tracing::warn!(
            source = %source.display(),
            dropped,
            kept = questions.len(),
            "dropped invalid question records"
        );
    }
    Ok(questions)
}

/// Load the question bank for the given chapters from `<dir>/<chapter_id>.json`.
///
/// A missing or malformed chapter file is logged and yields an empty pool
/// for that chapter; it never fails the whole load.
pub fn load_question_bank<'a>(
    dir: &Path,
    chapter_ids: impl IntoIterator<Item = &'a str>,
) -> QuestionBank {
    let mut bank = QuestionBank::new();
    for chapter_id in chapter_ids {
        let path = dir.join(format!("{chapter_id}.json"));
        let questions = match std::fs::read_to_string(&path) {
            Ok(content) => match parse_chapter_str(&content, &path) {
                Ok(questions) => questions,
                Err(e) => {
                    tracing::warn!(chapter = chapter_id, "skipping malformed bank file: {e:#}");
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!(chapter = chapter_id, path = %path.display(), "unreadable bank file: {e}");
                Vec::new()
            }
        };
        bank.insert(chapter_id, questions);
    }
    bank
}

// ---------------------------------------------------------------------------
// Syllabus (TOML)
// ---------------------------------------------------------------------------

/// Intermediate TOML structure for parsing syllabus files.
#[derive(Debug, Deserialize)]
struct TomlSyllabusFile {
    syllabus: TomlSyllabusHeader,
    #[serde(default)]
    chapters: Vec<TomlChapter>,
}

#[derive(Debug, Deserialize)]
struct TomlSyllabusHeader {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_timeframe")]
    timeframe_hours: u32,
    #[serde(default = "default_duration")]
    estimated_duration_hours: f64,
}

fn default_title() -> String {
    "Comprehensive Summative Assessment".to_string()
}

fn default_timeframe() -> u32 {
    150
}

fn default_duration() -> f64 {
    2.5
}

#[derive(Debug, Deserialize)]
struct TomlChapter {
    chapter_id: String,
    question_count: usize,
    time_frame_hours: u32,
    #[serde(default)]
    percentage_of_exam: f64,
    #[serde(default)]
    bloom_distribution: BTreeMap<String, f64>,
}

/// Parse a syllabus TOML file.
pub fn parse_syllabus(path: &Path) -> Result<Syllabus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read syllabus file: {}", path.display()))?;
    parse_syllabus_str(&content, path)
}

/// Parse a syllabus from a TOML string (useful for testing).
pub fn parse_syllabus_str(content: &str, source_path: &Path) -> Result<Syllabus> {
    let parsed: TomlSyllabusFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let chapters = parsed
        .chapters
        .into_iter()
        .map(|c| {
            let bloom_distribution = c
                .bloom_distribution
                .into_iter()
                .map(|(level, ratio)| {
                    let level: BloomLevel = level
                        .parse()
                        .map_err(|e: String| anyhow::anyhow!("chapter '{}': {e}", c.chapter_id))?;
                    Ok((level, ratio))
                })
                .collect::<Result<BTreeMap<_, _>>>()?;

            Ok(ChapterConfig {
                chapter_id: c.chapter_id,
                question_count: c.question_count,
                time_frame_hours: c.time_frame_hours,
                percentage_of_exam: c.percentage_of_exam,
                bloom_distribution,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Syllabus {
        title: parsed.syllabus.title,
        timeframe_hours: parsed.syllabus.timeframe_hours,
        estimated_duration_hours: parsed.syllabus.estimated_duration_hours,
        chapters,
    })
}

// ---------------------------------------------------------------------------
// Syllabus validation
// ---------------------------------------------------------------------------

/// A warning from syllabus validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The chapter id (if applicable).
    pub chapter_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a syllabus for common issues. All findings are non-fatal.
pub fn validate_syllabus(syllabus: &Syllabus) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if syllabus.chapters.is_empty() {
        warnings.push(ValidationWarning {
            chapter_id: None,
            message: "syllabus declares no chapters".into(),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for chapter in &syllabus.chapters {
        if !seen_ids.insert(&chapter.chapter_id) {
            warnings.push(ValidationWarning {
                chapter_id: Some(chapter.chapter_id.clone()),
                message: format!("duplicate chapter id: {}", chapter.chapter_id),
            });
        }
    }

    for chapter in &syllabus.chapters {
        if chapter.question_count == 0 {
            warnings.push(ValidationWarning {
                chapter_id: Some(chapter.chapter_id.clone()),
                message: "question_count is 0".into(),
            });
        }
        if chapter.time_frame_hours == 0 {
            warnings.push(ValidationWarning {
                chapter_id: Some(chapter.chapter_id.clone()),
                message: "time_frame_hours is 0".into(),
            });
        }
        for (level, &ratio) in &chapter.bloom_distribution {
            if !(0.0..=1.0).contains(&ratio) {
                warnings.push(ValidationWarning {
                    chapter_id: Some(chapter.chapter_id.clone()),
                    message: format!("bloom ratio for {level} is {ratio}, outside [0, 1]"),
                });
            }
        }
        let ratio_sum: f64 = chapter.bloom_distribution.values().sum();
        if !chapter.bloom_distribution.is_empty() && (ratio_sum - 1.0).abs() > 0.25 {
            warnings.push(ValidationWarning {
                chapter_id: Some(chapter.chapter_id.clone()),
                message: format!("bloom ratios sum to {ratio_sum:.2}, far from 1.0"),
            });
        }
    }

    warnings
}
