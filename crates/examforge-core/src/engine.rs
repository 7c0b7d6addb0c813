//! The bounded selection search and the assessment assembler.
//!
//! Per chapter, candidates are drawn by the stratified sampler and scored
//! against the unified rule set; the lowest-violation candidate wins if no
//! perfect one appears within the attempt budget. Constraint violation is
//! reported in diagnostics, never escalated to an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::GenerateError;
use crate::model::{ChapterConfig, Question, QuestionBank, QuestionType, Syllabus};
use crate::report::{Assessment, AssessmentMetadata, ChapterSummary};
use crate::results::{ChapterSelection, FormativeCounts, FormativeQuiz, SelectionDiagnostics};
use crate::rules::{unified_rule_set, Rule, SelectionContext};
use crate::sampler::stratified_sample;
use crate::statistics::{ChapterTallies, QuestionSetStats};

/// Configuration for the assessment generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Sampling attempts per chapter before settling for best-effort.
    pub max_attempts: u32,
    /// Seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Fixed creation time. `None` reads the clock; tests set this so that
    /// seeded runs serialize byte-identically.
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            seed: None,
            created_at: None,
        }
    }
}

/// Search for a chapter selection satisfying every rule.
///
/// If the pool is smaller than the configured count the entire pool is
/// returned immediately with a warning diagnostic and the search is skipped.
/// Otherwise candidates are sampled, sorted by bloom ordinal, and evaluated;
/// the first zero-violation candidate ends the search, and ties between
/// equally-violating candidates keep the earliest one found.
pub fn select_for_chapter<R: Rng + ?Sized>(
    pool: &[Question],
    chapter: &ChapterConfig,
    rules: &[Box<dyn Rule>],
    max_attempts: u32,
    rng: &mut R,
) -> ChapterSelection {
    if pool.len() < chapter.question_count {
        tracing::warn!(
            chapter = %chapter.chapter_id,
            available = pool.len(),
            requested = chapter.question_count,
            "insufficient questions, returning entire pool"
        );
        return ChapterSelection {
            questions: pool.to_vec(),
            diagnostics: SelectionDiagnostics {
                attempts_used: 0,
                violation_count: 0,
                warnings: vec![format!(
                    "insufficient questions: {} available, {} requested",
                    pool.len(),
                    chapter.question_count
                )],
            },
        };
    }

    let ctx = SelectionContext {
        chapter_id: &chapter.chapter_id,
        time_frame_hours: chapter.time_frame_hours,
    };

    let mut best: Option<(Vec<Question>, u32)> = None;

    for attempt in 1..=max_attempts {
        let mut candidate = stratified_sample(
            pool,
            chapter.question_count,
            &chapter.bloom_distribution,
            rng,
        );
        candidate.sort_by_key(|q| q.bloom);

        let violations = rules
            .iter()
            .filter(|rule| !rule.evaluate(&candidate, &ctx).passed)
            .count() as u32;

        if violations == 0 {
            tracing::debug!(chapter = %chapter.chapter_id, attempt, "zero-violation selection found");
            return ChapterSelection {
                questions: candidate,
                diagnostics: SelectionDiagnostics {
                    attempts_used: attempt,
                    violation_count: 0,
                    warnings: Vec::new(),
                },
            };
        }

        if best
            .as_ref()
            .map_or(true, |(_, fewest)| violations < *fewest)
        {
            best = Some((candidate, violations));
        }
    }

    let (questions, violation_count) = best.unwrap_or_default();
    tracing::debug!(
        chapter = %chapter.chapter_id,
        violation_count,
        "attempt budget exhausted, keeping best-effort selection"
    );
    ChapterSelection {
        questions,
        diagnostics: SelectionDiagnostics {
            attempts_used: max_attempts,
            violation_count,
            warnings: Vec::new(),
        },
    }
}

/// Drives the per-chapter search and merges the results into one assessment.
pub struct AssessmentGenerator {
    syllabus: Syllabus,
    config: GeneratorConfig,
    rng: StdRng,
}

impl AssessmentGenerator {
    pub fn new(syllabus: Syllabus) -> Self {
        Self::with_config(syllabus, GeneratorConfig::default())
    }

    pub fn with_config(syllabus: Syllabus, config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            syllabus,
            config,
            rng,
        }
    }

    pub fn syllabus(&self) -> &Syllabus {
        &self.syllabus
    }

    /// Generate the unified summative assessment.
    ///
    /// Chapters are processed in declared syllabus order; chapters with an
    /// empty pool are skipped and do not appear in the breakdown. The merged
    /// question list is globally sorted ascending by bloom ordinal.
    pub fn generate(&mut self, bank: &QuestionBank) -> Result<Assessment, GenerateError> {
        if self.syllabus.chapters.is_empty() {
            return Err(GenerateError::EmptySyllabus);
        }
        for chapter in &self.syllabus.chapters {
            if chapter.question_count == 0 {
                return Err(GenerateError::InvalidChapter {
                    chapter_id: chapter.chapter_id.clone(),
                    reason: "question_count must be at least 1".into(),
                });
            }
        }

        let rules = unified_rule_set(self.syllabus.timeframe_hours);
        let mut all_questions: Vec<Question> = Vec::new();
        let mut chapter_breakdown = BTreeMap::new();
        let mut total_marks = 0;

        for chapter in &self.syllabus.chapters {
            let pool = bank.pool(&chapter.chapter_id);
            if pool.is_empty() {
                tracing::debug!(chapter = %chapter.chapter_id, "empty pool, skipping chapter");
                continue;
            }

            let selection = select_for_chapter(
                pool,
                chapter,
                &rules,
                self.config.max_attempts,
                &mut self.rng,
            );
            if selection.questions.is_empty() {
                continue;
            }

            total_marks += selection.questions.len();
            chapter_breakdown.insert(
                chapter.chapter_id.clone(),
                ChapterSummary {
                    count: selection.questions.len(),
                    statistics: ChapterTallies::compute(&selection.questions),
                    diagnostics: selection.diagnostics,
                },
            );
            all_questions.extend(selection.questions);
        }

        all_questions.sort_by_key(|q| q.bloom);

        let statistics = QuestionSetStats::compute(&all_questions);
        let created_at = self.config.created_at.unwrap_or_else(Utc::now);

        Ok(Assessment {
            metadata: AssessmentMetadata {
                id: format!(
                    "summative_assessment_{}",
                    created_at.format("%Y%m%d_%H%M%S%6f")
                ),
                title: self.syllabus.title.clone(),
                assessment_type: "Unified".to_string(),
                created_at,
                total_questions: all_questions.len(),
                total_marks,
                timeframe_hours: self.syllabus.timeframe_hours,
                estimated_duration_hours: self.syllabus.estimated_duration_hours,
                chapters_included: self
                    .syllabus
                    .chapters
                    .iter()
                    .map(|c| c.chapter_id.clone())
                    .collect(),
            },
            chapter_breakdown,
            questions: all_questions,
            statistics,
        })
    }

    /// Draw a per-chapter practice quiz: a fixed count per question type,
    /// uniformly at random, without rule checking.
    pub fn generate_formative(
        &mut self,
        chapter_id: &str,
        bank: &QuestionBank,
        counts: FormativeCounts,
    ) -> FormativeQuiz {
        let pool = bank.pool(chapter_id);
        let mut questions = Vec::new();

        for (kind, wanted) in [
            (QuestionType::Multiple, counts.multiple),
            (QuestionType::Fill, counts.fill),
            (QuestionType::TrueFalse, counts.true_false),
        ] {
            let mut of_kind: Vec<&Question> = pool.iter().filter(|q| q.kind == kind).collect();
            of_kind.shuffle(&mut self.rng);
            questions.extend(of_kind.into_iter().take(wanted).cloned());
        }

        FormativeQuiz {
            chapter_id: chapter_id.to_string(),
            title: format!("Formative Quiz: {chapter_id}"),
            questions,
        }
    }
}
