//! Distribution and duration statistics for question sets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{BloomLevel, Question, QuestionType};
use crate::rules::estimated_minutes;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregate statistics for any list of questions.
///
/// Percentages are `round(count / total * 100, 2)`; both maps are empty when
/// the set is empty. Duration uses the same weighted-sum formula as the
/// time-frame rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSetStats {
    pub bloom_distribution: BTreeMap<BloomLevel, u32>,
    pub bloom_percentage: BTreeMap<BloomLevel, f64>,
    pub type_distribution: BTreeMap<QuestionType, u32>,
    pub type_percentage: BTreeMap<QuestionType, f64>,
    pub total_questions: usize,
    pub estimated_duration_minutes: f64,
    pub estimated_duration_hours: f64,
}

impl QuestionSetStats {
    pub fn compute(questions: &[Question]) -> Self {
        let mut bloom_distribution: BTreeMap<BloomLevel, u32> = BTreeMap::new();
        let mut type_distribution: BTreeMap<QuestionType, u32> = BTreeMap::new();
        for q in questions {
            *bloom_distribution.entry(q.bloom).or_default() += 1;
            *type_distribution.entry(q.kind).or_default() += 1;
        }

        let total = questions.len();
        let percentage = |count: u32| round2(f64::from(count) / total as f64 * 100.0);

        let (bloom_percentage, type_percentage) = if total == 0 {
            (BTreeMap::new(), BTreeMap::new())
        } else {
            (
                bloom_distribution
                    .iter()
                    .map(|(&level, &count)| (level, percentage(count)))
                    .collect(),
                type_distribution
                    .iter()
                    .map(|(&kind, &count)| (kind, percentage(count)))
                    .collect(),
            )
        };

        let minutes = estimated_minutes(questions);

        QuestionSetStats {
            bloom_distribution,
            bloom_percentage,
            type_distribution,
            type_percentage,
            total_questions: total,
            estimated_duration_minutes: round2(minutes),
            estimated_duration_hours: round2(minutes / 60.0),
        }
    }
}

/// Chapter-local bloom/type tallies, without percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChapterTallies {
    pub bloom_distribution: BTreeMap<BloomLevel, u32>,
    pub type_distribution: BTreeMap<QuestionType, u32>,
}

impl ChapterTallies {
    pub fn compute(questions: &[Question]) -> Self {
        let mut tallies = ChapterTallies::default();
        for q in questions {
            *tallies.bloom_distribution.entry(q.bloom).or_default() += 1;
            *tallies.type_distribution.entry(q.kind).or_default() += 1;
        }
        tallies
    }
}
