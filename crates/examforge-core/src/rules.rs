//! Constraint rules evaluated against a candidate selection.
//!
//! Each rule is pure and deterministic: given the same selection and context
//! it always returns the same verdict. Rules never panic; an empty selection
//! is reported as a failure by every rule that requires questions to judge.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::model::{BloomLevel, Question};

/// Shared context handed to every rule evaluation.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// Chapter the selection was drawn for.
    pub chapter_id: &'a str,
    /// Study time frame of that chapter.
    pub time_frame_hours: u32,
}

/// Outcome of a single rule evaluation.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub passed: bool,
    pub message: String,
}

impl RuleOutcome {
    fn pass(message: impl Into<String>) -> Self {
        RuleOutcome {
            passed: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        RuleOutcome {
            passed: false,
            message: message.into(),
        }
    }
}

/// A pedagogical constraint on a candidate selection.
pub trait Rule {
    /// Human-readable rule name (e.g. "no-duplicate").
    fn name(&self) -> &'static str;

    /// Evaluate the selection. Must be pure and must not panic.
    fn evaluate(&self, selection: &[Question], ctx: &SelectionContext<'_>) -> RuleOutcome;
}

/// Estimated completion time in minutes for a set of questions.
///
/// Weighted sum of each question's base time by its bloom multiplier; the
/// same formula backs [`TimeFrameRule`] and the statistics calculator.
pub fn estimated_minutes(questions: &[Question]) -> f64 {
    questions
        .iter()
        .map(|q| q.kind.base_minutes() * q.bloom.time_multiplier())
        .sum()
}

/// Fails when any two questions share identical text.
#[derive(Debug, Default)]
pub struct NoDuplicateRule;

impl Rule for NoDuplicateRule {
    fn name(&self) -> &'static str {
        "no-duplicate"
    }

    fn evaluate(&self, selection: &[Question], _ctx: &SelectionContext<'_>) -> RuleOutcome {
        let unique: HashSet<&str> = selection.iter().map(|q| q.text.as_str()).collect();
        if unique.len() != selection.len() {
            return RuleOutcome::fail("duplicate questions found");
        }
        RuleOutcome::pass("no duplicates found")
    }
}

/// Fails when a single question type dominates the selection.
#[derive(Debug)]
pub struct QuestionTypeBalanceRule {
    /// Minimum share that must be left to other types; no single type may
    /// exceed `1 - min_variety` of the selection.
    pub min_variety: f64,
}

impl QuestionTypeBalanceRule {
    pub fn new(min_variety: f64) -> Self {
        Self { min_variety }
    }
}

impl Default for QuestionTypeBalanceRule {
    fn default() -> Self {
        Self { min_variety: 0.15 }
    }
}

impl Rule for QuestionTypeBalanceRule {
    fn name(&self) -> &'static str {
        "question-type-balance"
    }

    fn evaluate(&self, selection: &[Question], _ctx: &SelectionContext<'_>) -> RuleOutcome {
        if selection.is_empty() {
            return RuleOutcome::fail("no questions provided");
        }

        let mut type_counts: HashMap<_, usize> = HashMap::new();
        for q in selection {
            *type_counts.entry(q.kind).or_default() += 1;
        }

        let largest = type_counts.values().copied().max().unwrap_or(0);
        let max_ratio = largest as f64 / selection.len() as f64;

        if max_ratio > 1.0 - self.min_variety {
            return RuleOutcome::fail(format!(
                "question type imbalance: {:.1}% of single type",
                max_ratio * 100.0
            ));
        }
        RuleOutcome::pass("question type balance valid")
    }
}

/// Fails when the actual bloom-level shares stray from a target distribution
/// by more than the tolerance. The message lists every violating level.
#[derive(Debug)]
pub struct BloomDistributionRule {
    pub target: BTreeMap<BloomLevel, f64>,
    pub tolerance: f64,
}

impl BloomDistributionRule {
    pub fn new(target: BTreeMap<BloomLevel, f64>) -> Self {
        Self {
            target,
            tolerance: 0.12,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Rule for BloomDistributionRule {
    fn name(&self) -> &'static str {
        "bloom-distribution"
    }

    fn evaluate(&self, selection: &[Question], _ctx: &SelectionContext<'_>) -> RuleOutcome {
        if selection.is_empty() {
            return RuleOutcome::fail("no questions provided");
        }

        let mut counts: HashMap<BloomLevel, usize> = HashMap::new();
        for q in selection {
            *counts.entry(q.bloom).or_default() += 1;
        }

        let total = selection.len() as f64;
        let mut violations = Vec::new();
        for (&level, &target_ratio) in &self.target {
            let actual = counts.get(&level).copied().unwrap_or(0) as f64 / total;
            if (actual - target_ratio).abs() > self.tolerance {
                violations.push(format!(
                    "{level}: expected {:.1}%, got {:.1}%",
                    target_ratio * 100.0,
                    actual * 100.0
                ));
            }
        }

        if violations.is_empty() {
            RuleOutcome::pass("bloom distribution valid")
        } else {
            RuleOutcome::fail(format!(
                "bloom distribution mismatch: {}",
                violations.join("; ")
            ))
        }
    }
}

/// Fails when the estimated completion time exceeds the time budget scaled
/// by a safety margin.
#[derive(Debug)]
pub struct TimeFrameRule {
    pub hours: u32,
    pub margin: f64,
}

impl TimeFrameRule {
    pub fn new(hours: u32) -> Self {
        Self {
            hours,
            margin: 0.85,
        }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

impl Rule for TimeFrameRule {
    fn name(&self) -> &'static str {
        "time-frame"
    }

    fn evaluate(&self, selection: &[Question], _ctx: &SelectionContext<'_>) -> RuleOutcome {
        let estimate = estimated_minutes(selection);
        let max_allowed = f64::from(self.hours) * 60.0 * self.margin;

        if estimate > max_allowed {
            return RuleOutcome::fail(format!(
                "time estimate {estimate:.0}min exceeds {max_allowed:.0}min"
            ));
        }
        RuleOutcome::pass(format!("time estimate {estimate:.0}min within limit"))
    }
}

/// Fails unless the selection's difficulty generally increases: at least 60%
/// of adjacent pairs must be non-decreasing in bloom ordinal.
#[derive(Debug, Default)]
pub struct DifficultyProgressionRule;

impl Rule for DifficultyProgressionRule {
    fn name(&self) -> &'static str {
        "difficulty-progression"
    }

    fn evaluate(&self, selection: &[Question], _ctx: &SelectionContext<'_>) -> RuleOutcome {
        if selection.is_empty() {
            return RuleOutcome::fail("no questions provided");
        }
        if selection.len() == 1 {
            return RuleOutcome::pass("difficulty progression valid (100% non-decreasing)");
        }

        let non_decreasing = selection
            .windows(2)
            .filter(|pair| pair[0].bloom.ordinal() <= pair[1].bloom.ordinal())
            .count();
        let ratio = non_decreasing as f64 / (selection.len() - 1) as f64;

        if ratio >= 0.6 {
            RuleOutcome::pass(format!(
                "difficulty progression valid ({:.0}% non-decreasing)",
                ratio * 100.0
            ))
        } else {
            RuleOutcome::fail(format!(
                "insufficient difficulty progression ({:.0}%)",
                ratio * 100.0
            ))
        }
    }
}

/// The fixed rule set checked by the unified assessment search.
///
/// `BloomDistributionRule` is deliberately absent: the stratified sampler
/// already pulls candidates toward the target distribution, so the checked
/// constraints are the cross-cutting ones.
pub fn unified_rule_set(timeframe_hours: u32) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(NoDuplicateRule),
        Box::new(QuestionTypeBalanceRule::new(0.15)),
        Box::new(TimeFrameRule::new(timeframe_hours).with_margin(0.90)),
        Box::new(DifficultyProgressionRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;
    use std::collections::BTreeMap;

    fn question(text: &str, kind: QuestionType, bloom: BloomLevel) -> Question {
        Question {
            text: text.into(),
            kind,
            bloom,
            answer: serde_json::json!("a"),
            choices: None,
        }
    }

    fn ctx() -> SelectionContext<'static> {
        SelectionContext {
            chapter_id: "chapter1",
            time_frame_hours: 50,
        }
    }

    #[test]
    fn no_duplicate_detects_repeated_text() {
        let rule = NoDuplicateRule;
        let unique = vec![
            question("q1", QuestionType::Multiple, BloomLevel::Knowledge),
            question("q2", QuestionType::Fill, BloomLevel::Analysis),
        ];
        assert!(rule.evaluate(&unique, &ctx()).passed);

        let dupes = vec![
            question("q1", QuestionType::Multiple, BloomLevel::Knowledge),
            question("q1", QuestionType::Fill, BloomLevel::Analysis),
        ];
        let outcome = rule.evaluate(&dupes, &ctx());
        assert!(!outcome.passed);
        assert!(outcome.message.contains("duplicate"));
    }

    #[test]
    fn type_balance_rejects_single_type_dominance() {
        let rule = QuestionTypeBalanceRule::default();
        let all_multiple: Vec<_> = (0..5)
            .map(|i| {
                question(
                    &format!("q{i}"),
                    QuestionType::Multiple,
                    BloomLevel::Knowledge,
                )
            })
            .collect();
        let outcome = rule.evaluate(&all_multiple, &ctx());
        assert!(!outcome.passed);
        assert!(outcome.message.contains("100.0%"));
    }

    #[test]
    fn type_balance_accepts_mixed_types() {
        let rule = QuestionTypeBalanceRule::default();
        let mixed = vec![
            question("q1", QuestionType::Multiple, BloomLevel::Knowledge),
            question("q2", QuestionType::Multiple, BloomLevel::Knowledge),
            question("q3", QuestionType::Fill, BloomLevel::Knowledge),
            question("q4", QuestionType::TrueFalse, BloomLevel::Knowledge),
        ];
        assert!(rule.evaluate(&mixed, &ctx()).passed);
    }

    #[test]
    fn type_balance_fails_on_empty_selection() {
        let outcome = QuestionTypeBalanceRule::default().evaluate(&[], &ctx());
        assert!(!outcome.passed);
        assert!(outcome.message.contains("no questions"));
    }

    #[test]
    fn bloom_distribution_lists_every_violating_level() {
        let mut target = BTreeMap::new();
        target.insert(BloomLevel::Knowledge, 0.5);
        target.insert(BloomLevel::Evaluation, 0.5);
        let rule = BloomDistributionRule::new(target);

        // All Analysis: Knowledge is at 0%, Evaluation at 0%, both off by 0.5.
        let selection: Vec<_> = (0..4)
            .map(|i| question(&format!("q{i}"), QuestionType::Multiple, BloomLevel::Analysis))
            .collect();
        let outcome = rule.evaluate(&selection, &ctx());
        assert!(!outcome.passed);
        assert!(outcome.message.contains("Knowledge"));
        assert!(outcome.message.contains("Evaluation"));
    }

    #[test]
    fn bloom_distribution_within_tolerance_passes() {
        let mut target = BTreeMap::new();
        target.insert(BloomLevel::Knowledge, 0.5);
        let rule = BloomDistributionRule::new(target);

        // 2 of 4 Knowledge: exactly on target.
        let selection = vec![
            question("q1", QuestionType::Multiple, BloomLevel::Knowledge),
            question("q2", QuestionType::Fill, BloomLevel::Knowledge),
            question("q3", QuestionType::Multiple, BloomLevel::Analysis),
            question("q4", QuestionType::Fill, BloomLevel::Synthesis),
        ];
        assert!(rule.evaluate(&selection, &ctx()).passed);
    }

    #[test]
    fn time_frame_scenario_from_unified_budget() {
        // 50 Evaluation-level multiple choice: 50 x 2.0 x 3.0 = 300 minutes.
        let selection: Vec<_> = (0..50)
            .map(|i| {
                question(
                    &format!("q{i}"),
                    QuestionType::Multiple,
                    BloomLevel::Evaluation,
                )
            })
            .collect();

        let generous = TimeFrameRule::new(150).with_margin(0.90);
        assert!(generous.evaluate(&selection, &ctx()).passed);

        let tight = TimeFrameRule::new(1).with_margin(0.90);
        let outcome = tight.evaluate(&selection, &ctx());
        assert!(!outcome.passed);
        assert!(outcome.message.contains("300min"));
    }

    #[test]
    fn estimated_minutes_uses_both_lookup_tables() {
        let selection = vec![
            question("q1", QuestionType::Multiple, BloomLevel::Knowledge), // 2.0
            question("q2", QuestionType::Fill, BloomLevel::Comprehension), // 3.0
            question("q3", QuestionType::TrueFalse, BloomLevel::Evaluation), // 3.0
        ];
        assert!((estimated_minutes(&selection) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn progression_passes_sorted_and_single() {
        let rule = DifficultyProgressionRule;
        let sorted = vec![
            question("q1", QuestionType::Multiple, BloomLevel::Knowledge),
            question("q2", QuestionType::Fill, BloomLevel::Application),
            question("q3", QuestionType::Multiple, BloomLevel::Evaluation),
        ];
        assert!(rule.evaluate(&sorted, &ctx()).passed);

        let single = vec![question("q1", QuestionType::Fill, BloomLevel::Evaluation)];
        assert!(rule.evaluate(&single, &ctx()).passed);
    }

    #[test]
    fn progression_fails_mostly_decreasing() {
        let rule = DifficultyProgressionRule;
        let descending = vec![
            question("q1", QuestionType::Multiple, BloomLevel::Evaluation),
            question("q2", QuestionType::Fill, BloomLevel::Synthesis),
            question("q3", QuestionType::Multiple, BloomLevel::Analysis),
            question("q4", QuestionType::Fill, BloomLevel::Knowledge),
        ];
        let outcome = rule.evaluate(&descending, &ctx());
        assert!(!outcome.passed);
        assert!(outcome.message.contains("0%"));
    }

    #[test]
    fn unified_rule_set_has_the_four_checked_rules() {
        let rules = unified_rule_set(150);
        let names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "no-duplicate",
                "question-type-balance",
                "time-frame",
                "difficulty-progression"
            ]
        );
    }
}
