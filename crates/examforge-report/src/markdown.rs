//! Markdown assessment summary.

use std::path::Path;

use anyhow::{Context, Result};

use examforge_core::report::Assessment;

/// Render the assessment summary as Markdown.
pub fn generate_markdown(assessment: &Assessment) -> String {
    let mut md = String::new();
    let meta = &assessment.metadata;

    md.push_str(&format!("# {}\n\n", meta.title));
    md.push_str(&format!(
        "**{} questions** | {} marks | created {}\n\n",
        meta.total_questions,
        meta.total_marks,
        meta.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "Estimated duration: {:.2} hours ({:.2} minutes)\n\n",
        assessment.statistics.estimated_duration_hours,
        assessment.statistics.estimated_duration_minutes
    ));

    md.push_str("## Chapters\n\n");
    md.push_str("| Chapter | Questions | Attempts | Violations | Warnings |\n");
    md.push_str("|---------|-----------|----------|------------|----------|\n");
    for (chapter_id, summary) in &assessment.chapter_breakdown {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            chapter_id,
            summary.count,
            summary.diagnostics.attempts_used,
            summary.diagnostics.violation_count,
            summary.diagnostics.warnings.join("; ")
        ));
    }
    md.push('\n');

    md.push_str("## Bloom distribution\n\n");
    md.push_str("| Level | Count | Share |\n");
    md.push_str("|-------|-------|-------|\n");
    for (level, count) in &assessment.statistics.bloom_distribution {
        let percentage = assessment
            .statistics
            .bloom_percentage
            .get(level)
            .copied()
            .unwrap_or(0.0);
        md.push_str(&format!("| {level} | {count} | {percentage:.2}% |\n"));
    }
    md.push('\n');

    md.push_str("## Question types\n\n");
    md.push_str("| Type | Count | Share |\n");
    md.push_str("|------|-------|-------|\n");
    for (kind, count) in &assessment.statistics.type_distribution {
        let percentage = assessment
            .statistics
            .type_percentage
            .get(kind)
            .copied()
            .unwrap_or(0.0);
        md.push_str(&format!("| {kind} | {count} | {percentage:.2}% |\n"));
    }

    md
}

/// Write the Markdown summary to a file, creating parent directories.
pub fn write_markdown_report(assessment: &Assessment, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_markdown(assessment))
        .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use examforge_core::engine::{AssessmentGenerator, GeneratorConfig};
    use examforge_core::model::{BloomLevel, Question, QuestionBank, QuestionType, Syllabus};

    fn make_assessment() -> Assessment {
        let kinds = [
            QuestionType::Multiple,
            QuestionType::Fill,
            QuestionType::TrueFalse,
        ];
        let questions: Vec<Question> = (0..24)
            .map(|i| Question {
                text: format!("q{i}"),
                kind: kinds[i % kinds.len()],
                bloom: BloomLevel::ALL[i % BloomLevel::ALL.len()],
                answer: serde_json::json!("a"),
                choices: None,
            })
            .collect();
        let mut bank = QuestionBank::new();
        bank.insert("chapter1", questions);

        let mut syllabus = Syllabus::default();
        syllabus.chapters.truncate(1);
        syllabus.chapters[0].question_count = 9;

        let mut generator = AssessmentGenerator::with_config(
            syllabus,
            GeneratorConfig {
                seed: Some(2),
                created_at: Some("2026-01-01T00:00:00Z".parse().unwrap()),
                ..Default::default()
            },
        );
        generator.generate(&bank).unwrap()
    }

    #[test]
    fn markdown_contains_tables() {
        let assessment = make_assessment();
        let md = generate_markdown(&assessment);

        assert!(md.contains("# Comprehensive Summative Assessment"));
        assert!(md.contains("| Chapter | Questions |"));
        assert!(md.contains("| Level | Count | Share |"));
        assert!(md.contains("chapter1"));
    }

    #[test]
    fn write_markdown_report_roundtrip() {
        let assessment = make_assessment();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");

        write_markdown_report(&assessment, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("## Bloom distribution"));
    }
}
