//! The `examforge generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use examforge_core::engine::{AssessmentGenerator, GeneratorConfig};
use examforge_core::model::Syllabus;
use examforge_core::parser;
use examforge_core::report::{error_document, Assessment};
use examforge_core::results::FormativeCounts;
use examforge_report::{write_markdown_report, write_text_report};

pub fn execute(
    bank_dir: PathBuf,
    syllabus_path: Option<PathBuf>,
    output: PathBuf,
    seed: Option<u64>,
    format: String,
    formative: Option<String>,
) -> Result<()> {
    let syllabus = match &syllabus_path {
        Some(path) => parser::parse_syllabus(path)?,
        None => Syllabus::default(),
    };

    for warning in parser::validate_syllabus(&syllabus) {
        let prefix = warning
            .chapter_id
            .as_deref()
            .map(|id| format!("[{id}] "))
            .unwrap_or_default();
        eprintln!("Syllabus warning: {prefix}{}", warning.message);
    }

    let bank = {
        let chapter_ids: Vec<&str> = syllabus
            .chapters
            .iter()
            .map(|c| c.chapter_id.as_str())
            .collect();
        parser::load_question_bank(&bank_dir, chapter_ids)
    };
    eprintln!(
        "Loaded {} questions across {} chapters",
        bank.total_questions(),
        syllabus.chapters.len()
    );

    let mut generator = AssessmentGenerator::with_config(
        syllabus,
        GeneratorConfig {
            seed,
            ..Default::default()
        },
    );

    // Formative mode: one chapter, per-type draw, no rule checking.
    if let Some(chapter_id) = formative {
        let quiz = generator.generate_formative(&chapter_id, &bank, FormativeCounts::default());
        let path = output.join(format!("formative_{chapter_id}.json"));
        std::fs::create_dir_all(&output)?;
        std::fs::write(&path, serde_json::to_string_pretty(&quiz)?)
            .with_context(|| format!("failed to write quiz to {}", path.display()))?;
        eprintln!(
            "Formative quiz saved to: {} ({} questions)",
            path.display(),
            quiz.questions.len()
        );
        return Ok(());
    }

    let assessment = match generator.generate(&bank) {
        Ok(assessment) => assessment,
        Err(e) => {
            // Emit the error-shaped document a transport layer would return.
            let doc = error_document(&e, Utc::now());
            println!("{}", serde_json::to_string_pretty(&doc)?);
            anyhow::bail!("assessment generation failed: {e}");
        }
    };

    print_summary(&assessment);

    std::fs::create_dir_all(&output)?;
    let formats: Vec<&str> = if format == "all" {
        vec!["json", "text", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join("summative_assessment.json");
                assessment.save_json(&path)?;
                eprintln!("Assessment saved to: {}", path.display());
            }
            "text" => {
                let path = output.join("assessment_report.txt");
                write_text_report(&assessment, &path)?;
                eprintln!("Text report: {}", path.display());
            }
            "markdown" => {
                let path = output.join("assessment_summary.md");
                write_markdown_report(&assessment, &path)?;
                eprintln!("Markdown summary: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(assessment: &Assessment) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Chapter",
        "Questions",
        "Attempts",
        "Violations",
        "Warnings",
    ]);

    for (chapter_id, summary) in &assessment.chapter_breakdown {
        table.add_row(vec![
            Cell::new(chapter_id),
            Cell::new(summary.count),
            Cell::new(summary.diagnostics.attempts_used),
            Cell::new(summary.diagnostics.violation_count),
            Cell::new(summary.diagnostics.warnings.join("; ")),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "Total: {} questions, estimated {:.2} minutes ({:.2} hours)",
        assessment.metadata.total_questions,
        assessment.statistics.estimated_duration_minutes,
        assessment.statistics.estimated_duration_hours
    );
}
