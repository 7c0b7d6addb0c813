//! Plain-text assessment report.

use std::path::Path;

use anyhow::{Context, Result};

use examforge_core::report::Assessment;

/// Render the assessment as a plain-text report.
pub fn generate_text(assessment: &Assessment) -> String {
    let mut report = String::new();
    let rule = "=".repeat(70);

    report.push_str(&format!("{rule}\n"));
    report.push_str("UNIFIED SUMMATIVE ASSESSMENT REPORT\n");
    report.push_str(&format!("{rule}\n\n"));

    let meta = &assessment.metadata;
    report.push_str(&format!("Assessment ID: {}\n", meta.id));
    report.push_str(&format!(
        "Created: {}\n",
        meta.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str(&format!("Type: {}\n\n", meta.assessment_type));

    report.push_str("OVERVIEW\n");
    report.push_str(&format!("  Total Questions: {}\n", meta.total_questions));
    report.push_str(&format!("  Total Marks: {}\n", meta.total_marks));
    report.push_str(&format!("  Time Frame: {} hours\n", meta.timeframe_hours));
    report.push_str(&format!(
        "  Estimated Duration: {:.2} hours ({:.2} minutes)\n\n",
        assessment.statistics.estimated_duration_hours,
        assessment.statistics.estimated_duration_minutes
    ));

    report.push_str("CHAPTER BREAKDOWN\n");
    for (chapter_id, summary) in &assessment.chapter_breakdown {
        report.push_str(&format!(
            "  {chapter_id}: {} questions",
            summary.count
        ));
        if summary.diagnostics.violation_count > 0 {
            report.push_str(&format!(
                " ({} rule violation(s) after {} attempts)",
                summary.diagnostics.violation_count, summary.diagnostics.attempts_used
            ));
        }
        for warning in &summary.diagnostics.warnings {
            report.push_str(&format!(" [warning: {warning}]"));
        }
        report.push('\n');
    }
    report.push('\n');

    report.push_str("BLOOM DISTRIBUTION\n");
    for (level, percentage) in &assessment.statistics.bloom_percentage {
        let count = assessment
            .statistics
            .bloom_distribution
            .get(level)
            .copied()
            .unwrap_or(0);
        report.push_str(&format!("  {level}: {count} ({percentage:.2}%)\n"));
    }
    report.push('\n');

    report.push_str("QUESTION TYPES\n");
    for (kind, percentage) in &assessment.statistics.type_percentage {
        let count = assessment
            .statistics
            .type_distribution
            .get(kind)
            .copied()
            .unwrap_or(0);
        report.push_str(&format!("  {kind}: {count} ({percentage:.2}%)\n"));
    }

    report
}

/// Write the text report to a file, creating parent directories.
pub fn write_text_report(assessment: &Assessment, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_text(assessment))
        .with_context(|| format!("failed to write text report to {}", path.display()))?;
    Ok(())
}
