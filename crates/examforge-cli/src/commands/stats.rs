//! The `examforge stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examforge_core::report::Assessment;

pub fn execute(assessment_path: PathBuf) -> Result<()> {
    let assessment = Assessment::load_json(&assessment_path)?;
    let stats = &assessment.statistics;

    println!("Assessment: {}", assessment.metadata.id);
    println!(
        "{} questions, {} marks, created {}",
        assessment.metadata.total_questions,
        assessment.metadata.total_marks,
        assessment.metadata.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "Estimated duration: {:.2} minutes ({:.2} hours)\n",
        stats.estimated_duration_minutes, stats.estimated_duration_hours
    );

    let mut bloom_table = Table::new();
    bloom_table.set_header(vec!["Bloom level", "Count", "Share"]);
    for (level, count) in &stats.bloom_distribution {
        let share = stats.bloom_percentage.get(level).copied().unwrap_or(0.0);
        bloom_table.add_row(vec![
            Cell::new(level),
            Cell::new(count),
            Cell::new(format!("{share:.2}%")),
        ]);
    }
    println!("{bloom_table}\n");

    let mut type_table = Table::new();
    type_table.set_header(vec!["Question type", "Count", "Share"]);
    for (kind, count) in &stats.type_distribution {
        let share = stats.type_percentage.get(kind).copied().unwrap_or(0.0);
        type_table.add_row(vec![
            Cell::new(kind),
            Cell::new(count),
            Cell::new(format!("{share:.2}%")),
        ]);
    }
    println!("{type_table}");

    Ok(())
}
