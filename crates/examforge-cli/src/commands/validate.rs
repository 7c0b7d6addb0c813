//! The `examforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examforge_core::model::Syllabus;
use examforge_core::parser;

pub fn execute(syllabus_path: Option<PathBuf>, bank_dir: Option<PathBuf>) -> Result<()> {
    let syllabus = match &syllabus_path {
        Some(path) => parser::parse_syllabus(path)?,
        None => Syllabus::default(),
    };

    println!(
        "Syllabus: {} ({} chapters)",
        syllabus.title,
        syllabus.chapters.len()
    );

    let warnings = parser::validate_syllabus(&syllabus);
    for w in &warnings {
        let prefix = w
            .chapter_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if let Some(dir) = &bank_dir {
        let bank = {
            let chapter_ids: Vec<&str> = syllabus
                .chapters
                .iter()
                .map(|c| c.chapter_id.as_str())
                .collect();
            parser::load_question_bank(dir, chapter_ids)
        };

        println!("\nBank coverage ({}):", dir.display());
        for chapter in &syllabus.chapters {
            let available = bank.pool(&chapter.chapter_id).len();
            let marker = if available < chapter.question_count {
                "  INSUFFICIENT"
            } else {
                ""
            };
            println!(
                "  {}: {available} available, {} requested{marker}",
                chapter.chapter_id, chapter.question_count
            );
        }
    }

    if warnings.is_empty() {
        println!("Syllabus valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
