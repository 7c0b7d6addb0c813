//! End-to-end pipeline tests: bank on disk → generate → inspect the
//! serialized assessment document.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const BLOOM_ORDER: [&str; 6] = [
    "Knowledge",
    "Comprehension",
    "Application",
    "Analysis",
    "Synthesis",
    "Evaluation",
];

fn examforge() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("examforge").unwrap()
}

/// Write a chapter bank file with `size` distinct questions cycling through
/// all types and bloom levels.
fn write_chapter(dir: &Path, chapter_id: &str, size: usize) {
    let types = ["multiple", "fill", "truefalse"];
    let records: Vec<serde_json::Value> = (0..size)
        .map(|i| {
            serde_json::json!({
                "question": format!("{chapter_id} question {i}"),
                "type": types[i % types.len()],
                "bloom": BLOOM_ORDER[i % BLOOM_ORDER.len()],
                "answer": format!("answer {i}"),
            })
        })
        .collect();
    std::fs::write(
        dir.join(format!("{chapter_id}.json")),
        serde_json::to_string_pretty(&records).unwrap(),
    )
    .unwrap();
}

fn make_bank(root: &Path) -> std::path::PathBuf {
    let bank_dir = root.join("bank");
    std::fs::create_dir_all(&bank_dir).unwrap();
    write_chapter(&bank_dir, "chapter1", 30);
    write_chapter(&bank_dir, "chapter2", 25);
    write_chapter(&bank_dir, "chapter3", 15);
    bank_dir
}

fn bloom_ordinal(name: &str) -> usize {
    BLOOM_ORDER.iter().position(|&n| n == name).unwrap()
}

#[test]
fn generate_produces_consistent_document() {
    let dir = TempDir::new().unwrap();
    let bank_dir = make_bank(dir.path());
    let out = dir.path().join("out");

    examforge()
        .arg("generate")
        .arg("--bank")
        .arg(&bank_dir)
        .arg("--seed")
        .arg("7")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Assessment saved to"));

    let content = std::fs::read_to_string(out.join("summative_assessment.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

    // Default syllabus requests 20 + 18 + 12 = 50 questions.
    assert_eq!(doc["metadata"]["total_questions"], 50);
    assert_eq!(doc["metadata"]["total_marks"], 50);
    assert_eq!(doc["metadata"]["timeframe_hours"], 150);
    assert_eq!(
        doc["metadata"]["title"],
        "Comprehensive Summative Assessment"
    );

    let questions = doc["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 50);

    // Globally sorted by bloom ordinal.
    let ordinals: Vec<usize> = questions
        .iter()
        .map(|q| bloom_ordinal(q["bloom"].as_str().unwrap()))
        .collect();
    assert!(ordinals.windows(2).all(|pair| pair[0] <= pair[1]));

    // Breakdown counts agree with the merged list.
    let breakdown = doc["chapter_breakdown"].as_object().unwrap();
    let breakdown_sum: u64 = breakdown
        .values()
        .map(|c| c["count"].as_u64().unwrap())
        .sum();
    assert_eq!(breakdown_sum, 50);

    // Percentages sum to 100 within rounding tolerance.
    let bloom_sum: f64 = doc["statistics"]["bloom_percentage"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((bloom_sum - 100.0).abs() <= 0.1, "bloom sum {bloom_sum}");
}

#[test]
fn generate_is_deterministic_for_a_fixed_seed() {
    let dir = TempDir::new().unwrap();
    let bank_dir = make_bank(dir.path());

    for out in ["out1", "out2"] {
        examforge()
            .arg("generate")
            .arg("--bank")
            .arg(&bank_dir)
            .arg("--seed")
            .arg("42")
            .arg("--output")
            .arg(dir.path().join(out))
            .assert()
            .success();
    }

    let load = |out: &str| -> serde_json::Value {
        let content =
            std::fs::read_to_string(dir.path().join(out).join("summative_assessment.json"))
                .unwrap();
        serde_json::from_str(&content).unwrap()
    };

    let first = load("out1");
    let second = load("out2");
    // Timestamps differ between runs; the selected questions must not.
    assert_eq!(first["questions"], second["questions"]);
    assert_eq!(first["chapter_breakdown"], second["chapter_breakdown"]);
}

#[test]
fn generate_all_formats_writes_reports() {
    let dir = TempDir::new().unwrap();
    let bank_dir = make_bank(dir.path());
    let out = dir.path().join("out");

    examforge()
        .arg("generate")
        .arg("--bank")
        .arg(&bank_dir)
        .arg("--seed")
        .arg("7")
        .arg("--output")
        .arg(&out)
        .arg("--format")
        .arg("all")
        .assert()
        .success();

    assert!(out.join("summative_assessment.json").exists());
    let text = std::fs::read_to_string(out.join("assessment_report.txt")).unwrap();
    assert!(text.contains("UNIFIED SUMMATIVE ASSESSMENT REPORT"));
    let md = std::fs::read_to_string(out.join("assessment_summary.md")).unwrap();
    assert!(md.contains("## Bloom distribution"));
}

#[test]
fn generate_with_empty_syllabus_emits_error_document() {
    let dir = TempDir::new().unwrap();
    let bank_dir = make_bank(dir.path());
    let syllabus_path = dir.path().join("empty.toml");
    std::fs::write(&syllabus_path, "[syllabus]\n").unwrap();

    examforge()
        .arg("generate")
        .arg("--bank")
        .arg(&bank_dir)
        .arg("--syllabus")
        .arg(&syllabus_path)
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Assessment Generation Error"))
        .stdout(predicate::str::contains("syllabus has no chapters"));
}

#[test]
fn generate_survives_missing_chapter_files() {
    let dir = TempDir::new().unwrap();
    let bank_dir = dir.path().join("bank");
    std::fs::create_dir_all(&bank_dir).unwrap();
    // Only chapter1 exists; chapter2 and chapter3 sources are missing.
    write_chapter(&bank_dir, "chapter1", 30);
    let out = dir.path().join("out");

    examforge()
        .arg("generate")
        .arg("--bank")
        .arg(&bank_dir)
        .arg("--seed")
        .arg("7")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(out.join("summative_assessment.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(doc["metadata"]["total_questions"], 20);
    let breakdown = doc["chapter_breakdown"].as_object().unwrap();
    assert!(breakdown.contains_key("chapter1"));
    assert!(!breakdown.contains_key("chapter2"));
    // Metadata still lists every syllabus chapter.
    let included = doc["metadata"]["chapters_included"].as_array().unwrap();
    assert_eq!(included.len(), 3);
}

#[test]
fn formative_quiz_end_to_end() {
    let dir = TempDir::new().unwrap();
    let bank_dir = make_bank(dir.path());
    let out = dir.path().join("out");

    examforge()
        .arg("generate")
        .arg("--bank")
        .arg(&bank_dir)
        .arg("--seed")
        .arg("7")
        .arg("--output")
        .arg(&out)
        .arg("--formative")
        .arg("chapter1")
        .assert()
        .success()
        .stderr(predicate::str::contains("Formative quiz saved to"));

    let content = std::fs::read_to_string(out.join("formative_chapter1.json")).unwrap();
    let quiz: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(quiz["chapter_id"], "chapter1");
    // 7 multiple + 4 fill + 4 true-false from a 30-question pool.
    assert_eq!(quiz["questions"].as_array().unwrap().len(), 15);
}

#[test]
fn stats_reads_generated_assessment() {
    let dir = TempDir::new().unwrap();
    let bank_dir = make_bank(dir.path());
    let out = dir.path().join("out");

    examforge()
        .arg("generate")
        .arg("--bank")
        .arg(&bank_dir)
        .arg("--seed")
        .arg("7")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    examforge()
        .arg("stats")
        .arg("--assessment")
        .arg(out.join("summative_assessment.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("50 questions"))
        .stdout(predicate::str::contains("Bloom level"));
}
