//! The `examforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create syllabus.toml
    if std::path::Path::new("syllabus.toml").exists() {
        println!("syllabus.toml already exists, skipping.");
    } else {
        std::fs::write("syllabus.toml", STARTER_SYLLABUS)?;
        println!("Created syllabus.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("question-bank")?;
    let example_path = std::path::Path::new("question-bank/chapter1.json");
    if example_path.exists() {
        println!("question-bank/chapter1.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CHAPTER)?;
        println!("Created question-bank/chapter1.json");
    }

    println!("\nNext steps:");
    println!("  1. Add more questions to question-bank/<chapter_id>.json");
    println!("  2. Run: examforge validate --syllabus syllabus.toml --bank question-bank");
    println!("  3. Run: examforge generate --bank question-bank --syllabus syllabus.toml");

    Ok(())
}

const STARTER_SYLLABUS: &str = r#"# examforge syllabus

[syllabus]
title = "Comprehensive Summative Assessment"
timeframe_hours = 150
estimated_duration_hours = 2.5

[[chapters]]
chapter_id = "chapter1"
question_count = 20
time_frame_hours = 50
percentage_of_exam = 25.25

[chapters.bloom_distribution]
Knowledge = 0.30
Comprehension = 0.25
Application = 0.20
Analysis = 0.15
Synthesis = 0.05
Evaluation = 0.05

[[chapters]]
chapter_id = "chapter2"
question_count = 18
time_frame_hours = 50
percentage_of_exam = 20.20

[chapters.bloom_distribution]
Knowledge = 0.35
Comprehension = 0.28
Application = 0.18
Analysis = 0.12
Synthesis = 0.04
Evaluation = 0.03

[[chapters]]
chapter_id = "chapter3"
question_count = 12
time_frame_hours = 50
percentage_of_exam = 15.15

[chapters.bloom_distribution]
Knowledge = 0.25
Comprehension = 0.20
Application = 0.15
Analysis = 0.25
Synthesis = 0.10
Evaluation = 0.05
"#;

const EXAMPLE_CHAPTER: &str = r#"[
  {
    "question": "Which component executes program instructions?",
    "type": "multiple",
    "bloom": "Knowledge",
    "answer": "CPU",
    "choices": ["CPU", "PSU", "RAM", "GPU"]
  },
  {
    "question": "Which connector supplies power to a SATA drive?",
    "type": "multiple",
    "bloom": "Knowledge",
    "answer": "SATA power connector",
    "choices": ["Molex", "SATA power connector", "PCIe 8-pin", "EPS 4-pin"]
  },
  {
    "question": "Explain why thermal paste is applied between the CPU and its heatsink.",
    "type": "fill",
    "bloom": "Comprehension",
    "answer": "It fills microscopic gaps so heat transfers efficiently from the CPU to the heatsink."
  },
  {
    "question": "RAM retains its contents after the computer powers off.",
    "type": "truefalse",
    "bloom": "Comprehension",
    "answer": false
  },
  {
    "question": "A standoff prevents the motherboard from contacting the case directly.",
    "type": "truefalse",
    "bloom": "Knowledge",
    "answer": true
  },
  {
    "question": "Describe the steps to install a DIMM module in the correct slot.",
    "type": "fill",
    "bloom": "Application",
    "answer": "Open the retention clips, align the module notch with the slot key, press down evenly until the clips click."
  },
  {
    "question": "Which tool setting is safest when working inside a powered-off PC?",
    "type": "multiple",
    "bloom": "Application",
    "answer": "Wearing a grounded anti-static wrist strap",
    "choices": [
      "Wearing a grounded anti-static wrist strap",
      "Working on carpet",
      "Leaving the PSU switched on",
      "Using a magnetic screwdriver near drives"
    ]
  },
  {
    "question": "A system boots but shows no display. Compare the likelihood of GPU seating versus monitor cable faults and justify the order you would test them.",
    "type": "fill",
    "bloom": "Analysis",
    "answer": "Check the monitor cable first since it is external and fastest to verify, then reseat the GPU."
  },
  {
    "question": "The front-panel connectors can be attached in any orientation without consequence.",
    "type": "truefalse",
    "bloom": "Analysis",
    "answer": false
  },
  {
    "question": "Design a minimal parts list for an office PC build and explain each choice.",
    "type": "fill",
    "bloom": "Synthesis",
    "answer": "CPU with integrated graphics, compatible motherboard, one DIMM, SSD, 450W PSU, case; each part covers a required role without overspending."
  },
  {
    "question": "Evaluate whether liquid cooling is justified for a standard office workstation.",
    "type": "fill",
    "bloom": "Evaluation",
    "answer": "Not justified; the thermal load is low and air cooling is cheaper and more reliable."
  },
  {
    "question": "Which of these is the first component to install on most motherboards?",
    "type": "multiple",
    "bloom": "Comprehension",
    "answer": "CPU",
    "choices": ["CPU", "GPU", "Case fans", "Storage drives"]
  }
]
"#;
