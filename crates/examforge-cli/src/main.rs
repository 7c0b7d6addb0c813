//! examforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "examforge",
    version,
    about = "Rule-based summative assessment generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an assessment from a question bank
    Generate {
        /// Directory holding <chapter_id>.json bank files
        #[arg(long)]
        bank: PathBuf,

        /// Syllabus TOML file (built-in syllabus when omitted)
        #[arg(long)]
        syllabus: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "./examforge-out")]
        output: PathBuf,

        /// Seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: json, text, markdown, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Generate a formative quiz for one chapter instead of the
        /// unified assessment
        #[arg(long)]
        formative: Option<String>,
    },

    /// Validate a syllabus and optionally check bank coverage
    Validate {
        /// Syllabus TOML file (built-in syllabus when omitted)
        #[arg(long)]
        syllabus: Option<PathBuf>,

        /// Directory holding <chapter_id>.json bank files
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Print statistics for a saved assessment
    Stats {
        /// Assessment JSON produced by `generate`
        #[arg(long)]
        assessment: PathBuf,
    },

    /// Create a starter syllabus and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            bank,
            syllabus,
            output,
            seed,
            format,
            formative,
        } => commands::generate::execute(bank, syllabus, output, seed, format, formative),
        Commands::Validate { syllabus, bank } => commands::validate::execute(syllabus, bank),
        Commands::Stats { assessment } => commands::stats::execute(assessment),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
