//! # Riddler CLI
//!
//! Prints a batch of template puzzles as text or JSON. Runs fully offline.
//!
//! ## Usage
//! ```bash
//! # Three medium general puzzles
//! riddler
//!
//! # Five hard math puzzles as JSON, reproducible
//! riddler --count 5 --difficulty hard --category math --format json --seed 7
//! ```

use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use riddler_common::constants::DEFAULT_CLI_COUNT;
use riddler_common::render::{OutputFormat, format_output};
use riddler_common::{PuzzleError, TemplateStore};

/// Riddler offline puzzle generator
#[derive(Parser, Debug)]
#[command(name = "riddler")]
#[command(author, version, about = "Generate riddles and puzzles from templates", long_about = None)]
struct Args {
    /// Number of puzzles (1-100)
    #[arg(short = 'n', long, default_value_t = DEFAULT_CLI_COUNT as i64, allow_negative_numbers = true)]
    count: i64,

    /// Difficulty: easy, medium, hard
    #[arg(short, long, default_value = "medium")]
    difficulty: String,

    /// Category: general, logic, math, wordplay
    #[arg(short, long, default_value = "general")]
    category: String,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Seed for a reproducible selection
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            println!();
            println!("🧩 Puzzle Generator – Demo Run");
            println!("{}", "─".repeat(48));
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e.message());
            ExitCode::FAILURE
        }
    }
}

/// Generate and render puzzles for the parsed arguments
fn run(args: &Args) -> Result<String, PuzzleError> {
    let format: OutputFormat = args.format.parse()?;
    let store = TemplateStore::builtin();

    let puzzles = match args.seed {
        Some(seed) => store.generate(
            args.count,
            &args.difficulty,
            &args.category,
            &mut StdRng::seed_from_u64(seed),
        )?,
        None => store.generate(
            args.count,
            &args.difficulty,
            &args.category,
            &mut rand::rng(),
        )?,
    };

    format_output(&puzzles, format)
}
