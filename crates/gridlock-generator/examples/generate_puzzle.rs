//! Example demonstrating puzzle generation.
//!
//! Generates one puzzle per invocation and prints the problem, its
//! solution, the given-cell count, and the seed needed to reproduce it.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p gridlock-generator --example generate_puzzle
//! ```
//!
//! Pick a difficulty and a seed:
//!
//! ```sh
//! cargo run -p gridlock-generator --example generate_puzzle -- \
//!     --difficulty expert --seed 42
//! ```
//!
//! Carve/retry diagnostics are logged at debug level:
//!
//! ```sh
//! RUST_LOG=debug cargo run -p gridlock-generator --example generate_puzzle
//! ```

use clap::{Parser, ValueEnum};
use gridlock_core::Position;
use gridlock_generator::{Difficulty, GeneratedPuzzle, PuzzleGenerator};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Difficulty band to carve for.
    #[arg(long, value_name = "LEVEL", default_value = "medium")]
    difficulty: DifficultyArg,

    /// Seed for reproducible generation; drawn from entropy if omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut generator = match args.seed {
        Some(seed) => PuzzleGenerator::from_seed(seed),
        None => PuzzleGenerator::new(),
    };
    let puzzle = generator.generate(args.difficulty.into());
    print_puzzle(&puzzle);
}

fn print_puzzle(puzzle: &GeneratedPuzzle) {
    println!("Difficulty: {}", puzzle.difficulty);
    println!("Givens:     {}", puzzle.problem.filled_cell_count());
    println!("Seed:       {}", puzzle.seed);
    println!();
    println!("Problem:");
    print_grid_rows(&puzzle.problem.to_string());
    println!();
    println!("Solution:");
    print_grid_rows(&puzzle.solution.to_string());
}

fn print_grid_rows(cells: &str) {
    for y in 0..9 {
        let row: String = (0..9)
            .map(|x| {
                let index = Position::new(x, y).cell_index();
                cells.as_bytes()[index] as char
            })
            .collect();
        println!("  {row}");
    }
}
