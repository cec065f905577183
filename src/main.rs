use std::{
    fmt::Display,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use aoc2022::{load_input, Options, Pruning, Solution, ALL_SOLUTIONS};

/// Runs every implemented Advent of Code 2022 day.
#[derive(Parser)]
#[command(name = "aoc2022")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding one `<day>.txt` input per day.
    #[arg(long, default_value = "inputs")]
    inputs: PathBuf,
    /// Give up on a day after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    #[arg(long, value_enum, default_value_t = PruningArg::Exact)]
    pruning: PruningArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum PruningArg {
    Exact,
    /// Faster, may under-report.
    VisitedSet,
}

impl From<PruningArg> for Pruning {
    fn from(arg: PruningArg) -> Self {
        match arg {
            PruningArg::Exact => Pruning::Exact,
            PruningArg::VisitedSet => Pruning::VisitedSet,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = Options {
        pruning: cli.pruning.into(),
        timeout: cli.timeout_ms.map(Duration::from_millis),
    };

    let mut total = Duration::default();
    for &(n, day) in ALL_SOLUTIONS {
        total += execute_day(n, day, &cli.inputs, &options)?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day(n: usize, f: Solution, inputs: &Path, options: &Options) -> Result<Duration> {
    println!("Day {}:", n);
    let input = load_input(inputs, &format!("{}.txt", n))?;

    let start = Instant::now();
    let (part1, part2) = f(&input, options)?;
    let elapsed = start.elapsed();

    print_part(1, part1);
    print_part(2, part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}

fn print_part(n: usize, answer: impl Display) {
    println!("  Part {}: {}", n, answer);
}
