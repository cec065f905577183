mod solutions;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};

pub use solutions::day16;
pub use solutions::day16::Pruning;

/// Computes both parts of a day from its raw puzzle input.
pub type Solution = fn(&str, &Options) -> Result<(u64, u64)>;

pub const ALL_SOLUTIONS: &[(usize, Solution)] = &[(16, day16::solve)];

/// Knobs shared by every solution run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub pruning: Pruning,
    /// Abort a solution once it has been running for this long.
    pub timeout: Option<Duration>,
}

pub fn load_input(dir: &Path, name: &str) -> Result<String> {
    let path: PathBuf = dir.join(name);
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn default_input(n: usize) -> Result<String> {
    load_input(Path::new("inputs"), &format!("{}.txt", n))
}
