use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::model::DataFiles;
use super::token;
use crate::util::fs;

/// Chance that a line repeats the token emitted just before it.
pub const DUPLICATE_PROBABILITY: f64 = 0.2;

/// Lines and duplicates produced by one generation pass, before shuffling.
#[derive(Debug, Clone, Default)]
pub struct Generated {
    /// Every emitted line in generation order.
    pub lines: Vec<String>,
    /// Lines emitted a second time, in emission order.
    pub dupes: Vec<String>,
}

/// Emit `n` line records, some of them repeated once.
///
/// A repeat clears the "previous" slot, so a token can never be emitted a
/// third time.
pub fn generate_lines<R: Rng + ?Sized>(rng: &mut R, n: u64) -> Generated {
    let mut out = Generated::default();
    let mut prev: Option<String> = None;

    for _ in 0..n {
        let line = match prev.take() {
            Some(p) if rng.gen_bool(DUPLICATE_PROBABILITY) => {
                out.dupes.push(p.clone());
                p
            }
            _ => {
                let fresh = token::random_line(rng);
                prev = Some(fresh.clone());
                fresh
            }
        };
        out.lines.push(line);
    }

    out
}

/// A random permutation of `0..n`.
pub fn shuffled_indices<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

/// Generate the input and solution files for `n` lines.
///
/// Returns the number of duplicates written to the solution file.
pub fn write_test_data<R: Rng + ?Sized>(
    rng: &mut R,
    files: &DataFiles,
    n: u64,
) -> Result<usize> {
    let Generated { lines, mut dupes } = generate_lines(rng, n);
    debug!(lines = lines.len(), dupes = dupes.len(), "generated lines");

    let input = files.input();
    let order = shuffled_indices(rng, lines.len());
    fs::write_all_lines(&input, order.iter().map(|&i| lines[i].as_str()))?;
    info!(path = %input.display(), "wrote input file");

    dupes.sort();
    let solution = files.solution();
    fs::write_all_lines(&solution, &dupes)?;
    info!(path = %solution.display(), "wrote solution file");

    Ok(dupes.len())
}
